//! Record and Draft: the table's only entity and its editable form

use chrono::NaiveDate;
use serde::Deserialize;

/// Calendar date format used for `date` fields
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A stored row. `key` is unique and never empty inside a [`RecordStore`](crate::RecordStore).
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Record {
    pub key: String,
    pub name: String,
    pub date: String,
    #[serde(alias = "numberValue")]
    pub number_value: f64,
}

/// A record being created (`key == None`) or edited (`key == Some(..)`)
#[derive(Clone, Debug, PartialEq)]
pub struct Draft {
    pub key: Option<String>,
    pub name: String,
    pub date: String,
    pub number_value: f64,
}

impl Draft {
    /// Empty draft for the "Add" action, dated `today`
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            key: None,
            name: String::new(),
            date: today.format(DATE_FORMAT).to_string(),
            number_value: 0.0,
        }
    }

    /// Key if this draft edits an existing record. An empty key counts as none.
    pub fn existing_key(&self) -> Option<&str> {
        self.key.as_deref().filter(|k| !k.is_empty())
    }

    /// Attach a key, producing a full record
    pub fn into_record(self, key: String) -> Record {
        Record {
            key,
            name: self.name,
            date: self.date,
            number_value: self.number_value,
        }
    }
}

impl From<Record> for Draft {
    fn from(record: Record) -> Self {
        Self {
            key: Some(record.key),
            name: record.name,
            date: record.date,
            number_value: record.number_value,
        }
    }
}

/// Render a number the way cells and filters see it: `123`, `1.5`, `-0.25`
pub fn format_number(value: f64) -> String {
    format!("{}", value)
}

/// The four rows every session starts with
pub fn seed_records() -> Vec<Record> {
    [
        ("1", "John Brown", 123.0),
        ("2", "Joe Black", 321.0),
        ("3", "Jim Green", 456.0),
        ("4", "Jim Red", 789.0),
    ]
    .into_iter()
    .map(|(key, name, number_value)| Record {
        key: key.to_string(),
        name: name.to_string(),
        date: "2023-07-14".to_string(),
        number_value,
    })
    .collect()
}
