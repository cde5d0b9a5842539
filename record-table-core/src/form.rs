//! Edit form model: three text fields over a draft, validated on submit

use std::fmt;

use chrono::NaiveDate;

use crate::error::FormError;
use crate::record::{format_number, Draft, DATE_FORMAT};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Date,
    NumberValue,
}

impl FormField {
    pub const ALL: [FormField; 3] = [FormField::Name, FormField::Date, FormField::NumberValue];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Date => "Date",
            FormField::NumberValue => "Number",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Date => "YYYY-MM-DD",
            FormField::NumberValue => "Number",
        }
    }

    pub fn next(self) -> Self {
        match self {
            FormField::Name => FormField::Date,
            FormField::Date => FormField::NumberValue,
            FormField::NumberValue => FormField::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::Name => FormField::NumberValue,
            FormField::Date => FormField::Name,
            FormField::NumberValue => FormField::Date,
        }
    }

    pub fn is_last(self) -> bool {
        self == FormField::NumberValue
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw field values as typed by the user
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormInput {
    pub name: String,
    pub date: String,
    pub number_value: String,
}

/// Field values after validation
#[derive(Clone, Debug, PartialEq)]
pub struct ValidInput {
    pub name: String,
    pub date: String,
    pub number_value: f64,
}

impl FormInput {
    /// Check every field is present and well-formed.
    ///
    /// Surrounding whitespace is trimmed from date and number; the name is
    /// kept as typed but must not be blank.
    pub fn validate(&self) -> Result<ValidInput, FormError> {
        if self.name.trim().is_empty() {
            return Err(FormError::Required(FormField::Name));
        }

        let date = self.date.trim();
        if date.is_empty() {
            return Err(FormError::Required(FormField::Date));
        }
        let parsed = NaiveDate::parse_from_str(date, DATE_FORMAT)
            .map_err(|_| FormError::InvalidDate(date.to_string()))?;

        let number = self.number_value.trim();
        if number.is_empty() {
            return Err(FormError::Required(FormField::NumberValue));
        }
        let number_value = number
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .ok_or_else(|| FormError::InvalidNumber(number.to_string()))?;

        Ok(ValidInput {
            name: self.name.clone(),
            date: parsed.format(DATE_FORMAT).to_string(),
            number_value,
        })
    }
}

/// State of the open edit modal
#[derive(Clone, Debug, PartialEq)]
pub struct EditForm {
    original: Draft,
    input: FormInput,
    pub focus: FormField,
    /// Last rejected submission
    pub error: Option<FormError>,
}

impl EditForm {
    /// Form pre-filled from `draft`
    pub fn new(draft: Draft) -> Self {
        let input = FormInput {
            name: draft.name.clone(),
            date: draft.date.clone(),
            number_value: format_number(draft.number_value),
        };
        Self {
            original: draft,
            input,
            focus: FormField::Name,
            error: None,
        }
    }

    /// `true` when submitting will create a record
    pub fn is_new(&self) -> bool {
        self.original.existing_key().is_none()
    }

    pub fn original(&self) -> &Draft {
        &self.original
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.input.name,
            FormField::Date => &self.input.date,
            FormField::NumberValue => &self.input.number_value,
        }
    }

    pub fn set_value(&mut self, field: FormField, value: String) {
        let slot = match field {
            FormField::Name => &mut self.input.name,
            FormField::Date => &mut self.input.date,
            FormField::NumberValue => &mut self.input.number_value,
        };
        *slot = value;
        self.error = None;
    }

    /// Validate and produce the edited draft.
    ///
    /// Only name, date and number change; the original key (or its absence)
    /// is carried over.
    pub fn submit(&self) -> Result<Draft, FormError> {
        let valid = self.input.validate()?;
        Ok(Draft {
            name: valid.name,
            date: valid.date,
            number_value: valid.number_value,
            ..self.original.clone()
        })
    }
}
