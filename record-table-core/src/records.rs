//! The record store: sole owner of the ordered record list

use std::collections::HashSet;

use crate::error::RecordError;
use crate::record::{Draft, Record};

/// Ordered, key-unique list of records
///
/// Order is insertion order. Sorting in the table is display-only and never
/// reorders the store.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from existing records, rejecting empty or repeated keys
    pub fn from_records(records: Vec<Record>) -> Result<Self, RecordError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if record.key.is_empty() {
                return Err(RecordError::EmptyKey);
            }
            if !seen.insert(record.key.as_str()) {
                return Err(RecordError::DuplicateKey(record.key.clone()));
            }
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.key == key)
    }

    /// Storage position of the record with `key`
    pub fn position(&self, key: &str) -> Option<usize> {
        self.records.iter().position(|r| r.key == key)
    }

    /// Remove the record at `index`. Remaining keys are left untouched.
    pub fn delete(&mut self, index: usize) -> Result<Record, RecordError> {
        if index >= self.records.len() {
            return Err(RecordError::IndexOutOfRange {
                index,
                len: self.records.len(),
            });
        }
        Ok(self.records.remove(index))
    }

    /// Replace the record whose key matches, keeping its position.
    ///
    /// Returns `false` (list unchanged) when the key is empty or unknown.
    pub fn update(&mut self, record: Record) -> bool {
        if record.key.is_empty() {
            return false;
        }
        match self.records.iter_mut().find(|r| r.key == record.key) {
            Some(slot) => {
                *slot = record;
                true
            }
            None => false,
        }
    }

    /// Append a draft under a freshly generated key. Any key on the draft is ignored.
    pub fn add(&mut self, draft: Draft) -> Result<&Record, RecordError> {
        let key = next_key(&self.records)?;
        self.records.push(draft.into_record(key));
        Ok(&self.records[self.records.len() - 1])
    }
}

/// One more than the largest numeric key.
///
/// Keys that are not unsigned integers are skipped; with no numeric key at
/// all the first key is `"1"`.
pub fn next_key(records: &[Record]) -> Result<String, RecordError> {
    let max = records
        .iter()
        .filter_map(|r| r.key.parse::<u64>().ok())
        .max();
    match max {
        None => Ok("1".to_string()),
        Some(max) => max
            .checked_add(1)
            .map(|k| k.to_string())
            .ok_or(RecordError::KeySpaceExhausted),
    }
}
