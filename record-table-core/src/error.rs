//! Error types for the record store and the edit form

use thiserror::Error;

use crate::form::FormField;

/// Failures of [`RecordStore`](crate::RecordStore) operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("row index {index} is out of range for {len} records")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("record key must not be empty")]
    EmptyKey,

    #[error("duplicate record key {0:?}")]
    DuplicateKey(String),

    #[error("no numeric key left to assign")]
    KeySpaceExhausted,
}

/// Reasons a submitted form is rejected before it becomes a draft
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    Required(FormField),

    #[error("invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("invalid number {0:?}")]
    InvalidNumber(String),
}
