//! Core error types.
//!
//! Errors here indicate problems with our own inputs or configuration:
//! malformed years in the source facts, bad template registrations, empty
//! summary batches. A model answer that cannot be parsed is never an error;
//! it is recorded with `is_valid = false` on the evaluation record.

use thiserror::Error;

/// Errors raised by question generation and result aggregation.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A fact carried a year that is not a 1-4 digit number.
    #[error("invalid year {value:?}: expected a 1-4 digit number")]
    InvalidYear { value: String },

    /// A custom template was registered with the wrong number of `{}` slots
    /// for its question kind.
    #[error("invalid template for {kind}: expected {expected} placeholder(s), found {found}")]
    InvalidTemplateShape {
        kind: String,
        expected: usize,
        found: usize,
    },

    /// An empty record batch was summarized; the percentage would divide by
    /// zero. Callers must filter empty batches before summarizing.
    #[error("cannot summarize an empty record batch")]
    EmptyBatch,

    /// A raw model answer was shorter than the fixed response envelope it was
    /// expected to carry; stripping would corrupt it.
    #[error("model answer of {len} chars is shorter than the {need}-char response envelope")]
    AnswerTooShort { len: usize, need: usize },
}

impl CoreError {
    /// Returns `true` if this error points at the source data rather than at
    /// caller configuration.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            CoreError::InvalidYear { .. } | CoreError::AnswerTooShort { .. }
        )
    }
}
