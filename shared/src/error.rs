//! Error types for the shared crate

use thiserror::Error;

/// Errors raised while turning raw user input into an order patch
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// Amount field held no parseable number after stripping
    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),

    /// Status value outside the fixed status set
    #[error("Invalid status: {0:?}")]
    InvalidStatus(String),

    /// Field name is not part of the editable set
    #[error("Unknown field: {0:?}")]
    UnknownField(String),
}

/// Result type for field parsing
pub type FieldResult<T> = Result<T, FieldError>;
