//! Client error types

use shared::FieldError;
use thiserror::Error;

/// Broad failure class, used to pick what the operator sees
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The order API could not be reached or answered with an error status
    Network,
    /// The order API answered with something that is not a list of orders
    Format,
    /// A field update was not accepted remotely
    Update,
    /// A delete was not accepted remotely
    Delete,
    /// The request was refused locally (unknown order, bad input, bad config)
    Input,
}

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Order API answered with a non-success status
    #[error("Request failed with status code {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body is not a sequence of order records
    #[error("Unexpected response format: {0}")]
    InvalidResponse(String),

    /// Base URL cannot address orders
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// No loaded order has this id
    #[error("Order not found: {0}")]
    NotFound(String),

    /// Raw field input was rejected
    #[error(transparent)]
    InvalidValue(#[from] FieldError),

    /// Remote partial update failed
    #[error("Failed to update order field: {0}")]
    Update(#[source] Box<ClientError>),

    /// Remote delete failed
    #[error("Failed to delete order: {0}")]
    Delete(#[source] Box<ClientError>),
}

impl ClientError {
    /// Failure class of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Http(_) | Self::Status { .. } => ErrorKind::Network,
            Self::InvalidResponse(_) => ErrorKind::Format,
            Self::Update(_) => ErrorKind::Update,
            Self::Delete(_) => ErrorKind::Delete,
            Self::InvalidUrl(_) | Self::NotFound(_) | Self::InvalidValue(_) => ErrorKind::Input,
        }
    }

    /// Whether the HTTP request ran into the configured timeout
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout(),
            Self::Update(inner) | Self::Delete(inner) => inner.is_timeout(),
            _ => false,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
