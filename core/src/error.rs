//! Error types for the record service client and controllers.
//!
//! # Design
//! `NotFound` gets its own variant because only a 404 on a single-record
//! fetch ends in a terminal state; everything else a remote call can do
//! wrong is retryable and collapses to `ErrorKind::Transport`. Validation
//! and field-path errors are local and never reach the network.

use thiserror::Error;

/// Errors produced while talking to the record service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The service returned 404.
    #[error("resource not found")]
    NotFound,

    /// The service returned an unexpected status other than 404.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The request never produced a response: connect failure, timeout, ...
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body could not be decoded into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be encoded as JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// Coarse classification the controllers act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Retrying may help.
    Transport,
    /// Retrying the same id will not help.
    NotFound,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::NotFound => ErrorKind::NotFound,
            _ => ErrorKind::Transport,
        }
    }
}

/// A draft is missing one of the required fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Name, username, and email are required fields.")]
pub struct ValidationError;

/// A textual field path that does not address an editable leaf.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldPathError {
    #[error("unknown field `{0}`")]
    Unknown(String),

    #[error("field path `{0}` nests deeper than one level")]
    TooDeep(String),
}

/// Form operations rejected by the current form phase or draft.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("the form is not editable in its current state")]
    NotEditable,

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// A navigation path that maps to no view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("no view for path `{0}`")]
    UnknownPath(String),

    #[error("`{0}` is not a record id")]
    InvalidId(String),
}

/// Invalid service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got `{value}`")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}
