//! Error types for the logbook core
//!
//! A single error enum covers every failure the humanization pass can hit.
//! Request-level validation errors live in the executor crate; by the time
//! anything in here runs, the request has already been validated.

use thiserror::Error;

/// Errors raised while reading or humanizing rows.
#[derive(Debug, Error)]
pub enum Error {
    /// A stored payload could not be decoded. Aborts the whole pass.
    #[error("malformed payload: {message}")]
    Payload {
        /// Decoder message
        message: String,
    },

    /// The row source failed while producing rows.
    #[error("row source error: {message}")]
    Source {
        /// Source message
        message: String,
    },

    /// Caller broke a documented precondition.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// What was wrong
        message: String,
    },

    /// Configuration could not be parsed.
    #[error("invalid configuration: {message}")]
    Config {
        /// Parser message
        message: String,
    },

    /// Internal invariant violation (a bug upstream of the engine)
    #[error("internal error: {message}")]
    Internal {
        /// Description of the broken invariant
        message: String,
    },
}

/// Result type for logbook core operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build an [`Error::Internal`].
    pub fn internal(message: impl Into<String>) -> Self {
        Error::Internal {
            message: message.into(),
        }
    }

    /// Build an [`Error::Source`].
    pub fn row_source(message: impl Into<String>) -> Self {
        Error::Source {
            message: message.into(),
        }
    }

    /// Build an [`Error::InvalidInput`].
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Error::InvalidInput {
            message: message.into(),
        }
    }

    /// Check if this is an internal invariant violation.
    pub fn is_internal(&self) -> bool {
        matches!(self, Error::Internal { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Payload {
            message: e.to_string(),
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config {
            message: e.to_string(),
        }
    }
}
