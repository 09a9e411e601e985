//! Request-level errors
//!
//! Everything a caller can get wrong is reported here with the offending
//! value, distinct from failures inside the engine. [`Error::error_code`]
//! gives the stable string used in wire responses.

use thiserror::Error;

/// Errors returned by [`Executor::execute`](crate::Executor::execute).
#[derive(Debug, Error)]
pub enum Error {
    /// `start_time` could not be parsed.
    #[error("Invalid start_time: {value}")]
    InvalidStartTime {
        /// Value as supplied
        value: String,
    },

    /// `end_time` could not be parsed.
    #[error("Invalid end_time: {value}")]
    InvalidEndTime {
        /// Value as supplied
        value: String,
    },

    /// `datetime` could not be parsed.
    #[error("Invalid datetime: {value}")]
    InvalidDatetime {
        /// Value as supplied
        value: String,
    },

    /// `period` is not an integer.
    #[error("Invalid period: {value}")]
    InvalidPeriod {
        /// Value as supplied
        value: String,
    },

    /// An entity id is not `<domain>.<object_id>`.
    #[error("Invalid entity id: {value}")]
    InvalidEntityId {
        /// Value as supplied
        value: String,
    },

    /// Both entity ids and a context id were given.
    #[error("Can't combine entity with context_id")]
    ConflictingFilters,

    /// Any other malformed request.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// What was wrong
        reason: String,
    },

    /// The executor produced an unexpected output.
    #[error("Internal error: {reason}")]
    Internal {
        /// Description
        reason: String,
    },

    /// The engine or row source failed.
    #[error(transparent)]
    Engine {
        /// Underlying error
        #[from]
        source: logbook_core::Error,
    },
}

/// Result type for executor operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Stable machine-readable code.
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::InvalidStartTime { .. } => "invalid_start_time",
            Error::InvalidEndTime { .. } => "invalid_end_time",
            Error::InvalidDatetime { .. } => "invalid_datetime",
            Error::InvalidPeriod { .. } => "invalid_period",
            Error::InvalidEntityId { .. } => "invalid_entity_id",
            Error::ConflictingFilters => "conflicting_filters",
            Error::InvalidInput { .. } => "invalid_input",
            Error::Internal { .. } => "internal_error",
            Error::Engine { .. } => "unknown_error",
        }
    }

    /// Whether the caller is at fault.
    pub fn is_request_error(&self) -> bool {
        !matches!(self, Error::Internal { .. } | Error::Engine { .. })
    }
}
