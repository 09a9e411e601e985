//! Unified error type for the logbook facade.
//!
//! Wraps the request-level errors of the command layer and the engine
//! errors of the lower crates behind one enum.

use thiserror::Error;

/// All logbook errors.
#[derive(Debug, Error)]
pub enum Error {
    /// A request was rejected or failed while executing
    #[error(transparent)]
    Request(#[from] logbook_executor::Error),

    /// The engine, the store or the configuration failed
    #[error(transparent)]
    Engine(#[from] logbook_core::Error),
}

/// Result type for logbook operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if the caller got the request wrong, as opposed to a failure
    /// inside the engine.
    pub fn is_request_error(&self) -> bool {
        match self {
            Error::Request(e) => e.is_request_error(),
            Error::Engine(e) => matches!(e, logbook_core::Error::InvalidInput { .. }),
        }
    }

    /// Stable wire code for the error.
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Request(e) => e.error_code(),
            Error::Engine(logbook_core::Error::InvalidInput { .. }) => "invalid_input",
            Error::Engine(_) => "unknown_error",
        }
    }

    /// Check if this is an internal invariant violation.
    pub fn is_serious(&self) -> bool {
        match self {
            Error::Request(logbook_executor::Error::Internal { .. }) => true,
            Error::Request(logbook_executor::Error::Engine { source }) => source.is_internal(),
            Error::Request(_) => false,
            Error::Engine(e) => e.is_internal(),
        }
    }
}
