/// This module defines the error types for recordscout.
///
/// The engine distinguishes between two kinds of reported outcomes:
///
/// 1. **Not found**: a lookup, update or delete named an identifier that is
///    not in the store. This is an ordinary answer, not a failure of the engine.
/// 2. **Invalid input**: the caller handed over a malformed identifier or an
///    empty query. The request is rejected and the store is left untouched.
///
/// Neither predicate evaluation nor the simulated delays can fail, so there is
/// no engine-internal fatal error. The remaining variants cover configuration
/// loading and output plumbing used by the CLI.
///
/// ```rust,ignore
/// match engine.find_by_id(42, ExecutionMode::Concurrent) {
///     Ok(record) => // Use record,
///     Err(LookupError::NotFound(id)) => // Report missing id,
///     Err(e) => // Handle other errors
/// }
/// ```
use thiserror::Error;

/// Result type for engine operations
pub type LookupResult<T> = Result<T, LookupError>;

/// Errors that can be reported by engine operations
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Record not found: {0}")]
    NotFound(u64),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl LookupError {
    pub fn not_found(id: u64) -> Self {
        Self::NotFound(id)
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Returns true when the error only reports a missing record
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<config::ConfigError> for LookupError {
    fn from(err: config::ConfigError) -> Self {
        Self::ConfigError(err.to_string())
    }
}
