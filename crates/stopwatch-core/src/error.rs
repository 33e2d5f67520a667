//! Shared error type across stopwatch crates.

use thiserror::Error;

/// Stable error codes (used by renderers and tests).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Start without force on an existing name.
    AlreadyExists,
    /// Unknown timer name.
    NotFound,
    /// Read before any timer ever existed.
    RegistryEmpty,
    /// Remove before any timer ever existed.
    RegistryUndefined,
    /// Remove without force on a running timer.
    StillRunning,
    /// Removal lost a race.
    RemovalFailed,
    /// Malformed input.
    BadRequest,
    /// Unsupported config version.
    UnsupportedVersion,
    /// I/O or serialization failure.
    Internal,
}

impl ErrorCode {
    /// String representation used in rendered output.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::AlreadyExists => "ALREADY_EXISTS",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::RegistryEmpty => "REGISTRY_EMPTY",
            ErrorCode::RegistryUndefined => "REGISTRY_UNDEFINED",
            ErrorCode::StillRunning => "STILL_RUNNING",
            ErrorCode::RemovalFailed => "REMOVAL_FAILED",
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, StopwatchError>;

/// Unified error type used by core and runner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StopwatchError {
    #[error("timer '{0}' already exists")]
    AlreadyExists(String),
    #[error("timer '{0}' not found")]
    NotFound(String),
    #[error("no timers have been started")]
    RegistryEmpty,
    #[error("timer registry is not defined")]
    RegistryUndefined,
    #[error("timer '{0}' is still running")]
    StillRunning(String),
    #[error("failed to remove timer '{0}'")]
    RemovalFailed(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl StopwatchError {
    /// Map the error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            StopwatchError::AlreadyExists(_) => ErrorCode::AlreadyExists,
            StopwatchError::NotFound(_) => ErrorCode::NotFound,
            StopwatchError::RegistryEmpty => ErrorCode::RegistryEmpty,
            StopwatchError::RegistryUndefined => ErrorCode::RegistryUndefined,
            StopwatchError::StillRunning(_) => ErrorCode::StillRunning,
            StopwatchError::RemovalFailed(_) => ErrorCode::RemovalFailed,
            StopwatchError::BadRequest(_) => ErrorCode::BadRequest,
            StopwatchError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            StopwatchError::Internal(_) => ErrorCode::Internal,
        }
    }

    /// Timer name the error refers to, if it is a per-name failure.
    pub fn timer(&self) -> Option<&str> {
        match self {
            StopwatchError::AlreadyExists(n)
            | StopwatchError::NotFound(n)
            | StopwatchError::StillRunning(n)
            | StopwatchError::RemovalFailed(n) => Some(n),
            _ => None,
        }
    }
}
