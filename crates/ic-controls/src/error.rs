//! Error types for controller operations.

use ic_core::CoreError;
use thiserror::Error;

/// Result type for controller operations.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors that can occur in controller operations.
#[derive(Debug, Error)]
pub enum ControlError {
    /// Invalid argument provided to a controller function.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Writing to the log sink or opening the log file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<CoreError> for ControlError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NonFinite { what, .. } | CoreError::InvalidArg { what } => {
                ControlError::InvalidArg { what }
            }
        }
    }
}

impl ControlError {
    /// True for argument and precondition failures, false for I/O.
    pub fn is_invalid_arg(&self) -> bool {
        matches!(self, ControlError::InvalidArg { .. })
    }
}
