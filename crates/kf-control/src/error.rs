//! Error types for heater control operations.

use thiserror::Error;

/// Result type for heater control operations.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors that can occur in heater control operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// Invalid argument provided to a control function.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}
