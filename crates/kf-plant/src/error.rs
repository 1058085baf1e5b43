//! Error types for the thermal plant model.

use thiserror::Error;

/// Result type for plant model operations.
pub type PlantResult<T> = Result<T, PlantError>;

/// Errors that can occur building a plant model.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlantError {
    /// Invalid argument provided to a plant constructor.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Physically impossible configuration value.
    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },
}
