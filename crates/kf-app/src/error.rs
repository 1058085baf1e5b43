//! Application-level error type.

pub type AppResult<T> = Result<T, AppError>;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Control error: {0}")]
    Control(#[from] kf_control::ControlError),

    #[error("Plant error: {0}")]
    Plant(#[from] kf_plant::PlantError),

    #[error("Profile error: {0}")]
    Profile(#[from] kf_profile::ProfileError),

    #[error("Unsupported profile extension: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
