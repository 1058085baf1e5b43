//! kf-profile: canonical firing-profile file format and validation.
//!
//! The profile is the persisted form of the operator's firing parameters:
//! a flat key/value mapping of the eleven bounded fields plus a format
//! version. It is written only on an explicit commit event and read once at
//! startup; write-then-read reproduces identical values.

pub mod schema;
pub mod validate;

pub use schema::{FiringProfile, LATEST_VERSION};
pub use validate::{validate_profile, ValidationError};

pub type ProfileResult<T> = Result<T, ProfileError>;

#[derive(thiserror::Error, Debug)]
pub enum ProfileError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_yaml(path: &std::path::Path) -> ProfileResult<FiringProfile> {
    let content = std::fs::read_to_string(path)?;
    let profile: FiringProfile = serde_yaml::from_str(&content)?;
    validate_profile(&profile)?;
    Ok(profile)
}

pub fn save_yaml(path: &std::path::Path, profile: &FiringProfile) -> ProfileResult<()> {
    validate_profile(profile)?;
    let content = serde_yaml::to_string(profile)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> ProfileResult<FiringProfile> {
    let content = std::fs::read_to_string(path)?;
    let profile: FiringProfile = serde_json::from_str(&content)?;
    validate_profile(&profile)?;
    Ok(profile)
}

pub fn save_json(path: &std::path::Path, profile: &FiringProfile) -> ProfileResult<()> {
    validate_profile(profile)?;
    let content = serde_json::to_string_pretty(profile)?;
    std::fs::write(path, content)?;
    Ok(())
}
