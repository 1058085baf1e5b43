//! Loading and saving firing parameters from profile files.
//!
//! Dispatches on the file extension: `.yaml`/`.yml` and `.json` are
//! supported. Loaded profiles are validated and clamped into the operator
//! ranges before use.

use std::path::Path;

use kf_profile::FiringProfile;
use kf_program::FiringParameters;

use crate::error::{AppError, AppResult};

enum Format {
    Yaml,
    Json,
}

fn format_for(path: &Path) -> AppResult<Format> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    match extension {
        "yaml" | "yml" => Ok(Format::Yaml),
        "json" => Ok(Format::Json),
        other => Err(AppError::UnsupportedFormat {
            extension: other.to_string(),
        }),
    }
}

/// Load firing parameters from a profile file.
pub fn load_parameters(path: &Path) -> AppResult<FiringParameters> {
    let profile = match format_for(path)? {
        Format::Yaml => kf_profile::load_yaml(path)?,
        Format::Json => kf_profile::load_json(path)?,
    };
    Ok(profile.into_parameters())
}

/// Persist firing parameters to a profile file.
pub fn save_parameters(path: &Path, params: &FiringParameters) -> AppResult<()> {
    let profile: FiringProfile = (*params).into();
    match format_for(path)? {
        Format::Yaml => kf_profile::save_yaml(path, &profile)?,
        Format::Json => kf_profile::save_json(path, &profile)?,
    }
    Ok(())
}
