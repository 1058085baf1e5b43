//! Profile validation.
//!
//! Structural checks only: field ranges are repaired by clamping when the
//! profile is converted into runtime parameters, so validation rejects just
//! what clamping cannot repair.

use thiserror::Error;

use crate::schema::{FiringProfile, LATEST_VERSION};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Non-finite value for {field}: {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("Unsupported profile version {found} (latest is {latest})")]
    UnsupportedVersion { found: u32, latest: u32 },
}

pub fn validate_profile(profile: &FiringProfile) -> Result<(), ValidationError> {
    if profile.version == 0 || profile.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            found: profile.version,
            latest: LATEST_VERSION,
        });
    }

    for (value, field) in [
        (profile.ramp1_rate_c_per_hr, "ramp1_rate_c_per_hr"),
        (profile.ramp1_target_c, "ramp1_target_c"),
        (profile.ramp1_soak_min, "ramp1_soak_min"),
        (profile.ramp2_rate_c_per_hr, "ramp2_rate_c_per_hr"),
        (profile.ramp2_target_c, "ramp2_target_c"),
        (profile.ramp2_soak_min, "ramp2_soak_min"),
        (profile.ramp3_rate_c_per_hr, "ramp3_rate_c_per_hr"),
        (profile.ramp3_target_c, "ramp3_target_c"),
        (profile.ramp3_soak_min, "ramp3_soak_min"),
        (profile.cooldown_rate_c_per_hr, "cooldown_rate_c_per_hr"),
        (profile.cooldown_target_c, "cooldown_target_c"),
    ] {
        if !value.is_finite() {
            return Err(ValidationError::NonFinite { field, value });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_validates() {
        assert!(validate_profile(&FiringProfile::default()).is_ok());
    }

    #[test]
    fn non_finite_field_rejected() {
        let mut profile = FiringProfile::default();
        profile.ramp2_soak_min = f64::NAN;
        let err = validate_profile(&profile).unwrap_err();
        assert!(matches!(err, ValidationError::NonFinite { field, .. } if field == "ramp2_soak_min"));
    }

    #[test]
    fn future_version_rejected() {
        let mut profile = FiringProfile::default();
        profile.version = LATEST_VERSION + 1;
        assert!(validate_profile(&profile).is_err());
    }
}
