//! Firing profile schema definitions.

use kf_program::{CooldownPhase, FiringParameters, RampPhase};
use serde::{Deserialize, Serialize};

/// Current profile format version.
pub const LATEST_VERSION: u32 = 1;

/// Persisted firing profile: a flat mapping of the eleven operator fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FiringProfile {
    pub version: u32,
    pub ramp1_rate_c_per_hr: f64,
    pub ramp1_target_c: f64,
    pub ramp1_soak_min: f64,
    pub ramp2_rate_c_per_hr: f64,
    pub ramp2_target_c: f64,
    pub ramp2_soak_min: f64,
    pub ramp3_rate_c_per_hr: f64,
    pub ramp3_target_c: f64,
    pub ramp3_soak_min: f64,
    pub cooldown_rate_c_per_hr: f64,
    pub cooldown_target_c: f64,
}

impl Default for FiringProfile {
    fn default() -> Self {
        FiringParameters::default().into()
    }
}

impl From<FiringParameters> for FiringProfile {
    fn from(p: FiringParameters) -> Self {
        Self {
            version: LATEST_VERSION,
            ramp1_rate_c_per_hr: p.ramps[0].rate_c_per_hr,
            ramp1_target_c: p.ramps[0].target_c,
            ramp1_soak_min: p.ramps[0].soak_min,
            ramp2_rate_c_per_hr: p.ramps[1].rate_c_per_hr,
            ramp2_target_c: p.ramps[1].target_c,
            ramp2_soak_min: p.ramps[1].soak_min,
            ramp3_rate_c_per_hr: p.ramps[2].rate_c_per_hr,
            ramp3_target_c: p.ramps[2].target_c,
            ramp3_soak_min: p.ramps[2].soak_min,
            cooldown_rate_c_per_hr: p.cooldown.rate_c_per_hr,
            cooldown_target_c: p.cooldown.target_c,
        }
    }
}

impl FiringProfile {
    /// Convert into runtime parameters, clamping every field into its
    /// declared range. A hand-edited file is repaired, never rejected.
    pub fn into_parameters(self) -> FiringParameters {
        let mut params = FiringParameters {
            ramps: [
                RampPhase {
                    target_c: self.ramp1_target_c,
                    rate_c_per_hr: self.ramp1_rate_c_per_hr,
                    soak_min: self.ramp1_soak_min,
                },
                RampPhase {
                    target_c: self.ramp2_target_c,
                    rate_c_per_hr: self.ramp2_rate_c_per_hr,
                    soak_min: self.ramp2_soak_min,
                },
                RampPhase {
                    target_c: self.ramp3_target_c,
                    rate_c_per_hr: self.ramp3_rate_c_per_hr,
                    soak_min: self.ramp3_soak_min,
                },
            ],
            cooldown: CooldownPhase {
                target_c: self.cooldown_target_c,
                rate_c_per_hr: self.cooldown_rate_c_per_hr,
            },
        };
        params.clamp_all();
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameters_convert_both_ways() {
        let params = FiringParameters::default();
        let profile: FiringProfile = params.into();
        assert_eq!(profile.version, LATEST_VERSION);
        assert_eq!(profile.ramp2_target_c, 570.0);

        let back = profile.into_parameters();
        assert_eq!(back, params);
    }

    #[test]
    fn out_of_range_file_values_are_clamped() {
        let mut profile = FiringProfile::default();
        profile.ramp1_rate_c_per_hr = 0.0;
        profile.ramp3_target_c = 4000.0;

        let params = profile.into_parameters();
        assert_eq!(params.ramps[0].rate_c_per_hr, 1.0);
        assert_eq!(params.ramps[2].target_c, 1500.0);
    }
}
