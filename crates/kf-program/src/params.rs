//! Operator-configured firing parameters with bounded editing.
//!
//! Eleven editable fields: three ramp phases (rate, target, soak) and a
//! cooldown phase (rate, target). Every field carries a declared [min, max]
//! range and a detent step; edits clamp to the range rather than reject.

use kf_core::clamp_range;
use serde::{Deserialize, Serialize};

/// One heating phase: ramp to a target, then soak.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RampPhase {
    /// Phase target temperature (degC).
    pub target_c: f64,
    /// Commanded setpoint rate (degC/hour).
    pub rate_c_per_hr: f64,
    /// Hold duration at the target before the phase completes (minutes).
    pub soak_min: f64,
}

/// Controlled cooldown back toward a rest temperature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CooldownPhase {
    /// Cooldown end temperature (degC); must be reachable by cooling.
    pub target_c: f64,
    /// Commanded setpoint descent rate (degC/hour).
    pub rate_c_per_hr: f64,
}

/// The full operator-configured firing program.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FiringParameters {
    pub ramps: [RampPhase; 3],
    pub cooldown: CooldownPhase,
}

impl Default for FiringParameters {
    /// A typical bisque-like firing curve.
    fn default() -> Self {
        Self {
            ramps: [
                RampPhase {
                    target_c: 100.0,
                    rate_c_per_hr: 50.0,
                    soak_min: 5.0,
                },
                RampPhase {
                    target_c: 570.0,
                    rate_c_per_hr: 250.0,
                    soak_min: 15.0,
                },
                RampPhase {
                    target_c: 1100.0,
                    rate_c_per_hr: 200.0,
                    soak_min: 20.0,
                },
            ],
            cooldown: CooldownPhase {
                target_c: 200.0,
                rate_c_per_hr: 150.0,
            },
        }
    }
}

/// Identifies one editable field of [`FiringParameters`].
///
/// The index order matches the operator-facing layout: rate, target, soak
/// for each ramp phase left to right, then cooldown rate and target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamField {
    RampRate(usize),
    RampTarget(usize),
    RampSoak(usize),
    CooldownRate,
    CooldownTarget,
}

/// Declared range and encoder detent step for one field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldBounds {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

const RATE_BOUNDS: FieldBounds = FieldBounds {
    min: 1.0,
    max: 1000.0,
    step: 10.0,
};
const TARGET_BOUNDS: FieldBounds = FieldBounds {
    min: 0.0,
    max: 1500.0,
    step: 10.0,
};
const SOAK_BOUNDS: FieldBounds = FieldBounds {
    min: 0.0,
    max: 999.0,
    step: 5.0,
};
const COOLDOWN_TARGET_BOUNDS: FieldBounds = FieldBounds {
    min: 0.0,
    max: 1000.0,
    step: 10.0,
};

impl ParamField {
    /// Number of editable fields.
    pub const COUNT: usize = 11;

    /// Map an operator-facing field index (0-10) to a field.
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::RampRate(0)),
            1 => Some(Self::RampTarget(0)),
            2 => Some(Self::RampSoak(0)),
            3 => Some(Self::RampRate(1)),
            4 => Some(Self::RampTarget(1)),
            5 => Some(Self::RampSoak(1)),
            6 => Some(Self::RampRate(2)),
            7 => Some(Self::RampTarget(2)),
            8 => Some(Self::RampSoak(2)),
            9 => Some(Self::CooldownRate),
            10 => Some(Self::CooldownTarget),
            _ => None,
        }
    }

    /// Declared range and detent step for this field.
    pub fn bounds(&self) -> FieldBounds {
        match self {
            Self::RampRate(_) | Self::CooldownRate => RATE_BOUNDS,
            Self::RampTarget(_) => TARGET_BOUNDS,
            Self::RampSoak(_) => SOAK_BOUNDS,
            Self::CooldownTarget => COOLDOWN_TARGET_BOUNDS,
        }
    }
}

impl FiringParameters {
    /// Read the current value of a field.
    pub fn get(&self, field: ParamField) -> f64 {
        match field {
            ParamField::RampRate(i) => self.ramps[i % 3].rate_c_per_hr,
            ParamField::RampTarget(i) => self.ramps[i % 3].target_c,
            ParamField::RampSoak(i) => self.ramps[i % 3].soak_min,
            ParamField::CooldownRate => self.cooldown.rate_c_per_hr,
            ParamField::CooldownTarget => self.cooldown.target_c,
        }
    }

    /// Apply an encoder delta to one field, clamping to the field's range.
    ///
    /// `detents` is a signed detent count; each detent moves the value by
    /// the field's step.
    pub fn edit(&mut self, field: ParamField, detents: i32) {
        let bounds = field.bounds();
        let value = self.get(field) + f64::from(detents) * bounds.step;
        self.set_clamped(field, value);
    }

    /// Write a field value, clamped into the field's declared range.
    pub fn set_clamped(&mut self, field: ParamField, value: f64) {
        let bounds = field.bounds();
        let clamped = clamp_range(value, bounds.min, bounds.max);
        match field {
            ParamField::RampRate(i) => self.ramps[i % 3].rate_c_per_hr = clamped,
            ParamField::RampTarget(i) => self.ramps[i % 3].target_c = clamped,
            ParamField::RampSoak(i) => self.ramps[i % 3].soak_min = clamped,
            ParamField::CooldownRate => self.cooldown.rate_c_per_hr = clamped,
            ParamField::CooldownTarget => self.cooldown.target_c = clamped,
        }
    }

    /// Clamp every field into its declared range.
    pub fn clamp_all(&mut self) {
        for index in 0..ParamField::COUNT {
            if let Some(field) = ParamField::from_index(index) {
                self.set_clamped(field, self.get(field));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_curve() {
        let p = FiringParameters::default();
        assert_eq!(p.ramps[0].target_c, 100.0);
        assert_eq!(p.ramps[2].rate_c_per_hr, 200.0);
        assert_eq!(p.cooldown.target_c, 200.0);
    }

    #[test]
    fn edit_moves_by_detent_step() {
        let mut p = FiringParameters::default();
        p.edit(ParamField::RampTarget(0), 5);
        assert_eq!(p.ramps[0].target_c, 150.0);

        p.edit(ParamField::RampSoak(1), -2);
        assert_eq!(p.ramps[1].soak_min, 5.0);
    }

    #[test]
    fn edit_clamps_to_field_range() {
        let mut p = FiringParameters::default();
        p.edit(ParamField::RampTarget(0), 1000);
        assert_eq!(p.ramps[0].target_c, 1500.0);

        p.edit(ParamField::RampRate(0), -1000);
        assert_eq!(p.ramps[0].rate_c_per_hr, 1.0);

        p.edit(ParamField::CooldownTarget, 500);
        assert_eq!(p.cooldown.target_c, 1000.0);
    }

    #[test]
    fn index_mapping_covers_all_fields() {
        for index in 0..ParamField::COUNT {
            assert!(ParamField::from_index(index).is_some());
        }
        assert!(ParamField::from_index(ParamField::COUNT).is_none());
    }

    #[test]
    fn clamp_all_repairs_out_of_range_values() {
        let mut p = FiringParameters::default();
        p.ramps[0].rate_c_per_hr = 0.0;
        p.ramps[1].target_c = 9000.0;
        p.clamp_all();
        assert_eq!(p.ramps[0].rate_c_per_hr, 1.0);
        assert_eq!(p.ramps[1].target_c, 1500.0);
    }
}
