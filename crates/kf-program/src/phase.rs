//! Phase descriptors: one parameterized behavior for all firing phases.
//!
//! The three ramp/soak phases and the cooldown share identical setpoint and
//! completion semantics; they differ only in the descriptor driving them.

use serde::{Deserialize, Serialize};

use crate::params::FiringParameters;

/// Measured temperature must come within this band below the phase target
/// before the plateau timer starts.
pub const PLATEAU_BAND_C: f64 = 5.0;

/// Which phase of the firing program is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseId {
    Ramp1,
    Ramp2,
    Ramp3,
    Cooldown,
}

impl PhaseId {
    pub const ALL: [PhaseId; 4] = [
        PhaseId::Ramp1,
        PhaseId::Ramp2,
        PhaseId::Ramp3,
        PhaseId::Cooldown,
    ];

    /// Short display label.
    pub fn label(&self) -> &'static str {
        match self {
            PhaseId::Ramp1 => "P1",
            PhaseId::Ramp2 => "P2",
            PhaseId::Ramp3 => "P3",
            PhaseId::Cooldown => "Cool",
        }
    }
}

/// Direction and completion rule of a phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PhaseKind {
    /// Ramp the setpoint up, then soak at the target.
    Heat {
        /// Required continuous plateau duration (minutes).
        soak_min: f64,
    },
    /// Ramp the setpoint down; completes the instant the measured
    /// temperature falls to the target. No soak applies.
    Cool,
}

/// Everything the state machine needs to run one phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseDescriptor {
    pub id: PhaseId,
    /// Phase end temperature (degC).
    pub target_c: f64,
    /// Commanded setpoint rate, always positive (degC/hour).
    pub rate_c_per_hr: f64,
    pub kind: PhaseKind,
}

impl PhaseDescriptor {
    /// Setpoint at `elapsed_h` hours into the phase, starting from
    /// `start_c`. Linear toward the target, never overshooting it.
    pub fn setpoint(&self, start_c: f64, elapsed_h: f64) -> f64 {
        match self.kind {
            PhaseKind::Heat { .. } => {
                (start_c + self.rate_c_per_hr * elapsed_h).min(self.target_c)
            }
            PhaseKind::Cool => (start_c - self.rate_c_per_hr * elapsed_h).max(self.target_c),
        }
    }
}

/// Expand the operator parameters into the ordered phase list.
pub fn descriptors(params: &FiringParameters) -> [PhaseDescriptor; 4] {
    let ramp_ids = [PhaseId::Ramp1, PhaseId::Ramp2, PhaseId::Ramp3];
    let mut phases = [PhaseDescriptor {
        id: PhaseId::Cooldown,
        target_c: params.cooldown.target_c,
        rate_c_per_hr: params.cooldown.rate_c_per_hr,
        kind: PhaseKind::Cool,
    }; 4];
    for (i, ramp) in params.ramps.iter().enumerate() {
        phases[i] = PhaseDescriptor {
            id: ramp_ids[i],
            target_c: ramp.target_c,
            rate_c_per_hr: ramp.rate_c_per_hr,
            kind: PhaseKind::Heat {
                soak_min: ramp.soak_min,
            },
        };
    }
    phases
}
