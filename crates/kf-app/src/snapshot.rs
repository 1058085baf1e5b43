//! Point-in-time view of the control loop.

use kf_program::{PhaseId, RunState};
use serde::{Deserialize, Serialize};

/// Owned, internally consistent snapshot of the loop at one tick.
///
/// This is the sole channel through which rendering, logging, and plotting
/// tools observe the core.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoopSnapshot {
    pub run_state: RunState,
    /// Active phase, `None` while idle.
    pub phase: Option<PhaseId>,
    /// Sensor-side temperature (degC).
    pub measured_c: f64,
    /// Instantaneous program setpoint (degC).
    pub setpoint_c: f64,
    /// Heater duty, whole percent.
    pub duty_percent: u8,
    pub relay_on: bool,
    pub plateau_reached: bool,
    /// A reading is currently out of the sane band (not yet critical).
    pub sensor_warning: bool,
    /// A critical sensor fault is latched, awaiting acknowledgment.
    pub fault_latched: bool,
    pub phase_elapsed_s: f64,
    pub program_elapsed_s: f64,
    /// Advisory estimate of seconds to completion, `None` while idle.
    pub remaining_estimate_s: Option<f64>,
}
