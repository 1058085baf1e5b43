//! Firing program domain for kilnflow.
//!
//! Holds the operator-configured ramp/soak/cooldown parameters, the
//! state machine that walks through the firing phases deriving the moving
//! temperature setpoint, and the sensor-fault watchdog.
//!
//! # Design Principles
//!
//! - **One phase behavior**: the four phases are an ordered list of
//!   descriptors sharing a single completion semantic, not hand-written
//!   branches.
//! - **Explicit time**: every timing decision is a pure function of the
//!   timestamps supplied by the caller, enabling deterministic replay.
//! - **Total functions**: ticks never fail; out-of-range edits clamp.

pub mod fault;
pub mod machine;
pub mod params;
pub mod phase;

pub use fault::{FaultWatchdog, SensorFault};
pub use machine::{PhaseChange, ProgramMachine, RunState};
pub use params::{CooldownPhase, FiringParameters, ParamField, RampPhase};
pub use phase::{PhaseDescriptor, PhaseId, PhaseKind, PLATEAU_BAND_C};
