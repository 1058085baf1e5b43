//! Control loop driver for kilnflow.
//!
//! Ties the firing program, heater controller, and plant together once per
//! tick, in a fixed order that the plateau-timer and PWM-cycle invariants
//! depend on: read temperature, run the fault watchdog, advance the program,
//! compute the controller output, apply it back to the plant.
//!
//! Presentation and logging layers observe the loop only through the owned
//! [`LoopSnapshot`], never through live references, so a reader always sees
//! an internally consistent point in time.

pub mod control_loop;
pub mod error;
pub mod estimate;
pub mod interface;
pub mod profile_store;
pub mod snapshot;
pub mod trace;

pub use control_loop::{ControlLoop, TickOutcome};
pub use error::{AppError, AppResult};
pub use estimate::remaining_estimate_s;
pub use interface::KilnInterface;
pub use profile_store::{load_parameters, save_parameters};
pub use snapshot::LoopSnapshot;
pub use trace::{TelemetryTrace, TracePoint};
