//! Heater control primitives for kilnflow.
//!
//! This crate provides the closed-loop heater controller used by the firing
//! loop: a sampled PID regulator whose output drives a relay through software
//! pulse-width modulation.
//!
//! # Architecture
//!
//! - The PID stage runs at a fixed sample period and produces a bounded duty
//!   cycle (0-100%, held internally at 0-10000 integer resolution).
//! - The PWM stage converts the held duty into a binary relay decision over a
//!   fixed cycle window, so average power over a window equals the duty
//!   fraction even though the instantaneous output is on/off.
//! - All timing decisions are pure functions of timestamps supplied by the
//!   caller; the controller never reads an ambient clock.

pub mod error;
pub mod pid;
pub mod pwm;

pub use error::{ControlError, ControlResult};
pub use pid::{HeaterOutput, HeaterPid, PidConfig};
pub use pwm::PwmCycle;
