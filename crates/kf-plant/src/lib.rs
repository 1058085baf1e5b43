//! Thermal plant model for kilnflow.
//!
//! Simulates a ceramic kiln's temperature response to applied heating power
//! and ambient loss, standing in for real hardware during development and
//! testing. The model is a lumped energy balance: near-linear convective
//! loss at low temperature with a fourth-power radiative correction that
//! engages at high temperature, plus a moving-average sensor lag that
//! reproduces thermocouple response without a differential-equation solver.

pub mod error;
pub mod plant;
pub mod sensor;

pub use error::{PlantError, PlantResult};
pub use plant::{KilnPlant, PlantConfig};
pub use sensor::LagBuffer;
