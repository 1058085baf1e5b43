//! Seam between the control loop and the physical (or simulated) kiln.

use kf_plant::KilnPlant;

/// What the loop needs from a kiln: a temperature reading per tick and a
/// place to put the heater command. The simulated plant and a real
/// sensor/actuator pair are treated identically.
pub trait KilnInterface {
    /// Latest measured temperature (degC).
    fn read_temperature(&mut self) -> f64;

    /// Apply the heater command for the tick that just completed.
    fn apply(&mut self, dt_s: f64, duty_percent: u8, relay_on: bool);
}

impl KilnInterface for KilnPlant {
    fn read_temperature(&mut self) -> f64 {
        self.temperature()
    }

    fn apply(&mut self, dt_s: f64, duty_percent: u8, relay_on: bool) {
        self.update(dt_s, f64::from(duty_percent) / 100.0, relay_on);
    }
}
