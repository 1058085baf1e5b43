//! Software pulse-width modulation over a fixed cycle window.
//!
//! The relay is energized for the first `duty` fraction of each window and
//! released for the remainder. A window rolls over to a fresh cycle once its
//! elapsed time exceeds the window length, independent of duty changes made
//! mid-cycle.

use serde::{Deserialize, Serialize};

use crate::pid::DUTY_SCALED_MAX;

/// State of one software PWM cycle window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PwmCycle {
    /// Window length in milliseconds.
    cycle_length_ms: u32,
    /// Timestamp of the current window's start (seconds).
    cycle_start_s: f64,
}

impl PwmCycle {
    /// Create a new cycle window starting at `start_s`.
    pub fn new(cycle_length_ms: u32, start_s: f64) -> Self {
        Self {
            cycle_length_ms,
            cycle_start_s: start_s,
        }
    }

    /// Restart the window at `t_s`.
    pub fn reset(&mut self, t_s: f64) {
        self.cycle_start_s = t_s;
    }

    /// Window length in milliseconds.
    pub fn cycle_length_ms(&self) -> u32 {
        self.cycle_length_ms
    }

    /// Compute the relay state at `t_s` for a duty held at 0-10000 scale.
    ///
    /// Rolls the window over when its elapsed time reaches the window length.
    pub fn relay_state(&mut self, t_s: f64, duty_scaled: i32) -> bool {
        let mut elapsed_ms = ((t_s - self.cycle_start_s) * 1000.0).max(0.0);
        if elapsed_ms >= f64::from(self.cycle_length_ms) {
            // Start of a new PWM cycle.
            self.cycle_start_s = t_s;
            elapsed_ms = 0.0;
        }

        let on_ms =
            f64::from(duty_scaled) * f64::from(self.cycle_length_ms) / f64::from(DUTY_SCALED_MAX);

        duty_scaled > 0 && elapsed_ms < on_ms
    }
}
