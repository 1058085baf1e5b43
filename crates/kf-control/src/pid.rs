//! Sampled PID regulator for the kiln heater.
//!
//! The regulator keeps its accumulators in integer scale to avoid floating
//! accumulation drift over firings that run for many hours:
//! - errors are held at x100 scale (0.01 degC resolution),
//! - duty is held at 0-10000 scale (0.01% resolution).
//!
//! The derivative gain is carried through the same error-history mechanism
//! but defaults to zero; kiln thermal inertia makes derivative action
//! unnecessary in practice.

use serde::{Deserialize, Serialize};

use crate::error::{ControlError, ControlResult};
use crate::pwm::PwmCycle;

/// Internal duty resolution: 100% duty is held as 10000.
pub const DUTY_SCALED_MAX: i32 = 10_000;

/// Error scale factor: 1 degC of error is held as 100.
const ERROR_SCALE: f64 = 100.0;

/// Substituted for non-positive elapsed time from a stalled or reset clock.
const DT_EPSILON_S: f64 = 1e-3;

/// Windup bound used when the integral gain is zero.
const WINDUP_BOUND_NO_KI: i32 = 100_000;

/// Heater PID configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PidConfig {
    /// Proportional gain (% duty per degC of error).
    pub kp: f64,
    /// Integral gain (% duty per degC-second of accumulated error).
    pub ki: f64,
    /// Derivative gain. Defaults to zero.
    pub kd: f64,
    /// Maximum duty change per PID update, in percent.
    pub max_power_change_pct: f64,
    /// Software PWM cycle window length in milliseconds.
    pub cycle_length_ms: u32,
    /// PID recomputation period in seconds. Zero recomputes on every call.
    pub sample_period_s: f64,
}

impl Default for PidConfig {
    fn default() -> Self {
        Self {
            kp: 2.0,
            ki: 0.5,
            kd: 0.0,
            max_power_change_pct: 10.0,
            cycle_length_ms: 1000,
            sample_period_s: 1.0,
        }
    }
}

impl PidConfig {
    fn validate(&self) -> ControlResult<()> {
        if !(self.kp.is_finite() && self.ki.is_finite() && self.kd.is_finite()) {
            return Err(ControlError::InvalidArg {
                what: "gains must be finite",
            });
        }
        if self.kp < 0.0 || self.ki < 0.0 || self.kd < 0.0 {
            return Err(ControlError::InvalidArg {
                what: "gains must be non-negative",
            });
        }
        if !(self.max_power_change_pct > 0.0) {
            return Err(ControlError::InvalidArg {
                what: "max_power_change_pct must be positive",
            });
        }
        if self.cycle_length_ms == 0 {
            return Err(ControlError::InvalidArg {
                what: "cycle_length_ms must be positive",
            });
        }
        if !(self.sample_period_s >= 0.0) {
            return Err(ControlError::InvalidArg {
                what: "sample_period_s must be non-negative",
            });
        }
        Ok(())
    }
}

/// Output of one controller update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeaterOutput {
    /// Relay decision for the current PWM window position.
    pub relay_on: bool,
    /// Duty cycle in whole percent, 0-100.
    pub duty_percent: u8,
}

/// Sampled PID regulator with software PWM output.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaterPid {
    cfg: PidConfig,
    /// Accumulated error, x100 scale, clamped to the anti-windup bound.
    integral_scaled: i32,
    /// Previous error sample, x100 scale.
    last_error_scaled: i32,
    /// Held duty, 0-10000 scale.
    duty_scaled: i32,
    /// Timestamp of the last PID recomputation (seconds).
    last_update_s: f64,
    pwm: PwmCycle,
}

impl HeaterPid {
    /// Create a new regulator with state at zero/neutral.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is out of range.
    pub fn new(cfg: PidConfig) -> ControlResult<Self> {
        cfg.validate()?;
        let pwm = PwmCycle::new(cfg.cycle_length_ms, 0.0);
        Ok(Self {
            cfg,
            integral_scaled: 0,
            last_error_scaled: 0,
            duty_scaled: 0,
            last_update_s: 0.0,
            pwm,
        })
    }

    /// Reset all controller state to zero/neutral at `t_s`.
    pub fn init(&mut self, t_s: f64) {
        self.integral_scaled = 0;
        self.last_error_scaled = 0;
        self.duty_scaled = 0;
        self.last_update_s = t_s;
        self.pwm.reset(t_s);
    }

    /// Clear integral/derivative history and the held duty at `t_s`.
    ///
    /// Called when a program starts so a fresh run does not inherit windup
    /// from a previous run. The PWM window is left untouched.
    pub fn reset(&mut self, t_s: f64) {
        self.integral_scaled = 0;
        self.last_error_scaled = 0;
        self.duty_scaled = 0;
        self.last_update_s = t_s;
    }

    /// Current duty cycle in whole percent.
    pub fn duty_percent(&self) -> u8 {
        (self.duty_scaled / 100) as u8
    }

    fn windup_bound(&self) -> i32 {
        if self.cfg.ki > 0.0 {
            (f64::from(DUTY_SCALED_MAX) / self.cfg.ki) as i32
        } else {
            WINDUP_BOUND_NO_KI
        }
    }

    /// Advance the controller to `t_s` and return the heater command.
    ///
    /// When `enabled` is false the output is forced to zero and the
    /// integral/error history is cleared; the controller is inert while the
    /// firing program is not running.
    ///
    /// PWM is evaluated on every call. The PID stage only recomputes once
    /// `sample_period_s` has elapsed since the previous recomputation, so a
    /// duty change takes effect from the next window position, never
    /// retroactively.
    pub fn update(&mut self, t_s: f64, measured_c: f64, setpoint_c: f64, enabled: bool) -> HeaterOutput {
        if !enabled {
            self.duty_scaled = 0;
            self.integral_scaled = 0;
            self.last_error_scaled = 0;
            return HeaterOutput {
                relay_on: false,
                duty_percent: 0,
            };
        }

        let relay_on = self.pwm.relay_state(t_s, self.duty_scaled);

        if t_s - self.last_update_s < self.cfg.sample_period_s {
            // Hold the previous duty between samples.
            return HeaterOutput {
                relay_on,
                duty_percent: self.duty_percent(),
            };
        }

        let mut dt = t_s - self.last_update_s;
        if dt <= 0.0 {
            // Stalled or reset clock: never divide by zero or integrate backward.
            dt = DT_EPSILON_S;
        }
        self.last_update_s = t_s;

        let error_scaled = ((setpoint_c - measured_c) * ERROR_SCALE) as i32;

        let p_term = self.cfg.kp * f64::from(error_scaled) / ERROR_SCALE;

        self.integral_scaled = self
            .integral_scaled
            .saturating_add((f64::from(error_scaled) * dt) as i32);
        let bound = self.windup_bound();
        self.integral_scaled = self.integral_scaled.clamp(-bound, bound);
        let i_term = self.cfg.ki * f64::from(self.integral_scaled) / ERROR_SCALE;

        let d_term =
            self.cfg.kd * f64::from(error_scaled - self.last_error_scaled) / ERROR_SCALE / dt;

        let raw_scaled = ((p_term + i_term + d_term) * ERROR_SCALE) as i32;

        // Rate-limit against the previous duty, then clamp to the duty range.
        let max_step = (self.cfg.max_power_change_pct * ERROR_SCALE) as i32;
        let limited = raw_scaled.clamp(
            self.duty_scaled.saturating_sub(max_step),
            self.duty_scaled.saturating_add(max_step),
        );
        self.duty_scaled = limited.clamp(0, DUTY_SCALED_MAX);
        self.last_error_scaled = error_scaled;

        HeaterOutput {
            relay_on,
            duty_percent: self.duty_percent(),
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn consecutive_duty_samples_respect_rate_limit(
            setpoints in prop::collection::vec(0.0_f64..1500.0, 1..60),
            measured in 0.0_f64..1500.0,
        ) {
            let mut pid = HeaterPid::new(PidConfig::default()).unwrap();
            pid.init(0.0);

            let mut last = 0i32;
            for (i, sp) in setpoints.iter().enumerate() {
                let out = pid.update((i + 1) as f64, measured, *sp, true);
                let duty = i32::from(out.duty_percent);
                prop_assert!(duty <= 100);
                prop_assert!((duty - last).abs() <= 10);
                last = duty;
            }
        }

        #[test]
        fn integral_always_within_bound(
            errors in prop::collection::vec(-500.0_f64..500.0, 1..100),
        ) {
            let mut pid = HeaterPid::new(PidConfig::default()).unwrap();
            pid.init(0.0);

            for (i, e) in errors.iter().enumerate() {
                pid.update((i + 1) as f64, 0.0, *e, true);
                prop_assert!(pid.integral_scaled.abs() <= pid.windup_bound());
            }
        }
    }
}
