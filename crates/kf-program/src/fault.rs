//! Sensor-fault watchdog.
//!
//! A single out-of-band temperature reading is a transient anomaly: tracked,
//! never surfaced. Readings outside the physically sane band continuously for
//! longer than the threshold escalate to a critical fault, surfaced exactly
//! once. A valid reading at any point before the threshold clears the timer.

use serde::{Deserialize, Serialize};

/// Physically sane reading band (degC).
const MIN_VALID_C: f64 = -100.0;
const MAX_VALID_C: f64 = 1500.0;

/// Continuous out-of-band duration that escalates to a critical fault.
const FAULT_THRESHOLD_S: f64 = 120.0;

/// A critical sensor fault, surfaced once at escalation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorFault {
    /// The reading that crossed the threshold (degC).
    pub measured_c: f64,
    /// How long readings had been out of band when the fault fired (seconds).
    pub out_of_band_for_s: f64,
}

/// Tracks out-of-band temperature readings and escalates after the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FaultWatchdog {
    out_of_band_since_s: Option<f64>,
    tripped: bool,
}

impl FaultWatchdog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one reading. Returns `Some` exactly once, at the call where the
    /// continuous out-of-band duration crosses the threshold.
    pub fn observe(&mut self, t_s: f64, measured_c: f64) -> Option<SensorFault> {
        if (MIN_VALID_C..=MAX_VALID_C).contains(&measured_c) {
            self.out_of_band_since_s = None;
            return None;
        }

        match self.out_of_band_since_s {
            None => {
                self.out_of_band_since_s = Some(t_s);
                None
            }
            Some(since) => {
                let elapsed = t_s - since;
                if !self.tripped && elapsed > FAULT_THRESHOLD_S {
                    self.tripped = true;
                    Some(SensorFault {
                        measured_c,
                        out_of_band_for_s: elapsed,
                    })
                } else {
                    None
                }
            }
        }
    }

    /// True while the most recent reading was out of band.
    pub fn warning_active(&self) -> bool {
        self.out_of_band_since_s.is_some()
    }

    /// Clear the trip latch and timer after an explicit acknowledgment.
    pub fn reset(&mut self) {
        self.out_of_band_since_s = None;
        self.tripped = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_band_readings_never_fault() {
        let mut wd = FaultWatchdog::new();
        for i in 0..1000 {
            assert!(wd.observe(i as f64, 800.0).is_none());
        }
        assert!(!wd.warning_active());
    }

    #[test]
    fn momentary_anomaly_is_tracked_not_surfaced() {
        let mut wd = FaultWatchdog::new();
        assert!(wd.observe(0.0, 2000.0).is_none());
        assert!(wd.warning_active());

        // Valid reading clears the timer.
        assert!(wd.observe(10.0, 800.0).is_none());
        assert!(!wd.warning_active());

        // The clock restarts from scratch afterwards.
        assert!(wd.observe(20.0, 2000.0).is_none());
        assert!(wd.observe(139.0, 2000.0).is_none());
        assert!(wd.observe(141.0, 2000.0).is_some());
    }

    #[test]
    fn fault_fires_exactly_once_past_threshold() {
        let mut wd = FaultWatchdog::new();
        let mut faults = 0;
        for i in 0..=121 {
            if wd.observe(i as f64, 2000.0).is_some() {
                faults += 1;
            }
        }
        assert_eq!(faults, 1);

        // Still out of band: no further signals.
        for i in 122..300 {
            assert!(wd.observe(i as f64, 2000.0).is_none());
        }
    }

    #[test]
    fn no_fault_at_119_seconds() {
        let mut wd = FaultWatchdog::new();
        let mut faults = 0;
        for i in 0..=119 {
            if wd.observe(i as f64, 2000.0).is_some() {
                faults += 1;
            }
        }
        assert_eq!(faults, 0);
    }

    #[test]
    fn reset_rearms_the_watchdog() {
        let mut wd = FaultWatchdog::new();
        for i in 0..=121 {
            wd.observe(i as f64, 2000.0);
        }
        wd.reset();
        assert!(!wd.warning_active());

        let mut faults = 0;
        for i in 0..=121 {
            if wd.observe(200.0 + i as f64, -500.0).is_some() {
                faults += 1;
            }
        }
        assert_eq!(faults, 1);
    }
}
