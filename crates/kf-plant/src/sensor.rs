//! Thermocouple lag model.
//!
//! Sensor lag is a moving average over a fixed-size ring of recent actual
//! temperature samples. The ring length is derived from the configured lag
//! duration at a fixed sampling density, so the observed reading trails the
//! true plant temperature the way a sheathed thermocouple does.

use std::collections::VecDeque;

/// Samples per second feeding the lag window.
pub const SENSOR_SAMPLES_PER_S: f64 = 10.0;

/// Fixed-size ring of actual-temperature samples with a running average.
#[derive(Debug, Clone, PartialEq)]
pub struct LagBuffer {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl LagBuffer {
    /// Build a buffer covering `lag_s` seconds of samples. A zero lag keeps
    /// a single sample, making the reading effectively instantaneous.
    pub fn new(lag_s: f64) -> Self {
        let capacity = ((lag_s * SENSOR_SAMPLES_PER_S) as usize).max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push one actual-temperature sample, evicting the oldest when full.
    pub fn push(&mut self, actual_c: f64) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(actual_c);
    }

    /// The lagged reading: mean of the buffered samples, or `fallback_c`
    /// when no sample has been taken yet.
    pub fn reading(&self, fallback_c: f64) -> f64 {
        if self.samples.is_empty() {
            return fallback_c;
        }
        self.samples.iter().sum::<f64>() / self.samples.len() as f64
    }

    /// Observed heating rate (degC/hour) over the most recent buffered
    /// samples, up to ten. Returns zero until two samples exist.
    pub fn observed_rate_c_per_hr(&self) -> f64 {
        let n = self.samples.len().min(10);
        if n < 2 {
            return 0.0;
        }
        let newest = self.samples[self.samples.len() - 1];
        let oldest = self.samples[self.samples.len() - n];
        let span_s = n as f64 / SENSOR_SAMPLES_PER_S;
        (newest - oldest) / span_s * 3600.0
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}
