//! Bounded telemetry trace of a running firing.
//!
//! One point every 30 seconds while the program runs, capped at 64 points
//! with the oldest evicted first. Cleared when a new run starts.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Recording interval (seconds).
pub const TRACE_INTERVAL_S: f64 = 30.0;

/// Maximum retained points.
pub const TRACE_CAPACITY: usize = 64;

/// One recorded telemetry point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TracePoint {
    pub t_s: f64,
    pub measured_c: f64,
    pub setpoint_c: f64,
}

/// Bounded history of measured/setpoint pairs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TelemetryTrace {
    points: VecDeque<TracePoint>,
    last_record_s: Option<f64>,
}

impl TelemetryTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a point if the interval has elapsed since the last one.
    pub fn record(&mut self, t_s: f64, measured_c: f64, setpoint_c: f64) {
        let due = match self.last_record_s {
            None => true,
            Some(last) => t_s - last >= TRACE_INTERVAL_S,
        };
        if !due {
            return;
        }
        if self.points.len() == TRACE_CAPACITY {
            self.points.pop_front();
        }
        self.points.push_back(TracePoint {
            t_s,
            measured_c,
            setpoint_c,
        });
        self.last_record_s = Some(t_s);
    }

    pub fn points(&self) -> impl Iterator<Item = &TracePoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.last_record_s = None;
    }
}
