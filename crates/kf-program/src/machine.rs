//! Firing program state machine.
//!
//! Walks the ordered phase list, recomputing the moving setpoint each tick
//! and advancing on the shared completion rule: the plateau timer starts
//! once the measured temperature comes within the plateau band of the phase
//! target, and the phase completes after the soak duration has elapsed on
//! that timer. The timer, once started, is never restarted within a phase.
//!
//! Cooldown completes the instant the measured temperature falls to the
//! cooldown target, returning the machine to Idle.

use serde::{Deserialize, Serialize};

use crate::params::FiringParameters;
use crate::phase::{descriptors, PhaseDescriptor, PhaseId, PhaseKind, PLATEAU_BAND_C};

/// Whether a firing program is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    Idle,
    Running,
}

/// Phase transition produced by a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseChange {
    /// The soak completed and the program moved to the next phase.
    Advanced { from: PhaseId, to: PhaseId },
    /// Cooldown reached its target; the program returned to Idle.
    Completed,
}

/// The firing program state machine.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramMachine {
    run_state: RunState,
    phases: [PhaseDescriptor; 4],
    phase_index: usize,
    setpoint_c: f64,
    phase_start_s: f64,
    phase_start_setpoint_c: f64,
    program_start_s: f64,
    plateau_reached: bool,
    plateau_start_s: f64,
}

impl Default for ProgramMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgramMachine {
    /// Create an idle machine.
    pub fn new() -> Self {
        Self {
            run_state: RunState::Idle,
            phases: descriptors(&FiringParameters::default()),
            phase_index: 0,
            setpoint_c: 0.0,
            phase_start_s: 0.0,
            phase_start_setpoint_c: 0.0,
            program_start_s: 0.0,
            plateau_reached: false,
            plateau_start_s: 0.0,
        }
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    /// Active phase, `None` while idle.
    pub fn phase(&self) -> Option<PhaseId> {
        if self.is_running() {
            Some(self.phases[self.phase_index].id)
        } else {
            None
        }
    }

    /// The phase list the current run was started with.
    pub fn phases(&self) -> &[PhaseDescriptor; 4] {
        &self.phases
    }

    /// Index of the active phase, `None` while idle.
    pub fn phase_index(&self) -> Option<usize> {
        if self.is_running() {
            Some(self.phase_index)
        } else {
            None
        }
    }

    /// Instantaneous temperature setpoint (degC).
    pub fn setpoint_c(&self) -> f64 {
        self.setpoint_c
    }

    pub fn plateau_reached(&self) -> bool {
        self.plateau_reached
    }

    /// Time spent on the plateau so far (seconds), zero before it starts.
    pub fn plateau_elapsed_s(&self, t_s: f64) -> f64 {
        if self.plateau_reached {
            (t_s - self.plateau_start_s).max(0.0)
        } else {
            0.0
        }
    }

    /// Time spent in the active phase (seconds).
    pub fn phase_elapsed_s(&self, t_s: f64) -> f64 {
        if self.is_running() {
            (t_s - self.phase_start_s).max(0.0)
        } else {
            0.0
        }
    }

    /// Time since the program started (seconds).
    pub fn program_elapsed_s(&self, t_s: f64) -> f64 {
        if self.is_running() {
            (t_s - self.program_start_s).max(0.0)
        } else {
            0.0
        }
    }

    /// Start a run at `t_s`, capturing the measured temperature as the
    /// initial setpoint. The caller must also reset the heater controller so
    /// a fresh run does not inherit stale integral windup.
    pub fn start(&mut self, t_s: f64, measured_c: f64, params: &FiringParameters) {
        self.phases = descriptors(params);
        self.run_state = RunState::Running;
        self.phase_index = 0;
        self.setpoint_c = measured_c;
        self.phase_start_setpoint_c = measured_c;
        self.phase_start_s = t_s;
        self.program_start_s = t_s;
        self.plateau_reached = false;
        self.plateau_start_s = t_s;
    }

    /// Force the machine back to Idle immediately.
    pub fn stop(&mut self) {
        self.run_state = RunState::Idle;
        self.plateau_reached = false;
    }

    /// Advance one tick: recompute the setpoint, then evaluate the active
    /// phase's completion rule against the measured temperature.
    pub fn tick(&mut self, t_s: f64, measured_c: f64) -> Option<PhaseChange> {
        if !self.is_running() {
            return None;
        }

        let phase = self.phases[self.phase_index];
        let elapsed_h = (t_s - self.phase_start_s).max(0.0) / 3600.0;
        self.setpoint_c = phase.setpoint(self.phase_start_setpoint_c, elapsed_h);

        match phase.kind {
            PhaseKind::Heat { soak_min } => {
                if !self.plateau_reached && measured_c >= phase.target_c - PLATEAU_BAND_C {
                    self.plateau_reached = true;
                    self.plateau_start_s = t_s;
                }
                if self.plateau_reached && t_s - self.plateau_start_s >= soak_min * 60.0 {
                    let from = phase.id;
                    self.phase_index += 1;
                    self.phase_start_s = t_s;
                    self.phase_start_setpoint_c = self.setpoint_c;
                    self.plateau_reached = false;
                    return Some(PhaseChange::Advanced {
                        from,
                        to: self.phases[self.phase_index].id,
                    });
                }
            }
            PhaseKind::Cool => {
                if measured_c <= phase.target_c {
                    self.run_state = RunState::Idle;
                    return Some(PhaseChange::Completed);
                }
            }
        }
        None
    }
}
