//! The once-per-tick orchestration point.

use kf_control::{HeaterOutput, HeaterPid, PidConfig};
use kf_plant::{KilnPlant, PlantConfig};
use kf_program::{FaultWatchdog, FiringParameters, ParamField, PhaseChange, ProgramMachine};

use crate::error::AppResult;
use crate::estimate::remaining_estimate_s;
use crate::interface::KilnInterface;
use crate::snapshot::LoopSnapshot;
use crate::trace::TelemetryTrace;

/// Result of one control tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Normal,
    /// The sensor-fault watchdog escalated this tick; heating is off and the
    /// program was forced to Idle. Surfaced exactly once per fault.
    CriticalFault,
}

/// Closed control loop over a kiln (simulated or real).
///
/// Every tick runs to completion in a fixed order; commands from the outside
/// (start/stop, parameter edits) are ordinary calls between ticks, never
/// interrupts of an in-flight computation.
pub struct ControlLoop<K: KilnInterface> {
    params: FiringParameters,
    machine: ProgramMachine,
    pid: HeaterPid,
    watchdog: FaultWatchdog,
    kiln: K,
    fault_latched: bool,
    last_measured_c: f64,
    last_output: HeaterOutput,
    trace: TelemetryTrace,
}

impl ControlLoop<KilnPlant> {
    /// Build a loop closed over the simulated plant.
    pub fn simulated(
        params: FiringParameters,
        pid_cfg: PidConfig,
        plant_cfg: PlantConfig,
    ) -> AppResult<Self> {
        let plant = KilnPlant::new(plant_cfg)?;
        Self::new(params, pid_cfg, plant)
    }
}

impl<K: KilnInterface> ControlLoop<K> {
    /// Build a loop over any kiln interface.
    pub fn new(params: FiringParameters, pid_cfg: PidConfig, mut kiln: K) -> AppResult<Self> {
        let pid = HeaterPid::new(pid_cfg)?;
        let last_measured_c = kiln.read_temperature();
        Ok(Self {
            params,
            machine: ProgramMachine::new(),
            pid,
            watchdog: FaultWatchdog::new(),
            kiln,
            fault_latched: false,
            last_measured_c,
            last_output: HeaterOutput::default(),
            trace: TelemetryTrace::new(),
        })
    }

    /// Advance one tick at time `t_s`, applying the output over `dt_s`.
    pub fn tick(&mut self, t_s: f64, dt_s: f64) -> TickOutcome {
        let measured_c = self.kiln.read_temperature();
        self.last_measured_c = measured_c;

        if let Some(fault) = self.watchdog.observe(t_s, measured_c) {
            tracing::warn!(
                measured_c = fault.measured_c,
                out_of_band_for_s = fault.out_of_band_for_s,
                "critical sensor fault, forcing heating off"
            );
            self.machine.stop();
            self.fault_latched = true;
            self.last_output = self
                .pid
                .update(t_s, measured_c, self.machine.setpoint_c(), false);
            self.kiln.apply(dt_s, 0, false);
            return TickOutcome::CriticalFault;
        }

        if let Some(change) = self.machine.tick(t_s, measured_c) {
            match change {
                PhaseChange::Advanced { from, to } => {
                    tracing::info!(from = from.label(), to = to.label(), "phase advanced");
                }
                PhaseChange::Completed => {
                    tracing::info!("firing program complete");
                }
            }
        }

        if self.machine.is_running() {
            self.trace
                .record(t_s, measured_c, self.machine.setpoint_c());
        }

        let enabled = self.machine.is_running();
        self.last_output = self
            .pid
            .update(t_s, measured_c, self.machine.setpoint_c(), enabled);
        self.kiln
            .apply(dt_s, self.last_output.duty_percent, self.last_output.relay_on);

        TickOutcome::Normal
    }

    /// Toggle the program between Idle and Running.
    ///
    /// A latched sensor fault is acknowledged (and only acknowledged) by the
    /// first press; a new run needs a second press.
    pub fn start_stop(&mut self, t_s: f64) {
        if self.fault_latched {
            self.fault_latched = false;
            self.watchdog.reset();
            tracing::info!("sensor fault acknowledged");
            return;
        }

        if self.machine.is_running() {
            self.machine.stop();
            self.pid.init(t_s);
            self.last_output = HeaterOutput::default();
            tracing::info!("firing program stopped");
        } else {
            self.trace.clear();
            self.machine.start(t_s, self.last_measured_c, &self.params);
            // A fresh run must not inherit windup from the previous one.
            self.pid.reset(t_s);
            tracing::info!(start_c = self.last_measured_c, "firing program started");
        }
    }

    /// Apply an encoder delta to the parameter at the operator-facing field
    /// index. Ignored while a program runs; returns whether the edit applied.
    pub fn edit_parameter(&mut self, field_index: usize, detents: i32) -> bool {
        if self.machine.is_running() {
            return false;
        }
        match ParamField::from_index(field_index) {
            Some(field) => {
                self.params.edit(field, detents);
                true
            }
            None => false,
        }
    }

    pub fn params(&self) -> &FiringParameters {
        &self.params
    }

    /// Replace the parameters wholesale (profile load). Idle only.
    pub fn set_params(&mut self, params: FiringParameters) -> bool {
        if self.machine.is_running() {
            return false;
        }
        self.params = params;
        true
    }

    pub fn fault_latched(&self) -> bool {
        self.fault_latched
    }

    pub fn is_running(&self) -> bool {
        self.machine.is_running()
    }

    pub fn trace(&self) -> &TelemetryTrace {
        &self.trace
    }

    pub fn kiln(&self) -> &K {
        &self.kiln
    }

    pub fn kiln_mut(&mut self) -> &mut K {
        &mut self.kiln
    }

    /// Owned, internally consistent snapshot at `t_s`.
    pub fn snapshot(&self, t_s: f64) -> LoopSnapshot {
        LoopSnapshot {
            run_state: self.machine.run_state(),
            phase: self.machine.phase(),
            measured_c: self.last_measured_c,
            setpoint_c: self.machine.setpoint_c(),
            duty_percent: self.last_output.duty_percent,
            relay_on: self.last_output.relay_on,
            plateau_reached: self.machine.plateau_reached(),
            sensor_warning: self.watchdog.warning_active(),
            fault_latched: self.fault_latched,
            phase_elapsed_s: self.machine.phase_elapsed_s(t_s),
            program_elapsed_s: self.machine.program_elapsed_s(t_s),
            remaining_estimate_s: remaining_estimate_s(&self.machine, self.last_measured_c, t_s),
        }
    }
}
