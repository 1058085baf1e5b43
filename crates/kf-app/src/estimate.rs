//! Remaining firing time estimate.
//!
//! Sums, for the active phase, the time to ramp the measured temperature to
//! the phase target at the commanded rate plus the unserved soak time, then
//! the full nominal duration of every phase not yet entered. The estimate is
//! advisory; it assumes the kiln tracks the commanded rates.

use kf_program::{PhaseKind, ProgramMachine};

/// Estimated seconds until the program returns to Idle, `None` while idle.
pub fn remaining_estimate_s(machine: &ProgramMachine, measured_c: f64, t_s: f64) -> Option<f64> {
    let idx = machine.phase_index()?;
    let phases = machine.phases();
    let current = &phases[idx];

    let mut total_s = 0.0;

    match current.kind {
        PhaseKind::Heat { soak_min } => {
            let to_go_c = (current.target_c - measured_c).max(0.0);
            total_s += to_go_c / current.rate_c_per_hr * 3600.0;

            let soak_s = soak_min * 60.0;
            if machine.plateau_reached() {
                total_s += (soak_s - machine.plateau_elapsed_s(t_s)).max(0.0);
            } else {
                total_s += soak_s;
            }
        }
        PhaseKind::Cool => {
            let to_go_c = (measured_c - current.target_c).max(0.0);
            total_s += to_go_c / current.rate_c_per_hr * 3600.0;
        }
    }

    let mut prev_target_c = current.target_c;
    for phase in &phases[idx + 1..] {
        match phase.kind {
            PhaseKind::Heat { soak_min } => {
                let span_c = (phase.target_c - prev_target_c).max(0.0);
                total_s += span_c / phase.rate_c_per_hr * 3600.0 + soak_min * 60.0;
                prev_target_c = phase.target_c;
            }
            PhaseKind::Cool => {
                let span_c = (prev_target_c - phase.target_c).max(0.0);
                total_s += span_c / phase.rate_c_per_hr * 3600.0;
            }
        }
    }

    Some(total_s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kf_program::{CooldownPhase, FiringParameters, RampPhase};

    fn params() -> FiringParameters {
        FiringParameters {
            ramps: [
                RampPhase {
                    target_c: 100.0,
                    rate_c_per_hr: 100.0,
                    soak_min: 10.0,
                },
                RampPhase {
                    target_c: 300.0,
                    rate_c_per_hr: 100.0,
                    soak_min: 0.0,
                },
                RampPhase {
                    target_c: 500.0,
                    rate_c_per_hr: 100.0,
                    soak_min: 0.0,
                },
            ],
            cooldown: CooldownPhase {
                target_c: 100.0,
                rate_c_per_hr: 100.0,
            },
        }
    }

    #[test]
    fn idle_machine_has_no_estimate() {
        let machine = ProgramMachine::new();
        assert!(remaining_estimate_s(&machine, 20.0, 0.0).is_none());
    }

    #[test]
    fn fresh_run_sums_every_phase() {
        let mut machine = ProgramMachine::new();
        machine.start(0.0, 0.0, &params());
        machine.tick(0.0, 0.0);

        // Ramp1: 100 degC at 100/h = 1 h + 10 min soak.
        // Ramp2: 200 degC span = 2 h. Ramp3: 200 degC span = 2 h.
        // Cooldown: 400 degC span = 4 h.
        let expected = 3600.0 + 600.0 + 7200.0 + 7200.0 + 14_400.0;
        let est = remaining_estimate_s(&machine, 0.0, 0.0).unwrap();
        assert!((est - expected).abs() < 1.0);
    }

    #[test]
    fn served_soak_time_is_discounted() {
        let mut machine = ProgramMachine::new();
        machine.start(0.0, 0.0, &params());

        // Reach the plateau, then serve 4 of the 10 soak minutes.
        machine.tick(10.0, 96.0);
        assert!(machine.plateau_reached());

        let full = remaining_estimate_s(&machine, 96.0, 10.0).unwrap();
        let later = remaining_estimate_s(&machine, 96.0, 250.0).unwrap();
        assert!((full - later - 240.0).abs() < 1.0);
    }

    #[test]
    fn estimate_decreases_across_a_completed_phase() {
        let mut machine = ProgramMachine::new();
        machine.start(0.0, 0.0, &params());
        machine.tick(0.0, 0.0);
        let before = remaining_estimate_s(&machine, 0.0, 0.0).unwrap();

        // Complete ramp 1: plateau plus the full soak.
        machine.tick(1.0, 96.0);
        let mut t = 1.0;
        while machine.phase_index() == Some(0) {
            t += 1.0;
            machine.tick(t, 96.0);
            assert!(t < 1e5);
        }
        let after = remaining_estimate_s(&machine, 96.0, t).unwrap();
        assert!(after < before);
    }
}
