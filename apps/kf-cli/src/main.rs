use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use kf_app::{AppResult, ControlLoop, TickOutcome};
use kf_control::PidConfig;
use kf_plant::PlantConfig;
use kf_program::FiringParameters;

#[derive(Parser)]
#[command(name = "kf-cli")]
#[command(about = "Kilnflow CLI - kiln firing controller and simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default firing profile
    Init {
        /// Output profile path (.yaml, .yml or .json)
        profile_path: PathBuf,
    },
    /// Validate a firing profile
    Validate {
        /// Path to the profile file
        profile_path: PathBuf,
    },
    /// Show the firing schedule in a profile
    Show {
        /// Path to the profile file
        profile_path: PathBuf,
    },
    /// Fire the simulated kiln through a profile
    Fire {
        /// Path to the profile file (defaults to the built-in curve)
        profile_path: Option<PathBuf>,
        /// Simulation time step in seconds
        #[arg(long, default_value_t = 1.0)]
        dt: f64,
        /// Give up after this many simulated hours
        #[arg(long, default_value_t = 48.0)]
        max_hours: f64,
        /// Export the telemetry trace as CSV
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { profile_path } => cmd_init(&profile_path),
        Commands::Validate { profile_path } => cmd_validate(&profile_path),
        Commands::Show { profile_path } => cmd_show(&profile_path),
        Commands::Fire {
            profile_path,
            dt,
            max_hours,
            output,
        } => cmd_fire(profile_path.as_deref(), dt, max_hours, output.as_deref()),
    }
}

fn cmd_init(profile_path: &Path) -> AppResult<()> {
    kf_app::save_parameters(profile_path, &FiringParameters::default())?;
    println!("✓ Wrote default profile: {}", profile_path.display());
    Ok(())
}

fn cmd_validate(profile_path: &Path) -> AppResult<()> {
    println!("Validating profile: {}", profile_path.display());
    kf_app::load_parameters(profile_path)?;
    println!("✓ Profile is valid");
    Ok(())
}

fn cmd_show(profile_path: &Path) -> AppResult<()> {
    let params = kf_app::load_parameters(profile_path)?;
    print_schedule(&params);
    Ok(())
}

fn cmd_fire(
    profile_path: Option<&Path>,
    dt: f64,
    max_hours: f64,
    output: Option<&Path>,
) -> AppResult<()> {
    let params = match profile_path {
        Some(path) => kf_app::load_parameters(path)?,
        None => FiringParameters::default(),
    };
    print_schedule(&params);

    let mut cl = ControlLoop::simulated(params, PidConfig::default(), PlantConfig::default())?;
    cl.start_stop(0.0);
    println!("\nFiring started");

    let max_ticks = (max_hours * 3600.0 / dt) as u64;
    let mut t = 0.0;
    let mut last_print_s = f64::NEG_INFINITY;
    let mut faulted = false;

    for _ in 0..max_ticks {
        if cl.tick(t, dt) == TickOutcome::CriticalFault {
            faulted = true;
            break;
        }
        if !cl.is_running() {
            break;
        }
        if t - last_print_s >= 60.0 {
            render_progress(&cl.snapshot(t));
            last_print_s = t;
        }
        t += dt;
    }
    clear_progress_line();

    let snap = cl.snapshot(t);
    if faulted {
        println!("✗ Critical sensor fault at t={}", format_hms(t));
        println!("  Last reading: {:.1} degC", snap.measured_c);
    } else if cl.is_running() {
        println!("✗ Gave up after {:.1} simulated hours", max_hours);
    } else {
        println!("✓ Firing complete in {}", format_hms(t));
        println!("  Final temperature: {:.1} degC", snap.measured_c);
    }

    if let Some(path) = output {
        export_trace_csv(&cl, path)?;
    }
    Ok(())
}

fn print_schedule(params: &FiringParameters) {
    println!("Firing schedule:");
    for (i, ramp) in params.ramps.iter().enumerate() {
        println!(
            "  P{}: ramp to {:.0} degC at {:.0} degC/h, soak {:.0} min",
            i + 1,
            ramp.target_c,
            ramp.rate_c_per_hr,
            ramp.soak_min
        );
    }
    println!(
        "  Cool: down to {:.0} degC at {:.0} degC/h",
        params.cooldown.target_c, params.cooldown.rate_c_per_hr
    );
}

fn render_progress(snap: &kf_app::LoopSnapshot) {
    let phase = snap.phase.map(|p| p.label()).unwrap_or("Idle");
    let remaining = snap
        .remaining_estimate_s
        .map(format_hms)
        .unwrap_or_else(|| "--:--".to_string());
    print!(
        "\r[{:>4}] t={}  measured={:>7.1} degC  setpoint={:>7.1} degC  duty={:>3}%  remaining~{}",
        phase,
        format_hms(snap.program_elapsed_s),
        snap.measured_c,
        snap.setpoint_c,
        snap.duty_percent,
        remaining
    );
    let _ = io::stdout().flush();
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(120));
    let _ = io::stdout().flush();
}

fn format_hms(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{}:{:02}:{:02}", total / 3600, (total / 60) % 60, total % 60)
}

fn export_trace_csv(cl: &ControlLoop<kf_plant::KilnPlant>, path: &Path) -> AppResult<()> {
    let mut csv = String::from("time_s,measured_c,setpoint_c\n");
    for point in cl.trace().points() {
        csv.push_str(&format!(
            "{},{},{}\n",
            point.t_s, point.measured_c, point.setpoint_c
        ));
    }
    std::fs::write(path, csv)?;
    println!("✓ Exported {} trace points to {}", cl.trace().len(), path.display());
    Ok(())
}
