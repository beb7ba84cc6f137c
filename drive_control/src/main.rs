//! # Drive Design
//!
//! Offline design tool for a two-inertia servo axis.
//!
//! Loads a design TOML, derives the observer and state-feedback gains,
//! checks the achieved closed-loop polynomial and runs a closed-loop
//! simulation of plant, observer-based state feedback and load-torque
//! observer at the configured sample period.

use clap::Parser;
use drive_common::design::{DesignConfig, PoleSpec};
use drive_control::config::load_design_config;
use drive_control::linear::poly::{characteristic_polynomial, poly_from_roots};
use drive_control::two_inertia::plant::{input_vector_3rd, state_matrix_3rd};
use drive_control::two_inertia::{
    feedback_gain, observer_gain_3rd, observer_gain_4th, run_scenario,
};
use num_complex::Complex64;
use std::path::PathBuf;
use std::process;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Drive Design — two-inertia observer and state-feedback designer
#[derive(Parser, Debug)]
#[command(name = "drive_design")]
#[command(version)]
#[command(about = "Pole-placement design and closed-loop check for a two-inertia axis")]
struct Args {
    /// Path to the design configuration TOML.
    #[arg(default_value = "config/two_inertia.toml")]
    config: PathBuf,

    /// Number of simulated control ticks (default: simulation.duration / sample_period).
    #[arg(long)]
    ticks: Option<usize>,

    /// Enable verbose logging (DEBUG level).
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format.
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();
    let config = load_design_config(&args.config);

    let level = match (&config, args.verbose) {
        (_, true) => "debug",
        (Ok(cfg), false) => cfg.shared.log_level.as_directive(),
        (Err(_), false) => "info",
    };
    setup_tracing(level, args.json);

    info!("Drive Design v{} starting...", env!("CARGO_PKG_VERSION"));

    let result = config
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error>)
        .and_then(|cfg| run(&args, &cfg));
    if let Err(e) = result {
        error!("FATAL: {e}");
        process::exit(1);
    }

    info!("Drive Design complete");
}

fn run(args: &Args, config: &DesignConfig) -> Result<(), Box<dyn std::error::Error>> {
    let plant = &config.plant;
    let design = &config.design;
    let ts = design.sample_period;

    info!(
        "Config OK: service={}, Ts={}µs, resonance={:.1} rad/s, anti-resonance={:.1} rad/s",
        config.shared.service_name,
        ts * 1e6,
        plant.resonance(),
        plant.anti_resonance(),
    );

    // ── Gain design ──
    let k3 = observer_gain_3rd(plant, design.observer_bandwidth)?;
    let k4 = observer_gain_4th(plant, design.disturbance_observer_bandwidth)?;
    let f = feedback_gain(plant, &design.feedback_poles)?;
    info!("observer gain k = [{:.6e}, {:.6e}, {:.6e}]", k3[0], k3[1], k3[2]);
    info!(
        "disturbance observer gain k = [{:.6e}, {:.6e}, {:.6e}, {:.6e}]",
        k4[0], k4[1], k4[2], k4[3]
    );
    info!("feedback gain f = [{:.6e}, {:.6e}, {:.6e}]", f[0], f[1], f[2]);

    check_closed_loop(config, &f);

    // ── Closed-loop simulation ──
    let report = run_scenario(config, args.ticks)?;
    let x = report.final_state;
    info!(
        "Final state: ωl={:.6} rad/s, θs={:.6e} rad, ωm={:.6} rad/s",
        x[0], x[1], x[2]
    );
    info!(
        "Feedback current {:.6} A, peak command {:.6} A",
        report.feedback_current, report.peak_current
    );
    info!(
        "Load torque: applied {:.6} Nm, estimated {:.6} Nm",
        report.applied_load_torque, report.estimated_load_torque
    );

    Ok(())
}

/// Compare the achieved closed-loop polynomial of `A − b·f` with the target.
fn check_closed_loop(config: &DesignConfig, f: &nalgebra::RowVector3<f64>) {
    let a = state_matrix_3rd(&config.plant);
    let b = input_vector_3rd(&config.plant);
    let achieved = characteristic_polynomial(&(a - b * f));

    let roots = match config.design.feedback_poles {
        PoleSpec::Real { poles } => poles.map(|p| Complex64::new(p, 0.0)),
        PoleSpec::Complex { real, re, im } => [
            Complex64::new(real, 0.0),
            Complex64::new(re, im),
            Complex64::new(re, -im),
        ],
    };
    let target: Vec<f64> = poly_from_roots(&roots).iter().map(|c| c.re).collect();

    for (i, (got, want)) in achieved.iter().zip(&target).enumerate() {
        let err = (got - want).abs() / want.abs().max(1.0);
        if err > 1e-6 {
            warn!(coefficient = i, got, want, "closed-loop polynomial deviates from target");
        }
    }
    info!("closed-loop polynomial {:?}", achieved);
}

/// Setup tracing subscriber: `RUST_LOG` wins, otherwise `level`.
fn setup_tracing(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .init();
    }
}
