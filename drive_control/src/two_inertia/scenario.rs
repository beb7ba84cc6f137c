//! Offline closed-loop scenario.
//!
//! Runs plant simulator, observer-based state feedback and the load-torque
//! observer together for the `[simulation]` section of a design file:
//!
//! ```text
//! t = 0                 iq_ref step
//! t = load_torque_time  τl step
//! ```

use drive_common::design::DesignConfig;
use nalgebra::Vector3;
use tracing::{debug, info};

use super::feedback::TwoInertiaStateFeedback;
use super::observer::TwoInertiaDisturbanceObserver;
use super::simulator::TwoInertiaSimulator;
use crate::error::DesignError;
use crate::linear::discretize::DiscretizeOptions;

/// Summary of one closed-loop run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioReport {
    pub ticks: usize,
    /// Plant state `[ωl, θs, ωm]` after the last tick.
    pub final_state: Vector3<f64>,
    /// Estimated plant state after the last tick.
    pub final_estimate: Vector3<f64>,
    /// `f · x̂` after the last tick [A].
    pub feedback_current: f64,
    /// Largest commanded |iq| [A].
    pub peak_current: f64,
    /// Load torque applied on the last tick [Nm].
    pub applied_load_torque: f64,
    /// Disturbance observer load-torque estimate [Nm].
    pub estimated_load_torque: f64,
}

/// Simulate `ticks` control periods, or `simulation.duration` when `None`.
///
/// # Errors
/// Design errors from building the estimators, or
/// [`DesignError::Diverged`] once the plant state stops being finite.
pub fn run_scenario(
    config: &DesignConfig,
    ticks: Option<usize>,
) -> Result<ScenarioReport, DesignError> {
    let plant = &config.plant;
    let design = &config.design;
    let scenario = &config.simulation;
    let ts = design.sample_period;
    let options = DiscretizeOptions::from(design);

    let mut sim = TwoInertiaSimulator::new(plant, ts, options)?;
    let mut regulator = TwoInertiaStateFeedback::new(
        plant,
        &design.feedback_poles,
        design.observer_bandwidth,
        ts,
        options,
    )?;
    let mut dob = TwoInertiaDisturbanceObserver::new(
        plant,
        design.disturbance_observer_bandwidth,
        ts,
        options,
    )?;

    let ticks = ticks.unwrap_or_else(|| scenario.ticks(ts));
    info!("Simulating {ticks} ticks ({:.3} s)", ticks as f64 * ts);

    let mut peak_current = 0.0_f64;
    let mut tau_l = 0.0;
    for tick in 0..ticks {
        let t = tick as f64 * ts;
        tau_l = if t >= scenario.load_torque_time {
            scenario.load_torque
        } else {
            0.0
        };

        let omega_m = sim.motor_speed();
        let iq = regulator.command(scenario.current_reference, omega_m);
        dob.estimate(iq, omega_m);
        sim.step(iq, tau_l);
        peak_current = peak_current.max(iq.abs());

        if !sim.state().iter().all(|v| v.is_finite()) {
            return Err(DesignError::Diverged(tick));
        }
    }

    let report = ScenarioReport {
        ticks,
        final_state: *sim.state(),
        final_estimate: *regulator.estimate(),
        feedback_current: regulator.feedback_current(),
        peak_current,
        applied_load_torque: tau_l,
        estimated_load_torque: dob.load_torque(),
    };
    debug!(?report, "closed-loop scenario finished");
    Ok(report)
}
