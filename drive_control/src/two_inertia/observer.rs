//! Two-inertia state observers.
//!
//! Both observers measure motor speed only. The disturbance observer
//! augments the model with a constant load torque and so also recovers
//! the torque acting on the load side.

use drive_common::plant::TwoInertiaParams;
use nalgebra::{Vector3, Vector4};

use super::gains::{observer_gain_3rd, observer_gain_4th};
use super::plant::{
    input_vector_3rd, input_vector_4th, output_row_3rd, output_row_4th, state_matrix_3rd,
    state_matrix_4th,
};
use crate::error::DesignError;
use crate::linear::discretize::DiscretizeOptions;
use crate::observer::LuenbergerObserver;

// ─── State Observer ─────────────────────────────────────────────────

/// Estimates `[ωl, θs, ωm]` from the applied current and motor speed.
#[derive(Debug)]
pub struct TwoInertiaObserver {
    observer: LuenbergerObserver<3>,
}

impl TwoInertiaObserver {
    /// Observer with all three poles at `s = −bandwidth`.
    pub fn new(
        params: &TwoInertiaParams,
        bandwidth: f64,
        ts: f64,
        options: DiscretizeOptions,
    ) -> Result<Self, DesignError> {
        let k = observer_gain_3rd(params, bandwidth)?;
        let observer = LuenbergerObserver::new(
            &state_matrix_3rd(params),
            &input_vector_3rd(params),
            &output_row_3rd(),
            &k,
            ts,
            options,
        )?;
        Ok(Self { observer })
    }

    /// One tick: applied current `iq`, measured motor speed `omega_m`.
    #[inline]
    pub fn estimate(&mut self, iq: f64, omega_m: f64) -> Vector3<f64> {
        self.observer.estimate(iq, omega_m)
    }

    #[inline]
    pub fn current_estimate(&self) -> &Vector3<f64> {
        self.observer.current_estimate()
    }

    #[inline]
    pub fn gain(&self) -> &Vector3<f64> {
        self.observer.gain()
    }

    #[inline]
    pub fn reset(&mut self) {
        self.observer.reset();
    }
}

// ─── Disturbance Observer ───────────────────────────────────────────

/// Estimates `[ωl, θs, ωm, τl]` from the applied current and motor speed.
#[derive(Debug)]
pub struct TwoInertiaDisturbanceObserver {
    observer: LuenbergerObserver<4>,
}

impl TwoInertiaDisturbanceObserver {
    /// Observer with all four poles at `s = −bandwidth`.
    pub fn new(
        params: &TwoInertiaParams,
        bandwidth: f64,
        ts: f64,
        options: DiscretizeOptions,
    ) -> Result<Self, DesignError> {
        let k = observer_gain_4th(params, bandwidth)?;
        let observer = LuenbergerObserver::new(
            &state_matrix_4th(params),
            &input_vector_4th(params),
            &output_row_4th(),
            &k,
            ts,
            options,
        )?;
        Ok(Self { observer })
    }

    /// One tick: applied current `iq`, measured motor speed `omega_m`.
    #[inline]
    pub fn estimate(&mut self, iq: f64, omega_m: f64) -> Vector4<f64> {
        self.observer.estimate(iq, omega_m)
    }

    /// Estimated load torque [Nm].
    #[inline]
    pub fn load_torque(&self) -> f64 {
        self.observer.current_estimate()[3]
    }

    /// Estimated load speed [rad/s].
    #[inline]
    pub fn load_speed(&self) -> f64 {
        self.observer.current_estimate()[0]
    }

    #[inline]
    pub fn current_estimate(&self) -> &Vector4<f64> {
        self.observer.current_estimate()
    }

    #[inline]
    pub fn gain(&self) -> &Vector4<f64> {
        self.observer.gain()
    }

    #[inline]
    pub fn reset(&mut self) {
        self.observer.reset();
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
