//! Observer-based state feedback.
//!
//! Combines an independently designed 3rd-order observer and state-feedback
//! gain (separation principle):
//!
//! ```text
//! i_fb = f · x̂
//! iq   = iq_ref − i_fb
//! ```
//!
//! `x̂` is the estimate for the current tick, built from measurements up to
//! the previous tick, so `i_fb` is available before `iq` is applied. The
//! observer then advances with the applied `iq` and the measured `ωm`.

use drive_common::design::PoleSpec;
use drive_common::plant::TwoInertiaParams;
use nalgebra::{RowVector3, Vector3};
use tracing::debug;

use super::gains::feedback_gain;
use super::observer::TwoInertiaObserver;
use crate::error::DesignError;
use crate::linear::discretize::DiscretizeOptions;

/// State-feedback current regulator for the two-inertia plant.
#[derive(Debug)]
pub struct TwoInertiaStateFeedback {
    observer: TwoInertiaObserver,
    gain: RowVector3<f64>,
}

impl TwoInertiaStateFeedback {
    /// Design `f` for `poles` and an observer with triple pole at `−bandwidth`.
    pub fn new(
        params: &TwoInertiaParams,
        poles: &PoleSpec,
        bandwidth: f64,
        ts: f64,
        options: DiscretizeOptions,
    ) -> Result<Self, DesignError> {
        let gain = feedback_gain(params, poles)?;
        Self::with_gain(params, gain, bandwidth, ts, options)
    }

    /// Use an externally derived feedback gain.
    pub fn with_gain(
        params: &TwoInertiaParams,
        gain: RowVector3<f64>,
        bandwidth: f64,
        ts: f64,
        options: DiscretizeOptions,
    ) -> Result<Self, DesignError> {
        let observer = TwoInertiaObserver::new(params, bandwidth, ts, options)?;
        debug!(f = ?gain, k = ?observer.gain(), "state feedback configured");
        Ok(Self { observer, gain })
    }

    /// Feedback current `f · x̂` for the current tick [A].
    #[inline]
    pub fn feedback_current(&self) -> f64 {
        (self.gain * self.observer.current_estimate())[0]
    }

    /// One control tick.
    ///
    /// Returns the current to apply, `iq_ref − f·x̂`, and advances the
    /// observer with it and the measured motor speed.
    #[inline]
    pub fn command(&mut self, iq_ref: f64, omega_m: f64) -> f64 {
        let iq = iq_ref - self.feedback_current();
        self.observer.estimate(iq, omega_m);
        iq
    }

    /// Advance the observer with a current applied elsewhere.
    #[inline]
    pub fn observe(&mut self, iq: f64, omega_m: f64) {
        self.observer.estimate(iq, omega_m);
    }

    #[inline]
    pub fn estimate(&self) -> &Vector3<f64> {
        self.observer.current_estimate()
    }

    #[inline]
    pub fn gain(&self) -> &RowVector3<f64> {
        &self.gain
    }

    #[inline]
    pub fn observer_gain(&self) -> &Vector3<f64> {
        self.observer.gain()
    }

    #[inline]
    pub fn reset(&mut self) {
        self.observer.reset();
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
