//! Discrete state-space stepper.
//!
//! Owns one [`DiscreteModel`] and the state vector. Advances the state once
//! per control tick:
//!
//! ```text
//! x_next = Ad·x + Bd·u
//! step:            y = Cd·x        (one tick between input and output)
//! step_immediate:  y = Cd·x_next   (output reflects the just-applied input)
//! x = x_next
//! ```
//!
//! All matrices live inline (`SMatrix`), so stepping never allocates.
//! Instances are deliberately not `Clone`: each one exclusively owns its
//! state, and per-axis parallelism means one instance per axis.

use nalgebra::{SMatrix, SVector};
use tracing::debug;

use super::discretize::{DiscretizeOptions, discretize, discretize_a};
use super::model::{ContinuousModel, DiscreteModel};
use crate::error::{DesignError, check_sample_period};

/// Linear discrete-time system with `N` states, `I` inputs and `O` outputs.
#[derive(Debug)]
pub struct LinearSystem<const N: usize, const I: usize, const O: usize> {
    model: DiscreteModel<N, I, O>,
    x: SVector<f64, N>,
    x_next: SVector<f64, N>,
}

impl<const N: usize, const I: usize, const O: usize> Default for LinearSystem<N, I, O> {
    /// Zero model, zero state.
    fn default() -> Self {
        Self::from_discrete(DiscreteModel::zeros())
    }
}

impl<const N: usize, const I: usize, const O: usize> LinearSystem<N, I, O> {
    /// Build from a continuous model, discretized at `ts`.
    pub fn from_continuous(
        model: &ContinuousModel<N, I, O>,
        ts: f64,
        options: DiscretizeOptions,
    ) -> Result<Self, DesignError> {
        let mut system = Self::default();
        system.configure(model, ts, options)?;
        Ok(system)
    }

    /// Build from an already discrete model.
    pub fn from_discrete(model: DiscreteModel<N, I, O>) -> Self {
        Self {
            model,
            x: SVector::zeros(),
            x_next: SVector::zeros(),
        }
    }

    /// Discretize `model` at `ts`, store the result and zero the state.
    pub fn configure(
        &mut self,
        model: &ContinuousModel<N, I, O>,
        ts: f64,
        options: DiscretizeOptions,
    ) -> Result<(), DesignError> {
        let ts = check_sample_period(ts)?;
        let (ad, bd) = discretize(&model.a, &model.b, ts, options);
        self.configure_discrete(DiscreteModel::new(ad, bd, model.c));
        Ok(())
    }

    /// Store a discrete model as-is and zero the state.
    pub fn configure_discrete(&mut self, model: DiscreteModel<N, I, O>) {
        self.model = model;
        self.reset();
    }

    /// Re-discretize only the state matrix.
    ///
    /// Bd, Cd and the current state are left untouched, so a gain-scheduled
    /// plant can change its dynamics between ticks without a transient reset.
    pub fn update_a(
        &mut self,
        a: &SMatrix<f64, N, N>,
        ts: f64,
        pade_order: usize,
    ) -> Result<(), DesignError> {
        let ts = check_sample_period(ts)?;
        self.model.ad = discretize_a(a, ts, pade_order);
        debug!(states = N, ts, pade_order, "state matrix re-discretized");
        Ok(())
    }

    /// Advance one tick, returning the output of the current state.
    #[inline]
    pub fn step(&mut self, u: &SVector<f64, I>) -> SVector<f64, O> {
        self.x_next = self.model.ad * self.x + self.model.bd * u;
        let y = self.model.cd * self.x;
        self.x = self.x_next;
        y
    }

    /// Advance one tick, returning the output of the next state.
    #[inline]
    pub fn step_immediate(&mut self, u: &SVector<f64, I>) -> SVector<f64, O> {
        self.x_next = self.model.ad * self.x + self.model.bd * u;
        let y = self.model.cd * self.x_next;
        self.x = self.x_next;
        y
    }

    /// Zero the state. The discrete model is kept.
    #[inline]
    pub fn reset(&mut self) {
        self.x = SVector::zeros();
        self.x_next = SVector::zeros();
    }

    /// Current state vector.
    #[inline]
    pub fn state(&self) -> &SVector<f64, N> {
        &self.x
    }

    /// Stored discrete model.
    #[inline]
    pub fn discrete_model(&self) -> &DiscreteModel<N, I, O> {
        &self.model
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
