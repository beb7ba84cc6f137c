//! Transfer function realization.
//!
//! Realizes a strictly proper SISO transfer function
//!
//! ```text
//!          n_m·s^m + … + n_1·s + n_0
//! G(s) = ─────────────────────────────────,   m < ORDER
//!         s^ORDER + d_1·s^(ORDER−1) + … + d_ORDER
//! ```
//!
//! in controllable companion form and discretizes it through the linear
//! system engine. Coefficients are passed highest power first, so
//! `num = [1.0]`, `den = [1.0, a0]` is `1 / (s + a0)`.
//!
//! Companion form (row-major):
//!
//! ```text
//!     ┌ 0     1     0   …   0  ┐        ┌0┐
//! A = │ 0     0     1   …   0  │    b = │⋮│    c = [n_0 n_1 … n_m 0 … 0]
//!     │ ⋮                   ⋮  │        │0│
//!     └−d_N −d_N−1  …   −d_1   ┘        └1┘
//! ```
//!
//! The response uses the next-state output so the discrete sequence carries
//! no extra sample of delay relative to G(s).

use nalgebra::{SMatrix, SVector, Vector1};

use crate::error::DesignError;
use crate::linear::discretize::DiscretizeOptions;
use crate::linear::model::{ContinuousModel, DiscreteModel};
use crate::linear::system::LinearSystem;

/// Discretized transfer function of state order `ORDER`.
#[derive(Debug)]
pub struct TransferFunction<const ORDER: usize> {
    system: LinearSystem<ORDER, 1, 1>,
}

impl<const ORDER: usize> TransferFunction<ORDER> {
    /// Realize `num / den` and discretize at `ts`.
    ///
    /// # Errors
    /// - [`DesignError::DenominatorLength`] unless `den.len() == ORDER + 1`
    /// - [`DesignError::DenominatorNotMonic`] unless `den[0] == 1`
    /// - [`DesignError::NotStrictlyProper`] unless `num.len() <= ORDER`
    /// - [`DesignError::InvalidSamplePeriod`] unless `ts > 0`
    pub fn new(
        num: &[f64],
        den: &[f64],
        ts: f64,
        options: DiscretizeOptions,
    ) -> Result<Self, DesignError> {
        let model = Self::realize(num, den)?;
        Ok(Self {
            system: LinearSystem::from_continuous(&model, ts, options)?,
        })
    }

    /// Wrap an already discretized realization.
    pub fn from_discrete(model: DiscreteModel<ORDER, 1, 1>) -> Self {
        Self {
            system: LinearSystem::from_discrete(model),
        }
    }

    /// Controllable companion-form realization of `num / den`.
    pub fn realize(num: &[f64], den: &[f64]) -> Result<ContinuousModel<ORDER, 1, 1>, DesignError> {
        if ORDER == 0 {
            return Err(DesignError::InvalidParameters(
                "transfer function order must be at least 1".to_string(),
            ));
        }
        if den.len() != ORDER + 1 {
            return Err(DesignError::DenominatorLength {
                expected: ORDER + 1,
                actual: den.len(),
            });
        }
        if den[0] != 1.0 {
            return Err(DesignError::DenominatorNotMonic(den[0]));
        }
        if num.is_empty() || num.len() > ORDER {
            return Err(DesignError::NotStrictlyProper {
                numerator: num.len(),
                order: ORDER,
            });
        }

        let mut a = SMatrix::<f64, ORDER, ORDER>::zeros();
        for i in 0..ORDER - 1 {
            a[(i, i + 1)] = 1.0;
        }
        for j in 0..ORDER {
            a[(ORDER - 1, j)] = -den[ORDER - j];
        }

        let mut b = SVector::<f64, ORDER>::zeros();
        b[ORDER - 1] = 1.0;

        let mut c = SMatrix::<f64, 1, ORDER>::zeros();
        for (j, &n) in num.iter().rev().enumerate() {
            c[(0, j)] = n;
        }

        Ok(ContinuousModel::new(a, b, c))
    }

    /// Respond to one input sample with zero algorithmic delay.
    #[inline]
    pub fn respond(&mut self, u: f64) -> f64 {
        self.system.step_immediate(&Vector1::new(u))[0]
    }

    /// Zero the internal state.
    #[inline]
    pub fn reset(&mut self) {
        self.system.reset();
    }

    /// Discretized realization.
    #[inline]
    pub fn discrete_model(&self) -> &DiscreteModel<ORDER, 1, 1> {
        self.system.discrete_model()
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
