//! Full-state Luenberger observer.
//!
//! The observer is a plant model driven by the plant input and by the
//! gain-weighted output error:
//!
//! ```text
//! x̂' = (A − k·c)·x̂ + [b | k]·[u, y]ᵀ
//! ```
//!
//! It is built as an ordinary [`LinearSystem`] with identity output, so
//! plant simulation and plant estimation share one discretization path.
//! The caller must supply a detectable (A, c) pair; nothing checks it.

use nalgebra::{RowSVector, SMatrix, SVector, Vector2};

use crate::error::DesignError;
use crate::linear::discretize::DiscretizeOptions;
use crate::linear::model::ContinuousModel;
use crate::linear::system::LinearSystem;

/// Luenberger observer for a single-input single-output plant with `N` states.
#[derive(Debug)]
pub struct LuenbergerObserver<const N: usize> {
    system: LinearSystem<N, 2, N>,
    gain: SVector<f64, N>,
}

impl<const N: usize> LuenbergerObserver<N> {
    /// Build the observer for plant (A, b, c) with gain `k`, discretized at `ts`.
    pub fn new(
        a: &SMatrix<f64, N, N>,
        b: &SVector<f64, N>,
        c: &RowSVector<f64, N>,
        k: &SVector<f64, N>,
        ts: f64,
        options: DiscretizeOptions,
    ) -> Result<Self, DesignError> {
        let model = Self::continuous_model(a, b, c, k);
        let system = LinearSystem::from_continuous(&model, ts, options)?;
        Ok(Self { system, gain: *k })
    }

    /// Continuous observer model `(A − k·c, [b | k], I)`.
    pub fn continuous_model(
        a: &SMatrix<f64, N, N>,
        b: &SVector<f64, N>,
        c: &RowSVector<f64, N>,
        k: &SVector<f64, N>,
    ) -> ContinuousModel<N, 2, N> {
        ContinuousModel::new(
            a - k * c,
            SMatrix::<f64, N, 2>::from_columns(&[*b, *k]),
            SMatrix::identity(),
        )
    }

    /// Feed one tick of plant input `u` and measured output `y`.
    ///
    /// Returns the estimate belonging to this tick, then advances.
    #[inline]
    pub fn estimate(&mut self, u: f64, y: f64) -> SVector<f64, N> {
        self.estimate_input(&Vector2::new(u, y))
    }

    /// Same as [`estimate`](Self::estimate) with the `[u, y]` pair packed.
    #[inline]
    pub fn estimate_input(&mut self, input: &Vector2<f64>) -> SVector<f64, N> {
        self.system.step(input)
    }

    /// Estimate the next call to `estimate` will return.
    #[inline]
    pub fn current_estimate(&self) -> &SVector<f64, N> {
        self.system.state()
    }

    /// Observer gain `k`.
    #[inline]
    pub fn gain(&self) -> &SVector<f64, N> {
        &self.gain
    }

    /// Zero the estimate.
    #[inline]
    pub fn reset(&mut self) {
        self.system.reset();
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
