//! Zero-order-hold discretization.
//!
//! Converts a continuous pair (A, B) into its discrete equivalent at sample
//! period `Ts`:
//!
//! ```text
//! Ad = expm(A·Ts)
//! Bd = (∫₀^Ts expm(A·τ) dτ) · B
//! ```
//!
//! `expm` is a diagonal Padé approximant of configurable order evaluated
//! directly on its argument. No scaling-and-squaring is applied, so accuracy
//! degrades once ‖A·Ts‖ is no longer moderate; nothing detects this.
//! The integral is a composite trapezoidal rule over equal subintervals,
//! each node evaluated with the same Padé approximant.
//!
//! Cost is O(steps × order × N³). Run it at configuration time only.

use drive_common::consts::{
    PADE_ORDER_ACCURATE, PADE_ORDER_FAST, QUADRATURE_STEPS_ACCURATE, QUADRATURE_STEPS_FAST,
};
use drive_common::design::DesignSection;
use nalgebra::SMatrix;
use tracing::{debug, warn};

/// Padé order and quadrature resolution for one discretization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscretizeOptions {
    /// Diagonal Padé approximant order.
    pub pade_order: usize,
    /// Equal subintervals of the exponential-integral quadrature.
    pub quadrature_steps: usize,
}

impl DiscretizeOptions {
    /// General path: order 13, 10 000 subintervals.
    pub const ACCURATE: Self = Self {
        pade_order: PADE_ORDER_ACCURATE,
        quadrature_steps: QUADRATURE_STEPS_ACCURATE,
    };

    /// Cheap path: order 3, 100 subintervals.
    pub const FAST: Self = Self {
        pade_order: PADE_ORDER_FAST,
        quadrature_steps: QUADRATURE_STEPS_FAST,
    };
}

impl Default for DiscretizeOptions {
    fn default() -> Self {
        Self::ACCURATE
    }
}

impl From<&DesignSection> for DiscretizeOptions {
    fn from(section: &DesignSection) -> Self {
        Self {
            pade_order: section.pade_order,
            quadrature_steps: section.quadrature_steps,
        }
    }
}

/// Matrix exponential by diagonal Padé approximant `D(X)⁻¹·N(X)`.
///
/// ```text
/// N(X) = Σ cⱼ Xʲ,  D(X) = Σ cⱼ (−X)ʲ
/// cⱼ = (2q − j)! q! / ((2q)! j! (q − j)!)
/// ```
///
/// Returns a NaN-filled matrix if `D(X)` is singular.
pub fn expm_pade<const N: usize>(x: &SMatrix<f64, N, N>, order: usize) -> SMatrix<f64, N, N> {
    let mut numer = SMatrix::<f64, N, N>::identity();
    let mut denom = SMatrix::<f64, N, N>::identity();
    let mut power = SMatrix::<f64, N, N>::identity();
    let mut coeff = 1.0;

    for j in 1..=order {
        // c_j = c_{j-1} · (q − j + 1) / ((2q − j + 1) · j)
        coeff *= (order - j + 1) as f64 / ((2 * order - j + 1) * j) as f64;
        power = power * x;
        let term = power * coeff;
        numer += term;
        if j % 2 == 0 {
            denom += term;
        } else {
            denom -= term;
        }
    }

    match denom.try_inverse() {
        Some(inv) => inv * numer,
        None => {
            warn!(order, "Padé denominator singular, matrix exponential undefined");
            SMatrix::from_element(f64::NAN)
        }
    }
}

/// Exponential integral `∫₀^Ts expm(A·τ) dτ` by composite trapezoidal rule.
pub fn expm_integral<const N: usize>(
    a: &SMatrix<f64, N, N>,
    ts: f64,
    options: DiscretizeOptions,
) -> SMatrix<f64, N, N> {
    let steps = options.quadrature_steps.max(1);
    let h = ts / steps as f64;

    // Endpoints carry half weight; expm(0) is exactly the identity.
    let mut sum = (SMatrix::<f64, N, N>::identity() + expm_pade(&(a * ts), options.pade_order))
        * 0.5;
    for i in 1..steps {
        sum += expm_pade(&(a * (h * i as f64)), options.pade_order);
    }
    sum * h
}

/// Discretize (A, B) at sample period `ts`.
///
/// `ts` must be strictly positive; callers validate it.
pub fn discretize<const N: usize, const I: usize>(
    a: &SMatrix<f64, N, N>,
    b: &SMatrix<f64, N, I>,
    ts: f64,
    options: DiscretizeOptions,
) -> (SMatrix<f64, N, N>, SMatrix<f64, N, I>) {
    debug_assert!(ts > 0.0);
    debug!(
        states = N,
        inputs = I,
        ts,
        pade_order = options.pade_order,
        quadrature_steps = options.quadrature_steps,
        "discretizing continuous model"
    );
    let ad = discretize_a(a, ts, options.pade_order);
    let bd = discretize_b(a, b, ts, options);
    (ad, bd)
}

/// A-only discretization: `Ad = expm(A·Ts)`.
///
/// Used for gain-scheduled updates that change only the state matrix.
#[inline]
pub fn discretize_a<const N: usize>(
    a: &SMatrix<f64, N, N>,
    ts: f64,
    pade_order: usize,
) -> SMatrix<f64, N, N> {
    expm_pade(&(a * ts), pade_order)
}

/// B-only discretization: `Bd = (∫₀^Ts expm(A·τ) dτ)·B`.
#[inline]
pub fn discretize_b<const N: usize, const I: usize>(
    a: &SMatrix<f64, N, N>,
    b: &SMatrix<f64, N, I>,
    ts: f64,
    options: DiscretizeOptions,
) -> SMatrix<f64, N, I> {
    expm_integral(a, ts, options) * b
}

// ─── Tests ──────────────────────────────────────────────────────────
