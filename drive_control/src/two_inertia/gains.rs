//! Closed-form pole placement for the two-inertia plant.
//!
//! Both designs match the characteristic polynomial coefficient by
//! coefficient against a monic target `sⁿ + cₙ₋₁·sⁿ⁻¹ + … + c₀`.
//!
//! # Observer (all poles at s = −g)
//!
//! ```text
//! det(sI − (A − k·c)) = (s + g)³          3rd order: [c2, c1, c0]
//!
//! q  = c2 + a11            k3 = q + a33
//! r  = c1 + a11·q − a12    k2 = a23 + r / a32
//!                          k1 = (a12·q − a11·r − c0) / a32
//!
//! det(sI − (A − k·c)) = (s + g)⁴          4th order: [c3, c2, c1, c0]
//! k1..k3 as above with (c3, c2, c1), and k4 = −c0 / (a14·a32)
//! ```
//!
//! # State feedback (iq = −f·x)
//!
//! ```text
//! det(sI − (A − b·f)) = (s − p1)(s − p2)(s − p3)   → [c2, c1, c0]
//!
//! β = −c2 − a11
//! α = (a11·β + a12 − c1) / a23
//! γ = (c0 − a11·a23·α + a12·β) / (a12·a23)
//! f = [γ, a32 − α, a33 − β] / b3
//! ```
//!
//! The feedback expansion is carried out in complex arithmetic so the same
//! equations serve real poles and a conjugate pair.

use drive_common::design::PoleSpec;
use drive_common::plant::TwoInertiaParams;
use nalgebra::{RowVector3, Vector3, Vector4};
use num_complex::Complex64;
use tracing::{debug, warn};

use super::plant::Coefficients;
use crate::error::DesignError;
use crate::linear::poly::{poly_from_roots, poly_from_real_roots};

/// Imaginary residue tolerated in a feedback gain, relative to its magnitude.
const IMAGINARY_RESIDUE_TOLERANCE: f64 = 1e-9;

// ─── Observer Gains ─────────────────────────────────────────────────

/// Observer gain placing the triple pole of `A − k·c` at `s = −bandwidth`.
pub fn observer_gain_3rd(
    params: &TwoInertiaParams,
    bandwidth: f64,
) -> Result<Vector3<f64>, DesignError> {
    let k = checked_coefficients(params)?;
    let target = poly_from_real_roots(&[-check_bandwidth(bandwidth)?; 3]);
    let (k1, k2, k3) = leading_observer_terms(&k, target[1], target[2], target[3]);

    let gain = Vector3::new(k1, k2, k3);
    debug!(bandwidth, k1, k2, k3, "3rd-order observer gain");
    Ok(gain)
}

/// Observer gain placing the quadruple pole of the disturbance-augmented
/// `A − k·c` at `s = −bandwidth`.
pub fn observer_gain_4th(
    params: &TwoInertiaParams,
    bandwidth: f64,
) -> Result<Vector4<f64>, DesignError> {
    let k = checked_coefficients(params)?;
    let target = poly_from_real_roots(&[-check_bandwidth(bandwidth)?; 4]);
    let (k1, k2, k3) = leading_observer_terms(&k, target[1], target[2], target[3]);
    let k4 = -target[4] / (k.a14 * k.a32);

    let gain = Vector4::new(k1, k2, k3, k4);
    debug!(bandwidth, k1, k2, k3, k4, "4th-order observer gain");
    Ok(gain)
}

/// `k1..k3` from the three highest non-leading target coefficients.
fn leading_observer_terms(k: &Coefficients, c2: f64, c1: f64, c0: f64) -> (f64, f64, f64) {
    let q = c2 + k.a11;
    let r = c1 + k.a11 * q - k.a12;
    let k3 = q + k.a33;
    let k2 = k.a23 + r / k.a32;
    let k1 = (k.a12 * q - k.a11 * r - c0) / k.a32;
    (k1, k2, k3)
}

// ─── Feedback Gains ─────────────────────────────────────────────────

/// State-feedback gain for three real closed-loop poles.
pub fn feedback_gain_real(
    params: &TwoInertiaParams,
    poles: [f64; 3],
) -> Result<RowVector3<f64>, DesignError> {
    if poles.iter().any(|p| !p.is_finite()) {
        return Err(DesignError::InvalidParameters(format!(
            "feedback poles must be finite (got {poles:?})"
        )));
    }
    let roots = poles.map(|p| Complex64::new(p, 0.0));
    let gain = feedback_from_roots(params, &roots)?;
    debug!(?poles, f1 = gain[0], f2 = gain[1], f3 = gain[2], "feedback gain (real poles)");
    Ok(gain)
}

/// State-feedback gain for one real pole and a conjugate pair.
///
/// `p2` must equal `p3.conj()` exactly.
pub fn feedback_gain_complex(
    params: &TwoInertiaParams,
    p1: f64,
    p2: Complex64,
    p3: Complex64,
) -> Result<RowVector3<f64>, DesignError> {
    if p2 != p3.conj() {
        return Err(DesignError::NotConjugatePair(p2, p3));
    }
    if !p1.is_finite() || !p2.is_finite() {
        return Err(DesignError::InvalidParameters(format!(
            "feedback poles must be finite (got {p1}, {p2}, {p3})"
        )));
    }
    let gain = feedback_from_roots(params, &[Complex64::new(p1, 0.0), p2, p3])?;
    debug!(p1, %p2, %p3, f1 = gain[0], f2 = gain[1], f3 = gain[2], "feedback gain (conjugate pair)");
    Ok(gain)
}

/// State-feedback gain for a configured pole set.
pub fn feedback_gain(
    params: &TwoInertiaParams,
    poles: &PoleSpec,
) -> Result<RowVector3<f64>, DesignError> {
    match *poles {
        PoleSpec::Real { poles } => feedback_gain_real(params, poles),
        PoleSpec::Complex { real, re, im } => feedback_gain_complex(
            params,
            real,
            Complex64::new(re, im),
            Complex64::new(re, -im),
        ),
    }
}

fn feedback_from_roots(
    params: &TwoInertiaParams,
    roots: &[Complex64; 3],
) -> Result<RowVector3<f64>, DesignError> {
    let f = complex_feedback(params, roots)?;
    if let Some((residue, scale)) = imaginary_residue(&f) {
        warn!(residue, scale, "feedback gain has a non-negligible imaginary part, discarded");
    }
    Ok(RowVector3::new(f[0].re, f[1].re, f[2].re))
}

/// Closed-form gain evaluated over ℂ; real for any conjugate-closed root set.
fn complex_feedback(
    params: &TwoInertiaParams,
    roots: &[Complex64; 3],
) -> Result<[Complex64; 3], DesignError> {
    let k = checked_coefficients(params)?;
    let target = poly_from_roots(roots);
    let (c2, c1, c0) = (target[1], target[2], target[3]);

    let beta = -c2 - k.a11;
    let alpha = (beta * k.a11 + k.a12 - c1) / k.a23;
    let gamma = (c0 - alpha * (k.a11 * k.a23) + beta * k.a12) / (k.a12 * k.a23);
    Ok([
        gamma / k.b3,
        (-alpha + k.a32) / k.b3,
        (-beta + k.a33) / k.b3,
    ])
}

/// `(residue, scale)` when the largest imaginary part exceeds
/// `IMAGINARY_RESIDUE_TOLERANCE · max(1, |re|)`.
///
/// The public entry points only pass real or exactly conjugate roots, so
/// this fires on rounding blow-up or on a root set built without closure.
fn imaginary_residue(f: &[Complex64; 3]) -> Option<(f64, f64)> {
    let residue = f.iter().map(|v| v.im.abs()).fold(0.0, f64::max);
    let scale = f.iter().map(|v| v.re.abs()).fold(1.0, f64::max);
    (residue > IMAGINARY_RESIDUE_TOLERANCE * scale).then_some((residue, scale))
}

// ─── Preconditions ──────────────────────────────────────────────────

fn checked_coefficients(params: &TwoInertiaParams) -> Result<Coefficients, DesignError> {
    params.validate()?;
    Ok(Coefficients::new(params))
}

fn check_bandwidth(bandwidth: f64) -> Result<f64, DesignError> {
    if bandwidth.is_finite() && bandwidth > 0.0 {
        Ok(bandwidth)
    } else {
        Err(DesignError::InvalidParameters(format!(
            "observer bandwidth must be finite and > 0 (got {bandwidth})"
        )))
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
