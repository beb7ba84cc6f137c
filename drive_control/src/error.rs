//! Construction-time design errors.
//!
//! Every precondition of the linear system engine is checked when an
//! instance is built. A failed check refuses construction; the per-tick
//! path has no error channel at all.

use drive_common::config::ConfigError;
use num_complex::Complex64;
use thiserror::Error;

/// Error raised while configuring an engine, observer or gain design.
#[derive(Debug, Clone, Error)]
pub enum DesignError {
    /// Sample period was zero, negative or not finite.
    #[error("sample period must be finite and > 0 (got {0})")]
    InvalidSamplePeriod(f64),

    /// Numerator degree is not strictly below the denominator degree.
    #[error("transfer function is not strictly proper: {numerator} numerator coefficients for order {order}")]
    NotStrictlyProper { numerator: usize, order: usize },

    /// Denominator coefficient count does not match the realization order.
    #[error("denominator must have {expected} coefficients (got {actual})")]
    DenominatorLength { expected: usize, actual: usize },

    /// Leading denominator coefficient is not 1.
    #[error("denominator leading coefficient must be 1 (got {0})")]
    DenominatorNotMonic(f64),

    /// Complex feedback poles were not an exact conjugate pair.
    #[error("poles {0} and {1} are not a complex-conjugate pair")]
    NotConjugatePair(Complex64, Complex64),

    /// Bandwidth, pole or other design input out of range.
    #[error("invalid design parameters: {0}")]
    InvalidParameters(String),

    /// Closed-loop simulation state left the finite range at this tick.
    #[error("closed-loop simulation diverged at tick {0}")]
    Diverged(usize),

    /// Configuration loading or validation failed.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Check a sample period, returning it unchanged when valid.
#[inline]
pub fn check_sample_period(ts: f64) -> Result<f64, DesignError> {
    if ts.is_finite() && ts > 0.0 {
        Ok(ts)
    } else {
        Err(DesignError::InvalidSamplePeriod(ts))
    }
}
