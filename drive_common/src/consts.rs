//! System-wide constants for the drive workspace.
//!
//! Single source of truth for numeric defaults and limits.
//! Imported by all crates — no duplication permitted.

use static_assertions::const_assert;

/// Maximum number of axes handled by one axis bank.
pub const MAX_AXES: usize = 16;

/// Default control sample period [s] (10 kHz).
pub const DEFAULT_SAMPLE_PERIOD: f64 = 100e-6;

/// Padé approximant order of the accurate (general) discretization path.
pub const PADE_ORDER_ACCURATE: usize = 13;

/// Quadrature subintervals of the accurate (general) discretization path.
pub const QUADRATURE_STEPS_ACCURATE: usize = 10_000;

/// Padé approximant order of the fast discretization path.
pub const PADE_ORDER_FAST: usize = 3;

/// Quadrature subintervals of the fast discretization path.
pub const QUADRATURE_STEPS_FAST: usize = 100;

/// Highest Padé order accepted from configuration.
///
/// Coefficients are built from factorial ratios; above this the
/// denominator polynomial loses precision faster than the approximant gains it.
pub const PADE_ORDER_MAX: usize = 18;

/// Upper bound on quadrature subintervals accepted from configuration.
pub const QUADRATURE_STEPS_MAX: usize = 1_000_000;

const_assert!(PADE_ORDER_FAST > 0);
const_assert!(PADE_ORDER_FAST <= PADE_ORDER_ACCURATE);
const_assert!(PADE_ORDER_ACCURATE <= PADE_ORDER_MAX);
const_assert!(QUADRATURE_STEPS_FAST > 0);
const_assert!(QUADRATURE_STEPS_ACCURATE <= QUADRATURE_STEPS_MAX);
