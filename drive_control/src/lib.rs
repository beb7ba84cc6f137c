//! # Drive Control Library
//!
//! Continuous-to-discrete linear system engine for motor control, with
//! observer synthesis, transfer-function realization and closed-form pole
//! placement for a two-inertia resonant load.
//!
//! ## Layers
//!
//! 1. **Discretizer** ([`linear::discretize`]) — zero-order-hold `(Ad, Bd)`
//!    via Padé matrix exponential and exponential-integral quadrature
//! 2. **Engine** ([`linear::system`]) — fixed-size discrete state-space stepper
//! 3. **Observer** ([`observer`]) — Luenberger estimator built on the engine
//! 4. **Transfer functions** ([`transfer`]) — companion-form SISO realization
//! 5. **Two-inertia design** ([`two_inertia`]) — gains, observers, feedback
//!
//! ## Allocation-Free Tick Path
//!
//! Every matrix is a const-generic `nalgebra` `SMatrix`. Discretization and
//! gain derivation run once at configuration time; stepping, estimating and
//! responding touch only inline storage and cannot fail.

pub mod bank;
pub mod config;
pub mod error;
pub mod linear;
pub mod observer;
pub mod transfer;
pub mod two_inertia;
