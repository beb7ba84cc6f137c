//! Linear system engine root.
//!
//! Continuous and discrete state-space models, zero-order-hold
//! discretization and the per-tick state-space stepper that every
//! simulator, observer and transfer function in this crate is built on.

pub mod discretize;
pub mod model;
pub mod poly;
pub mod system;
