//! Two-inertia resonant load.
//!
//! Closed-form observer and state-feedback design for a motor driving a load
//! through a compliant shaft, plus the estimators and the plant simulator
//! built from those designs.
//!
//! State convention:
//!
//! ```text
//! 3rd order:  x = [ωl, θs, ωm]
//! 4th order:  x = [ωl, θs, ωm, τl]   (τl: load disturbance torque)
//! input u = iq, measurement y = ωm
//! ```
//!
//! - [`plant`] - Continuous plant matrices from physical parameters
//! - [`gains`] - Pole-placement gain derivations
//! - [`observer`] - State and disturbance observers
//! - [`feedback`] - Observer-based state feedback
//! - [`simulator`] - Plant simulator
//! - [`scenario`] - Offline closed-loop run

pub mod feedback;
pub mod gains;
pub mod observer;
pub mod plant;
pub mod scenario;
pub mod simulator;

pub use feedback::TwoInertiaStateFeedback;
pub use gains::{
    feedback_gain, feedback_gain_complex, feedback_gain_real, observer_gain_3rd,
    observer_gain_4th,
};
pub use observer::{TwoInertiaDisturbanceObserver, TwoInertiaObserver};
pub use scenario::{ScenarioReport, run_scenario};
pub use simulator::TwoInertiaSimulator;
