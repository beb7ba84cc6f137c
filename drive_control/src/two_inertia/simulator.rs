//! Two-inertia plant simulator.

use drive_common::plant::TwoInertiaParams;
use nalgebra::{Vector2, Vector3};

use super::plant::plant_3rd;
use crate::error::DesignError;
use crate::linear::discretize::DiscretizeOptions;
use crate::linear::system::LinearSystem;

/// Discretized plant driven by motor current and load torque.
///
/// Outputs the full state `[ωl, θs, ωm]`.
#[derive(Debug)]
pub struct TwoInertiaSimulator {
    system: LinearSystem<3, 2, 3>,
}

impl TwoInertiaSimulator {
    pub fn new(
        params: &TwoInertiaParams,
        ts: f64,
        options: DiscretizeOptions,
    ) -> Result<Self, DesignError> {
        params.validate()?;
        Ok(Self {
            system: LinearSystem::from_continuous(&plant_3rd(params), ts, options)?,
        })
    }

    /// Apply current `iq` [A] and load torque `tau_l` [Nm] for one tick.
    ///
    /// Returns the state at the start of the tick.
    #[inline]
    pub fn step(&mut self, iq: f64, tau_l: f64) -> Vector3<f64> {
        self.system.step(&Vector2::new(iq, tau_l))
    }

    #[inline]
    pub fn state(&self) -> &Vector3<f64> {
        self.system.state()
    }

    /// Measured motor speed [rad/s].
    #[inline]
    pub fn motor_speed(&self) -> f64 {
        self.system.state()[2]
    }

    #[inline]
    pub fn load_speed(&self) -> f64 {
        self.system.state()[0]
    }

    #[inline]
    pub fn reset(&mut self) {
        self.system.reset();
    }
}
