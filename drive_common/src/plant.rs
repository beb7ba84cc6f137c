//! Physical parameters of the two-inertia resonant load.
//!
//! A motor (inertia `jm`) drives a load (inertia `jl`) through a gearbox of
//! ratio `rg` and a torsionally compliant shaft of stiffness `ks`. Both sides
//! carry viscous damping. Plain configuration record; behavior lives in
//! `drive_control::two_inertia`.

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Two-inertia plant parameters.
///
/// # TOML Example
///
/// ```toml
/// [plant]
/// kt = 0.5
/// jm = 1e-4
/// jl = 1e-3
/// dm = 1e-3
/// dl = 1e-3
/// ks = 100.0
/// rg = 50.0
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TwoInertiaParams {
    /// Torque constant [Nm/A].
    pub kt: f64,
    /// Motor-side inertia [kg·m²].
    pub jm: f64,
    /// Load-side inertia [kg·m²].
    pub jl: f64,
    /// Motor-side viscous damping [Nm·s/rad].
    #[serde(default)]
    pub dm: f64,
    /// Load-side viscous damping [Nm·s/rad].
    #[serde(default)]
    pub dl: f64,
    /// Shaft torsional stiffness [Nm/rad].
    pub ks: f64,
    /// Gear ratio (motor speed / load speed).
    #[serde(default = "default_gear_ratio")]
    pub rg: f64,
}

fn default_gear_ratio() -> f64 {
    1.0
}

impl TwoInertiaParams {
    /// Validate physical plausibility.
    ///
    /// Inertias, stiffness, torque constant and gear ratio must be strictly
    /// positive; damping must be non-negative. All values must be finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("kt", self.kt),
            ("jm", self.jm),
            ("jl", self.jl),
            ("ks", self.ks),
            ("rg", self.rg),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "plant.{name} must be finite and > 0 (got {value})"
                )));
            }
        }
        for (name, value) in [("dm", self.dm), ("dl", self.dl)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "plant.{name} must be finite and >= 0 (got {value})"
                )));
            }
        }
        Ok(())
    }

    /// Undamped anti-resonance frequency of the load side [rad/s].
    pub fn anti_resonance(&self) -> f64 {
        (self.ks / self.jl).sqrt()
    }

    /// Undamped resonance frequency of the coupled system [rad/s].
    pub fn resonance(&self) -> f64 {
        (self.ks / self.jl + self.ks / (self.jm * self.rg * self.rg)).sqrt()
    }
}
