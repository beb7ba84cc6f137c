//! Controller design configuration.
//!
//! Everything needed to derive observer and state-feedback gains for one
//! two-inertia axis and to exercise the result offline. All sections use
//! `#[serde(default)]` where a sensible default exists.
//!
//! # TOML Example
//!
//! ```toml
//! [shared]
//! service_name = "two-inertia-bench"
//!
//! [plant]
//! kt = 0.5
//! jm = 1e-4
//! jl = 1e-3
//! dm = 1e-3
//! dl = 1e-3
//! ks = 100.0
//! rg = 50.0
//!
//! [design]
//! sample_period = 1e-4
//! observer_bandwidth = 500.0
//! feedback_poles = { kind = "complex", real = -150.0, re = -120.0, im = 90.0 }
//!
//! [simulation]
//! duration = 0.5
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, SharedConfig};
use crate::consts::{
    DEFAULT_SAMPLE_PERIOD, PADE_ORDER_ACCURATE, PADE_ORDER_MAX, QUADRATURE_STEPS_ACCURATE,
    QUADRATURE_STEPS_MAX,
};
use crate::plant::TwoInertiaParams;

// ─── Top-Level Config ───────────────────────────────────────────────

/// Complete design configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignConfig {
    /// Common fields (service name, log level).
    pub shared: SharedConfig,
    /// Physical plant parameters.
    pub plant: TwoInertiaParams,
    /// Gain design targets.
    #[serde(default)]
    pub design: DesignSection,
    /// Offline closed-loop run.
    #[serde(default)]
    pub simulation: SimulationSection,
}

impl DesignConfig {
    /// Validate every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;
        self.plant.validate()?;
        self.design.validate()?;
        self.simulation.validate()
    }
}

// ─── Design Section ─────────────────────────────────────────────────

/// Closed-loop feedback pole specification.
///
/// `Complex` describes one real pole plus the conjugate pair `re ± j·im`,
/// so a configuration can never express a non-conjugate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PoleSpec {
    /// Three real poles [rad/s].
    Real { poles: [f64; 3] },
    /// One real pole and a conjugate pair [rad/s].
    Complex { real: f64, re: f64, im: f64 },
}

impl PoleSpec {
    fn validate(&self) -> Result<(), ConfigError> {
        let parts: [f64; 3] = match self {
            Self::Real { poles } => *poles,
            Self::Complex { real, re, im } => [*real, *re, *im],
        };
        if parts.iter().any(|p| !p.is_finite()) {
            return Err(ConfigError::ValidationError(
                "design.feedback_poles must be finite".to_string(),
            ));
        }
        let unstable = match self {
            Self::Real { poles } => poles.iter().any(|&p| p >= 0.0),
            Self::Complex { real, re, .. } => *real >= 0.0 || *re >= 0.0,
        };
        if unstable {
            return Err(ConfigError::ValidationError(
                "design.feedback_poles must lie in the open left half-plane".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for PoleSpec {
    fn default() -> Self {
        Self::Real {
            poles: [-100.0, -120.0, -140.0],
        }
    }
}

/// Gain design targets and discretization settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DesignSection {
    /// Control sample period [s].
    #[serde(default = "default_sample_period")]
    pub sample_period: f64,
    /// State observer bandwidth [rad/s] (triple pole at −bandwidth).
    #[serde(default = "default_observer_bandwidth")]
    pub observer_bandwidth: f64,
    /// Disturbance observer bandwidth [rad/s] (quadruple pole at −bandwidth).
    #[serde(default = "default_observer_bandwidth")]
    pub disturbance_observer_bandwidth: f64,
    /// Closed-loop state-feedback poles.
    #[serde(default)]
    pub feedback_poles: PoleSpec,
    /// Padé approximant order for the matrix exponential.
    #[serde(default = "default_pade_order")]
    pub pade_order: usize,
    /// Quadrature subintervals for the exponential integral.
    #[serde(default = "default_quadrature_steps")]
    pub quadrature_steps: usize,
}

fn default_sample_period() -> f64 {
    DEFAULT_SAMPLE_PERIOD
}
fn default_observer_bandwidth() -> f64 {
    500.0
}
fn default_pade_order() -> usize {
    PADE_ORDER_ACCURATE
}
fn default_quadrature_steps() -> usize {
    QUADRATURE_STEPS_ACCURATE
}

impl Default for DesignSection {
    fn default() -> Self {
        Self {
            sample_period: DEFAULT_SAMPLE_PERIOD,
            observer_bandwidth: default_observer_bandwidth(),
            disturbance_observer_bandwidth: default_observer_bandwidth(),
            feedback_poles: PoleSpec::default(),
            pade_order: PADE_ORDER_ACCURATE,
            quadrature_steps: QUADRATURE_STEPS_ACCURATE,
        }
    }
}

impl DesignSection {
    /// Validate parameter bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.sample_period.is_finite() || self.sample_period <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "design.sample_period must be > 0 (got {})",
                self.sample_period
            )));
        }
        for (name, bw) in [
            ("observer_bandwidth", self.observer_bandwidth),
            (
                "disturbance_observer_bandwidth",
                self.disturbance_observer_bandwidth,
            ),
        ] {
            if !bw.is_finite() || bw <= 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "design.{name} must be > 0 (got {bw})"
                )));
            }
        }
        if self.pade_order == 0 || self.pade_order > PADE_ORDER_MAX {
            return Err(ConfigError::ValidationError(format!(
                "design.pade_order {} out of range [1, {}]",
                self.pade_order, PADE_ORDER_MAX
            )));
        }
        if self.quadrature_steps == 0 || self.quadrature_steps > QUADRATURE_STEPS_MAX {
            return Err(ConfigError::ValidationError(format!(
                "design.quadrature_steps {} out of range [1, {}]",
                self.quadrature_steps, QUADRATURE_STEPS_MAX
            )));
        }
        self.feedback_poles.validate()
    }
}

// ─── Simulation Section ─────────────────────────────────────────────

/// Offline closed-loop run driven by the design tool.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SimulationSection {
    /// Simulated time span [s].
    #[serde(default = "default_duration")]
    pub duration: f64,
    /// Step of the current reference applied at t = 0 [A].
    #[serde(default = "default_current_reference")]
    pub current_reference: f64,
    /// Load torque step magnitude [Nm] (0 = none).
    #[serde(default)]
    pub load_torque: f64,
    /// Time at which the load torque step is applied [s].
    #[serde(default)]
    pub load_torque_time: f64,
}

fn default_duration() -> f64 {
    0.5
}
fn default_current_reference() -> f64 {
    1.0
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            duration: default_duration(),
            current_reference: default_current_reference(),
            load_torque: 0.0,
            load_torque_time: 0.0,
        }
    }
}

impl SimulationSection {
    /// Validate parameter bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "simulation.duration must be > 0 (got {})",
                self.duration
            )));
        }
        if !self.current_reference.is_finite() || !self.load_torque.is_finite() {
            return Err(ConfigError::ValidationError(
                "simulation inputs must be finite".to_string(),
            ));
        }
        if !self.load_torque_time.is_finite() || self.load_torque_time < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "simulation.load_torque_time must be >= 0 (got {})",
                self.load_torque_time
            )));
        }
        Ok(())
    }

    /// Number of control ticks covering `duration` at `sample_period`.
    pub fn ticks(&self, sample_period: f64) -> usize {
        (self.duration / sample_period).round() as usize
    }
}
