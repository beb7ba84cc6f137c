//! Prelude module for common re-exports.
//!
//! ```rust
//! use drive_common::prelude::*;
//! ```

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, LogLevel, SharedConfig};
pub use crate::design::{DesignConfig, DesignSection, PoleSpec, SimulationSection};

// ─── Plant ──────────────────────────────────────────────────────────
pub use crate::plant::TwoInertiaParams;

// ─── System Constants ───────────────────────────────────────────────
pub use crate::consts::{DEFAULT_SAMPLE_PERIOD, MAX_AXES};
