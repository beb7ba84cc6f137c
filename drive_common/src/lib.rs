//! Drive Common Library
//!
//! Shared constants, configuration loading and plain parameter records for
//! the drive control workspace.
//!
//! # Module Structure
//!
//! - [`consts`] - Numeric defaults and limits
//! - [`config`] - Configuration loading traits and types
//! - [`plant`] - Two-inertia plant parameters
//! - [`design`] - Gain design and offline simulation configuration
//! - [`prelude`] - Common re-exports for convenience

pub mod config;
pub mod consts;
pub mod design;
pub mod plant;
pub mod prelude;
