//! Configuration loading for track-units.
//!
//! Loads all configuration from a single YAML file with sensible defaults.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use track_units::config::UnitFillConfig;
//!
//! // Load from default path (configs/track_units.yaml)
//! let config = UnitFillConfig::load_default()?;
//!
//! // Convert to runtime pieces
//! let fill_config = config.to_fill_config();
//! let geometry = config.to_geometry()?;
//! ```
//!
//! ## Configuration Sections
//!
//! | Section | Description |
//! |---------|-------------|
//! | [`CutsSection`] | pt threshold, fiducial η window, signal/background selection |
//! | [`GridSection`] | Grid mode and dead-zone crediting |
//! | `geometry` | [`RegularGeometryConfig`](crate::geometry::RegularGeometryConfig) binning |
//! | [`DebugSection`] | Diagnostic verbosity |
//!
//! ## Example YAML
//!
//! ```yaml
//! cuts:
//!   pt_min: 2.0          # GeV/c, unit threshold
//!   eta_min: -0.9
//!   eta_max: 0.9
//!
//! grid:
//!   mode: tracker_and_calorimeter
//!   include_dead_zones: true
//!
//! debug:
//!   level: 0
//! ```

mod cuts;
mod defaults;
mod error;
mod grid;
mod unit_fill;

// Re-export main types
pub use error::ConfigLoadError;
pub use unit_fill::{DebugSection, UnitFillConfig};

// Re-export section types
pub use cuts::CutsSection;
pub use grid::GridSection;
