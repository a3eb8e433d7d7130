//! # track-units
//!
//! Fills a detector unit array from the reconstructed charged tracks of one
//! event.
//!
//! ## Overview
//!
//! Every accepted track deposits its transverse momentum into the unit that
//! covers its direction. A unit keeps:
//!
//! - **Energy** - accumulated pt of all contributing tracks
//! - **Cut flag** - whether that energy is above the pt threshold
//! - **Signal flags** - latched once a simulated signal track contributes
//! - **Track refs** - handles of the contributing tracks, in order
//!
//! ## Grid Modes
//!
//! - **TrackerOnly**: one uniform tracker grid covers the acceptance
//! - **TrackerAndCalorimeter**: calorimeter towers inside the calorimeter
//!   acceptance, the tracker grid outside it and five dead-zone grids for the
//!   gaps between calorimeter modules
//!
//! ```text
//! global id:  [ Calorimeter | Tracker | DZ0 | DZ1 | DZ2 | DZ3 | DZ4 ]
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use track_units::{FillConfig, RegularGeometry, UnitFiller};
//!
//! let geometry = RegularGeometry::default();
//! let filler = UnitFiller::new(&geometry, FillConfig::with_calorimeter(2.0));
//! let mut store = filler.new_store();
//!
//! let summary = filler.fill(&mut store, &tracks)?;
//! println!("{}", summary.summary());
//! ```
//!
//! ## Angle Convention
//!
//! φ in `[0, 2π)` (rad), η = asinh(pz / pt).

#![warn(missing_docs)]

// Core types
pub mod core;

// Detector geometry interface
pub mod geometry;

// Unit layout, resolution and storage
pub mod grid;

// Track selection
pub mod classify;

// Per-event fill pass
pub mod fill;

// Unified configuration
pub mod config;

// Event files
pub mod io;

// Error types
pub mod error;

// Re-export commonly used types
pub use crate::core::{Cell, CutFlag, Momentum, SignalFlag, Track, TrackRef, TrackStatus};

pub use geometry::{DetectorGeometry, RegularGeometry, RegularGeometryConfig};

pub use grid::{CellStore, FillConfig, GridLayout, GridMode, UnitCounts};

pub use classify::{Rejection, TrackClass, TrackClassifier};

pub use fill::{FillSummary, UnitFiller};

pub use config::UnitFillConfig;

pub use error::{Result, UnitError};
