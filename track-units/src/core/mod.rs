//! Core types for the track-units library.
//!
//! ## Type Categories
//!
//! ### Tracks
//! - [`Momentum`]: Cartesian momentum with derived pt, η and φ
//! - [`TrackStatus`]: Reconstruction status bits (refit flags)
//! - [`Track`]: Read-only view of one reconstructed track
//! - [`TrackRef`]: Handle to a track inside the event's collection
//!
//! ### Units
//! - [`Cell`]: One detector unit with its accumulated per-event state
//! - [`CutFlag`]: Unit energy above/below the pt threshold
//! - [`SignalFlag`]: Whether a simulated signal track reached the unit
//!
//! ## Angle Convention
//!
//! Azimuth φ is always reported in `[0, 2π)`. Pseudorapidity follows
//! `η = asinh(pz / pt)`.

mod cell;
mod track;

pub use cell::{Cell, CutFlag, Deposit, SignalFlag};
pub use track::{Momentum, SIGNAL_LABEL_LIMIT, Track, TrackRef, TrackStatus};
