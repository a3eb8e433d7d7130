//! Event file parsing.
//!
//! An event file is a YAML list of events, each holding its reconstructed
//! tracks in collection order. Tracks are written in `(pt, η, φ)` form:
//!
//! ```yaml
//! events:
//!   - name: dijet
//!     tracks:
//!       - { pt: 5.0, eta: 0.2, phi: 1.0, label: 42 }
//!       - { pt: 1.2, eta: -0.4, phi: 2.1, label: 20001, status: 68 }
//! ```
//!
//! `mass` defaults to the charged pion mass and `status` to both refit bits.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{Momentum, Track, TrackStatus};

/// Charged pion mass (GeV/c²)
const PION_MASS: f64 = 0.13957;

/// Error type for event file loading
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EventFileError {
    /// I/O error reading file
    #[error("I/O error: {0}")]
    Io(String),
    /// YAML parsing error
    #[error("Parse error: {0}")]
    Parse(String),
    /// Track with non-finite or negative kinematics
    #[error("Invalid track {track} in event {event}: {reason}")]
    InvalidTrack {
        /// Event position in the file
        event: usize,
        /// Track position in the event
        track: usize,
        /// What is wrong with it
        reason: String,
    },
}

/// One track as written in the file
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackRecord {
    /// Transverse momentum (GeV/c)
    pub pt: f64,
    /// Pseudorapidity
    pub eta: f64,
    /// Azimuth (rad)
    pub phi: f64,
    /// Mass hypothesis (GeV/c²)
    #[serde(default = "default_mass")]
    pub mass: f64,
    /// Raw status bits
    #[serde(default = "default_status")]
    pub status: u32,
    /// Simulation label
    #[serde(default)]
    pub label: i32,
}

impl TrackRecord {
    /// Convert to a [`Track`].
    pub fn to_track(&self) -> Track {
        Track::new(
            Momentum::from_pt_eta_phi(self.pt, self.eta, self.phi),
            self.mass,
            TrackStatus::from_bits(self.status),
            self.label,
        )
    }

    fn validate(&self) -> Result<(), String> {
        if !(self.pt.is_finite() && self.eta.is_finite() && self.phi.is_finite()) {
            return Err(format!("pt {} eta {} phi {}", self.pt, self.eta, self.phi));
        }
        if self.pt < 0.0 {
            return Err(format!("negative pt {}", self.pt));
        }
        Ok(())
    }
}

fn default_mass() -> f64 {
    PION_MASS
}

fn default_status() -> u32 {
    TrackStatus::REFITTED.bits()
}

/// One event
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Optional label printed in reports
    #[serde(default)]
    pub name: String,
    /// Tracks in collection order
    #[serde(default)]
    pub tracks: Vec<TrackRecord>,
}

impl EventRecord {
    /// Tracks of the event, in file order.
    pub fn to_tracks(&self) -> Vec<Track> {
        self.tracks.iter().map(TrackRecord::to_track).collect()
    }
}

/// A sequence of events loaded from YAML
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EventFile {
    /// Events in file order
    #[serde(default)]
    pub events: Vec<EventRecord>,
}

impl EventFile {
    /// Load events from a YAML file
    pub fn load(path: &Path) -> Result<Self, EventFileError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| EventFileError::Io(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Parse from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, EventFileError> {
        let file: Self =
            serde_yaml::from_str(yaml).map_err(|e| EventFileError::Parse(e.to_string()))?;
        file.validate()?;
        Ok(file)
    }

    /// Number of events.
    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True when the file has no events.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    fn validate(&self) -> Result<(), EventFileError> {
        for (event, record) in self.events.iter().enumerate() {
            for (track, t) in record.tracks.iter().enumerate() {
                t.validate()
                    .map_err(|reason| EventFileError::InvalidTrack {
                        event,
                        track,
                        reason,
                    })?;
            }
        }
        Ok(())
    }
}
