//! Reconstructed track view.
//!
//! Tracks are produced by the event reader and are never mutated by the
//! fill pass. Units refer back to them through [`TrackRef`] handles.

use std::f64::consts::TAU;
use std::ops::BitOr;

use serde::{Deserialize, Serialize};

/// Labels with an absolute value below this limit come from the simulated
/// signal event; larger labels belong to the embedded background.
pub const SIGNAL_LABEL_LIMIT: u32 = 10_000;

/// Pseudorapidity reported for tracks with zero transverse momentum.
const ETA_AT_ZERO_PT: f64 = 1e10;

/// Cartesian momentum (GeV/c).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Momentum {
    /// X component
    pub px: f64,
    /// Y component
    pub py: f64,
    /// Z component (beam axis)
    pub pz: f64,
}

impl Momentum {
    /// Create a momentum vector from its components.
    #[inline]
    pub fn new(px: f64, py: f64, pz: f64) -> Self {
        Self { px, py, pz }
    }

    /// Build a momentum vector from transverse momentum, pseudorapidity and
    /// azimuth.
    pub fn from_pt_eta_phi(pt: f64, eta: f64, phi: f64) -> Self {
        Self {
            px: pt * phi.cos(),
            py: pt * phi.sin(),
            pz: pt * eta.sinh(),
        }
    }

    /// Transverse momentum.
    #[inline]
    pub fn pt(&self) -> f64 {
        self.px.hypot(self.py)
    }

    /// Pseudorapidity.
    ///
    /// A track along the beam axis has no defined η; it is reported as
    /// ±1e10 following the sign of `pz` (0 when `pz` is 0 too).
    pub fn eta(&self) -> f64 {
        let pt = self.pt();
        if pt == 0.0 {
            if self.pz > 0.0 {
                ETA_AT_ZERO_PT
            } else if self.pz < 0.0 {
                -ETA_AT_ZERO_PT
            } else {
                0.0
            }
        } else {
            (self.pz / pt).asinh()
        }
    }

    /// Azimuth in `[0, 2π)`.
    pub fn phi(&self) -> f64 {
        let phi = self.py.atan2(self.px);
        if phi < 0.0 { phi + TAU } else { phi }
    }
}

/// Reconstruction status bits of a track.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackStatus(u32);

impl TrackStatus {
    /// Inner tracking system refit succeeded.
    pub const ITS_REFIT: Self = Self(0x0004);
    /// Time projection chamber refit succeeded.
    pub const TPC_REFIT: Self = Self(0x0040);
    /// Both refits required by the quality gate.
    pub const REFITTED: Self = Self(Self::ITS_REFIT.0 | Self::TPC_REFIT.0);

    /// No status bits set.
    #[inline]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Wrap raw status bits.
    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Raw status bits.
    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// True when every bit of `other` is set.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for TrackStatus {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Read-only view of one reconstructed track.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Momentum at the primary vertex
    pub momentum: Momentum,
    /// Mass hypothesis (GeV/c²)
    #[serde(default)]
    pub mass: f64,
    /// Reconstruction status bits
    #[serde(default)]
    pub status: TrackStatus,
    /// Simulation label; its magnitude separates signal from background
    #[serde(default)]
    pub label: i32,
}

impl Track {
    /// Create a track.
    pub fn new(momentum: Momentum, mass: f64, status: TrackStatus, label: i32) -> Self {
        Self {
            momentum,
            mass,
            status,
            label,
        }
    }

    /// Transverse momentum.
    #[inline]
    pub fn pt(&self) -> f64 {
        self.momentum.pt()
    }

    /// Pseudorapidity.
    #[inline]
    pub fn eta(&self) -> f64 {
        self.momentum.eta()
    }

    /// Azimuth in `[0, 2π)`.
    #[inline]
    pub fn phi(&self) -> f64 {
        self.momentum.phi()
    }

    /// Both refit bits are present.
    #[inline]
    pub fn is_refitted(&self) -> bool {
        self.status.contains(TrackStatus::REFITTED)
    }

    /// Track belongs to the simulated signal.
    #[inline]
    pub fn is_signal(&self) -> bool {
        self.label.unsigned_abs() < SIGNAL_LABEL_LIMIT
    }
}

/// Handle to a track: its position in the event's track collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TrackRef(pub usize);

impl TrackRef {
    /// Position in the track collection.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }

    /// Resolve the handle against the event's tracks.
    #[inline]
    pub fn get(self, tracks: &[Track]) -> Option<&Track> {
        tracks.get(self.0)
    }
}
