//! Track quality, signal and fiducial selection.

use serde::{Deserialize, Serialize};

use crate::core::{SIGNAL_LABEL_LIMIT, Track};
use crate::grid::FillConfig;

/// Why a track was not used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rejection {
    /// ITS or TPC refit bit missing
    MissingRefit,
    /// Background track while reading signal only
    NotSignal,
    /// Signal track while reading background only
    NotBackground,
    /// η outside the fiducial window
    OutsideFiducial,
}

/// Per-track flags of an accepted track.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TrackClass {
    /// `|label| < 10000`
    pub signal: bool,
    /// Track's own pt above the threshold. Reported only; unit cut flags
    /// come from the accumulated unit energy.
    pub passes_pt: bool,
}

/// Accepted track with the kinematics used downstream.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Classified {
    /// Track flags
    pub class: TrackClass,
    /// Transverse momentum
    pub pt: f64,
    /// Pseudorapidity
    pub eta: f64,
    /// Azimuth in `[0, 2π)`
    pub phi: f64,
}

/// Applies the selection of one [`FillConfig`].
#[derive(Clone, Copy, Debug)]
pub struct TrackClassifier<'a> {
    config: &'a FillConfig,
}

impl<'a> TrackClassifier<'a> {
    /// Create a classifier.
    pub fn new(config: &'a FillConfig) -> Self {
        Self { config }
    }

    /// Check a track; checks run in order and stop at the first failure.
    pub fn classify(&self, track: &Track) -> Result<Classified, Rejection> {
        if !track.is_refitted() {
            return Err(Rejection::MissingRefit);
        }

        let label = track.label.unsigned_abs();
        if self.config.signal_only && label >= SIGNAL_LABEL_LIMIT {
            return Err(Rejection::NotSignal);
        }
        if self.config.background_only && label < SIGNAL_LABEL_LIMIT {
            return Err(Rejection::NotBackground);
        }

        let eta = track.eta();
        if eta > self.config.eta_max || eta < self.config.eta_min {
            return Err(Rejection::OutsideFiducial);
        }

        let pt = track.pt();
        Ok(Classified {
            class: TrackClass {
                signal: label < SIGNAL_LABEL_LIMIT,
                passes_pt: pt > self.config.pt_min,
            },
            pt,
            eta,
            phi: track.phi(),
        })
    }
}
