//! Track selection section.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Track and unit cuts
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CutsSection {
    /// Unit energy threshold (GeV/c)
    #[serde(default)]
    pub pt_min: f64,

    /// Lower edge of the fiducial η window
    #[serde(default = "defaults::eta_min")]
    pub eta_min: f64,

    /// Upper edge of the fiducial η window
    #[serde(default = "defaults::eta_max")]
    pub eta_max: f64,

    /// Keep only signal tracks (|label| < 10000)
    #[serde(default)]
    pub signal_only: bool,

    /// Keep only background tracks
    #[serde(default)]
    pub background_only: bool,
}

impl Default for CutsSection {
    fn default() -> Self {
        Self {
            pt_min: 0.0,
            eta_min: -0.9,
            eta_max: 0.9,
            signal_only: false,
            background_only: false,
        }
    }
}
