//! Runtime configuration for the fill pass.

use serde::{Deserialize, Serialize};

/// Which grids receive the tracks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridMode {
    /// Mode 0: one tracker grid covers the whole acceptance
    #[default]
    TrackerOnly,
    /// Mode 1: calorimeter towers inside the calorimeter acceptance, the
    /// tracker grid outside it, plus the dead-zone sub-grids
    TrackerAndCalorimeter,
}

impl GridMode {
    /// Mode from its numeric code (0 or 1).
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(GridMode::TrackerOnly),
            1 => Some(GridMode::TrackerAndCalorimeter),
            _ => None,
        }
    }

    /// Numeric code of the mode.
    #[inline]
    pub fn code(self) -> u8 {
        match self {
            GridMode::TrackerOnly => 0,
            GridMode::TrackerAndCalorimeter => 1,
        }
    }
}

/// Cut and grid settings for one fill pass.
///
/// Nothing here is validated: inverted fiducial bounds simply reject every
/// track.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FillConfig {
    /// Unit energy threshold for the cut flag (GeV/c)
    pub pt_min: f64,

    /// Lower edge of the fiducial η window
    pub eta_min: f64,

    /// Upper edge of the fiducial η window
    pub eta_max: f64,

    /// Grid selection
    pub grid_mode: GridMode,

    /// Credit tracks in calorimeter dead zones to the dead-zone grids
    pub include_dead_zones: bool,

    /// Keep only simulated signal tracks
    pub signal_only: bool,

    /// Keep only background tracks
    pub background_only: bool,

    /// Diagnostic verbosity (0 = quiet, >1 event trace, >10 counters,
    /// >20 index table dump)
    pub debug_level: u32,
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            pt_min: 0.0,
            eta_min: -0.9,
            eta_max: 0.9,
            grid_mode: GridMode::TrackerOnly,
            include_dead_zones: false,
            signal_only: false,
            background_only: false,
            debug_level: 0,
        }
    }
}

impl FillConfig {
    /// Configuration for the dual-grid mode with dead zones enabled.
    pub fn with_calorimeter(pt_min: f64) -> Self {
        Self {
            pt_min,
            grid_mode: GridMode::TrackerAndCalorimeter,
            include_dead_zones: true,
            ..Self::default()
        }
    }
}
