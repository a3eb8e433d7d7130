//! Grid selection section.

use serde::{Deserialize, Serialize};

use crate::grid::GridMode;

use super::defaults;

/// Grid configuration section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSection {
    /// `tracker_only` or `tracker_and_calorimeter`
    #[serde(default)]
    pub mode: GridMode,

    /// Credit dead-zone units in `tracker_and_calorimeter` mode
    #[serde(default = "defaults::enabled")]
    pub include_dead_zones: bool,
}

impl Default for GridSection {
    fn default() -> Self {
        Self {
            mode: GridMode::TrackerOnly,
            include_dead_zones: true,
        }
    }
}
