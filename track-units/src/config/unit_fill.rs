//! Main UnitFillConfig and conversion methods.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::geometry::{GeometryError, RegularGeometry, RegularGeometryConfig};
use crate::grid::{FillConfig, GridMode};

use super::cuts::CutsSection;
use super::error::ConfigLoadError;
use super::grid::GridSection;

/// Diagnostics section
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DebugSection {
    /// Verbosity of the fill pass (0 = quiet)
    #[serde(default)]
    pub level: u32,
}

/// Full track-units configuration loaded from YAML
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitFillConfig {
    /// Track and unit cuts
    #[serde(default)]
    pub cuts: CutsSection,

    /// Grid selection
    #[serde(default)]
    pub grid: GridSection,

    /// Detector binning
    #[serde(default)]
    pub geometry: RegularGeometryConfig,

    /// Diagnostics
    #[serde(default)]
    pub debug: DebugSection,
}

impl UnitFillConfig {
    /// Default config path
    pub const DEFAULT_PATH: &'static str = "configs/track_units.yaml";

    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Load from the default config path, or use defaults when it is absent
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        let path = Path::new(Self::DEFAULT_PATH);
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigLoadError::Parse(e.to_string()))
    }

    /// Convert to the runtime FillConfig
    pub fn to_fill_config(&self) -> FillConfig {
        FillConfig {
            pt_min: self.cuts.pt_min,
            eta_min: self.cuts.eta_min,
            eta_max: self.cuts.eta_max,
            grid_mode: self.grid.mode,
            include_dead_zones: self.grid.mode == GridMode::TrackerAndCalorimeter
                && self.grid.include_dead_zones,
            signal_only: self.cuts.signal_only,
            background_only: self.cuts.background_only,
            debug_level: self.debug.level,
        }
    }

    /// Build the detector geometry
    pub fn to_geometry(&self) -> Result<RegularGeometry, GeometryError> {
        RegularGeometry::new(self.geometry.clone())
    }
}
