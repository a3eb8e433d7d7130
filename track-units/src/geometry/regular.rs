//! Uniformly binned detector geometry.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{
    Acceptance, BinParams, DEAD_ZONE_COUNT, DeadZoneId, DetectorGeometry, IndexTable,
};

/// Geometry construction errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// An axis has no bins or an empty range
    #[error("Invalid {axis} binning: {reason}")]
    InvalidAxis {
        /// Which axis was rejected
        axis: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// Wrong number of dead-zone bands
    #[error("Expected {expected} dead-zone bands, got {got}")]
    DeadZoneCount {
        /// Required number of bands
        expected: usize,
        /// Number of bands supplied
        got: usize,
    },

    /// Dead-zone bands out of φ order or sharing φ values
    #[error("Dead-zone bands {first} and {second} overlap or are out of order")]
    OverlappingDeadZones {
        /// Lower zone number
        first: usize,
        /// Following zone number
        second: usize,
    },
}

/// Uniform binning of a φ × η rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisBinning {
    /// Lower φ edge (rad)
    pub phi_min: f64,
    /// Upper φ edge (rad)
    pub phi_max: f64,
    /// Bins along φ
    pub n_phi: usize,
    /// Lower η edge
    pub eta_min: f64,
    /// Upper η edge
    pub eta_max: f64,
    /// Bins along η
    pub n_eta: usize,
}

impl AxisBinning {
    /// Total number of bins.
    #[inline]
    pub fn entries(&self) -> usize {
        self.n_phi * self.n_eta
    }

    /// φ bin width.
    #[inline]
    pub fn phi_width(&self) -> f64 {
        (self.phi_max - self.phi_min) / self.n_phi as f64
    }

    /// η bin width.
    #[inline]
    pub fn eta_width(&self) -> f64 {
        (self.eta_max - self.eta_min) / self.n_eta as f64
    }

    /// Row-major 0-based bin of `(φ, η)`. The upper edges belong to the last
    /// bin.
    pub fn bin(&self, phi: f64, eta: f64) -> Option<usize> {
        let i = axis_bin(phi, self.phi_min, self.phi_max, self.n_phi)?;
        let j = axis_bin(eta, self.eta_min, self.eta_max, self.n_eta)?;
        Some(i * self.n_eta + j)
    }

    fn validate(&self, axis: &'static str) -> Result<(), GeometryError> {
        let invalid = |reason: String| GeometryError::InvalidAxis { axis, reason };
        if self.n_phi == 0 || self.n_eta == 0 {
            return Err(invalid(format!("{} x {} bins", self.n_phi, self.n_eta)));
        }
        if !(self.phi_min < self.phi_max) {
            return Err(invalid(format!("phi range [{}, {}]", self.phi_min, self.phi_max)));
        }
        if !(self.eta_min < self.eta_max) {
            return Err(invalid(format!("eta range [{}, {}]", self.eta_min, self.eta_max)));
        }
        Ok(())
    }
}

fn axis_bin(value: f64, min: f64, max: f64, n: usize) -> Option<usize> {
    if !(value >= min && value <= max) {
        return None;
    }
    let width = (max - min) / n as f64;
    Some((((value - min) / width).floor() as usize).min(n - 1))
}

/// Azimuthal gap between two calorimeter modules.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeadZoneBand {
    /// Lower φ edge (rad)
    pub phi_min: f64,
    /// Upper φ edge (rad)
    pub phi_max: f64,
    /// η bins of the gap's sub-grid (spans the calorimeter η range)
    pub n_eta: usize,
}

/// Parameters of a [`RegularGeometry`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegularGeometryConfig {
    /// Tracker grid over the full tracker acceptance
    pub tracker: AxisBinning,
    /// Calorimeter towers; their window is the calorimeter acceptance
    pub calorimeter: AxisBinning,
    /// The five inter-module gaps, ordered by φ
    pub dead_zones: Vec<DeadZoneBand>,
}

impl Default for RegularGeometryConfig {
    fn default() -> Self {
        let band = |center_deg: f64| DeadZoneBand {
            phi_min: (center_deg - 0.5).to_radians(),
            phi_max: (center_deg + 0.5).to_radians(),
            n_eta: 14,
        };

        Self {
            tracker: AxisBinning {
                phi_min: 0.0,
                phi_max: TAU,
                n_phi: 72, // 5 deg
                eta_min: -0.9,
                eta_max: 0.9,
                n_eta: 18,
            },
            calorimeter: AxisBinning {
                phi_min: 80f64.to_radians(),
                phi_max: 190f64.to_radians(),
                n_phi: 55, // 2 deg towers
                eta_min: -0.7,
                eta_max: 0.7,
                n_eta: 14,
            },
            dead_zones: [100.0, 120.0, 140.0, 160.0, 180.0].map(band).to_vec(),
        }
    }
}

/// Detector geometry with uniform tracker, tower and dead-zone binning.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegularGeometry {
    config: RegularGeometryConfig,
}

impl RegularGeometry {
    /// Validate a configuration and build the geometry.
    pub fn new(config: RegularGeometryConfig) -> Result<Self, GeometryError> {
        config.tracker.validate("tracker")?;
        config.calorimeter.validate("calorimeter")?;
        if config.dead_zones.len() != DEAD_ZONE_COUNT {
            return Err(GeometryError::DeadZoneCount {
                expected: DEAD_ZONE_COUNT,
                got: config.dead_zones.len(),
            });
        }
        for band in &config.dead_zones {
            if band.n_eta == 0 || band.phi_min > band.phi_max {
                return Err(GeometryError::InvalidAxis {
                    axis: "dead zone",
                    reason: format!(
                        "phi [{}, {}] with {} eta bins",
                        band.phi_min, band.phi_max, band.n_eta
                    ),
                });
            }
        }
        // Bands are inclusive on both edges, so neighbours must not touch.
        for (k, pair) in config.dead_zones.windows(2).enumerate() {
            if !(pair[0].phi_max < pair[1].phi_min) {
                return Err(GeometryError::OverlappingDeadZones {
                    first: k,
                    second: k + 1,
                });
            }
        }
        Ok(Self { config })
    }

    /// Configuration the geometry was built from.
    #[inline]
    pub fn config(&self) -> &RegularGeometryConfig {
        &self.config
    }

    fn band(&self, zone: DeadZoneId) -> Option<&DeadZoneBand> {
        self.config.dead_zones.get(zone.index())
    }
}

impl DetectorGeometry for RegularGeometry {
    fn cell_count(&self) -> usize {
        self.config.calorimeter.entries()
    }

    fn acceptance(&self) -> Acceptance {
        let calo = &self.config.calorimeter;
        let tracker = &self.config.tracker;
        Acceptance {
            n_phi: ((calo.phi_max - calo.phi_min) / tracker.phi_width()).round() as usize,
            n_eta: ((calo.eta_max - calo.eta_min) / tracker.eta_width()).round() as usize,
            phi_min: calo.phi_min,
            phi_max: calo.phi_max,
            eta_min: calo.eta_min,
            eta_max: calo.eta_max,
        }
    }

    fn bin_params(&self) -> BinParams {
        BinParams {
            phi_bin_in_tracker_acc: self.config.tracker.phi_width(),
            eta_bin_in_tracker_acc: self.config.tracker.eta_width(),
            phi_bin_in_calo_acc: self.config.calorimeter.phi_width(),
            eta_bin_in_calo_acc: self.config.calorimeter.eta_width(),
            n_bin_phi: self.config.tracker.n_phi,
        }
    }

    fn index_table(&self) -> IndexTable {
        let acc = self.acceptance();
        let dphi = self.config.tracker.phi_width();
        let deta = self.config.tracker.eta_width();
        let rows = acc.n_phi + 1;
        let cols = acc.n_eta + 1;

        let mut values = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                let phi = acc.phi_min + i as f64 * dphi;
                let eta = acc.eta_min + j as f64 * deta;
                values.push(self.tracker_index(phi, eta).unwrap_or(0));
            }
        }
        IndexTable::new(rows, cols, values)
    }

    fn tracker_entries(&self) -> usize {
        self.config.tracker.entries()
    }

    fn tracker_index(&self, phi: f64, eta: f64) -> Option<usize> {
        self.config.tracker.bin(phi, eta).map(|bin| bin + 1)
    }

    fn dead_zone_entries(&self, zone: DeadZoneId) -> usize {
        self.band(zone).map_or(0, |band| band.n_eta)
    }

    fn dead_zone_index(&self, zone: DeadZoneId, phi: f64, eta: f64) -> Option<usize> {
        let band = self.band(zone)?;
        if !(phi >= band.phi_min && phi <= band.phi_max) {
            return None;
        }
        let calo = &self.config.calorimeter;
        axis_bin(eta, calo.eta_min, calo.eta_max, band.n_eta).map(|bin| bin + 1)
    }

    fn dead_zone_phi_bounds(&self, zone: DeadZoneId) -> (f64, f64) {
        self.band(zone)
            .map_or((0.0, 0.0), |band| (band.phi_min, band.phi_max))
    }

    fn absolute_tower_id(&self, phi: f64, eta: f64) -> Option<usize> {
        self.config.calorimeter.bin(phi, eta)
    }
}
