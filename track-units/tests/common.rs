//! Test utilities for track-units.
//!
//! Small geometries with hand-checkable ids and deterministic track samples.

#![allow(dead_code)]

use std::collections::HashSet;
use std::f64::consts::TAU;

use track_units::geometry::{
    Acceptance, AxisBinning, BinParams, DeadZoneBand, DeadZoneId, DetectorGeometry, IndexTable,
    RegularGeometry, RegularGeometryConfig,
};
use track_units::{Momentum, Track, TrackStatus};

/// Charged pion mass used for generated tracks.
pub const PION_MASS: f64 = 0.13957;

/// Refitted track from `(pt, η, φ)`.
pub fn track(pt: f64, eta: f64, phi: f64, label: i32) -> Track {
    Track::new(
        Momentum::from_pt_eta_phi(pt, eta, phi),
        PION_MASS,
        TrackStatus::REFITTED,
        label,
    )
}

/// Compact geometry:
///
/// ```text
/// tracker      8 φ × 4 η over [0, 2π) × [-1, 1]     32 entries
/// calorimeter  2 φ × 2 η over [1, 2] × [-0.5, 0.5]   4 towers
/// dead zones   φ = 1.1, 1.3, 1.5, 1.7, 1.9 (± 0.01), 2 η bins each
/// ```
///
/// Dual-mode layout: towers 0..4, tracker 4..36, dead zones 36..46.
pub fn small_geometry() -> RegularGeometry {
    let band = |center: f64| DeadZoneBand {
        phi_min: center - 0.01,
        phi_max: center + 0.01,
        n_eta: 2,
    };
    let config = RegularGeometryConfig {
        tracker: AxisBinning {
            phi_min: 0.0,
            phi_max: TAU,
            n_phi: 8,
            eta_min: -1.0,
            eta_max: 1.0,
            n_eta: 4,
        },
        calorimeter: AxisBinning {
            phi_min: 1.0,
            phi_max: 2.0,
            n_phi: 2,
            eta_min: -0.5,
            eta_max: 0.5,
            n_eta: 2,
        },
        dead_zones: [1.1, 1.3, 1.5, 1.7, 1.9].map(band).to_vec(),
    };
    RegularGeometry::new(config).unwrap()
}

/// Regular geometry with some towers missing.
pub struct MaskedGeometry {
    pub inner: RegularGeometry,
    pub missing_towers: HashSet<usize>,
}

impl MaskedGeometry {
    pub fn new(inner: RegularGeometry, missing: &[usize]) -> Self {
        Self {
            inner,
            missing_towers: missing.iter().copied().collect(),
        }
    }
}

impl DetectorGeometry for MaskedGeometry {
    fn cell_count(&self) -> usize {
        self.inner.cell_count()
    }

    fn acceptance(&self) -> Acceptance {
        self.inner.acceptance()
    }

    fn bin_params(&self) -> BinParams {
        self.inner.bin_params()
    }

    fn index_table(&self) -> IndexTable {
        self.inner.index_table()
    }

    fn tracker_entries(&self) -> usize {
        self.inner.tracker_entries()
    }

    fn tracker_index(&self, phi: f64, eta: f64) -> Option<usize> {
        self.inner.tracker_index(phi, eta)
    }

    fn dead_zone_entries(&self, zone: DeadZoneId) -> usize {
        self.inner.dead_zone_entries(zone)
    }

    fn dead_zone_index(&self, zone: DeadZoneId, phi: f64, eta: f64) -> Option<usize> {
        self.inner.dead_zone_index(zone, phi, eta)
    }

    fn dead_zone_phi_bounds(&self, zone: DeadZoneId) -> (f64, f64) {
        self.inner.dead_zone_phi_bounds(zone)
    }

    fn absolute_tower_id(&self, phi: f64, eta: f64) -> Option<usize> {
        self.inner
            .absolute_tower_id(phi, eta)
            .filter(|id| !self.missing_towers.contains(id))
    }
}

/// Deterministic spread of tracks over the tracker acceptance.
///
/// Every third track is background, every seventh lacks the ITS refit.
pub fn spread_event(n: usize) -> Vec<Track> {
    (0..n)
        .map(|i| {
            let x = i as f64;
            let pt = 0.2 + (x * 0.37) % 4.0;
            let eta = -0.85 + (x * 0.113) % 1.7;
            let phi = (x * 0.731) % TAU;
            let label = if i % 3 == 0 { 10_000 + i as i32 } else { i as i32 };
            let mut t = track(pt, eta, phi, label);
            if i % 7 == 0 {
                t.status = TrackStatus::TPC_REFIT;
            }
            t
        })
        .collect()
}
