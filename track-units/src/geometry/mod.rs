//! Detector geometry interface.
//!
//! The fill pass never computes detector positions itself. Everything it
//! needs about the tracker grid, the calorimeter towers and the dead zones
//! between calorimeter modules comes through [`DetectorGeometry`].
//!
//! ## Index Conventions
//!
//! ```text
//! tracker_index(φ, η)       1-based raw index in the tracker grid
//! dead_zone_index(k, φ, η)  1-based raw index inside dead-zone grid k
//! absolute_tower_id(φ, η)   0-based calorimeter tower id
//! ```
//!
//! A `None` from any lookup means the point is not covered by that grid.
//!
//! [`RegularGeometry`] provides uniform binning for all three and is used by
//! the command line tool, tests and benchmarks.

mod regular;

pub use regular::{AxisBinning, DeadZoneBand, GeometryError, RegularGeometry, RegularGeometryConfig};

use serde::{Deserialize, Serialize};

/// Number of dead-zone sub-grids between calorimeter modules.
pub const DEAD_ZONE_COUNT: usize = 5;

/// Identifier of one dead-zone sub-grid (`0..DEAD_ZONE_COUNT`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeadZoneId(pub usize);

impl DeadZoneId {
    /// All dead zones in layout order.
    pub fn all() -> impl Iterator<Item = DeadZoneId> {
        (0..DEAD_ZONE_COUNT).map(DeadZoneId)
    }

    /// Zone number.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Calorimeter acceptance window, binned with the tracker grid's bin size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Acceptance {
    /// Tracker-grid bins across the window in φ
    pub n_phi: usize,
    /// Tracker-grid bins across the window in η
    pub n_eta: usize,
    /// Lower φ edge (rad)
    pub phi_min: f64,
    /// Upper φ edge (rad)
    pub phi_max: f64,
    /// Lower η edge
    pub eta_min: f64,
    /// Upper η edge
    pub eta_max: f64,
}

impl Acceptance {
    /// Inclusive containment test on both axes.
    #[inline]
    pub fn contains(&self, phi: f64, eta: f64) -> bool {
        eta >= self.eta_min && eta <= self.eta_max && phi >= self.phi_min && phi <= self.phi_max
    }
}

/// Bin sizes of the tracker grid and of the calorimeter towers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BinParams {
    /// φ bin width of the tracker grid (rad)
    pub phi_bin_in_tracker_acc: f64,
    /// η bin width of the tracker grid
    pub eta_bin_in_tracker_acc: f64,
    /// φ bin width inside the calorimeter acceptance (rad)
    pub phi_bin_in_calo_acc: f64,
    /// η bin width inside the calorimeter acceptance
    pub eta_bin_in_calo_acc: f64,
    /// Total number of tracker-grid φ bins
    pub n_bin_phi: usize,
}

/// Raw tracker indices on the `(n_phi + 1) × (n_eta + 1)` nodes of the
/// acceptance window. Only used for diagnostics.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexTable {
    rows: usize,
    cols: usize,
    values: Vec<usize>,
}

impl IndexTable {
    /// Build a table from row-major values.
    ///
    /// Missing trailing values read back as 0.
    pub fn new(rows: usize, cols: usize, mut values: Vec<usize>) -> Self {
        values.resize(rows * cols, 0);
        Self { rows, cols, values }
    }

    /// Number of φ nodes.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of η nodes.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Raw index at node `(i, j)`, 0 when the node is not covered.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Option<usize> {
        if i < self.rows && j < self.cols {
            Some(self.values[i * self.cols + j])
        } else {
            None
        }
    }
}

/// Geometry service consulted by the fill pass.
///
/// Implementations must be deterministic: the same `(φ, η)` has to resolve
/// to the same indices for as long as one event is being filled.
pub trait DetectorGeometry {
    /// Number of calorimeter towers.
    fn cell_count(&self) -> usize;

    /// Calorimeter acceptance window.
    fn acceptance(&self) -> Acceptance;

    /// Bin sizes of the tracker grid and the towers.
    fn bin_params(&self) -> BinParams;

    /// Raw-index table over the acceptance window.
    fn index_table(&self) -> IndexTable;

    /// Number of entries in the tracker grid.
    fn tracker_entries(&self) -> usize;

    /// 1-based tracker-grid index of `(φ, η)`.
    fn tracker_index(&self, phi: f64, eta: f64) -> Option<usize>;

    /// Number of entries in dead-zone grid `zone`.
    fn dead_zone_entries(&self, zone: DeadZoneId) -> usize;

    /// 1-based index of `(φ, η)` inside dead-zone grid `zone`.
    fn dead_zone_index(&self, zone: DeadZoneId, phi: f64, eta: f64) -> Option<usize>;

    /// φ band `(min, max)` covered by dead zone `zone`.
    fn dead_zone_phi_bounds(&self, zone: DeadZoneId) -> (f64, f64);

    /// Absolute tower id containing `(φ, η)`.
    fn absolute_tower_id(&self, phi: f64, eta: f64) -> Option<usize>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acceptance_is_inclusive() {
        let acc = Acceptance {
            n_phi: 4,
            n_eta: 2,
            phi_min: 1.0,
            phi_max: 2.0,
            eta_min: -0.5,
            eta_max: 0.5,
        };
        assert!(acc.contains(1.0, -0.5));
        assert!(acc.contains(2.0, 0.5));
        assert!(!acc.contains(2.0001, 0.0));
        assert!(!acc.contains(1.5, -0.6));
    }

    #[test]
    fn test_index_table_bounds() {
        let table = IndexTable::new(2, 3, vec![1, 2, 3, 4]);
        assert_eq!(table.get(0, 2), Some(3));
        assert_eq!(table.get(1, 0), Some(4));
        assert_eq!(table.get(1, 2), Some(0));
        assert_eq!(table.get(2, 0), None);
    }

    #[test]
    fn test_dead_zone_ids() {
        let ids: Vec<usize> = DeadZoneId::all().map(DeadZoneId::index).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    }
}
