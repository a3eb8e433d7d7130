//! Global unit-id layout of the composite grid.
//!
//! Every sub-grid owns a contiguous id range; the offset of a sub-grid is the
//! sum of the sizes of the sub-grids listed before it.
//!
//! ```text
//! TrackerOnly:            [ Tracker ]
//! TrackerAndCalorimeter:  [ Calorimeter | Tracker | DZ0 | DZ1 | DZ2 | DZ3 | DZ4 ]
//!                         0             cell_count
//! ```

use serde::{Deserialize, Serialize};

use crate::geometry::{DeadZoneId, DetectorGeometry};

use super::config::GridMode;

/// Named sub-grid of the layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubGridKind {
    /// Absolute calorimeter towers
    Calorimeter,
    /// Tracker grid
    Tracker,
    /// Grid covering one calorimeter dead zone
    DeadZone(DeadZoneId),
}

/// One sub-grid with its place in the global id space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubGrid {
    /// Which grid this is
    pub kind: SubGridKind,
    /// First global id
    pub offset: usize,
    /// Number of units
    pub size: usize,
}

impl SubGrid {
    /// Global id range of the sub-grid.
    #[inline]
    pub fn range(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.size
    }
}

/// Ordered sub-grids of one grid mode.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLayout {
    sub_grids: Vec<SubGrid>,
}

impl GridLayout {
    /// Build a layout from `(kind, size)` pairs in id order.
    pub fn from_sizes(sizes: impl IntoIterator<Item = (SubGridKind, usize)>) -> Self {
        let mut offset = 0;
        let sub_grids = sizes
            .into_iter()
            .map(|(kind, size)| {
                let grid = SubGrid { kind, offset, size };
                offset += size;
                grid
            })
            .collect();
        Self { sub_grids }
    }

    /// Layout used by `mode` for the given geometry.
    pub fn for_mode<G: DetectorGeometry + ?Sized>(geometry: &G, mode: GridMode) -> Self {
        match mode {
            GridMode::TrackerOnly => {
                Self::from_sizes([(SubGridKind::Tracker, geometry.tracker_entries())])
            }
            GridMode::TrackerAndCalorimeter => {
                let fixed = [
                    (SubGridKind::Calorimeter, geometry.cell_count()),
                    (SubGridKind::Tracker, geometry.tracker_entries()),
                ];
                let dead_zones = DeadZoneId::all()
                    .map(|zone| (SubGridKind::DeadZone(zone), geometry.dead_zone_entries(zone)));
                Self::from_sizes(fixed.into_iter().chain(dead_zones))
            }
        }
    }

    /// Number of units a store needs to serve every grid mode.
    pub fn capacity<G: DetectorGeometry + ?Sized>(geometry: &G) -> usize {
        Self::for_mode(geometry, GridMode::TrackerOnly)
            .total()
            .max(Self::for_mode(geometry, GridMode::TrackerAndCalorimeter).total())
    }

    /// Sub-grids in id order.
    #[inline]
    pub fn sub_grids(&self) -> &[SubGrid] {
        &self.sub_grids
    }

    /// Look up a sub-grid by kind.
    pub fn sub_grid(&self, kind: SubGridKind) -> Option<&SubGrid> {
        self.sub_grids.iter().find(|grid| grid.kind == kind)
    }

    /// First global id of a sub-grid.
    #[inline]
    pub fn offset(&self, kind: SubGridKind) -> Option<usize> {
        self.sub_grid(kind).map(|grid| grid.offset)
    }

    /// Total number of units.
    pub fn total(&self) -> usize {
        self.sub_grids.last().map_or(0, |grid| grid.offset + grid.size)
    }

    /// Global id of the 0-based `local` index inside `kind`.
    pub fn global_id(&self, kind: SubGridKind, local: usize) -> Option<usize> {
        let grid = self.sub_grid(kind)?;
        (local < grid.size).then_some(grid.offset + local)
    }

    /// Sub-grid owning a global id.
    pub fn kind_of(&self, id: usize) -> Option<SubGridKind> {
        self.sub_grids
            .iter()
            .find(|grid| grid.range().contains(&id))
            .map(|grid| grid.kind)
    }
}
