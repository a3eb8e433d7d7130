//! Track direction to unit-id resolution.
//!
//! ## Resolution Rules
//!
//! ```text
//! TrackerOnly:
//!     tracker_index(φ, η) - 1
//!
//! TrackerAndCalorimeter, (φ, η) inside calorimeter acceptance:
//!     dead zone k whose φ band holds φ  → offset(DZk) + dead_zone_index - 1
//!     and, independently,               → absolute_tower_id(φ, η)
//!
//! TrackerAndCalorimeter, outside:
//!     offset(Tracker) + tracker_index(φ, η) - 1
//! ```
//!
//! Raw indices are 1-based; a raw index of 0, a failed lookup or an id that
//! falls outside its sub-grid is a geometry miss and produces no credit.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::geometry::{DeadZoneId, DetectorGeometry};

use super::config::GridMode;
use super::layout::SubGridKind;
use super::params::UnitParameters;

/// Region a credited unit belongs to, for the event counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    /// Tracker grid in single-grid mode
    TrackerOnly,
    /// Calorimeter tower
    Calorimeter,
    /// Calorimeter dead zone
    DeadZone,
    /// Tracker grid outside the calorimeter acceptance
    Tracker,
}

/// One unit to credit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credit {
    /// Global unit id
    pub unit: usize,
    /// Region of the unit
    pub region: Region,
}

/// All units one track direction credits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Tower or tracker unit; `None` on a geometry miss
    pub main: Option<Credit>,
    /// Dead-zone unit, credited in addition to `main`
    pub dead_zone: Option<Credit>,
}

impl Resolution {
    /// Credits in application order: dead zone first, then the main unit.
    pub fn credits(&self) -> impl Iterator<Item = Credit> {
        self.dead_zone.into_iter().chain(self.main)
    }
}

/// Maps `(φ, η)` to global unit ids for one event.
pub struct CellResolver<'a, G: ?Sized> {
    geometry: &'a G,
    params: &'a UnitParameters,
    include_dead_zones: bool,
}

impl<'a, G: DetectorGeometry + ?Sized> CellResolver<'a, G> {
    /// Create a resolver over this event's parameters.
    pub fn new(geometry: &'a G, params: &'a UnitParameters, include_dead_zones: bool) -> Self {
        Self {
            geometry,
            params,
            include_dead_zones,
        }
    }

    /// Resolve a track direction. `phi` must be in `[0, 2π)`.
    pub fn resolve(&self, phi: f64, eta: f64) -> Resolution {
        match self.params.mode {
            GridMode::TrackerOnly => Resolution {
                main: self.tracker_credit(phi, eta, Region::TrackerOnly),
                dead_zone: None,
            },
            GridMode::TrackerAndCalorimeter => {
                if self.params.acceptance.contains(phi, eta) {
                    let dead_zone = if self.include_dead_zones {
                        self.dead_zone_credit(phi, eta)
                    } else {
                        None
                    };
                    Resolution {
                        main: self.tower_credit(phi, eta),
                        dead_zone,
                    }
                } else {
                    Resolution {
                        main: self.tracker_credit(phi, eta, Region::Tracker),
                        dead_zone: None,
                    }
                }
            }
        }
    }

    fn tracker_credit(&self, phi: f64, eta: f64, region: Region) -> Option<Credit> {
        let raw = self.geometry.tracker_index(phi, eta);
        let unit = self.local_to_global(SubGridKind::Tracker, raw);
        if unit.is_none() {
            trace!("No tracker unit for phi {:.4} eta {:.4} (raw {:?})", phi, eta, raw);
        }
        unit.map(|unit| Credit { unit, region })
    }

    fn tower_credit(&self, phi: f64, eta: f64) -> Option<Credit> {
        let Some(tower) = self.geometry.absolute_tower_id(phi, eta) else {
            trace!("Tower not found for phi {:.4} eta {:.4}", phi, eta);
            return None;
        };
        self.params
            .layout
            .global_id(SubGridKind::Calorimeter, tower)
            .map(|unit| Credit {
                unit,
                region: Region::Calorimeter,
            })
    }

    /// Geometry construction keeps bands disjoint, so at most one zone matches.
    fn dead_zone_credit(&self, phi: f64, eta: f64) -> Option<Credit> {
        let zone = DeadZoneId::all().find(|&zone| {
            let (min, max) = self.params.dead_zone_band(zone);
            phi >= min && phi <= max
        })?;

        let raw = self.geometry.dead_zone_index(zone, phi, eta);
        let unit = self.local_to_global(SubGridKind::DeadZone(zone), raw);
        if unit.is_none() {
            trace!("No unit in dead zone {} for eta {:.4} (raw {:?})", zone.index(), eta, raw);
        }
        unit.map(|unit| Credit {
            unit,
            region: Region::DeadZone,
        })
    }

    fn local_to_global(&self, kind: SubGridKind, raw: Option<usize>) -> Option<usize> {
        let local = raw?.checked_sub(1)?;
        self.params.layout.global_id(kind, local)
    }
}
