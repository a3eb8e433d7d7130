//! Per-event parameter initialisation.
//!
//! Pulls everything the resolver needs out of the geometry once per event,
//! so the per-track loop never touches the layout arithmetic again.

use log::{debug, trace};

use crate::geometry::{
    Acceptance, BinParams, DEAD_ZONE_COUNT, DeadZoneId, DetectorGeometry, IndexTable,
};

use super::config::GridMode;
use super::layout::GridLayout;

/// Geometry snapshot for one event.
#[derive(Clone, Debug, PartialEq)]
pub struct UnitParameters {
    /// Grid mode the layout was built for
    pub mode: GridMode,
    /// Number of calorimeter towers
    pub cell_count: usize,
    /// Calorimeter acceptance window
    pub acceptance: Acceptance,
    /// Bin sizes
    pub bin_params: BinParams,
    /// Raw-index table (diagnostics only)
    pub index_table: IndexTable,
    /// φ bands of the dead zones, in zone order
    pub dead_zone_bands: [(f64, f64); DEAD_ZONE_COUNT],
    /// Global id layout
    pub layout: GridLayout,
}

impl UnitParameters {
    /// Read the geometry for one event. Inputs are not validated.
    pub fn init<G: DetectorGeometry + ?Sized>(
        geometry: &G,
        mode: GridMode,
        debug_level: u32,
    ) -> Self {
        let cell_count = geometry.cell_count();
        let acceptance = geometry.acceptance();
        let bin_params = geometry.bin_params();
        let index_table = geometry.index_table();

        let mut dead_zone_bands = [(0.0, 0.0); DEAD_ZONE_COUNT];
        for zone in DeadZoneId::all() {
            dead_zone_bands[zone.index()] = geometry.dead_zone_phi_bounds(zone);
        }

        let layout = GridLayout::for_mode(geometry, mode);

        debug!("Unit parameters: {} calorimeter cells", cell_count);

        if debug_level > 20 {
            for i in 0..index_table.rows() {
                for j in 0..index_table.cols() {
                    trace!("index[{},{}] : {}", i, j, index_table.get(i, j).unwrap_or(0));
                }
            }
        }
        if debug_level > 1 {
            debug!(
                "Parameters initiated: mode {:?}, acceptance phi [{:.3}, {:.3}] eta [{:.2}, {:.2}], {} units",
                mode,
                acceptance.phi_min,
                acceptance.phi_max,
                acceptance.eta_min,
                acceptance.eta_max,
                layout.total()
            );
        }

        Self {
            mode,
            cell_count,
            acceptance,
            bin_params,
            index_table,
            dead_zone_bands,
            layout,
        }
    }

    /// φ band of one dead zone.
    #[inline]
    pub fn dead_zone_band(&self, zone: DeadZoneId) -> (f64, f64) {
        self.dead_zone_bands[zone.index()]
    }

    /// Units required by this event's layout.
    #[inline]
    pub fn unit_count(&self) -> usize {
        self.layout.total()
    }
}
