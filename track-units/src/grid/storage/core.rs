//! Unit store core implementation.

use log::trace;

use crate::core::{Cell, Deposit, TrackRef};
use crate::error::{Result, UnitError};
use crate::geometry::DetectorGeometry;
use crate::grid::GridLayout;

use super::types::UnitCounts;

/// Fixed-size array of units indexed by global unit id.
///
/// Allocated once from the geometry and reset at the start of every event;
/// it is never resized afterwards.
///
/// Besides the units the store keeps the event's touched-unit list: the ids
/// of units in the order their energy first rose above zero. The list is
/// opened on the first touch of the event and shared by every later
/// insertion.
#[derive(Clone, Debug, Default)]
pub struct CellStore {
    cells: Vec<Cell>,
    refs_open: bool,
    touched: Vec<usize>,
}

impl CellStore {
    /// Create a store with `len` untouched units.
    pub fn new(len: usize) -> Self {
        Self {
            cells: vec![Cell::new(); len],
            refs_open: false,
            touched: Vec::new(),
        }
    }

    /// Create a store large enough for every grid mode of `geometry`.
    pub fn for_geometry<G: DetectorGeometry + ?Sized>(geometry: &G) -> Self {
        Self::new(GridLayout::capacity(geometry))
    }

    /// Number of units.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when the store holds no units.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Unit by id.
    #[inline]
    pub fn get(&self, id: usize) -> Option<&Cell> {
        self.cells.get(id)
    }

    /// All units in id order.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate `(id, unit)` over units touched this event.
    pub fn iter_touched(&self) -> impl Iterator<Item = (usize, &Cell)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_touched())
    }

    /// Ids of units in the order their energy first rose above zero.
    #[inline]
    pub fn touched_units(&self) -> &[usize] {
        &self.touched
    }

    /// Has the touched-unit list been opened this event?
    #[inline]
    pub fn refs_open(&self) -> bool {
        self.refs_open
    }

    /// Fail when the store cannot hold `layout`.
    pub fn ensure_fits(&self, layout: &GridLayout) -> Result<()> {
        let required = layout.total();
        if self.cells.len() < required {
            return Err(UnitError::StoreTooSmall {
                len: self.cells.len(),
                required,
            });
        }
        Ok(())
    }

    /// Clear all per-event state.
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            cell.reset();
        }
        self.refs_open = false;
        self.touched.clear();
    }

    /// Add a track's contribution to unit `id`.
    ///
    /// Returns `None` when `id` is outside the store.
    pub fn deposit(
        &mut self,
        id: usize,
        track: TrackRef,
        pt: f64,
        mass: f64,
        signal: bool,
        pt_min: f64,
    ) -> Option<Deposit> {
        let cell = self.cells.get_mut(id)?;
        let was_empty = cell.energy() == 0.0;
        let deposit = cell.deposit(track, pt, mass, signal, pt_min);

        if deposit.first_touch && !self.refs_open {
            self.refs_open = true;
            trace!("Touched-unit list opened by unit {}", id);
        }
        if was_empty && cell.energy() > 0.0 {
            self.touched.push(id);
        }
        Some(deposit)
    }

    /// Sum of unit energies.
    pub fn total_energy(&self) -> f64 {
        self.cells.iter().map(Cell::energy).sum()
    }

    /// Tally units by state.
    pub fn counts(&self) -> UnitCounts {
        let mut counts = UnitCounts::default();
        for cell in &self.cells {
            if !cell.is_touched() {
                counts.untouched += 1;
                continue;
            }
            counts.touched += 1;
            if cell.cut_flag().is_above() {
                counts.above_cut += 1;
            }
            if cell.signal_flag().is_good() {
                counts.signal += 1;
            }
        }
        counts
    }
}
