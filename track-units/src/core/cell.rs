//! Unit (cell) state accumulated during one event.

use serde::{Deserialize, Serialize};

use super::track::TrackRef;

/// Position of a unit's energy relative to the pt threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CutFlag {
    /// Energy at or below the threshold (also the state of untouched units)
    #[default]
    BelowPtThreshold,
    /// Energy strictly above the threshold
    AbovePtThreshold,
}

impl CutFlag {
    /// Flag for an accumulated energy.
    #[inline]
    pub fn from_energy(energy: f64, pt_min: f64) -> Self {
        if energy > pt_min {
            CutFlag::AbovePtThreshold
        } else {
            CutFlag::BelowPtThreshold
        }
    }

    /// True for [`CutFlag::AbovePtThreshold`].
    #[inline]
    pub fn is_above(self) -> bool {
        self == CutFlag::AbovePtThreshold
    }
}

/// Signal content of a unit.
///
/// Starts as `Bad` every event and latches to `Good` once a signal track
/// contributes; it never goes back within the event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SignalFlag {
    /// At least one contributing track comes from the signal
    Good,
    /// Only background tracks so far
    #[default]
    Bad,
}

impl SignalFlag {
    /// Latch to `Good` when `signal` is set; leave the flag alone otherwise.
    #[inline]
    pub fn latch(&mut self, signal: bool) {
        if signal {
            *self = SignalFlag::Good;
        }
    }

    /// True for [`SignalFlag::Good`].
    #[inline]
    pub fn is_good(self) -> bool {
        self == SignalFlag::Good
    }
}

/// What a single deposit did to a unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Deposit {
    /// First contribution to the unit this event
    pub first_touch: bool,
    /// Cut flag moved from below to above the threshold
    pub crossed_cut: bool,
}

/// One detector unit.
///
/// `track_refs` is `None` until the first contribution of the event, so a
/// unit is touched exactly when it holds references.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    energy: f64,
    mass: f64,
    cut_flag: CutFlag,
    signal_flag: SignalFlag,
    signal_flag_candidate: SignalFlag,
    track_refs: Option<Vec<TrackRef>>,
}

impl Cell {
    /// Create an untouched unit.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulated transverse momentum.
    #[inline]
    pub fn energy(&self) -> f64 {
        self.energy
    }

    /// Mass of the last contributing track.
    #[inline]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Current cut flag.
    #[inline]
    pub fn cut_flag(&self) -> CutFlag {
        self.cut_flag
    }

    /// Signal flag.
    #[inline]
    pub fn signal_flag(&self) -> SignalFlag {
        self.signal_flag
    }

    /// Candidate signal flag, latched independently of [`Cell::signal_flag`].
    #[inline]
    pub fn signal_flag_candidate(&self) -> SignalFlag {
        self.signal_flag_candidate
    }

    /// Tracks that contributed this event, in contribution order.
    #[inline]
    pub fn track_refs(&self) -> &[TrackRef] {
        self.track_refs.as_deref().unwrap_or(&[])
    }

    /// Has any track contributed this event?
    #[inline]
    pub fn is_touched(&self) -> bool {
        self.track_refs.is_some()
    }

    /// Clear all per-event state.
    pub fn reset(&mut self) {
        self.energy = 0.0;
        self.mass = 0.0;
        self.cut_flag = CutFlag::BelowPtThreshold;
        self.signal_flag = SignalFlag::Bad;
        self.signal_flag_candidate = SignalFlag::Bad;
        self.track_refs = None;
    }

    /// Add one track's contribution.
    ///
    /// A handle already stored is not appended again and its energy is not
    /// counted twice.
    pub fn deposit(
        &mut self,
        track: TrackRef,
        pt: f64,
        mass: f64,
        signal: bool,
        pt_min: f64,
    ) -> Deposit {
        let first_touch = self.track_refs.is_none();
        let refs = self.track_refs.get_or_insert_with(Vec::new);
        if refs.contains(&track) {
            return Deposit::default();
        }
        refs.push(track);

        let was_above = self.cut_flag.is_above();
        self.energy += pt;
        self.mass = mass;
        self.cut_flag = CutFlag::from_energy(self.energy, pt_min);

        self.signal_flag.latch(signal);
        self.signal_flag_candidate.latch(signal);

        Deposit {
            first_touch,
            crossed_cut: !was_above && self.cut_flag.is_above(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cell_is_untouched() {
        let cell = Cell::new();
        assert!(!cell.is_touched());
        assert!(cell.track_refs().is_empty());
        assert_eq!(cell.energy(), 0.0);
        assert_eq!(cell.cut_flag(), CutFlag::BelowPtThreshold);
        assert_eq!(cell.signal_flag(), SignalFlag::Bad);
    }

    #[test]
    fn test_deposit_accumulates() {
        let mut cell = Cell::new();

        let first = cell.deposit(TrackRef(0), 1.0, 0.14, false, 2.0);
        assert!(first.first_touch);
        assert!(!first.crossed_cut);
        assert_eq!(cell.cut_flag(), CutFlag::BelowPtThreshold);

        let second = cell.deposit(TrackRef(3), 1.5, 0.49, false, 2.0);
        assert!(!second.first_touch);
        assert!(second.crossed_cut);

        assert_eq!(cell.energy(), 2.5);
        assert_eq!(cell.mass(), 0.49);
        assert_eq!(cell.cut_flag(), CutFlag::AbovePtThreshold);
        assert_eq!(cell.track_refs(), &[TrackRef(0), TrackRef(3)]);
    }

    #[test]
    fn test_cut_flag_is_strict() {
        assert_eq!(CutFlag::from_energy(2.0, 2.0), CutFlag::BelowPtThreshold);
        assert_eq!(CutFlag::from_energy(2.0001, 2.0), CutFlag::AbovePtThreshold);
    }

    #[test]
    fn test_signal_flag_latches() {
        let mut cell = Cell::new();
        cell.deposit(TrackRef(0), 1.0, 0.0, true, 0.5);
        cell.deposit(TrackRef(1), 1.0, 0.0, false, 0.5);

        assert_eq!(cell.signal_flag(), SignalFlag::Good);
        assert_eq!(cell.signal_flag_candidate(), SignalFlag::Good);
    }

    #[test]
    fn test_repeated_handle_is_ignored() {
        let mut cell = Cell::new();
        cell.deposit(TrackRef(7), 1.0, 0.0, false, 0.5);
        let again = cell.deposit(TrackRef(7), 1.0, 0.0, false, 0.5);

        assert_eq!(again, Deposit::default());
        assert_eq!(cell.energy(), 1.0);
        assert_eq!(cell.track_refs().len(), 1);
    }

    #[test]
    fn test_returning_handle_is_ignored() {
        let mut cell = Cell::new();
        cell.deposit(TrackRef(0), 1.0, 0.0, false, 0.5);
        cell.deposit(TrackRef(1), 1.0, 0.0, false, 0.5);
        let again = cell.deposit(TrackRef(0), 1.0, 0.0, true, 0.5);

        assert_eq!(again, Deposit::default());
        assert_eq!(cell.energy(), 2.0);
        assert_eq!(cell.track_refs(), &[TrackRef(0), TrackRef(1)]);
        assert_eq!(cell.signal_flag(), SignalFlag::Bad);
    }

    #[test]
    fn test_reset() {
        let mut cell = Cell::new();
        cell.deposit(TrackRef(0), 4.0, 0.14, true, 1.0);
        cell.reset();
        assert_eq!(cell, Cell::new());
    }
}
