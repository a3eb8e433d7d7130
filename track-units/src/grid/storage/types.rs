//! Types used by the unit store.

use serde::{Deserialize, Serialize};

/// Unit counts by state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitCounts {
    /// Units no track reached this event
    pub untouched: usize,
    /// Units with at least one contribution
    pub touched: usize,
    /// Touched units above the pt threshold
    pub above_cut: usize,
    /// Touched units with a signal contribution
    pub signal: usize,
}

impl UnitCounts {
    /// Total units.
    pub fn total(&self) -> usize {
        self.untouched + self.touched
    }

    /// Touched units holding only background.
    pub fn background(&self) -> usize {
        self.touched - self.signal
    }
}
