//! Event counters and the pass summary.

use serde::{Deserialize, Serialize};

use crate::classify::{Rejection, TrackClass};
use crate::core::TrackRef;
use crate::grid::{GridMode, Region};

/// Touch counts of one region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionCount {
    /// Units touched for the first time this event
    pub touched: usize,
    /// Touched units whose energy went above the pt threshold
    pub passed_cut: usize,
}

/// Per-region counters of one pass. Built fresh for every event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionCounters {
    /// Tracker grid in single-grid mode
    pub tracker_only: RegionCount,
    /// Calorimeter towers
    pub calorimeter: RegionCount,
    /// Dead-zone units
    pub dead_zone: RegionCount,
    /// Tracker grid outside the calorimeter acceptance
    pub tracker: RegionCount,
}

impl RegionCounters {
    /// Counter of one region.
    pub fn region(&self, region: Region) -> &RegionCount {
        match region {
            Region::TrackerOnly => &self.tracker_only,
            Region::Calorimeter => &self.calorimeter,
            Region::DeadZone => &self.dead_zone,
            Region::Tracker => &self.tracker,
        }
    }

    /// Mutable counter of one region.
    pub fn region_mut(&mut self, region: Region) -> &mut RegionCount {
        match region {
            Region::TrackerOnly => &mut self.tracker_only,
            Region::Calorimeter => &mut self.calorimeter,
            Region::DeadZone => &mut self.dead_zone,
            Region::Tracker => &mut self.tracker,
        }
    }

    /// Regions that take part in `mode`.
    pub fn regions(mode: GridMode) -> &'static [Region] {
        match mode {
            GridMode::TrackerOnly => &[Region::TrackerOnly],
            GridMode::TrackerAndCalorimeter => {
                &[Region::Calorimeter, Region::DeadZone, Region::Tracker]
            }
        }
    }

    /// Units touched in the regions of `mode`.
    pub fn touched_total(&self, mode: GridMode) -> usize {
        Self::regions(mode)
            .iter()
            .map(|&region| self.region(region).touched)
            .sum()
    }

    /// Units above the threshold in the regions of `mode`.
    pub fn passed_cut_total(&self, mode: GridMode) -> usize {
        Self::regions(mode)
            .iter()
            .map(|&region| self.region(region).passed_cut)
            .sum()
    }
}

/// Tracks dropped before contributing to their main unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionCounts {
    /// Missing refit bits
    pub missing_refit: usize,
    /// Removed by the signal-only selection
    pub not_signal: usize,
    /// Removed by the background-only selection
    pub not_background: usize,
    /// Outside the fiducial η window
    pub outside_fiducial: usize,
    /// Accepted but without a main unit in the geometry
    pub geometry_miss: usize,
}

impl RejectionCounts {
    /// Count one classifier rejection.
    pub fn record(&mut self, rejection: Rejection) {
        match rejection {
            Rejection::MissingRefit => self.missing_refit += 1,
            Rejection::NotSignal => self.not_signal += 1,
            Rejection::NotBackground => self.not_background += 1,
            Rejection::OutsideFiducial => self.outside_fiducial += 1,
        }
    }

    /// All dropped tracks.
    pub fn total(&self) -> usize {
        self.missing_refit
            + self.not_signal
            + self.not_background
            + self.outside_fiducial
            + self.geometry_miss
    }
}

/// Result of one fill pass.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FillSummary {
    /// Grid mode of the pass
    pub mode: GridMode,
    /// Tracks in the event
    pub n_tracks: usize,
    /// Tracks that reached their main unit
    pub good_tracks: usize,
    /// Units touched this event
    pub n_units: usize,
    /// Touched units above the pt threshold
    pub n_units_cut: usize,
    /// Per-region breakdown
    pub counters: RegionCounters,
    /// Why the other tracks were dropped
    pub rejections: RejectionCounts,
    /// Flags of the good tracks, in event order
    pub track_classes: Vec<(TrackRef, TrackClass)>,
}

impl FillSummary {
    /// One-line report.
    pub fn summary(&self) -> String {
        format!(
            "{} tracks, {} good, {} units ({} above cut), {} dropped",
            self.n_tracks,
            self.good_tracks,
            self.n_units,
            self.n_units_cut,
            self.rejections.total()
        )
    }
}
