//! The per-event fill pass.
//!
//! [`UnitFiller`] walks the event's tracks in collection order and credits
//! each accepted track to its units:
//!
//! ```text
//! for each track:
//!     classify ── rejected ──► next track
//!        │
//!     resolve (φ, η) ──► dead-zone unit? + main unit?
//!        │
//!     for each unit:
//!         first touch → open track refs, count region touch
//!         append track ref, energy += pt, mass = track mass
//!         cut flag from unit energy (counts region pass on crossing)
//!         latch signal flags
//! ```
//!
//! Only the first contribution to a unit is counted, so the touched-unit
//! totals do not depend on how many tracks share a unit.

mod counters;

pub use counters::{FillSummary, RegionCount, RegionCounters, RejectionCounts};

use log::{debug, trace};

use crate::classify::{Classified, TrackClassifier};
use crate::core::{Track, TrackRef};
use crate::error::Result;
use crate::geometry::DetectorGeometry;
use crate::grid::{CellResolver, CellStore, Credit, FillConfig, UnitParameters};

/// Fills a [`CellStore`] from one event's tracks.
pub struct UnitFiller<'g, G: ?Sized> {
    geometry: &'g G,
    config: FillConfig,
}

impl<'g, G: DetectorGeometry + ?Sized> UnitFiller<'g, G> {
    /// Create a filler for a geometry and cut configuration.
    pub fn new(geometry: &'g G, config: FillConfig) -> Self {
        Self { geometry, config }
    }

    /// Active configuration.
    #[inline]
    pub fn config(&self) -> &FillConfig {
        &self.config
    }

    /// Allocate a store sized for this filler's geometry.
    pub fn new_store(&self) -> CellStore {
        CellStore::for_geometry(self.geometry)
    }

    /// Run the pass for one event.
    ///
    /// The store is reset first. The only error is a store too small for the
    /// event's layout; rejected tracks and geometry misses are skipped.
    pub fn fill(&self, store: &mut CellStore, tracks: &[Track]) -> Result<FillSummary> {
        let debug_level = self.config.debug_level;
        let params = UnitParameters::init(self.geometry, self.config.grid_mode, debug_level);
        store.ensure_fits(&params.layout)?;
        store.reset();

        if debug_level > 1 {
            debug!("Number of tracks in event: {}", tracks.len());
        }

        let classifier = TrackClassifier::new(&self.config);
        let resolver = CellResolver::new(self.geometry, &params, self.config.include_dead_zones);

        let mut summary = FillSummary {
            mode: self.config.grid_mode,
            n_tracks: tracks.len(),
            ..FillSummary::default()
        };

        for (index, track) in tracks.iter().enumerate() {
            let handle = TrackRef(index);
            let accepted = match classifier.classify(track) {
                Ok(accepted) => accepted,
                Err(rejection) => {
                    trace!("Track {} rejected: {:?}", index, rejection);
                    summary.rejections.record(rejection);
                    continue;
                }
            };

            let resolution = resolver.resolve(accepted.phi, accepted.eta);
            for credit in resolution.credits() {
                self.credit(store, &mut summary.counters, credit, handle, track, &accepted);
            }

            if resolution.main.is_none() {
                summary.rejections.geometry_miss += 1;
                continue;
            }
            summary.track_classes.push((handle, accepted.class));
        }

        summary.good_tracks = summary.track_classes.len();
        summary.n_units = summary.counters.touched_total(summary.mode);
        summary.n_units_cut = summary.counters.passed_cut_total(summary.mode);

        if debug_level > 0 {
            debug!("End of tracks, good tracks: {}", summary.good_tracks);
        }
        if debug_level > 10 {
            debug!("n_units: {}", summary.n_units);
            debug!("n_units_cut: {}", summary.n_units_cut);
            debug!("Region counters: {:?}", summary.counters);
        }

        Ok(summary)
    }

    fn credit(
        &self,
        store: &mut CellStore,
        counters: &mut RegionCounters,
        credit: Credit,
        handle: TrackRef,
        track: &Track,
        accepted: &Classified,
    ) {
        let Some(deposit) = store.deposit(
            credit.unit,
            handle,
            accepted.pt,
            track.mass,
            accepted.class.signal,
            self.config.pt_min,
        ) else {
            trace!("Unit {} outside the store", credit.unit);
            return;
        };

        let count = counters.region_mut(credit.region);
        if deposit.first_touch {
            count.touched += 1;
        }
        if deposit.crossed_cut {
            count.passed_cut += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CutFlag, Momentum, SignalFlag, TrackStatus};
    use crate::error::UnitError;
    use crate::geometry::{
        Acceptance, BinParams, DeadZoneId, IndexTable, RegularGeometry,
    };
    use crate::grid::{GridLayout, GridMode, SubGridKind};
    use approx::assert_relative_eq;

    fn track(pt: f64, eta: f64, phi: f64, label: i32) -> Track {
        Track::new(
            Momentum::from_pt_eta_phi(pt, eta, phi),
            0.14,
            TrackStatus::REFITTED,
            label,
        )
    }

    fn tracker_config(pt_min: f64) -> FillConfig {
        FillConfig {
            pt_min,
            ..FillConfig::default()
        }
    }

    fn tracker_unit(geom: &RegularGeometry, phi: f64, eta: f64) -> usize {
        geom.tracker_index(phi, eta).unwrap() - 1
    }

    /// Regular geometry whose towers are missing in one φ range.
    struct HoleGeometry {
        inner: RegularGeometry,
        hole: (f64, f64),
    }

    impl DetectorGeometry for HoleGeometry {
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
            if phi >= self.hole.0 && phi <= self.hole.1 {
                None
            } else {
                self.inner.absolute_tower_id(phi, eta)
            }
        }
    }

    #[test]
    fn test_single_track_tracker_only() {
        let geom = RegularGeometry::default();
        let filler = UnitFiller::new(&geom, tracker_config(2.0));
        let mut store = filler.new_store();

        let tracks = [track(5.0, 0.2, 1.0, 42)];
        let summary = filler.fill(&mut store, &tracks).unwrap();

        let cell = store.get(tracker_unit(&geom, tracks[0].phi(), tracks[0].eta())).unwrap();
        assert_relative_eq!(cell.energy(), 5.0, epsilon = 1e-12);
        assert_eq!(cell.cut_flag(), CutFlag::AbovePtThreshold);
        assert_eq!(cell.signal_flag(), SignalFlag::Good);
        assert_eq!(cell.signal_flag_candidate(), SignalFlag::Good);
        assert_eq!(cell.track_refs(), &[TrackRef(0)]);
        assert_relative_eq!(cell.mass(), 0.14);

        assert_eq!(summary.good_tracks, 1);
        assert_eq!(summary.n_units, 1);
        assert_eq!(summary.n_units_cut, 1);
    }

    #[test]
    fn test_shared_unit_counts_once() {
        let geom = RegularGeometry::default();
        let filler = UnitFiller::new(&geom, tracker_config(2.0));
        let mut store = filler.new_store();

        let tracks = [track(1.0, 0.21, 1.0, 20_000), track(1.5, 0.22, 1.01, 20_001)];
        let summary = filler.fill(&mut store, &tracks).unwrap();

        let cell = store.get(tracker_unit(&geom, tracks[0].phi(), tracks[0].eta())).unwrap();
        assert_relative_eq!(cell.energy(), 2.5, epsilon = 1e-12);
        assert_eq!(cell.cut_flag(), CutFlag::AbovePtThreshold);
        assert_eq!(cell.signal_flag(), SignalFlag::Bad);
        assert_eq!(cell.track_refs(), &[TrackRef(0), TrackRef(1)]);

        assert_eq!(summary.n_units, 1);
        assert_eq!(summary.n_units_cut, 1);
        assert_eq!(summary.counters.tracker_only.touched, 1);
    }

    #[test]
    fn test_cut_flag_uses_unit_energy() {
        let geom = RegularGeometry::default();
        let filler = UnitFiller::new(&geom, tracker_config(2.0));
        let mut store = filler.new_store();

        let tracks = [track(1.5, 0.21, 1.0, 1), track(1.5, 0.22, 1.01, 2)];
        let summary = filler.fill(&mut store, &tracks).unwrap();

        assert!(summary.track_classes.iter().all(|(_, class)| !class.passes_pt));
        let cell = store.get(tracker_unit(&geom, tracks[0].phi(), tracks[0].eta())).unwrap();
        assert_eq!(cell.cut_flag(), CutFlag::AbovePtThreshold);
    }

    #[test]
    fn test_missing_refit_changes_nothing() {
        let geom = RegularGeometry::default();
        let filler = UnitFiller::new(&geom, tracker_config(0.5));
        let mut store = filler.new_store();

        let mut bad = track(3.0, 0.1, 2.0, 1);
        bad.status = TrackStatus::TPC_REFIT;
        let summary = filler.fill(&mut store, &[bad]).unwrap();

        assert!(store.iter_touched().next().is_none());
        assert_eq!(store.total_energy(), 0.0);
        assert_eq!(summary.n_units, 0);
        assert_eq!(summary.good_tracks, 0);
        assert_eq!(summary.rejections.missing_refit, 1);
    }

    #[test]
    fn test_energy_is_order_independent() {
        let geom = RegularGeometry::default();
        let filler = UnitFiller::new(&geom, tracker_config(1.05));

        let tracks: Vec<Track> = (0..40)
            .map(|i| {
                let phi = 0.15 * (i % 13) as f64;
                let eta = -0.8 + 0.04 * i as f64;
                track(0.3 + 0.1 * i as f64, eta, phi, i)
            })
            .collect();
        let reversed: Vec<Track> = tracks.iter().rev().copied().collect();

        let mut forward = filler.new_store();
        let mut backward = filler.new_store();
        let a = filler.fill(&mut forward, &tracks).unwrap();
        let b = filler.fill(&mut backward, &reversed).unwrap();

        for (x, y) in forward.cells().iter().zip(backward.cells()) {
            assert_relative_eq!(x.energy(), y.energy(), epsilon = 1e-9);
            assert_eq!(x.cut_flag(), y.cut_flag());
            assert_eq!(x.signal_flag(), y.signal_flag());
            assert_eq!(x.track_refs().len(), y.track_refs().len());
        }
        assert_eq!(a.n_units, b.n_units);
        assert_eq!(a.n_units_cut, b.n_units_cut);
    }

    #[test]
    fn test_touched_count_is_unique_units() {
        let geom = RegularGeometry::default();
        let filler = UnitFiller::new(&geom, tracker_config(0.0));
        let mut store = filler.new_store();

        let tracks: Vec<Track> = (0..25)
            .map(|i| track(1.0, -0.85 + 0.07 * i as f64, 0.4 * (i % 5) as f64, i))
            .collect();
        let summary = filler.fill(&mut store, &tracks).unwrap();

        let mut units: Vec<usize> = tracks
            .iter()
            .map(|t| tracker_unit(&geom, t.phi(), t.eta()))
            .collect();
        units.sort_unstable();
        units.dedup();

        assert_eq!(summary.n_units, units.len());
        assert_eq!(store.counts().touched, units.len());
        assert_eq!(store.touched_units().len(), units.len());
    }

    #[test]
    fn test_dead_zone_and_tower_both_credited() {
        let geom = RegularGeometry::default();
        let filler = UnitFiller::new(&geom, FillConfig::with_calorimeter(1.0));
        let mut store = filler.new_store();

        let tracks = [track(2.0, 0.33, 120.2f64.to_radians(), 5)];
        let (phi, eta) = (tracks[0].phi(), tracks[0].eta());
        let summary = filler.fill(&mut store, &tracks).unwrap();

        let layout = GridLayout::for_mode(&geom, GridMode::TrackerAndCalorimeter);
        let zone = SubGridKind::DeadZone(DeadZoneId(1));
        let dz_local = geom.dead_zone_index(DeadZoneId(1), phi, eta).unwrap() - 1;
        let dz_unit = layout.global_id(zone, dz_local).unwrap();
        let tower = geom.absolute_tower_id(phi, eta).unwrap();

        assert_eq!(store.get(dz_unit).unwrap().track_refs(), &[TrackRef(0)]);
        assert_eq!(store.get(tower).unwrap().track_refs(), &[TrackRef(0)]);
        assert_relative_eq!(store.get(dz_unit).unwrap().energy(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(store.get(tower).unwrap().energy(), 2.0, epsilon = 1e-12);

        assert_eq!(summary.counters.dead_zone.touched, 1);
        assert_eq!(summary.counters.calorimeter.touched, 1);
        assert_eq!(summary.n_units, 2);
        assert_eq!(summary.n_units_cut, 2);
        assert_eq!(store.touched_units(), &[dz_unit, tower]);
    }

    #[test]
    fn test_outside_calorimeter_goes_to_tracker() {
        let geom = RegularGeometry::default();
        let filler = UnitFiller::new(&geom, FillConfig::with_calorimeter(1.0));
        let mut store = filler.new_store();

        let tracks = [track(0.5, 0.77, 5.0, 3)];
        let summary = filler.fill(&mut store, &tracks).unwrap();

        let raw = geom.tracker_index(tracks[0].phi(), tracks[0].eta()).unwrap();
        let unit = geom.cell_count() - 1 + raw;
        let cell = store.get(unit).unwrap();
        assert!(cell.is_touched());
        assert_eq!(cell.cut_flag(), CutFlag::BelowPtThreshold);
        assert_eq!(summary.counters.tracker.touched, 1);
        assert_eq!(summary.counters.tracker.passed_cut, 0);
        assert_eq!(summary.n_units, 1);
        assert_eq!(summary.n_units_cut, 0);
    }

    #[test]
    fn test_tower_miss_keeps_dead_zone_credit() {
        let inner = RegularGeometry::default();
        let hole = inner.dead_zone_phi_bounds(DeadZoneId(0));
        let geom = HoleGeometry { inner, hole };
        let filler = UnitFiller::new(&geom, FillConfig::with_calorimeter(1.0));
        let mut store = filler.new_store();

        let phi = 100f64.to_radians();
        let summary = filler.fill(&mut store, &[track(3.0, 0.0, phi, 1)]).unwrap();

        assert_eq!(summary.counters.dead_zone.touched, 1);
        assert_eq!(summary.counters.calorimeter.touched, 0);
        assert_eq!(summary.good_tracks, 0);
        assert_eq!(summary.rejections.geometry_miss, 1);
        assert_eq!(store.counts().touched, 1);

        let (id, _) = store.iter_touched().next().unwrap();
        assert_eq!(
            GridLayout::for_mode(&geom, GridMode::TrackerAndCalorimeter).kind_of(id),
            Some(SubGridKind::DeadZone(DeadZoneId(0)))
        );
    }

    #[test]
    fn test_dead_zones_disabled() {
        let geom = RegularGeometry::default();
        let config = FillConfig {
            include_dead_zones: false,
            ..FillConfig::with_calorimeter(1.0)
        };
        let filler = UnitFiller::new(&geom, config);
        let mut store = filler.new_store();

        let summary = filler
            .fill(&mut store, &[track(3.0, 0.0, 140f64.to_radians(), 1)])
            .unwrap();
        assert_eq!(summary.counters.dead_zone.touched, 0);
        assert_eq!(summary.n_units, 1);
    }

    #[test]
    fn test_signal_latches_across_contributors() {
        let geom = RegularGeometry::default();
        let filler = UnitFiller::new(&geom, tracker_config(0.0));
        let mut store = filler.new_store();

        let tracks = [
            track(1.0, 0.21, 1.0, 50_000),
            track(1.0, 0.22, 1.01, 12),
            track(1.0, 0.23, 1.02, 60_000),
        ];
        filler.fill(&mut store, &tracks).unwrap();

        let cell = store.get(tracker_unit(&geom, tracks[0].phi(), tracks[0].eta())).unwrap();
        assert_eq!(cell.signal_flag(), SignalFlag::Good);
        assert_eq!(cell.signal_flag_candidate(), SignalFlag::Good);
        assert_eq!(cell.track_refs().len(), 3);
    }

    #[test]
    fn test_store_reset_between_events() {
        let geom = RegularGeometry::default();
        let filler = UnitFiller::new(&geom, tracker_config(0.0));
        let mut store = filler.new_store();

        let first = [track(4.0, 0.13, 0.5, 1)];
        filler.fill(&mut store, &first).unwrap();
        let summary = filler.fill(&mut store, &[track(1.0, -0.5, 3.0, 2)]).unwrap();

        assert_eq!(summary.n_units, 1);
        assert_eq!(store.counts().touched, 1);
        assert_relative_eq!(store.total_energy(), 1.0, epsilon = 1e-12);
        assert!(!store.get(tracker_unit(&geom, first[0].phi(), first[0].eta())).unwrap().is_touched());
    }

    #[test]
    fn test_store_too_small_is_an_error() {
        let geom = RegularGeometry::default();
        let filler = UnitFiller::new(&geom, FillConfig::with_calorimeter(1.0));
        let mut store = CellStore::new(100);

        let result = filler.fill(&mut store, &[track(1.0, 0.0, 1.0, 1)]);
        assert!(matches!(result, Err(UnitError::StoreTooSmall { len: 100, .. })));
    }

    #[test]
    fn test_zero_pt_track_before_energetic_one() {
        let geom = RegularGeometry::default();
        let filler = UnitFiller::new(&geom, tracker_config(1.0));
        let mut store = filler.new_store();

        let tracks = [
            Track::new(Momentum::new(0.0, 0.0, 0.0), 0.14, TrackStatus::REFITTED, 1),
            Track::new(Momentum::new(3.0, 0.0, 0.0), 0.14, TrackStatus::REFITTED, 2),
        ];
        let summary = filler.fill(&mut store, &tracks).unwrap();

        let unit = tracker_unit(&geom, 0.0, 0.0);
        let cell = store.get(unit).unwrap();
        assert_relative_eq!(cell.energy(), 3.0, epsilon = 1e-12);
        assert_eq!(cell.track_refs(), &[TrackRef(0), TrackRef(1)]);
        assert!(store.refs_open());
        assert_eq!(store.touched_units(), &[unit]);
        assert_eq!(summary.n_units, 1);
        assert_eq!(summary.n_units_cut, 1);
    }

    #[test]
    fn test_empty_event() {
        let geom = RegularGeometry::default();
        let filler = UnitFiller::new(&geom, tracker_config(1.0));
        let mut store = filler.new_store();

        let summary = filler.fill(&mut store, &[]).unwrap();
        assert_eq!(summary.n_tracks, 0);
        assert_eq!(summary.n_units, 0);
        assert!(!store.refs_open());
    }
}
