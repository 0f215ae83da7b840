use std::collections::HashSet;
use tracing::{debug, info, warn};

use super::buckets::{DistanceBucket, IntensityBucket};
use super::config::{BucketTable, DurationRange, SelectorConfig, TempoRange};
use super::filters::TrackFilters;
use super::metadata::{PlaylistTrack, SelectionReason};
use crate::error::Result;
use crate::models::Track;

/// Supplies extra candidates for a target tempo, at most `limit` of them
pub type AugmentFn<'a> = dyn Fn(f32, usize) -> Result<Vec<Track>> + 'a;

/// Picks a duration-bounded, tempo-matched subset of a catalog
pub struct PlaylistSelector {
    buckets: BucketTable,
    config: SelectorConfig,
}

impl PlaylistSelector {
    pub fn new(buckets: BucketTable, config: SelectorConfig) -> Self {
        Self { buckets, config }
    }

    /// Select tracks for a run. The caller's slice is never reordered.
    pub fn select(
        &self,
        tracks: &[Track],
        distance: DistanceBucket,
        intensity: IntensityBucket,
        augment: Option<&AugmentFn<'_>>,
    ) -> Vec<Track> {
        self.select_with_reasons(tracks, distance, intensity, augment)
            .into_iter()
            .map(|selected| selected.track)
            .collect()
    }

    /// Same as `select`, keeping track of why each track was chosen
    pub fn select_with_reasons(
        &self,
        tracks: &[Track],
        distance: DistanceBucket,
        intensity: IntensityBucket,
        augment: Option<&AugmentFn<'_>>,
    ) -> Vec<PlaylistTrack> {
        if tracks.is_empty() {
            return Vec::new();
        }

        let tempo_range = self.buckets.tempo_range_for(intensity);
        let duration_range = self.buckets.duration_range_for(distance);

        let filtered = TrackFilters::filter_by_tempo(tracks, &tempo_range);
        debug!(
            "{} of {} tracks match {} intensity ({:?})",
            filtered.len(),
            tracks.len(),
            intensity,
            tempo_range
        );

        let mut selection = match distance {
            DistanceBucket::Short => Self::pack_in_order(&filtered, &duration_range),
            DistanceBucket::Medium => {
                let stop_at = duration_range.min_seconds() as f32 * self.config.medium_early_stop_factor;
                Self::pack_by_duration(&filtered, &duration_range, Some(stop_at))
            }
            DistanceBucket::Long | DistanceBucket::Unrecognized => {
                Self::pack_by_duration(&filtered, &duration_range, None)
            }
        };

        if selection.is_empty() {
            selection = self.fallback(&filtered, tracks, distance);
        }

        if let Some(augment) = augment.filter(|_| self.config.augmentation_enabled) {
            self.augment(&mut selection, tracks, &tempo_range, &duration_range, augment);
        }

        Self::order_by_tempo(&mut selection);

        info!(
            "Selected {} tracks ({}s) for {} distance / {} intensity",
            selection.len(),
            total_seconds(&selection),
            distance,
            intensity
        );
        selection
    }

    /// Short runs: keep catalog order and stop at the first track that would overflow
    fn pack_in_order(filtered: &[Track], range: &DurationRange) -> Vec<PlaylistTrack> {
        let mut total: u32 = 0;
        let mut selected = Vec::new();

        for track in filtered {
            let next = total.saturating_add(track.duration_seconds);
            if !range.fits(next) {
                break;
            }
            total = next;
            selected.push(PlaylistTrack::new(track.clone(), SelectionReason::Packed));
        }
        selected
    }

    /// Medium and long runs: shortest tracks first, then top up in catalog order
    /// if the minimum was not reached.
    fn pack_by_duration(
        filtered: &[Track],
        range: &DurationRange,
        stop_at: Option<f32>,
    ) -> Vec<PlaylistTrack> {
        let min = range.min_seconds();
        let mut by_duration = filtered.to_vec();
        by_duration.sort_by_key(|track| track.duration_seconds);

        let mut total: u32 = 0;
        let mut selected = Vec::new();

        for track in by_duration {
            let next = total.saturating_add(track.duration_seconds);
            if !range.fits(next) {
                break;
            }
            total = next;
            selected.push(PlaylistTrack::new(track, SelectionReason::Packed));

            if let Some(stop_at) = stop_at {
                if total >= min && total as f32 >= stop_at {
                    debug!("Stopping early at {total}s (threshold {stop_at}s)");
                    break;
                }
            }
        }

        // Safety net: after the ascending pass nothing left over can fit
        if total < min {
            let chosen: HashSet<String> = selected.iter().map(|s| s.track.id.clone()).collect();
            for track in filtered {
                if total >= min {
                    break;
                }
                if chosen.contains(&track.id) {
                    continue;
                }
                let next = total.saturating_add(track.duration_seconds);
                if range.fits(next) {
                    total = next;
                    selected.push(PlaylistTrack::new(track.clone(), SelectionReason::Backfill));
                }
            }
        }

        selected
    }

    /// Never hand back an empty playlist while any candidate exists. When no
    /// track passed the tempo filter the whole catalog is the pool.
    fn fallback(
        &self,
        filtered: &[Track],
        catalog: &[Track],
        distance: DistanceBucket,
    ) -> Vec<PlaylistTrack> {
        let pool = if filtered.is_empty() { catalog } else { filtered };
        let count = match distance {
            DistanceBucket::Short => 1,
            _ => self.config.fallback_track_count,
        };

        info!(
            "Nothing could be packed, falling back to the first {} of {} tracks",
            count.min(pool.len()),
            pool.len()
        );

        pool.iter()
            .take(count)
            .cloned()
            .map(|track| PlaylistTrack::new(track, SelectionReason::Fallback))
            .collect()
    }

    /// Ask the secondary catalog for more when the selection is too short or too small.
    /// Extra tracks obey the same duration cap as packing. Failures are logged
    /// and the selection is kept as is.
    fn augment(
        &self,
        selection: &mut Vec<PlaylistTrack>,
        catalog: &[Track],
        tempo_range: &TempoRange,
        duration_range: &DurationRange,
        augment: &AugmentFn<'_>,
    ) {
        let mut total = total_seconds(selection);
        if total >= duration_range.min_seconds() && selection.len() >= self.config.min_track_count {
            return;
        }

        let target_bpm = tempo_range.representative_bpm();
        debug!(
            "Selection has {} tracks ({}s), asking for up to {} more at {} bpm",
            selection.len(),
            total,
            self.config.augment_fetch_limit,
            target_bpm
        );

        let extra = match augment(target_bpm, self.config.augment_fetch_limit) {
            Ok(extra) => extra,
            Err(e) => {
                warn!("Augmentation failed, keeping {} tracks: {e}", selection.len());
                return;
            }
        };

        let mut known_ids: HashSet<String> = catalog
            .iter()
            .map(|t| t.id.clone())
            .chain(selection.iter().map(|s| s.track.id.clone()))
            .collect();

        let before = selection.len();
        for track in extra {
            if !TrackFilters::matches_tempo_range(&track, tempo_range) {
                continue;
            }
            let next = total.saturating_add(track.duration_seconds);
            if !duration_range.fits(next) {
                continue;
            }
            if !known_ids.insert(track.id.clone()) {
                continue;
            }
            total = next;
            selection.push(PlaylistTrack::new(track, SelectionReason::Augmented));
        }
        debug!("Augmentation added {} tracks", selection.len() - before);
    }

    /// Fastest first; equal tempos keep their relative order
    fn order_by_tempo(selection: &mut [PlaylistTrack]) {
        selection.sort_by(|a, b| b.track.tempo_or_zero().total_cmp(&a.track.tempo_or_zero()));
    }
}

fn total_seconds(selection: &[PlaylistTrack]) -> u32 {
    selection
        .iter()
        .fold(0u32, |acc, s| acc.saturating_add(s.track.duration_seconds))
}
