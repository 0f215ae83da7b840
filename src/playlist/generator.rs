use tracing::debug;

use super::buckets::{DistanceBucket, IntensityBucket};
use super::naming::PlaylistNaming;
use super::normalizer::Normalizer;
use super::selector::{AugmentFn, PlaylistSelector};
use super::{EngineConfig, Playlist, PlaylistMetadata};
use crate::catalog::{AugmentSource, Catalog};
use crate::error::Result;
use crate::models::{RawTrack, Track};
use crate::tempo::TempoProvider;

/// Main playlist generator
pub struct PlaylistGenerator {
    normalizer: Normalizer,
    selector: PlaylistSelector,
    augment_source: Option<Box<dyn AugmentSource>>,
}

impl PlaylistGenerator {
    pub fn new(config: EngineConfig, provider: Box<dyn TempoProvider>) -> Self {
        Self {
            normalizer: Normalizer::new(provider, config.normalizer),
            selector: PlaylistSelector::new(config.buckets, config.selector),
            augment_source: None,
        }
    }

    /// Attach a secondary catalog used when the primary one cannot fill the run
    pub fn with_augment_source(mut self, source: Box<dyn AugmentSource>) -> Self {
        self.augment_source = Some(source);
        self
    }

    /// Generate a playlist from the catalog for the given distance and intensity labels
    pub fn generate(&self, catalog: &Catalog, distance: &str, intensity: &str) -> Playlist {
        self.generate_from_raw(
            catalog.tracks(),
            DistanceBucket::from_label(distance),
            IntensityBucket::from_label(intensity),
        )
    }

    pub fn generate_from_raw(
        &self,
        raw_tracks: &[RawTrack],
        distance: DistanceBucket,
        intensity: IntensityBucket,
    ) -> Playlist {
        let tracks = self.normalizer.normalize(raw_tracks);
        debug!(
            "Generating {} / {} playlist from {} tracks",
            distance,
            intensity,
            tracks.len()
        );

        let augment = self.augment_source.as_deref().map(|source| {
            move |target_bpm: f32, limit: usize| -> Result<Vec<Track>> {
                let raw = source.fetch_more_by_tempo_target(target_bpm, limit)?;
                Ok(self.normalizer.normalize(&raw))
            }
        });

        let selected = self.selector.select_with_reasons(
            &tracks,
            distance,
            intensity,
            augment.as_ref().map(|f| f as &AugmentFn<'_>),
        );

        let plain: Vec<Track> = selected.iter().map(|s| s.track.clone()).collect();
        let (title, artist_summary) = PlaylistNaming::format(distance, intensity, &plain);

        Playlist {
            title,
            artist_summary,
            metadata: PlaylistMetadata::from_tracks(&plain),
            tracks: selected,
        }
    }
}
