use std::collections::HashSet;
use tracing::debug;

use super::config::{NormalizerConfig, UnknownTempoPolicy};
use crate::models::{AlbumArt, RawTrack, StaticTrack, StreamingTrack, Track};
use crate::tempo::TempoProvider;

pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Maps raw records from any supported source into uniform `Track`s
pub struct Normalizer {
    provider: Box<dyn TempoProvider>,
    config: NormalizerConfig,
}

impl Normalizer {
    pub fn new(provider: Box<dyn TempoProvider>, config: NormalizerConfig) -> Self {
        Self { provider, config }
    }

    /// Normalize a batch. Records without a usable id are dropped, and so are
    /// repeats of an id already seen in this batch (first one wins).
    pub fn normalize(&self, raw_tracks: &[RawTrack]) -> Vec<Track> {
        let mut seen_ids = HashSet::new();
        let mut tracks = Vec::with_capacity(raw_tracks.len());

        for raw in raw_tracks {
            let Some(track) = self.normalize_one(raw) else {
                continue;
            };
            if !seen_ids.insert(track.id.clone()) {
                debug!("Dropping duplicate track id '{}'", track.id);
                continue;
            }
            tracks.push(track);
        }

        debug!(
            "Normalized {} of {} raw tracks",
            tracks.len(),
            raw_tracks.len()
        );
        tracks
    }

    pub fn normalize_one(&self, raw: &RawTrack) -> Option<Track> {
        match raw {
            RawTrack::Streaming(track) => self.map_streaming(track),
            RawTrack::Static(track) => self.map_static(track),
        }
    }

    fn map_streaming(&self, raw: &StreamingTrack) -> Option<Track> {
        let Some(id) = usable_id(raw.id.as_deref()) else {
            debug!("Dropping '{}': no usable id", raw.title);
            return None;
        };

        let artist = raw
            .artists
            .first()
            .map(|a| a.name.clone())
            .unwrap_or_else(|| UNKNOWN_ARTIST.to_string());

        let album_art = raw
            .album
            .as_ref()
            .and_then(|album| album.images.first())
            .map(|image| AlbumArt::Url(image.url.clone()))
            .unwrap_or_else(|| generated_art(&raw.title));

        let playback_ref = raw.uri.clone().or_else(|| {
            raw.external_urls
                .as_ref()
                .and_then(|urls| urls.spotify.clone())
        });

        let duration_seconds = u32::try_from(raw.duration_ms / 1000).unwrap_or(u32::MAX);
        let tempo_bpm = self.resolve_tempo(None, &raw.title, &artist);

        Some(Track {
            id,
            title: raw.title.clone(),
            artist,
            duration_seconds,
            tempo_bpm,
            album_art,
            playback_ref,
        })
    }

    fn map_static(&self, raw: &StaticTrack) -> Option<Track> {
        let Some(id) = usable_id(raw.id.as_deref()) else {
            debug!("Dropping '{}': no usable id", raw.title);
            return None;
        };

        let artist = if raw.artist.trim().is_empty() {
            UNKNOWN_ARTIST.to_string()
        } else {
            raw.artist.clone()
        };

        let duration_seconds = parse_time(&raw.time).unwrap_or_else(|| {
            debug!("Unparseable time '{}' for '{}', using 0", raw.time, raw.title);
            0
        });

        let album_art = raw
            .album_art
            .as_ref()
            .filter(|art| !art.trim().is_empty())
            .map(|art| match art.chars().count() {
                1 => AlbumArt::Initial(art.chars().next().unwrap_or('?')),
                _ => AlbumArt::Url(art.clone()),
            })
            .unwrap_or_else(|| generated_art(&raw.title));

        let tempo_bpm = self.resolve_tempo(raw.bpm, &raw.title, &artist);

        Some(Track {
            id,
            title: raw.title.clone(),
            artist,
            duration_seconds,
            tempo_bpm,
            album_art,
            playback_ref: None,
        })
    }

    /// A record's own tempo wins, then the provider, then the unknown-tempo policy
    fn resolve_tempo(&self, embedded: Option<f32>, title: &str, artist: &str) -> Option<f32> {
        embedded
            .filter(|bpm| is_valid_tempo(*bpm))
            .or_else(|| {
                self.provider
                    .tempo_for(title, artist)
                    .filter(|bpm| is_valid_tempo(*bpm))
            })
            .or(match self.config.unknown_tempo {
                UnknownTempoPolicy::Exclude => None,
                UnknownTempoPolicy::AssumeBpm(bpm) => Some(bpm),
            })
    }
}

fn is_valid_tempo(bpm: f32) -> bool {
    bpm.is_finite() && bpm > 0.0
}

fn usable_id(id: Option<&str>) -> Option<String> {
    id.map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

fn generated_art(title: &str) -> AlbumArt {
    let initial = title
        .trim()
        .chars()
        .next()
        .and_then(|c| c.to_uppercase().next())
        .unwrap_or('?');
    AlbumArt::Initial(initial)
}

/// Parse "M:SS" or "H:MM:SS" into whole seconds
pub fn parse_time(time: &str) -> Option<u32> {
    let parts: Vec<&str> = time.trim().split(':').collect();
    if !(2..=3).contains(&parts.len()) {
        return None;
    }

    let mut total: u32 = 0;
    for (i, part) in parts.iter().enumerate() {
        let value: u32 = part.trim().parse().ok()?;
        // Seconds and (in H:MM:SS) minutes must stay below 60
        if i > 0 && value >= 60 {
            return None;
        }
        total = total.checked_mul(60)?.checked_add(value)?;
    }
    Some(total)
}
