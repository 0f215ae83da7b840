use std::collections::HashSet;
use std::fmt;

use crate::models::Track;

/// Why a track ended up in the playlist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionReason {
    /// Picked by the duration-constrained packing pass
    Packed,
    /// Added by the second pass that tops up an under-length playlist
    Backfill,
    /// Last-resort pick when packing produced nothing
    Fallback,
    /// Came from the secondary catalog
    Augmented,
}

impl fmt::Display for SelectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Packed => "packed",
            Self::Backfill => "backfill",
            Self::Fallback => "fallback",
            Self::Augmented => "augmented",
        };
        f.write_str(label)
    }
}

/// A track in a playlist along with how it was selected
#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistTrack {
    pub track: Track,
    pub reason: SelectionReason,
}

impl PlaylistTrack {
    pub fn new(track: Track, reason: SelectionReason) -> Self {
        Self { track, reason }
    }
}

/// Represents a generated playlist. Built fresh per request and never mutated afterwards.
#[derive(Debug)]
pub struct Playlist {
    pub title: String,
    pub artist_summary: String,
    pub tracks: Vec<PlaylistTrack>,
    pub metadata: PlaylistMetadata,
}

impl Playlist {
    pub fn total_duration_seconds(&self) -> u32 {
        self.metadata.total_duration
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

/// Metadata about the playlist composition
#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistMetadata {
    pub total_duration: u32, // in seconds
    pub total_tracks: usize,
    pub average_bpm: f32, // over tracks with a known tempo
    pub bpm_range: Option<(f32, f32)>,
    pub artist_count: usize,
}

impl PlaylistMetadata {
    pub fn from_tracks(tracks: &[Track]) -> Self {
        let total_duration = tracks
            .iter()
            .fold(0u32, |acc, t| acc.saturating_add(t.duration_seconds));

        let bpms: Vec<f32> = tracks.iter().filter_map(|t| t.tempo_bpm).collect();
        let average_bpm = if bpms.is_empty() {
            0.0
        } else {
            bpms.iter().sum::<f32>() / bpms.len() as f32
        };
        let bpm_range = bpms.iter().fold(None, |range: Option<(f32, f32)>, &bpm| {
            Some(match range {
                None => (bpm, bpm),
                Some((lo, hi)) => (lo.min(bpm), hi.max(bpm)),
            })
        });

        let artist_count = tracks
            .iter()
            .map(|t| t.artist.as_str())
            .collect::<HashSet<_>>()
            .len();

        Self {
            total_duration,
            total_tracks: tracks.len(),
            average_bpm,
            bpm_range,
            artist_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AlbumArt;
    use approx::assert_relative_eq;

    fn track(id: &str, artist: &str, seconds: u32, bpm: Option<f32>) -> Track {
        Track {
            id: id.to_string(),
            title: id.to_string(),
            artist: artist.to_string(),
            duration_seconds: seconds,
            tempo_bpm: bpm,
            album_art: AlbumArt::Initial('T'),
            playback_ref: None,
        }
    }

    #[test]
    fn test_metadata_for_empty_playlist() {
        let metadata = PlaylistMetadata::from_tracks(&[]);
        assert_eq!(metadata.total_duration, 0);
        assert_eq!(metadata.total_tracks, 0);
        assert_eq!(metadata.bpm_range, None);
        assert_eq!(metadata.artist_count, 0);
    }

    #[test]
    fn test_metadata_ignores_unknown_tempo_in_average() {
        let tracks = vec![
            track("1", "A", 200, Some(150.0)),
            track("2", "B", 180, Some(171.0)),
            track("3", "A", 220, None),
        ];

        let metadata = PlaylistMetadata::from_tracks(&tracks);
        assert_eq!(metadata.total_duration, 600);
        assert_eq!(metadata.total_tracks, 3);
        assert_relative_eq!(metadata.average_bpm, 160.5);
        assert_eq!(metadata.bpm_range, Some((150.0, 171.0)));
        assert_eq!(metadata.artist_count, 2);
    }

    #[test]
    fn test_total_duration_saturates() {
        let tracks = vec![track("1", "A", u32::MAX, Some(150.0)), track("2", "B", 10, None)];
        let metadata = PlaylistMetadata::from_tracks(&tracks);
        assert_eq!(metadata.total_duration, u32::MAX);
        assert_eq!(metadata.total_tracks, 2);
    }
}
