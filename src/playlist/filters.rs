use super::config::TempoRange;
use crate::models::Track;

/// Track filtering functionality using static helper functions
pub struct TrackFilters;

impl TrackFilters {
    /// Check if a track's tempo lies in the range. Unknown tempo only passes
    /// an unrestricted range.
    pub fn matches_tempo_range(track: &Track, range: &TempoRange) -> bool {
        let Some(bpm) = track.tempo_bpm else {
            return range.is_unrestricted();
        };
        range.contains(bpm)
    }

    /// Keep the tracks matching the range, preserving their order
    pub fn filter_by_tempo(tracks: &[Track], range: &TempoRange) -> Vec<Track> {
        tracks
            .iter()
            .filter(|track| Self::matches_tempo_range(track, range))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AlbumArt;

    fn track(id: &str, bpm: Option<f32>) -> Track {
        Track {
            id: id.to_string(),
            title: format!("Song {id}"),
            artist: "Artist".to_string(),
            duration_seconds: 200,
            tempo_bpm: bpm,
            album_art: AlbumArt::Initial('S'),
            playback_ref: None,
        }
    }

    #[test]
    fn test_boundary_belongs_to_higher_bucket() {
        let low = TempoRange::new(120.0, Some(140.0));
        let medium = TempoRange::new(140.0, Some(180.0));
        let boundary = track("1", Some(140.0));

        assert!(!TrackFilters::matches_tempo_range(&boundary, &low));
        assert!(TrackFilters::matches_tempo_range(&boundary, &medium));
    }

    #[test]
    fn test_unknown_tempo_only_passes_unrestricted_range() {
        let unknown = track("1", None);
        assert!(!TrackFilters::matches_tempo_range(&unknown, &TempoRange::new(0.0, Some(500.0))));
        assert!(!TrackFilters::matches_tempo_range(&unknown, &TempoRange::new(120.0, None)));
        assert!(TrackFilters::matches_tempo_range(&unknown, &TempoRange::UNRESTRICTED));
    }

    #[test]
    fn test_filter_preserves_order() {
        let tracks = vec![
            track("a", Some(185.0)),
            track("b", Some(120.0)),
            track("c", Some(200.0)),
            track("d", None),
        ];

        let filtered = TrackFilters::filter_by_tempo(&tracks, &TempoRange::new(180.0, None));
        let ids: Vec<&str> = filtered.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }
}
