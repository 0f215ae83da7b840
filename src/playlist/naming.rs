use super::buckets::{DistanceBucket, IntensityBucket};
use crate::models::Track;

const SUMMARY_ARTIST_LIMIT: usize = 4;

/// Playlist naming utilities
pub struct PlaylistNaming;

impl PlaylistNaming {
    /// "{INTENSITY} {DISTANCE} MIX", e.g. "INTENSE SHORT MIX"
    pub fn generate_title(distance: DistanceBucket, intensity: IntensityBucket) -> String {
        format!(
            "{} {} MIX",
            intensity.title_label(),
            distance.title_label()
        )
    }

    /// Distinct artists in playlist order, first four named
    pub fn artist_summary(tracks: &[Track]) -> String {
        if tracks.is_empty() {
            return "No songs available".to_string();
        }

        let mut artists: Vec<&str> = Vec::new();
        for track in tracks {
            if !artists.contains(&track.artist.as_str()) {
                artists.push(&track.artist);
            }
        }

        let named = artists
            .iter()
            .take(SUMMARY_ARTIST_LIMIT)
            .copied()
            .collect::<Vec<_>>()
            .join(", ");

        if artists.len() > SUMMARY_ARTIST_LIMIT {
            format!("{named}, and more")
        } else {
            named
        }
    }

    /// Title and artist summary together
    pub fn format(
        distance: DistanceBucket,
        intensity: IntensityBucket,
        tracks: &[Track],
    ) -> (String, String) {
        (
            Self::generate_title(distance, intensity),
            Self::artist_summary(tracks),
        )
    }
}

/// Seconds as "M:SS"
pub fn format_duration(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AlbumArt;

    fn by(artist: &str) -> Track {
        Track {
            id: artist.to_string(),
            title: "Song".to_string(),
            artist: artist.to_string(),
            duration_seconds: 180,
            tempo_bpm: Some(150.0),
            album_art: AlbumArt::Initial('S'),
            playback_ref: None,
        }
    }

    #[test]
    fn test_titles() {
        assert_eq!(
            PlaylistNaming::generate_title(DistanceBucket::Short, IntensityBucket::High),
            "INTENSE SHORT MIX"
        );
        assert_eq!(
            PlaylistNaming::generate_title(DistanceBucket::Long, IntensityBucket::Low),
            "EASY LONG MIX"
        );
        assert_eq!(
            PlaylistNaming::generate_title(DistanceBucket::Unrecognized, IntensityBucket::Medium),
            "MODERATE RUN MIX"
        );
    }

    #[test]
    fn test_summary_for_empty_playlist() {
        assert_eq!(PlaylistNaming::artist_summary(&[]), "No songs available");
    }

    #[test]
    fn test_summary_deduplicates_in_order() {
        let tracks = vec![by("Queen"), by("ABBA"), by("Queen"), by("Daft Punk")];
        assert_eq!(PlaylistNaming::artist_summary(&tracks), "Queen, ABBA, Daft Punk");
    }

    #[test]
    fn test_summary_exactly_four_artists() {
        let tracks = vec![by("A"), by("B"), by("C"), by("D"), by("A")];
        assert_eq!(PlaylistNaming::artist_summary(&tracks), "A, B, C, D");
    }

    #[test]
    fn test_summary_truncates_after_four() {
        let tracks = vec![by("A"), by("B"), by("C"), by("D"), by("E")];
        assert_eq!(PlaylistNaming::artist_summary(&tracks), "A, B, C, D, and more");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(65), "1:05");
        assert_eq!(format_duration(3600), "60:00");
    }
}
