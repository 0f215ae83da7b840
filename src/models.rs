use serde::{Deserialize, Deserializer, Serialize};

/// A track record as delivered by one of the supported sources, before normalization
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTrack {
    Streaming(StreamingTrack),
    Static(StaticTrack),
}

/// Track shape returned by the music platform Web API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamingTrack {
    pub id: Option<String>,
    #[serde(alias = "name")]
    pub title: String,
    pub artists: Vec<ArtistRef>,
    pub duration_ms: u64,
    pub album: Option<AlbumRef>,
    pub uri: Option<String>,
    pub external_urls: Option<ExternalUrls>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistRef {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumRef {
    pub name: Option<String>,
    #[serde(default)]
    pub images: Vec<ImageRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRef {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

/// Track shape used by bundled static running lists
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticTrack {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    pub title: String,
    pub artist: String,
    pub bpm: Option<f32>,
    pub time: String, // "M:SS" or "H:MM:SS"
    #[serde(rename = "albumArt")]
    pub album_art: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IdValue {
    Text(String),
    Number(u64),
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<IdValue>::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        IdValue::Text(text) => text,
        IdValue::Number(number) => number.to_string(),
    }))
}

/// Display-only album artwork reference
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AlbumArt {
    Url(String),
    /// Generated tag shown when a source has no artwork
    Initial(char),
}

/// Uniform track produced by the normalizer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub duration_seconds: u32,
    pub tempo_bpm: Option<f32>,
    pub album_art: AlbumArt,
    /// Opaque handle passed untouched to the playback collaborator
    pub playback_ref: Option<String>,
}

impl Track {
    /// Tempo used for ordering; unknown tempo sorts as zero
    pub fn tempo_or_zero(&self) -> f32 {
        self.tempo_bpm.unwrap_or(0.0)
    }
}

/// Response structure for the track search endpoint
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub tracks: Option<TrackPage>,
}

#[derive(Debug, Deserialize)]
pub struct TrackPage {
    pub items: Vec<StreamingTrack>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_streaming_shape() {
        let json = r#"{
            "id": "abc",
            "name": "Lose Yourself",
            "artists": [{"name": "Eminem"}, {"name": "Someone Else"}],
            "duration_ms": 326000,
            "album": {"name": "8 Mile", "images": [{"url": "https://img/1.jpg"}]},
            "uri": "spotify:track:abc"
        }"#;

        let raw: RawTrack = serde_json::from_str(json).unwrap();
        match raw {
            RawTrack::Streaming(track) => {
                assert_eq!(track.title, "Lose Yourself");
                assert_eq!(track.artists.len(), 2);
                assert_eq!(track.duration_ms, 326000);
                assert_eq!(track.uri.as_deref(), Some("spotify:track:abc"));
            }
            RawTrack::Static(_) => panic!("expected streaming shape"),
        }
    }

    #[test]
    fn test_parses_static_shape_with_numeric_id() {
        let json = r#"{"id": 7, "title": "Stronger", "artist": "Kanye West", "bpm": 104, "time": "5:12", "albumArt": "S"}"#;

        let raw: RawTrack = serde_json::from_str(json).unwrap();
        match raw {
            RawTrack::Static(track) => {
                assert_eq!(track.id.as_deref(), Some("7"));
                assert_eq!(track.bpm, Some(104.0));
                assert_eq!(track.time, "5:12");
                assert_eq!(track.album_art.as_deref(), Some("S"));
            }
            RawTrack::Streaming(_) => panic!("expected static shape"),
        }
    }

    #[test]
    fn test_missing_id_still_parses() {
        let json = r#"{"title": "No Id", "artists": [], "duration_ms": 1000}"#;
        let raw: RawTrack = serde_json::from_str(json).unwrap();
        assert!(matches!(raw, RawTrack::Streaming(StreamingTrack { id: None, .. })));
    }

    #[test]
    fn test_unknown_tempo_orders_as_zero() {
        let track = Track {
            id: "1".to_string(),
            title: "Quiet".to_string(),
            artist: "Nobody".to_string(),
            duration_seconds: 100,
            tempo_bpm: None,
            album_art: AlbumArt::Initial('Q'),
            playback_ref: None,
        };
        assert_eq!(track.tempo_or_zero(), 0.0);
    }
}
