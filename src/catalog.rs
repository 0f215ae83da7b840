use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

use crate::error::Result;
use crate::models::RawTrack;

/// Secondary source of candidate tracks, asked when the primary catalog falls short
#[cfg_attr(test, mockall::automock)]
pub trait AugmentSource {
    fn fetch_more_by_tempo_target(&self, target_bpm: f32, limit: usize) -> Result<Vec<RawTrack>>;
}

/// Read-only primary catalog, loaded once and handed to the generator
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tracks: Vec<RawTrack>,
}

impl Catalog {
    pub fn new(tracks: Vec<RawTrack>) -> Self {
        Self { tracks }
    }

    /// Load a JSON array of raw tracks in either supported shape
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let tracks: Vec<RawTrack> = serde_json::from_str(&content)?;
        debug!("Loaded catalog with {} tracks", tracks.len());
        Ok(Self::new(tracks))
    }

    pub fn tracks(&self) -> &[RawTrack] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

/// Hand-picked lists keyed by the tempo they were curated for
#[derive(Debug, Clone, Default)]
pub struct CuratedCatalog {
    lists: BTreeMap<u32, Vec<RawTrack>>,
}

impl CuratedCatalog {
    pub fn new(lists: BTreeMap<u32, Vec<RawTrack>>) -> Self {
        Self { lists }
    }

    /// Load a JSON object such as `{"130": [...], "160": [...]}`
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let lists: BTreeMap<u32, Vec<RawTrack>> = serde_json::from_str(&content)?;
        debug!("Loaded {} curated tempo lists", lists.len());
        Ok(Self::new(lists))
    }

    /// The curated tempo closest to `target_bpm`; ties go to the slower list
    pub fn nearest_target(&self, target_bpm: f32) -> Option<u32> {
        self.lists
            .keys()
            .copied()
            .min_by(|a, b| {
                let da = (*a as f32 - target_bpm).abs();
                let db = (*b as f32 - target_bpm).abs();
                da.total_cmp(&db)
            })
    }
}

impl AugmentSource for CuratedCatalog {
    fn fetch_more_by_tempo_target(&self, target_bpm: f32, limit: usize) -> Result<Vec<RawTrack>> {
        let Some(target) = self.nearest_target(target_bpm) else {
            return Ok(Vec::new());
        };
        let list = self.lists.get(&target).map(Vec::as_slice).unwrap_or_default();
        debug!(
            "Curated list for {} bpm has {} tracks (requested {} bpm)",
            target,
            list.len(),
            target_bpm
        );
        Ok(list.iter().take(limit).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StaticTrack;
    use std::io::Write;

    fn raw(id: &str) -> RawTrack {
        RawTrack::Static(StaticTrack {
            id: Some(id.to_string()),
            title: format!("Song {id}"),
            artist: "Artist".to_string(),
            bpm: None,
            time: "3:00".to_string(),
            album_art: None,
        })
    }

    fn ids(tracks: &[RawTrack]) -> Vec<String> {
        tracks
            .iter()
            .map(|t| match t {
                RawTrack::Static(s) => s.id.clone().unwrap_or_default(),
                RawTrack::Streaming(s) => s.id.clone().unwrap_or_default(),
            })
            .collect()
    }

    fn curated() -> CuratedCatalog {
        let mut lists = BTreeMap::new();
        lists.insert(130, vec![raw("slow1"), raw("slow2")]);
        lists.insert(160, vec![raw("mid1"), raw("mid2"), raw("mid3")]);
        lists.insert(190, vec![raw("fast1")]);
        CuratedCatalog::new(lists)
    }

    #[test]
    fn test_nearest_target() {
        let catalog = curated();
        assert_eq!(catalog.nearest_target(128.0), Some(130));
        assert_eq!(catalog.nearest_target(170.0), Some(160));
        assert_eq!(catalog.nearest_target(175.0), Some(160));
        assert_eq!(catalog.nearest_target(250.0), Some(190));
        assert_eq!(CuratedCatalog::default().nearest_target(150.0), None);
    }

    #[test]
    fn test_fetch_respects_limit() {
        let tracks = curated().fetch_more_by_tempo_target(160.0, 2).unwrap();
        assert_eq!(ids(&tracks), vec!["mid1", "mid2"]);
    }

    #[test]
    fn test_empty_curated_catalog_returns_nothing() {
        let tracks = CuratedCatalog::default().fetch_more_by_tempo_target(160.0, 10).unwrap();
        assert!(tracks.is_empty());
    }

    #[test]
    fn test_load_catalog_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"id": "1", "title": "A", "artist": "X", "bpm": 150, "time": "3:00"}},
                {{"id": "2", "name": "B", "artists": [{{"name": "Y"}}], "duration_ms": 200000}}
            ]"#
        )
        .unwrap();

        let catalog = Catalog::load_from_file(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(matches!(catalog.tracks()[0], RawTrack::Static(_)));
        assert!(matches!(catalog.tracks()[1], RawTrack::Streaming(_)));
    }

    #[test]
    fn test_load_curated_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"185": [{{"id": "f", "title": "Fast", "artist": "Z", "bpm": 185, "time": "2:30"}}]}}"#
        )
        .unwrap();

        let curated = CuratedCatalog::load_from_file(file.path()).unwrap();
        assert_eq!(curated.nearest_target(100.0), Some(185));
    }
}
