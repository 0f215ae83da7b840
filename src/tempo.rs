use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::Result;

/// Build the composite lookup key `lowercase(title)|lowercase(artist)`
pub fn tempo_key(title: &str, artist: &str) -> String {
    format!(
        "{}|{}",
        title.trim().to_lowercase(),
        artist.trim().to_lowercase()
    )
}

/// Anything that can tell the tempo of a (title, artist) pair
#[cfg_attr(test, mockall::automock)]
pub trait TempoProvider {
    /// Tempo in beats per minute, or `None` when unknown
    fn tempo_for(&self, title: &str, artist: &str) -> Option<f32>;
}

/// Provider that knows nothing, used when no tempo dataset is configured
pub struct NoTempo;

impl TempoProvider for NoTempo {
    fn tempo_for(&self, _title: &str, _artist: &str) -> Option<f32> {
        None
    }
}

#[derive(Debug, Deserialize)]
struct TempoEntry {
    title: String,
    artist: String,
    bpm: f32,
}

/// Tempo dataset held in memory, keyed by `tempo_key`
#[derive(Debug, Default)]
pub struct StaticTempoTable {
    entries: HashMap<String, f32>,
}

impl StaticTempoTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a JSON array of `{title, artist, bpm}` entries
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let entries: Vec<TempoEntry> = serde_json::from_str(content)?;
        let mut table = Self::new();
        for entry in entries {
            table.insert(&entry.title, &entry.artist, entry.bpm);
        }
        debug!("Loaded {} tempo entries", table.len());
        Ok(table)
    }

    /// Insert a tempo; non-positive values are ignored. Later entries win.
    pub fn insert(&mut self, title: &str, artist: &str, bpm: f32) {
        if bpm.is_nan() || bpm <= 0.0 {
            warn!("Ignoring non-positive tempo {bpm} for '{title}' by {artist}");
            return;
        }
        self.entries.insert(tempo_key(title, artist), bpm);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TempoProvider for StaticTempoTable {
    fn tempo_for(&self, title: &str, artist: &str) -> Option<f32> {
        self.entries.get(&tempo_key(title, artist)).copied()
    }
}
