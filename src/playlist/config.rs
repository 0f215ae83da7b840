use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// Tempo added to the lower bound when an open-ended range needs a single target
const UNBOUNDED_TEMPO_HEADROOM: f32 = 10.0;

/// Half-open tempo range `[min, max)`; `max: None` means no upper bound
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TempoRange {
    pub min: f32,
    pub max: Option<f32>,
}

impl TempoRange {
    pub const UNRESTRICTED: TempoRange = TempoRange { min: 0.0, max: None };

    pub fn new(min: f32, max: Option<f32>) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, bpm: f32) -> bool {
        bpm >= self.min && self.max.is_none_or(|max| bpm < max)
    }

    /// True when the range admits every tempo, including an unknown one
    pub fn is_unrestricted(&self) -> bool {
        self.min <= 0.0 && self.max.is_none()
    }

    /// Single tempo standing in for the whole range when asking for more tracks
    pub fn representative_bpm(&self) -> f32 {
        match self.max {
            Some(max) => (self.min + max) / 2.0,
            None => self.min + UNBOUNDED_TEMPO_HEADROOM,
        }
    }
}

/// Target playlist length in minutes, `[min_minutes, max_minutes)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DurationRange {
    pub min_minutes: u32,
    pub max_minutes: Option<u32>,
}

impl DurationRange {
    pub const UNRESTRICTED: DurationRange = DurationRange {
        min_minutes: 0,
        max_minutes: None,
    };

    pub fn new(min_minutes: u32, max_minutes: Option<u32>) -> Self {
        Self {
            min_minutes,
            max_minutes,
        }
    }

    pub fn min_seconds(&self) -> u32 {
        self.min_minutes.saturating_mul(60)
    }

    pub fn max_seconds(&self) -> Option<u32> {
        self.max_minutes.map(|m| m.saturating_mul(60))
    }

    /// Whether `total` seconds is still under the cap (an open range never caps)
    pub fn fits(&self, total: u32) -> bool {
        self.max_seconds().is_none_or(|max| total <= max)
    }
}

/// The bucket range tables. Kept as data so alternate schemes can be swapped in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BucketTable {
    pub low: TempoRange,
    pub medium_intensity: TempoRange,
    pub high: TempoRange,
    pub short: DurationRange,
    pub medium_distance: DurationRange,
    pub long: DurationRange,
}

impl Default for BucketTable {
    fn default() -> Self {
        Self {
            low: TempoRange::new(120.0, Some(140.0)),
            medium_intensity: TempoRange::new(140.0, Some(180.0)),
            high: TempoRange::new(180.0, None),
            short: DurationRange::new(0, Some(20)),
            medium_distance: DurationRange::new(20, Some(40)),
            long: DurationRange::new(40, None),
        }
    }
}

/// What the normalizer does with a track no tempo source knows about
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UnknownTempoPolicy {
    /// Leave the tempo unknown; such tracks never pass the intensity filter
    #[default]
    Exclude,
    /// Substitute a fixed tempo
    AssumeBpm(f32),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct NormalizerConfig {
    pub unknown_tempo: UnknownTempoPolicy,
}

/// Knobs for the selector, replacing per-call-site variants of the packing logic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub augmentation_enabled: bool,
    pub augment_fetch_limit: usize,
    /// Medium playlists stop once the total reaches `min * factor`
    pub medium_early_stop_factor: f32,
    /// Size of the last-resort selection when nothing could be packed
    pub fallback_track_count: usize,
    /// Below this many tracks the selector asks for more
    pub min_track_count: usize,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            augmentation_enabled: true,
            augment_fetch_limit: 20,
            medium_early_stop_factor: 1.2,
            fallback_track_count: 5,
            min_track_count: 3,
        }
    }
}

/// Full engine configuration, loadable from JSON. Missing fields take defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub buckets: BucketTable,
    pub normalizer: NormalizerConfig,
    pub selector: SelectorConfig,
}

impl EngineConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: EngineConfig = serde_json::from_str(&content)?;
        Ok(config)
    }
}
