use std::fmt;

use super::config::{BucketTable, DurationRange, TempoRange};

/// How hard the runner wants to go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntensityBucket {
    Low,
    Medium,
    High,
    /// Any label we do not recognise; means "no preference"
    Unrecognized,
}

/// How far the runner plans to go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DistanceBucket {
    Short,
    Medium,
    Long,
    Unrecognized,
}

impl IntensityBucket {
    /// Parse a user-facing label. Never fails.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "low" | "easy" => Self::Low,
            "medium" | "moderate" => Self::Medium,
            "high" | "intense" => Self::High,
            _ => Self::Unrecognized,
        }
    }

    /// Label used in playlist titles
    pub fn title_label(&self) -> &'static str {
        match self {
            Self::Low => "EASY",
            Self::Medium => "MODERATE",
            Self::High => "INTENSE",
            Self::Unrecognized => "RUN",
        }
    }
}

impl DistanceBucket {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "short" => Self::Short,
            "medium" => Self::Medium,
            "long" => Self::Long,
            _ => Self::Unrecognized,
        }
    }

    pub fn title_label(&self) -> &'static str {
        match self {
            Self::Short => "SHORT",
            Self::Medium => "MEDIUM",
            Self::Long => "LONG",
            Self::Unrecognized => "RUN",
        }
    }
}

impl fmt::Display for IntensityBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Unrecognized => "unrecognized",
        };
        f.write_str(label)
    }
}

impl fmt::Display for DistanceBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
            Self::Unrecognized => "unrecognized",
        };
        f.write_str(label)
    }
}

impl BucketTable {
    /// Tempo range for an intensity; unrecognized intensities are not filtered
    pub fn tempo_range_for(&self, intensity: IntensityBucket) -> TempoRange {
        match intensity {
            IntensityBucket::Low => self.low,
            IntensityBucket::Medium => self.medium_intensity,
            IntensityBucket::High => self.high,
            IntensityBucket::Unrecognized => TempoRange::UNRESTRICTED,
        }
    }

    /// Target playlist length for a distance; unrecognized distances are not capped
    pub fn duration_range_for(&self, distance: DistanceBucket) -> DurationRange {
        match distance {
            DistanceBucket::Short => self.short,
            DistanceBucket::Medium => self.medium_distance,
            DistanceBucket::Long => self.long,
            DistanceBucket::Unrecognized => DurationRange::UNRESTRICTED,
        }
    }
}
