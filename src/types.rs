//! Core types for the clipline segmentation pipeline

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw audio data representation (mono, f32 samples)
#[derive(Debug, Clone)]
pub struct AudioData {
    /// Audio samples, normalized to [-1.0, 1.0]
    pub samples: Vec<f32>,
    /// Sample rate in Hz (e.g., 44100)
    pub sample_rate: u32,
}

impl AudioData {
    /// Total duration in seconds
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// One recognized speech span from the external transcription engine
///
/// Field aliases accept both the `start`/`end` and `start_time`/`end_time`
/// spellings found in transcription tool output.
#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptEvent {
    #[serde(alias = "start_time")]
    pub start: f64,
    #[serde(alias = "end_time")]
    pub end: f64,
    #[serde(default)]
    pub text: String,
}

/// A bare temporal span, used for merged speech intervals and gaps
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub start: f64, // seconds
    pub end: f64,   // seconds
}

impl Interval {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Segment classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Speech,
    Music,
    Silence,
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SegmentKind::Speech => "speech",
            SegmentKind::Music => "music",
            SegmentKind::Silence => "silence",
        };
        f.write_str(name)
    }
}

/// A typed span of the timeline; the final output unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: f64, // seconds
    pub end: f64,   // seconds
    #[serde(rename = "type")]
    pub kind: SegmentKind,
}

impl Segment {
    pub fn new(start: f64, end: f64, kind: SegmentKind) -> Self {
        Self { start, end, kind }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Configuration for timeline construction
#[derive(Debug, Clone, Copy)]
pub struct TimelineConfig {
    /// Maximum inter-event gap (seconds) merged into one speech interval
    pub gap_threshold: f64,
    /// Intervals shorter than this (seconds) are absorbed forward
    pub min_length: f64,
    /// Enables the A-B-A bridge collapse pass
    pub merge_bridges: bool,
    /// Segment type eligible as the bridge in an A-B-A pattern
    pub bridge_kind: SegmentKind,
    /// Upper bound (seconds) on bridge duration to still merge
    pub max_bridge_duration: f64,
    /// Energy classification tuning
    pub energy: EnergyConfig,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            gap_threshold: 3.0,
            min_length: 60.0,
            merge_bridges: true,
            bridge_kind: SegmentKind::Speech,
            max_bridge_duration: 60.0,
            energy: EnergyConfig::default(),
        }
    }
}

impl TimelineConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.gap_threshold >= 0.0,
            "gap threshold must be non-negative (got {})",
            self.gap_threshold
        );
        ensure!(
            self.min_length >= 0.0,
            "minimum length must be non-negative (got {})",
            self.min_length
        );
        ensure!(
            self.max_bridge_duration >= 0.0,
            "max bridge duration must be non-negative (got {})",
            self.max_bridge_duration
        );
        self.energy.validate()
    }
}

/// Energy classification tuning; passed into the classifier explicitly
/// rather than read from a module constant, but not exposed on the CLI
#[derive(Debug, Clone, Copy)]
pub struct EnergyConfig {
    /// Median-energy decision threshold between music and silence
    pub threshold: f64,
    /// Analysis chunk size in milliseconds
    pub chunk_ms: f64,
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            threshold: 1e-4,
            chunk_ms: 50.0,
        }
    }
}

impl EnergyConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.threshold >= 0.0,
            "energy threshold must be non-negative (got {})",
            self.threshold
        );
        ensure!(
            self.chunk_ms > 0.0,
            "energy chunk size must be positive (got {})",
            self.chunk_ms
        );
        Ok(())
    }
}
