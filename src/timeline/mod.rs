//! Segment timeline construction
//!
//! Turns transcript events into a gap-free, typed timeline in four
//! stages plus an optional bridge collapse, each a pure transform over
//! the previous stage's output:
//!
//! events → speech intervals → length-filtered intervals → gaps →
//! classified gaps → merged timeline → (optional) bridge collapse

pub mod bridge;
pub mod classify;
pub mod gap_merge;
pub mod invert;
pub mod min_length;


pub use bridge::merge_bridges;
pub use classify::classify_gaps;
pub use gap_merge::merge_events_by_gap;
pub use invert::invert_intervals;
pub use min_length::enforce_min_length;

use crate::types::{AudioData, Segment, SegmentKind, TimelineConfig, TranscriptEvent};
use anyhow::Result;
use tracing::debug;

/// Build the final typed timeline from transcript events.
///
/// Total duration comes from the audio handle when present, otherwise
/// from the end of the last merged speech interval. With no audio, every
/// gap classifies as silence. An empty transcript with audio yields a
/// single classified gap over the whole timeline; with neither, the
/// timeline is empty.
pub fn build_timeline(
    events: &[TranscriptEvent],
    audio: Option<&AudioData>,
    config: &TimelineConfig,
) -> Result<Vec<Segment>> {
    config.validate()?;

    let speech = merge_events_by_gap(events, config.gap_threshold)?;
    let speech = enforce_min_length(&speech, config.min_length);
    debug!(intervals = speech.len(), "merged speech intervals");

    let total_duration = match audio {
        Some(audio) => audio.duration(),
        None => speech.last().map(|interval| interval.end).unwrap_or(0.0),
    };
    if total_duration <= 0.0 {
        return Ok(Vec::new());
    }

    let gaps = invert_intervals(&speech, total_duration)?;
    let classified = classify_gaps(&gaps, audio, &config.energy);
    debug!(gaps = classified.len(), "classified non-speech gaps");

    let mut segments: Vec<Segment> = speech
        .iter()
        .map(|interval| Segment::new(interval.start, interval.end, SegmentKind::Speech))
        .chain(classified)
        .collect();
    segments.sort_by(|a, b| a.start.total_cmp(&b.start));

    if config.merge_bridges {
        let collapsed = merge_bridges(&segments, config.bridge_kind, config.max_bridge_duration);
        debug!(
            before = segments.len(),
            after = collapsed.len(),
            "bridge merge pass"
        );
        segments = collapsed;
    }

    Ok(segments)
}
