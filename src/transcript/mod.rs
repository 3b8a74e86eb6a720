//! Transcript input parsing
//!
//! Loads the JSON produced by the external transcription engine. Both
//! the wrapped form `{"segments": [...]}` and a bare array of events are
//! accepted, with `start`/`start_time` and `end`/`end_time` field
//! spellings.

use crate::types::TranscriptEvent;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTranscript {
    Wrapped { segments: Vec<TranscriptEvent> },
    Bare(Vec<TranscriptEvent>),
}

/// Load transcript events from a JSON file
pub fn load_transcript<P: AsRef<Path>>(path: P) -> Result<Vec<TranscriptEvent>> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read transcript file {:?}", path))?;
    let events = parse_transcript(&data)
        .with_context(|| format!("failed to parse transcript file {:?}", path))?;
    debug!(events = events.len(), "loaded transcript");
    Ok(events)
}

/// Parse transcript events from a JSON string
pub fn parse_transcript(raw: &str) -> Result<Vec<TranscriptEvent>> {
    let transcript: RawTranscript =
        serde_json::from_str(raw).context("unrecognized transcript JSON format")?;
    let events = match transcript {
        RawTranscript::Wrapped { segments } => segments,
        RawTranscript::Bare(events) => events,
    };
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wrapped_form() {
        let events = parse_transcript(
            r#"{"segments": [{"start": 0.0, "end": 5.2, "text": "hello"}], "language": "en"}"#,
        )
        .unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].start, 0.0);
        assert_eq!(events[0].end, 5.2);
        assert_eq!(events[0].text, "hello");
    }

    #[test]
    fn parses_bare_array_form() {
        let events =
            parse_transcript(r#"[{"start": 1.0, "end": 2.0, "text": "a"}]"#).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].start, 1.0);
    }

    #[test]
    fn parses_time_suffixed_field_names() {
        let events = parse_transcript(
            r#"{"segments": [{"start_time": 3.0, "end_time": 4.5, "text": "b"}]}"#,
        )
        .unwrap();
        assert_eq!(events[0].start, 3.0);
        assert_eq!(events[0].end, 4.5);
    }

    #[test]
    fn missing_text_defaults_to_empty() {
        let events = parse_transcript(r#"[{"start": 0.0, "end": 1.0}]"#).unwrap();
        assert_eq!(events[0].text, "");
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(parse_transcript("not json").is_err());
        assert!(parse_transcript(r#"{"other": 1}"#).is_err());
    }
}
