//! Clipline - transcript-driven audio segment builder
//!
//! Converts a timestamped transcript into a gap-free sequence of typed
//! time segments (speech, music, silence) suitable for clip extraction.
//! Speech timing comes from the transcript; the remaining timeline is
//! classified by a median-energy statistic sampled from the audio.

pub mod audio;
pub mod export;
pub mod timeline;
pub mod transcript;
pub mod types;
