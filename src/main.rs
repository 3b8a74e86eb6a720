use anyhow::{Context, Result};
use clap::Parser;
use clipline::audio;
use clipline::export::{self, ExportFormat};
use clipline::timeline;
use clipline::transcript;
use clipline::types::{Segment, SegmentKind, TimelineConfig};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Clipline - transcript-driven audio segment builder
///
/// Reads a timestamped transcript, merges speech by inter-event gaps,
/// classifies the rest of the timeline as music or silence from audio
/// energy, and optionally exports one clip per segment.
#[derive(Parser, Debug)]
#[command(name = "clipline")]
#[command(version = "0.1.0")]
#[command(about = "Build typed audio segments from a timestamped transcript", long_about = None)]
struct Args {
    /// Transcript JSON with segment-level timestamps (start, end, text)
    #[arg(value_name = "TRANSCRIPT")]
    transcript: PathBuf,

    /// Source audio file for gap classification and clip export
    #[arg(long, value_name = "PATH")]
    audio: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    output: PathBuf,

    /// Gap threshold in seconds; larger inter-event gaps split speech
    #[arg(long, default_value_t = 3.0)]
    gap: f64,

    /// Minimum interval length in seconds; shorter ones absorb forward
    #[arg(long, default_value_t = 60.0)]
    min_length: f64,

    /// Disable A-B-A bridge merging
    #[arg(long)]
    no_merge_bridges: bool,

    /// Segment type eligible as the bridge in an A-B-A merge
    #[arg(long, value_enum, default_value_t = SegmentKind::Speech)]
    bridge_type: SegmentKind,

    /// Maximum bridge duration in seconds to still merge
    #[arg(long, default_value_t = 60.0)]
    bridge_max_duration: f64,

    /// Export one audio clip per segment (requires --audio)
    #[arg(long)]
    export: bool,

    /// Clip format for export
    #[arg(long, value_enum, default_value_t = ExportFormat::Mp3)]
    export_format: ExportFormat,

    /// Filename prefix for exported clips (default: audio file stem)
    #[arg(long, value_name = "PREFIX")]
    export_prefix: Option<String>,

    /// Path for the segments JSON (default: <output>/<transcript stem>_segments.json)
    #[arg(long, value_name = "PATH")]
    segments_output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Validate CLI arguments
    fn validate(&self) -> Result<()> {
        if !self.transcript.exists() {
            anyhow::bail!("Transcript file does not exist: {:?}", self.transcript);
        }
        if !self.transcript.is_file() {
            anyhow::bail!("Transcript path is not a file: {:?}", self.transcript);
        }

        if let Some(audio) = &self.audio {
            if !audio.exists() {
                anyhow::bail!("Audio file does not exist: {:?}", audio);
            }
            if !audio.is_file() {
                anyhow::bail!("Audio path is not a file: {:?}", audio);
            }
        }

        if self.gap < 0.0 {
            anyhow::bail!("Gap threshold must be non-negative, got: {}", self.gap);
        }
        if self.min_length < 0.0 {
            anyhow::bail!("Minimum length must be non-negative, got: {}", self.min_length);
        }
        if self.bridge_max_duration < 0.0 {
            anyhow::bail!(
                "Bridge max duration must be non-negative, got: {}",
                self.bridge_max_duration
            );
        }

        if self.export && self.audio.is_none() {
            anyhow::bail!("--export requires --audio");
        }

        if self.output.exists() && !self.output.is_dir() {
            anyhow::bail!("Output path must be a directory: {:?}", self.output);
        }

        Ok(())
    }

    fn config(&self) -> TimelineConfig {
        TimelineConfig {
            gap_threshold: self.gap,
            min_length: self.min_length,
            merge_bridges: !self.no_merge_bridges,
            bridge_kind: self.bridge_type,
            max_bridge_duration: self.bridge_max_duration,
            ..TimelineConfig::default()
        }
    }

    fn segments_path(&self) -> PathBuf {
        if let Some(path) = &self.segments_output {
            return path.clone();
        }
        let stem = self
            .transcript
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("transcript");
        self.output.join(format!("{}_segments.json", stem))
    }
}

#[derive(Serialize)]
struct SegmentsFile<'a> {
    segments: &'a [Segment],
    total_segments: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    args.validate()
        .context("Failed to validate command-line arguments")?;

    println!("1. Loading transcript...");
    let events = transcript::load_transcript(&args.transcript)?;
    println!("   {} transcript events", events.len());

    let audio = match &args.audio {
        Some(path) => {
            println!("\n2. Decoding audio...");
            let audio =
                audio::decoder::decode_audio(path).context("Failed to decode input audio")?;
            println!(
                "   {} samples at {} Hz ({:.2}s)",
                audio.samples.len(),
                audio.sample_rate,
                audio.duration()
            );
            Some(audio)
        }
        None => {
            println!("\n2. No audio supplied; non-speech gaps will classify as silence");
            None
        }
    };

    println!("\n3. Building segment timeline...");
    let config = args.config();
    let segments = timeline::build_timeline(&events, audio.as_ref(), &config)
        .context("Failed to build segment timeline")?;
    println!("   {} segments", segments.len());
    for kind in [SegmentKind::Speech, SegmentKind::Music, SegmentKind::Silence] {
        let count = segments.iter().filter(|s| s.kind == kind).count();
        if count > 0 {
            println!("   - {}: {}", kind, count);
        }
    }

    let segments_path = args.segments_path();
    if let Some(parent) = segments_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {:?}", parent))?;
    }
    let json = serde_json::to_string_pretty(&SegmentsFile {
        segments: &segments,
        total_segments: segments.len(),
    })?;
    fs::write(&segments_path, json)
        .with_context(|| format!("Failed to write segments JSON to {:?}", segments_path))?;
    println!("   Wrote {:?}", segments_path);

    if args.export {
        // Validation guarantees an audio path here
        if let Some(source) = &args.audio {
            println!("\n4. Exporting clips...");
            let prefix = args.export_prefix.clone().unwrap_or_else(|| {
                source
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("segment")
                    .to_string()
            });
            let outdir = args.output.join(format!("{}_segments", prefix));
            let written = export::export_clips(
                source,
                audio.as_ref(),
                &segments,
                &outdir,
                args.export_format,
                &prefix,
            )?;
            println!("   Wrote {} clips under {:?}", written.len(), outdir);
        }
    } else if let Some(source) = &args.audio {
        export::print_ffmpeg_hints(source, &segments);
    }

    println!("\n✓ Processing complete!");

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
