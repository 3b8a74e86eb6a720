//! Per-segment clip export
//!
//! Writes one audio file per segment. WAV clips are sliced from the
//! decoded samples and written directly; compressed formats are cropped
//! from the source file by ffmpeg. A clip that fails to export is
//! logged and skipped so the remaining clips still get written.

use crate::audio::sample_range;
use crate::types::{AudioData, Segment};
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{info, warn};

/// Output clip container format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Mp3,
    Wav,
    Flac,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Mp3 => "mp3",
            ExportFormat::Wav => "wav",
            ExportFormat::Flac => "flac",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Export one clip per segment into `outdir`, named
/// `{prefix}_{NN}_{type}.{ext}`. Returns the paths written.
pub fn export_clips(
    source: &Path,
    audio: Option<&AudioData>,
    segments: &[Segment],
    outdir: &Path,
    format: ExportFormat,
    prefix: &str,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(outdir)
        .with_context(|| format!("failed to create output directory {:?}", outdir))?;

    let mut written = Vec::new();
    for (idx, segment) in segments.iter().enumerate() {
        let name = format!(
            "{}_{:02}_{}.{}",
            prefix,
            idx + 1,
            segment.kind,
            format.extension()
        );
        let path = outdir.join(name);

        let result = match (format, audio) {
            (ExportFormat::Wav, Some(audio)) => write_wav_clip(audio, segment, &path),
            _ => crop_with_ffmpeg(source, segment, &path),
        };

        match result {
            Ok(()) => {
                info!(
                    clip = %path.display(),
                    start = segment.start,
                    end = segment.end,
                    "exported clip"
                );
                written.push(path);
            }
            Err(err) => warn!(clip = %path.display(), "clip export failed: {err:#}"),
        }
    }

    info!(
        written = written.len(),
        total = segments.len(),
        "clip export finished"
    );
    Ok(written)
}

/// Write a segment's sample window as 16-bit PCM WAV
fn write_wav_clip(audio: &AudioData, segment: &Segment, path: &Path) -> Result<()> {
    let window = sample_range(audio, segment.start, segment.end);

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: audio.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec)
        .with_context(|| format!("failed to create WAV file: {}", path.display()))?;

    for &sample in window {
        let value = (sample.clamp(-1.0, 1.0) * 32767.0) as i16;
        writer
            .write_sample(value)
            .context("failed to write audio sample")?;
    }
    writer.finalize().context("failed to finalize WAV file")?;

    Ok(())
}

/// Crop the source file with ffmpeg. Stream-copies when the source
/// already matches the target container, otherwise re-encodes.
fn crop_with_ffmpeg(source: &Path, segment: &Segment, path: &Path) -> Result<()> {
    let same_container = source
        .extension()
        .and_then(|e| e.to_str())
        .zip(path.extension().and_then(|e| e.to_str()))
        .is_some_and(|(src, dst)| src.eq_ignore_ascii_case(dst));

    let mut command = Command::new("ffmpeg");
    command
        .arg("-y")
        .args(["-ss", &format!("{:.3}", segment.start)])
        .arg("-i")
        .arg(source)
        .args(["-t", &format!("{:.3}", segment.duration())]);
    if same_container {
        command.args(["-c", "copy"]);
    }
    command.arg(path);

    let output = command
        .output()
        .context("failed to run ffmpeg (is it installed and on PATH?)")?;
    if !output.status.success() {
        bail!(
            "ffmpeg exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    Ok(())
}

/// Print suggested ffmpeg crop commands without running them
pub fn print_ffmpeg_hints(source: &Path, segments: &[Segment]) {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("clip");
    let extension = source
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("mp3");

    println!("\nFFmpeg crop suggestions:");
    for (idx, segment) in segments.iter().enumerate() {
        let out = source.with_file_name(format!(
            "{}_{:02}_{}.{}",
            stem,
            idx + 1,
            segment.kind,
            extension
        ));
        println!(
            "ffmpeg -ss {:.2} -i {:?} -t {:.2} -c copy {:?}",
            segment.start,
            source,
            segment.duration(),
            out
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SegmentKind;

    fn sine_audio(seconds: f64, sample_rate: u32) -> AudioData {
        let total = (seconds * sample_rate as f64) as usize;
        let samples = (0..total)
            .map(|i| {
                let t = i as f32 / sample_rate as f32;
                (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.5
            })
            .collect();
        AudioData {
            samples,
            sample_rate,
        }
    }

    #[test]
    fn wav_export_writes_one_file_per_segment() {
        let dir = tempfile::tempdir().unwrap();
        let audio = sine_audio(2.0, 8_000);
        let segments = vec![
            Segment::new(0.0, 0.5, SegmentKind::Speech),
            Segment::new(0.5, 2.0, SegmentKind::Music),
        ];

        let written = export_clips(
            Path::new("unused.wav"),
            Some(&audio),
            &segments,
            dir.path(),
            ExportFormat::Wav,
            "test",
        )
        .unwrap();

        assert_eq!(written.len(), 2);
        assert!(written[0].ends_with("test_01_speech.wav"));
        assert!(written[1].ends_with("test_02_music.wav"));

        let reader = hound::WavReader::open(&written[0]).unwrap();
        assert_eq!(reader.spec().sample_rate, 8_000);
        assert_eq!(reader.len(), 4_000); // 0.5s at 8 kHz

        let reader = hound::WavReader::open(&written[1]).unwrap();
        assert_eq!(reader.len(), 12_000);
    }

    #[test]
    fn wav_clip_past_audio_end_is_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let audio = sine_audio(1.0, 8_000);
        let segments = vec![Segment::new(0.5, 5.0, SegmentKind::Silence)];

        let written = export_clips(
            Path::new("unused.wav"),
            Some(&audio),
            &segments,
            dir.path(),
            ExportFormat::Wav,
            "clip",
        )
        .unwrap();

        assert_eq!(written.len(), 1);
        let reader = hound::WavReader::open(&written[0]).unwrap();
        assert_eq!(reader.len(), 4_000); // only 0.5s of audio existed
    }

    #[test]
    fn format_extensions() {
        assert_eq!(ExportFormat::Mp3.extension(), "mp3");
        assert_eq!(ExportFormat::Wav.extension(), "wav");
        assert_eq!(ExportFormat::Flac.extension(), "flac");
    }
}
