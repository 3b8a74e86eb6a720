use crate::types::AudioData;
use anyhow::{Context, Result};
use std::path::Path;
use symphonia::core::audio::{AudioBuffer, AudioBufferRef, Signal};
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::conv::IntoSample;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::sample::Sample;
use tracing::warn;

/// Decode an audio file to raw PCM samples (mono, f32, [-1.0, 1.0])
pub fn decode_audio<P: AsRef<Path>>(path: P) -> Result<AudioData> {
    let path = path.as_ref();

    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open audio file: {}", path.display()))?;
    let stream = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(extension) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(extension);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            stream,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .context("failed to probe audio format")?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .context("no audio tracks found in file")?;
    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .context("sample rate not specified in audio file")?;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .context("failed to create decoder")?;

    let mut samples = Vec::new();
    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(err))
                if err.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(err) => return Err(err).context("failed to read packet"),
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => append_mono(&decoded, &mut samples),
            // Corrupt packets are recoverable; keep what decodes
            Err(SymphoniaError::DecodeError(err)) => {
                warn!("skipping undecodable packet: {err}");
            }
            Err(err) => return Err(err).context("failed to decode audio packet"),
        }
    }

    Ok(AudioData {
        samples,
        sample_rate,
    })
}

/// Downmix a decoded buffer to mono f32 and append it
fn append_mono(decoded: &AudioBufferRef<'_>, out: &mut Vec<f32>) {
    match decoded {
        AudioBufferRef::U8(buf) => mix_channels(buf.as_ref(), out),
        AudioBufferRef::U16(buf) => mix_channels(buf.as_ref(), out),
        AudioBufferRef::U24(buf) => mix_channels(buf.as_ref(), out),
        AudioBufferRef::U32(buf) => mix_channels(buf.as_ref(), out),
        AudioBufferRef::S8(buf) => mix_channels(buf.as_ref(), out),
        AudioBufferRef::S16(buf) => mix_channels(buf.as_ref(), out),
        AudioBufferRef::S24(buf) => mix_channels(buf.as_ref(), out),
        AudioBufferRef::S32(buf) => mix_channels(buf.as_ref(), out),
        AudioBufferRef::F32(buf) => mix_channels(buf.as_ref(), out),
        AudioBufferRef::F64(buf) => mix_channels(buf.as_ref(), out),
    }
}

fn mix_channels<S>(buffer: &AudioBuffer<S>, out: &mut Vec<f32>)
where
    S: Sample + IntoSample<f32>,
{
    let channels = buffer.spec().channels.count();
    let frames = buffer.frames();
    out.reserve(frames);

    if channels == 1 {
        out.extend(buffer.chan(0).iter().map(|&s| IntoSample::<f32>::into_sample(s)));
        return;
    }

    for frame in 0..frames {
        let mut sum = 0.0f32;
        for channel in 0..channels {
            sum += IntoSample::<f32>::into_sample(buffer.chan(channel)[frame]);
        }
        out.push(sum / channels as f32);
    }
}
