use crate::audio::sample_range;
use crate::types::{AudioData, EnergyConfig, Interval, Segment, SegmentKind};
use tracing::debug;

/// Label each gap as music or silence from the median of per-chunk
/// mean-squared amplitudes within the gap's sample window.
///
/// The median (rather than the mean) keeps isolated transient spikes
/// from tipping a quiet gap into music. Gaps whose window holds no
/// usable samples, including the case of no audio handle at all, fall
/// back to silence instead of failing the pipeline; each gap is
/// classified independently of the others.
pub fn classify_gaps(
    gaps: &[Interval],
    audio: Option<&AudioData>,
    config: &EnergyConfig,
) -> Vec<Segment> {
    let Some(audio) = audio else {
        return gaps
            .iter()
            .map(|gap| Segment::new(gap.start, gap.end, SegmentKind::Silence))
            .collect();
    };

    // Defensive normalization: decoded sources are usually already in
    // [-1, 1], but the statistic must not depend on it
    let peak = audio
        .samples
        .iter()
        .fold(0.0f32, |max, sample| max.max(sample.abs()))
        .max(f32::EPSILON);

    gaps.iter()
        .map(|gap| {
            let window = sample_range(audio, gap.start, gap.end);
            let kind = classify_window(window, audio.sample_rate, peak, config);
            debug!(start = gap.start, end = gap.end, kind = %kind, "classified gap");
            Segment::new(gap.start, gap.end, kind)
        })
        .collect()
}

fn classify_window(
    window: &[f32],
    sample_rate: u32,
    peak: f32,
    config: &EnergyConfig,
) -> SegmentKind {
    if window.is_empty() {
        return SegmentKind::Silence;
    }

    let chunk_len = (((config.chunk_ms / 1000.0) * sample_rate as f64) as usize).max(1);
    let mut energies: Vec<f64> = window
        .chunks(chunk_len)
        .map(|chunk| mean_square(chunk, peak))
        .collect();

    if median(&mut energies) > config.threshold {
        SegmentKind::Music
    } else {
        SegmentKind::Silence
    }
}

fn mean_square(chunk: &[f32], peak: f32) -> f64 {
    let sum: f64 = chunk
        .iter()
        .map(|sample| {
            let normalized = (sample / peak) as f64;
            normalized * normalized
        })
        .sum();
    sum / chunk.len() as f64
}

/// Median with even-length lists averaging the two middle values
fn median(values: &mut [f64]) -> f64 {
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}
