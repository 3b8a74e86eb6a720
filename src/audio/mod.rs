pub mod decoder;

use crate::types::AudioData;

/// Borrow the sample window covering `[start, end)` seconds, clamped to
/// the available samples. Ranges falling entirely outside the audio
/// yield an empty slice.
pub fn sample_range(audio: &AudioData, start: f64, end: f64) -> &[f32] {
    let rate = audio.sample_rate as f64;
    let total = audio.samples.len();

    // Negative times saturate to index 0 on the cast
    let lo = ((start * rate) as usize).min(total);
    let hi = ((end * rate) as usize).min(total).max(lo);

    &audio.samples[lo..hi]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_second_audio() -> AudioData {
        AudioData {
            samples: (0..1000).map(|i| i as f32 / 1000.0).collect(),
            sample_rate: 1000,
        }
    }

    #[test]
    fn basic_range() {
        let audio = one_second_audio();
        let window = sample_range(&audio, 0.25, 0.75);
        assert_eq!(window.len(), 500);
        assert_eq!(window[0], 0.25);
    }

    #[test]
    fn range_clamped_to_available_samples() {
        let audio = one_second_audio();
        let window = sample_range(&audio, 0.5, 2.0);
        assert_eq!(window.len(), 500);
    }

    #[test]
    fn range_past_end_is_empty() {
        let audio = one_second_audio();
        assert!(sample_range(&audio, 5.0, 6.0).is_empty());
    }

    #[test]
    fn inverted_range_is_empty() {
        let audio = one_second_audio();
        assert!(sample_range(&audio, 0.8, 0.2).is_empty());
    }
}
