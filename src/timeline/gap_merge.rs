use crate::types::{Interval, TranscriptEvent};
use anyhow::{ensure, Result};

/// Merge transcript events into speech intervals wherever the gap
/// between consecutive events is within `gap_threshold` seconds.
///
/// Events are expected in ascending `start` order. Overlapping or
/// out-of-order end times are tolerated: the open interval's end only
/// ever moves forward.
pub fn merge_events_by_gap(
    events: &[TranscriptEvent],
    gap_threshold: f64,
) -> Result<Vec<Interval>> {
    ensure!(
        gap_threshold >= 0.0,
        "gap threshold must be non-negative (got {})",
        gap_threshold
    );
    for event in events {
        ensure!(
            event.start >= 0.0,
            "transcript event start must be non-negative (got {:.3})",
            event.start
        );
        ensure!(
            event.start < event.end,
            "transcript event must end after it starts (got {:.3}..{:.3})",
            event.start,
            event.end
        );
    }

    let Some(first) = events.first() else {
        return Ok(Vec::new());
    };

    let mut merged = Vec::new();
    let mut current = Interval::new(first.start, first.end);

    for event in &events[1..] {
        let gap = event.start - current.end;
        if gap <= gap_threshold {
            current.end = current.end.max(event.end);
        } else {
            merged.push(current);
            current = Interval::new(event.start, event.end);
        }
    }
    merged.push(current);

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(start: f64, end: f64) -> TranscriptEvent {
        TranscriptEvent {
            start,
            end,
            text: String::new(),
        }
    }

    #[test]
    fn empty_events_yield_empty_output() {
        let merged = merge_events_by_gap(&[], 3.0).unwrap();
        assert!(merged.is_empty());
    }

    #[test]
    fn single_event_passes_through() {
        let merged = merge_events_by_gap(&[event(0.0, 5.0)], 3.0).unwrap();
        assert_eq!(merged, vec![Interval::new(0.0, 5.0)]);
    }

    #[test]
    fn merges_small_gap_splits_large_gap() {
        let events = vec![event(0.0, 2.5), event(2.7, 5.0), event(8.5, 12.0)];
        let merged = merge_events_by_gap(&events, 3.0).unwrap();

        // 0.2s gap merges, 3.5s gap does not
        assert_eq!(
            merged,
            vec![Interval::new(0.0, 5.0), Interval::new(8.5, 12.0)]
        );
    }

    #[test]
    fn gap_equal_to_threshold_merges() {
        let events = vec![event(0.0, 2.0), event(5.0, 7.0)];
        let merged = merge_events_by_gap(&events, 3.0).unwrap();
        assert_eq!(merged, vec![Interval::new(0.0, 7.0)]);
    }

    #[test]
    fn overlapping_event_does_not_shrink_interval() {
        // Second event ends before the first; end must stay at 6.0
        let events = vec![event(0.0, 6.0), event(1.0, 4.0)];
        let merged = merge_events_by_gap(&events, 3.0).unwrap();
        assert_eq!(merged, vec![Interval::new(0.0, 6.0)]);
    }

    #[test]
    fn inverted_event_is_rejected() {
        let events = vec![event(5.0, 2.0)];
        let result = merge_events_by_gap(&events, 3.0);
        assert!(result.is_err());
    }

    #[test]
    fn negative_start_is_rejected() {
        let events = vec![event(-1.0, 2.0)];
        assert!(merge_events_by_gap(&events, 3.0).is_err());
    }

    #[test]
    fn negative_threshold_is_rejected() {
        assert!(merge_events_by_gap(&[event(0.0, 1.0)], -0.5).is_err());
    }

    #[test]
    fn merging_is_idempotent() {
        let events = vec![event(0.0, 2.5), event(2.7, 5.0), event(8.5, 12.0)];
        let merged = merge_events_by_gap(&events, 3.0).unwrap();

        // Feed the merged intervals back in as events; nothing further merges
        let as_events: Vec<TranscriptEvent> = merged
            .iter()
            .map(|interval| event(interval.start, interval.end))
            .collect();
        let remerged = merge_events_by_gap(&as_events, 3.0).unwrap();
        assert_eq!(remerged, merged);
    }
}
