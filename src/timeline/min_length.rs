use crate::types::Interval;

/// Absorb intervals shorter than `min_length` into the interval that
/// follows them. The absorbed interval's start carries forward, so a run
/// of short intervals accumulates until the combined span reaches the
/// minimum.
///
/// A trailing interval below the minimum has no neighbor to absorb into
/// and is emitted as-is, so the last interval of the output may still be
/// shorter than `min_length`.
pub fn enforce_min_length(intervals: &[Interval], min_length: f64) -> Vec<Interval> {
    let mut enforced = Vec::with_capacity(intervals.len());
    let mut carried_start: Option<f64> = None;

    for (idx, interval) in intervals.iter().enumerate() {
        let start = carried_start.take().unwrap_or(interval.start);
        let candidate = Interval::new(start, interval.end);
        let is_last = idx + 1 == intervals.len();

        if candidate.duration() < min_length && !is_last {
            carried_start = Some(start);
        } else {
            enforced.push(candidate);
        }
    }

    enforced
}
