use crate::types::Interval;
use anyhow::{ensure, Result};

/// Compute the complement of a set of intervals within `[0, total_duration)`.
///
/// Input intervals are sorted defensively before sweeping. Intervals
/// reaching past `total_duration` simply leave no trailing gap.
pub fn invert_intervals(intervals: &[Interval], total_duration: f64) -> Result<Vec<Interval>> {
    ensure!(
        total_duration > 0.0,
        "total duration must be positive (got {})",
        total_duration
    );

    let mut sorted = intervals.to_vec();
    sorted.sort_by(|a, b| a.start.total_cmp(&b.start));

    let mut gaps = Vec::new();
    let mut cursor = 0.0;
    for interval in &sorted {
        if interval.start > cursor {
            gaps.push(Interval::new(cursor, interval.start));
        }
        cursor = cursor.max(interval.end);
    }
    if cursor < total_duration {
        gaps.push(Interval::new(cursor, total_duration));
    }

    Ok(gaps)
}
