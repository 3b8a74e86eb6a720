use crate::types::{Segment, SegmentKind};

/// Collapse A-B-A runs where both outer segments share a type and the
/// middle segment is a bridge of `bridge_kind` no longer than
/// `max_bridge_duration` seconds.
///
/// Single pass, non-recursive: a merge result is never re-examined as
/// the A or B of a later pattern within the same call. Callers wanting
/// cascading collapses re-invoke this until the output length stops
/// changing.
pub fn merge_bridges(
    segments: &[Segment],
    bridge_kind: SegmentKind,
    max_bridge_duration: f64,
) -> Vec<Segment> {
    if segments.len() < 3 {
        return segments.to_vec();
    }

    let mut merged = Vec::with_capacity(segments.len());
    let mut i = 0;
    while i < segments.len() {
        if let [outer_left, bridge, outer_right, ..] = &segments[i..] {
            if outer_left.kind == outer_right.kind
                && bridge.kind == bridge_kind
                && bridge.duration() <= max_bridge_duration
            {
                merged.push(Segment::new(
                    outer_left.start,
                    outer_right.end,
                    outer_left.kind,
                ));
                i += 3;
                continue;
            }
        }
        merged.push(segments[i]);
        i += 1;
    }

    merged
}
