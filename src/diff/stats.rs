use super::types::{Segment, SegmentKind};
use serde::Serialize;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiffStats {
    pub added_count: usize,
    pub removed_count: usize,
}

impl DiffStats {
    /// Count inserted and removed characters
    pub fn from_segments(segments: &[Segment]) -> Self {
        let mut stats = Self::default();
        for segment in segments {
            match segment.kind {
                SegmentKind::Insert => stats.added_count += segment.text.chars().count(),
                SegmentKind::Remove => stats.removed_count += segment.text.chars().count(),
                SegmentKind::Equal => {}
            }
        }
        stats
    }
}

/// Check if segments contain meaningful changes (non-whitespace inserted or removed text)
pub fn has_changes(segments: &[Segment]) -> bool {
    segments.iter().any(|segment| {
        segment.kind != SegmentKind::Equal && !segment.text.trim().is_empty()
    })
}
