use super::cleanup;
use super::types::{Segment, SegmentKind};
use similar::{Algorithm, ChangeTag, TextDiff};
use std::time::Duration;

/// The library that actually computes edit scripts.
///
/// Implementations must return segments that rebuild both inputs: removed
/// plus unchanged runs give `original`, inserted plus unchanged give
/// `modified`. The cleanup hooks must keep that property.
pub trait DiffEngine {
    /// Compute the edit script, giving up on optimality once `timeout` passes
    fn compute(&self, original: &str, modified: &str, timeout: Option<Duration>) -> Vec<Segment>;

    fn cleanup_semantic(&self, segments: Vec<Segment>) -> Vec<Segment> {
        cleanup::semantic(segments)
    }

    fn cleanup_efficiency(&self, segments: Vec<Segment>, edit_cost: u32) -> Vec<Segment> {
        cleanup::efficiency(segments, edit_cost)
    }
}

/// Character level diff backed by `similar`
#[derive(Debug, Clone, Copy)]
pub struct SimilarEngine {
    algorithm: Algorithm,
}

impl Default for SimilarEngine {
    fn default() -> Self {
        Self::new(Algorithm::Myers)
    }
}

impl SimilarEngine {
    pub fn new(algorithm: Algorithm) -> Self {
        Self { algorithm }
    }
}

impl DiffEngine for SimilarEngine {
    fn compute(&self, original: &str, modified: &str, timeout: Option<Duration>) -> Vec<Segment> {
        let mut config = TextDiff::configure();
        config.algorithm(self.algorithm);
        if let Some(timeout) = timeout {
            config.timeout(timeout);
        }
        let diff = config.diff_chars(original, modified);

        let mut segments: Vec<Segment> = Vec::new();
        for change in diff.iter_all_changes() {
            let kind = match change.tag() {
                ChangeTag::Delete => SegmentKind::Remove,
                ChangeTag::Insert => SegmentKind::Insert,
                ChangeTag::Equal => SegmentKind::Equal,
            };
            // One change per char, coalesce them into runs
            match segments.last_mut() {
                Some(last) if last.kind == kind => last.text.push_str(change.value()),
                _ => segments.push(Segment::new(kind, change.value())),
            }
        }

        cleanup::merge(segments)
    }
}
