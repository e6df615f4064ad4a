//! Diff orchestration: run the engine, apply cleanup passes and time both.

pub mod cleanup;
mod engine;
mod stats;
mod timing;
mod types;

pub use engine::{DiffEngine, SimilarEngine};
pub use stats::{DiffStats, has_changes};
pub use timing::{Timing, measure};
pub use types::{
    Computation, DiffOptions, Segment, SegmentKind, modified_text, original_text,
};

use tracing::debug;

/// Compute the edit script between `original` and `modified`.
///
/// Semantic cleanup runs first when enabled, then efficiency cleanup when its
/// edit cost is non-zero. Both count towards `Timing::cleanup`, which stays
/// exactly zero when neither runs. Hitting the timeout is not an error, the
/// engine simply returns a less minimal script.
pub fn compute<E: DiffEngine + ?Sized>(
    engine: &E,
    original: &str,
    modified: &str,
    options: &DiffOptions,
) -> Computation {
    let (segments, main) = measure(|| engine.compute(original, modified, options.time_budget()));

    let (segments, cleanup) = if options.runs_cleanup() {
        measure(|| {
            let mut segments = segments;
            if options.cleanup_semantic {
                segments = engine.cleanup_semantic(segments);
            }
            if options.cleanup_efficiency > 0 {
                segments = engine.cleanup_efficiency(segments, options.cleanup_efficiency);
            }
            segments
        })
    } else {
        (segments, 0.0)
    };

    let timing = Timing::new(main, cleanup);
    debug!(
        segments = segments.len(),
        main_ms = timing.main,
        cleanup_ms = timing.cleanup,
        total_ms = timing.total,
        "Computed diff"
    );

    Computation { segments, timing }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::time::Duration;

    /// Engine that records which passes ran
    #[derive(Default)]
    struct RecordingEngine {
        inner: SimilarEngine,
        semantic_calls: Cell<usize>,
        efficiency_costs: Cell<Option<u32>>,
        timeout: Cell<Option<Duration>>,
    }

    impl DiffEngine for RecordingEngine {
        fn compute(&self, original: &str, modified: &str, timeout: Option<Duration>) -> Vec<Segment> {
            self.timeout.set(timeout);
            self.inner.compute(original, modified, timeout)
        }

        fn cleanup_semantic(&self, segments: Vec<Segment>) -> Vec<Segment> {
            // Efficiency must not have run yet
            assert!(self.efficiency_costs.get().is_none());
            self.semantic_calls.set(self.semantic_calls.get() + 1);
            segments
        }

        fn cleanup_efficiency(&self, segments: Vec<Segment>, edit_cost: u32) -> Vec<Segment> {
            self.efficiency_costs.set(Some(edit_cost));
            segments
        }
    }

    fn options(cleanup_semantic: bool, cleanup_efficiency: u32) -> DiffOptions {
        DiffOptions {
            cleanup_semantic,
            cleanup_efficiency,
            ..DiffOptions::default()
        }
    }

    #[test]
    fn no_cleanup_records_zero_cleanup_time() {
        let computation = compute(&SimilarEngine::default(), "a", "b", &options(false, 0));
        assert_eq!(computation.timing.cleanup, 0.0);
        assert_eq!(computation.timing.total, computation.timing.main);
        assert!(computation.timing.main >= 0.0);
    }

    #[test]
    fn timing_fields_are_consistent() {
        let computation = compute(&SimilarEngine::default(), "a", "b", &options(true, 4));
        let timing = computation.timing;
        assert!(timing.main >= 0.0);
        assert!(timing.cleanup >= 0.0);
        assert!((timing.total - (timing.main + timing.cleanup)).abs() < 1e-9);
    }

    #[test]
    fn semantic_runs_before_efficiency() {
        let engine = RecordingEngine::default();
        compute(&engine, "abc", "abd", &options(true, 6));
        assert_eq!(engine.semantic_calls.get(), 1);
        assert_eq!(engine.efficiency_costs.get(), Some(6));
    }

    #[test]
    fn passes_are_independent() {
        let engine = RecordingEngine::default();
        compute(&engine, "abc", "abd", &options(false, 4));
        assert_eq!(engine.semantic_calls.get(), 0);
        assert_eq!(engine.efficiency_costs.get(), Some(4));

        let engine = RecordingEngine::default();
        compute(&engine, "abc", "abd", &options(true, 0));
        assert_eq!(engine.semantic_calls.get(), 1);
        assert_eq!(engine.efficiency_costs.get(), None);
    }

    #[test]
    fn timeout_is_forwarded_to_the_engine() {
        let engine = RecordingEngine::default();
        let mut opts = DiffOptions::default();
        opts.timeout = 2.5;
        compute(&engine, "a", "b", &opts);
        assert_eq!(engine.timeout.get(), Some(Duration::from_millis(2500)));

        opts.timeout = 0.0;
        compute(&engine, "a", "b", &opts);
        assert_eq!(engine.timeout.get(), None);
    }

    #[test]
    fn same_inputs_give_same_segments() {
        let engine = SimilarEngine::default();
        let opts = options(true, 4);
        let first = compute(&engine, "The cat sat.", "The dog sat down.", &opts);
        let second = compute(&engine, "The cat sat.", "The dog sat down.", &opts);
        assert_eq!(first.segments, second.segments);
    }

    #[test]
    fn boundary_values_do_not_panic() {
        let engine = SimilarEngine::default();
        for timeout in [0.0, -1.0, f64::NAN, f64::MAX] {
            let opts = DiffOptions {
                timeout,
                cleanup_semantic: true,
                cleanup_efficiency: u32::MAX,
            };
            let computation = compute(&engine, "", "", &opts);
            assert!(computation.segments.is_empty());
        }
    }

    #[test]
    fn semantic_cleanup_makes_output_readable() {
        let engine = SimilarEngine::default();
        let raw = compute(&engine, "mouse", "sofas", &options(false, 0));
        let cleaned = compute(&engine, "mouse", "sofas", &options(true, 0));
        assert!(cleaned.segments.len() < raw.segments.len());
        assert_eq!(
            cleaned.segments,
            vec![Segment::remove("mouse"), Segment::insert("sofas")]
        );
    }
}
