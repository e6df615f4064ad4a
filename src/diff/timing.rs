use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Wall-clock cost of a diff run, all fields in milliseconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Timing {
    /// Raw engine computation
    pub main: f64,
    /// Semantic and efficiency cleanup passes together
    pub cleanup: f64,
    pub total: f64,
}

impl Timing {
    pub fn new(main: f64, cleanup: f64) -> Self {
        Self {
            main,
            cleanup,
            total: main + cleanup,
        }
    }
}

/// Run `f` and return its output with the elapsed time in milliseconds.
///
/// Uses the monotonic clock so system clock adjustments never show up as
/// negative or inflated durations.
pub fn measure<T>(f: impl FnOnce() -> T) -> (T, f64) {
    let start = Instant::now();
    let output = f();
    (output, start.elapsed().as_secs_f64() * 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn total_is_sum_of_phases() {
        let timing = Timing::new(1.25, 0.5);
        assert_eq!(timing.total, 1.75);
    }

    #[test]
    fn measure_reports_elapsed_milliseconds() {
        let (value, elapsed) = measure(|| {
            thread::sleep(Duration::from_millis(20));
            42
        });
        assert_eq!(value, 42);
        assert!(elapsed >= 20.0, "Expected at least 20ms, got {}", elapsed);
    }
}
