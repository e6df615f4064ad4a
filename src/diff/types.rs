use super::timing::Timing;
use crate::constant::{DEFAULT_CLEANUP_EFFICIENCY, DEFAULT_TIMEOUT_SECS};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Remove,
    Insert,
    Equal,
}

/// A contiguous run of text tagged with how it changed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub kind: SegmentKind,
    pub text: String,
}

impl Segment {
    pub fn new(kind: SegmentKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn remove(text: impl Into<String>) -> Self {
        Self::new(SegmentKind::Remove, text)
    }

    pub fn insert(text: impl Into<String>) -> Self {
        Self::new(SegmentKind::Insert, text)
    }

    pub fn equal(text: impl Into<String>) -> Self {
        Self::new(SegmentKind::Equal, text)
    }
}

/// Rebuild the original text (removed and unchanged runs)
pub fn original_text(segments: &[Segment]) -> String {
    segments
        .iter()
        .filter(|s| s.kind != SegmentKind::Insert)
        .map(|s| s.text.as_str())
        .collect()
}

/// Rebuild the modified text (inserted and unchanged runs)
pub fn modified_text(segments: &[Segment]) -> String {
    segments
        .iter()
        .filter(|s| s.kind != SegmentKind::Remove)
        .map(|s| s.text.as_str())
        .collect()
}

/// Options that drive a diff computation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiffOptions {
    /// Time budget for the engine in seconds (0 = unlimited)
    #[serde(default = "default_timeout")]
    pub timeout: f64,

    /// Run the semantic (human readability) cleanup pass
    #[serde(default)]
    pub cleanup_semantic: bool,

    /// Edit cost for the efficiency cleanup pass (0 = disabled)
    #[serde(default = "default_cleanup_efficiency")]
    pub cleanup_efficiency: u32,
}

fn default_timeout() -> f64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_cleanup_efficiency() -> u32 {
    DEFAULT_CLEANUP_EFFICIENCY
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT_SECS,
            cleanup_semantic: false,
            cleanup_efficiency: DEFAULT_CLEANUP_EFFICIENCY,
        }
    }
}

impl DiffOptions {
    /// The engine time budget, `None` when unlimited.
    ///
    /// Zero, negative, NaN and out-of-range values all mean unlimited.
    pub fn time_budget(&self) -> Option<Duration> {
        if self.timeout > 0.0 {
            Duration::try_from_secs_f64(self.timeout).ok()
        } else {
            None
        }
    }

    pub fn runs_cleanup(&self) -> bool {
        self.cleanup_semantic || self.cleanup_efficiency > 0
    }
}

/// Result of one orchestrated diff run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Computation {
    pub segments: Vec<Segment>,
    pub timing: Timing,
}
