//! Visual text diffs.
//!
//! [`DiffMatchPatch`] computes a character diff with `similar`, optionally
//! cleans it up for readability, times the work and renders the segments to
//! HTML with per-kind custom renderers or CSS classes. The `diff-view`
//! binary wraps the same component in an `eframe` playground.

pub mod app;
pub mod component;
pub mod config;
pub mod constant;
pub mod diff;
pub mod export;
pub mod render;
pub mod style;
pub mod ui;

pub use component::DiffMatchPatch;
pub use diff::{DiffOptions, Segment, SegmentKind, Timing};
pub use render::{RendererClasses, Renderers};
