//! Per-kind rendering configuration shared by the presentation targets.

mod html;

pub use html::{render_segment, render_segments};

use crate::diff::SegmentKind;
use maud::Markup;
use serde::{Deserialize, Serialize};
use std::fmt;

pub type SegmentRenderer = Box<dyn Fn(&str) -> Markup>;
pub type LineBreakRenderer = Box<dyn Fn() -> Markup>;

/// Custom render functions, one optional slot per segment kind.
///
/// A kind with a renderer is rendered entirely by it: no container, no class
/// and no default styling is added around its output.
#[derive(Default)]
pub struct Renderers {
    pub remove: Option<SegmentRenderer>,
    pub insert: Option<SegmentRenderer>,
    pub equal: Option<SegmentRenderer>,
    pub line_break: Option<LineBreakRenderer>,
}

impl Renderers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remove(mut self, render: impl Fn(&str) -> Markup + 'static) -> Self {
        self.remove = Some(Box::new(render));
        self
    }

    pub fn insert(mut self, render: impl Fn(&str) -> Markup + 'static) -> Self {
        self.insert = Some(Box::new(render));
        self
    }

    pub fn equal(mut self, render: impl Fn(&str) -> Markup + 'static) -> Self {
        self.equal = Some(Box::new(render));
        self
    }

    pub fn line_break(mut self, render: impl Fn() -> Markup + 'static) -> Self {
        self.line_break = Some(Box::new(render));
        self
    }

    pub fn for_kind(&self, kind: SegmentKind) -> Option<&SegmentRenderer> {
        match kind {
            SegmentKind::Remove => self.remove.as_ref(),
            SegmentKind::Insert => self.insert.as_ref(),
            SegmentKind::Equal => self.equal.as_ref(),
        }
    }
}

impl fmt::Debug for Renderers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderers")
            .field("remove", &self.remove.is_some())
            .field("insert", &self.insert.is_some())
            .field("equal", &self.equal.is_some())
            .field("line_break", &self.line_break.is_some())
            .finish()
    }
}

/// CSS classes per segment kind.
///
/// Only consulted for kinds without a custom renderer; kinds left empty fall
/// back to the built-in inline style.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RendererClasses {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insert: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equal: Option<String>,
}

impl RendererClasses {
    pub fn new(
        remove: impl Into<String>,
        insert: impl Into<String>,
        equal: impl Into<String>,
    ) -> Self {
        Self {
            remove: Some(remove.into()),
            insert: Some(insert.into()),
            equal: Some(equal.into()),
        }
    }

    pub fn for_kind(&self, kind: SegmentKind) -> Option<&str> {
        match kind {
            SegmentKind::Remove => self.remove.as_deref(),
            SegmentKind::Insert => self.insert.as_deref(),
            SegmentKind::Equal => self.equal.as_deref(),
        }
    }
}

/// A unit of segment text as seen by a renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Piece<'a> {
    Text(&'a str),
    LineBreak,
}

/// Split segment text at newlines. Empty lines yield no `Text` piece, so a
/// lone `"\n"` becomes a single `LineBreak`.
pub fn pieces(text: &str) -> impl Iterator<Item = Piece<'_>> {
    text.split('\n').enumerate().flat_map(|(i, line)| {
        let line_break = (i > 0).then_some(Piece::LineBreak);
        let text = (!line.is_empty()).then_some(Piece::Text(line));
        line_break.into_iter().chain(text)
    })
}
