use crate::diff::{Segment, SegmentKind};
use crate::render::{Piece, pieces};
use egui::{Color32, FontId, Stroke, TextFormat, Ui, text::LayoutJob};

// Same palette as the inline HTML defaults
const REMOVED_BG: Color32 = Color32::from_rgb(255, 170, 170);
const ADDED_BG: Color32 = Color32::from_rgb(170, 255, 170);
const REMOVED_TEXT_COLOR: Color32 = Color32::from_rgb(150, 0, 0);
const ADDED_TEXT_COLOR: Color32 = Color32::from_rgb(0, 100, 0);
const LINE_HEIGHT: f32 = 22.0;

/// Text formats used for each segment kind
#[derive(Debug, Clone)]
pub struct DiffPalette {
    pub remove: TextFormat,
    pub insert: TextFormat,
    pub equal: TextFormat,
}

impl DiffPalette {
    pub fn new(font_id: FontId, base_text_color: Color32) -> Self {
        Self {
            remove: TextFormat {
                font_id: font_id.clone(),
                color: REMOVED_TEXT_COLOR,
                background: REMOVED_BG,
                strikethrough: Stroke::new(1.0, REMOVED_TEXT_COLOR),
                line_height: Some(LINE_HEIGHT),
                ..Default::default()
            },
            insert: TextFormat {
                font_id: font_id.clone(),
                color: ADDED_TEXT_COLOR,
                background: ADDED_BG,
                line_height: Some(LINE_HEIGHT),
                ..Default::default()
            },
            equal: TextFormat {
                font_id,
                color: base_text_color,
                line_height: Some(LINE_HEIGHT),
                ..Default::default()
            },
        }
    }

    pub fn for_kind(&self, kind: SegmentKind) -> &TextFormat {
        match kind {
            SegmentKind::Remove => &self.remove,
            SegmentKind::Insert => &self.insert,
            SegmentKind::Equal => &self.equal,
        }
    }
}

/// Build a single layout job for the whole script.
///
/// Line breaks use the plain format so highlighted backgrounds do not run
/// to the end of the line.
pub fn layout_segments(segments: &[Segment], palette: &DiffPalette, wrap_width: f32) -> LayoutJob {
    let mut job = LayoutJob::default();
    for segment in segments {
        let format = palette.for_kind(segment.kind);
        for piece in pieces(&segment.text) {
            match piece {
                Piece::Text(text) => job.append(text, 0.0, format.clone()),
                Piece::LineBreak => job.append("\n", 0.0, palette.equal.clone()),
            }
        }
    }
    job.wrap.max_width = wrap_width;
    job
}

/// Render the diff with monospace text
pub fn render_diff_view(ui: &mut Ui, segments: &[Segment]) {
    let palette = DiffPalette::new(FontId::monospace(14.0), ui.visuals().text_color());
    let job = layout_segments(segments, &palette, ui.available_width());
    ui.add(egui::Label::new(job).wrap());
}
