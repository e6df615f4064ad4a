use super::{Piece, RendererClasses, Renderers, pieces};
use crate::constant::{DEFAULT_INSERT_STYLE, DEFAULT_REMOVE_STYLE};
use crate::diff::{Segment, SegmentKind};
use maud::{Markup, PreEscaped, html};

/// Render segments in order into one markup fragment
pub fn render_segments(
    segments: &[Segment],
    renderers: &Renderers,
    classes: &RendererClasses,
) -> Markup {
    let mut out = String::new();
    for segment in segments {
        out.push_str(&render_segment(segment, renderers, classes).into_string());
    }
    PreEscaped(out)
}

/// Render a single segment, emitting line breaks between its lines
pub fn render_segment(segment: &Segment, renderers: &Renderers, classes: &RendererClasses) -> Markup {
    let mut out = String::new();
    for piece in pieces(&segment.text) {
        let markup = match piece {
            Piece::Text(text) => render_text(segment.kind, text, renderers, classes),
            Piece::LineBreak => render_line_break(renderers),
        };
        out.push_str(&markup.into_string());
    }
    PreEscaped(out)
}

fn render_text(
    kind: SegmentKind,
    text: &str,
    renderers: &Renderers,
    classes: &RendererClasses,
) -> Markup {
    if let Some(render) = renderers.for_kind(kind) {
        return render(text);
    }
    if let Some(class) = classes.for_kind(kind) {
        return html! { span class=(class) { (text) } };
    }
    match kind {
        SegmentKind::Remove => html! { span style=(DEFAULT_REMOVE_STYLE) { (text) } },
        SegmentKind::Insert => html! { span style=(DEFAULT_INSERT_STYLE) { (text) } },
        SegmentKind::Equal => html! { span { (text) } },
    }
}

fn render_line_break(renderers: &Renderers) -> Markup {
    match &renderers.line_break {
        Some(render) => render(),
        None => html! { br; },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn foo_shoo() -> Vec<Segment> {
        vec![
            Segment::remove("foo"),
            Segment::insert("bar"),
            Segment::equal(" shoo"),
        ]
    }

    #[test]
    fn default_styles_when_nothing_configured() {
        let html = render_segments(&foo_shoo(), &Renderers::default(), &RendererClasses::default())
            .into_string();
        assert_eq!(
            html,
            format!(
                r#"<span style="{}">foo</span><span style="{}">bar</span><span> shoo</span>"#,
                DEFAULT_REMOVE_STYLE, DEFAULT_INSERT_STYLE
            )
        );
    }

    #[test]
    fn classes_replace_default_styles() {
        let classes = RendererClasses::new("r", "i", "e");
        let html = render_segments(&foo_shoo(), &Renderers::default(), &classes).into_string();
        assert_eq!(
            html,
            r#"<span class="r">foo</span><span class="i">bar</span><span class="e"> shoo</span>"#
        );
        assert!(!html.contains("style="));
    }

    #[test]
    fn partial_classes_fall_back_per_kind() {
        let classes = RendererClasses {
            insert: Some("added".to_string()),
            ..RendererClasses::default()
        };
        let html = render_segments(&foo_shoo(), &Renderers::default(), &classes).into_string();
        assert!(html.contains(r#"<span class="added">bar</span>"#));
        assert!(html.contains(&format!(r#"<span style="{}">foo</span>"#, DEFAULT_REMOVE_STYLE)));
    }

    #[test]
    fn custom_renderer_wins_over_class() {
        let renderers = Renderers::new().remove(|text| html! { del { (text) } });
        let classes = RendererClasses::new("r", "i", "e");
        let html = render_segments(&foo_shoo(), &renderers, &classes).into_string();
        assert!(html.starts_with("<del>foo</del>"));
        assert!(!html.contains(r#"class="r""#));
        assert!(html.contains(r#"<span class="i">bar</span>"#));
    }

    #[test]
    fn line_breaks_are_not_wrapped() {
        let segment = Segment::insert("one\ntwo");
        let classes = RendererClasses::new("r", "i", "e");
        let html = render_segment(&segment, &Renderers::default(), &classes).into_string();
        assert_eq!(html, r#"<span class="i">one</span><br><span class="i">two</span>"#);
    }

    #[test]
    fn custom_line_break_renderer() {
        let renderers = Renderers::new().line_break(|| PreEscaped("<hr>".to_string()));
        let segment = Segment::equal("a\n\nb");
        let html = render_segment(&segment, &renderers, &RendererClasses::default()).into_string();
        assert_eq!(html, "<span>a</span><hr><hr><span>b</span>");
    }

    #[test]
    fn text_is_escaped() {
        let segment = Segment::insert("<b>&");
        let html =
            render_segment(&segment, &Renderers::default(), &RendererClasses::new("r", "i", "e"))
                .into_string();
        assert_eq!(html, r#"<span class="i">&lt;b&gt;&amp;</span>"#);
    }

    #[test]
    fn empty_script_renders_nothing() {
        let html = render_segments(&[], &Renderers::default(), &RendererClasses::default());
        assert_eq!(html.into_string(), "");
    }
}
