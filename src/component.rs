//! The diff view component: props in, timed segments and markup out.

use crate::diff::{
    self, Computation, DiffEngine, DiffOptions, DiffStats, Segment, SimilarEngine, Timing,
};
use crate::render::{self, RendererClasses, Renderers};
use maud::Markup;
use tracing::trace;

pub type ProcessingCallback = Box<dyn FnMut(&Timing, &[Segment])>;

/// The inputs whose change triggers a recomputation
#[derive(Debug, Clone)]
struct Inputs {
    original_text: String,
    modified_text: String,
    options: DiffOptions,
}

impl PartialEq for Inputs {
    fn eq(&self, other: &Self) -> bool {
        // Bitwise so a NaN timeout does not count as a change on every refresh
        self.original_text == other.original_text
            && self.modified_text == other.modified_text
            && self.options.timeout.to_bits() == other.options.timeout.to_bits()
            && self.options.cleanup_semantic == other.options.cleanup_semantic
            && self.options.cleanup_efficiency == other.options.cleanup_efficiency
    }
}

/// Visual diff between two strings.
///
/// Setters only record new values; the diff is recomputed lazily by
/// [`refresh`](Self::refresh) (also called by [`render`](Self::render)) and
/// only when one of the texts or options actually changed. Each
/// recomputation fires the processing callback exactly once.
pub struct DiffMatchPatch<E: DiffEngine = SimilarEngine> {
    engine: E,
    inputs: Inputs,
    computed_for: Option<Inputs>,
    segments: Vec<Segment>,
    timing: Timing,
    on_processing: Option<ProcessingCallback>,
    renderers: Renderers,
    renderer_classes: RendererClasses,
}

impl DiffMatchPatch<SimilarEngine> {
    pub fn new(original_text: impl Into<String>, modified_text: impl Into<String>) -> Self {
        Self::with_engine(SimilarEngine::default(), original_text, modified_text)
    }
}

impl<E: DiffEngine> DiffMatchPatch<E> {
    pub fn with_engine(
        engine: E,
        original_text: impl Into<String>,
        modified_text: impl Into<String>,
    ) -> Self {
        Self {
            engine,
            inputs: Inputs {
                original_text: original_text.into(),
                modified_text: modified_text.into(),
                options: DiffOptions::default(),
            },
            computed_for: None,
            segments: Vec::new(),
            timing: Timing::default(),
            on_processing: None,
            renderers: Renderers::default(),
            renderer_classes: RendererClasses::default(),
        }
    }

    pub fn options(mut self, options: DiffOptions) -> Self {
        self.inputs.options = options;
        self
    }

    pub fn timeout(mut self, seconds: f64) -> Self {
        self.inputs.options.timeout = seconds;
        self
    }

    pub fn cleanup_semantic(mut self, enabled: bool) -> Self {
        self.inputs.options.cleanup_semantic = enabled;
        self
    }

    pub fn cleanup_efficiency(mut self, edit_cost: u32) -> Self {
        self.inputs.options.cleanup_efficiency = edit_cost;
        self
    }

    pub fn on_processing(mut self, callback: impl FnMut(&Timing, &[Segment]) + 'static) -> Self {
        self.on_processing = Some(Box::new(callback));
        self
    }

    pub fn renderers(mut self, renderers: Renderers) -> Self {
        self.renderers = renderers;
        self
    }

    pub fn renderer_classes(mut self, classes: RendererClasses) -> Self {
        self.renderer_classes = classes;
        self
    }

    pub fn original_text(&self) -> &str {
        &self.inputs.original_text
    }

    pub fn modified_text(&self) -> &str {
        &self.inputs.modified_text
    }

    pub fn current_options(&self) -> DiffOptions {
        self.inputs.options
    }

    pub fn set_original_text(&mut self, text: impl Into<String>) {
        self.inputs.original_text = text.into();
    }

    pub fn set_modified_text(&mut self, text: impl Into<String>) {
        self.inputs.modified_text = text.into();
    }

    pub fn set_options(&mut self, options: DiffOptions) {
        self.inputs.options = options;
    }

    pub fn set_renderers(&mut self, renderers: Renderers) {
        self.renderers = renderers;
    }

    pub fn set_renderer_classes(&mut self, classes: RendererClasses) {
        self.renderer_classes = classes;
    }

    pub fn set_on_processing(&mut self, callback: impl FnMut(&Timing, &[Segment]) + 'static) {
        self.on_processing = Some(Box::new(callback));
    }

    /// Whether the inputs changed since the last computation
    pub fn is_stale(&self) -> bool {
        self.computed_for.as_ref() != Some(&self.inputs)
    }

    /// Recompute when stale. Returns `true` if a computation ran.
    pub fn refresh(&mut self) -> bool {
        if !self.is_stale() {
            trace!("Diff inputs unchanged, skipping recomputation");
            return false;
        }

        let computation = diff::compute(
            &self.engine,
            &self.inputs.original_text,
            &self.inputs.modified_text,
            &self.inputs.options,
        );
        self.segments = computation.segments;
        self.timing = computation.timing;
        self.computed_for = Some(self.inputs.clone());

        if let Some(callback) = self.on_processing.as_mut() {
            callback(&self.timing, &self.segments);
        }
        true
    }

    /// Current segments, recomputed first if the inputs changed
    pub fn segments(&mut self) -> &[Segment] {
        self.refresh();
        &self.segments
    }

    /// Timing of the latest computation
    pub fn timing(&mut self) -> Timing {
        self.refresh();
        self.timing
    }

    /// Owned copy of the latest segments and timing
    pub fn computation(&mut self) -> Computation {
        self.refresh();
        Computation {
            segments: self.segments.clone(),
            timing: self.timing,
        }
    }

    pub fn stats(&mut self) -> DiffStats {
        self.refresh();
        DiffStats::from_segments(&self.segments)
    }

    /// Render the up-to-date diff to markup
    pub fn render(&mut self) -> Markup {
        self.refresh();
        render::render_segments(&self.segments, &self.renderers, &self.renderer_classes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{SegmentKind, modified_text, original_text};
    use maud::html;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Calls = Rc<RefCell<Vec<(Timing, Vec<Segment>)>>>;

    fn recording(view: DiffMatchPatch) -> (DiffMatchPatch, Calls) {
        let calls: Calls = Rc::default();
        let sink = Rc::clone(&calls);
        let view = view.on_processing(move |timing, segments| {
            sink.borrow_mut().push((*timing, segments.to_vec()));
        });
        (view, calls)
    }

    #[test]
    fn renders_a_basic_diff() {
        let html = DiffMatchPatch::new("hello world", "hello brave world")
            .render()
            .into_string();
        assert!(html.contains("hello"));
        assert!(html.contains("brave"));
        assert!(html.contains("world"));
    }

    #[test]
    fn applies_renderer_classes() {
        let html = DiffMatchPatch::new("foo shoo", "bar shoo")
            .renderer_classes(RendererClasses::new("test-remove", "test-insert", "test-equal"))
            .render()
            .into_string();
        assert!(html.contains(r#"class="test-remove""#));
        assert!(html.contains(r#"class="test-insert""#));
        assert!(html.contains(r#"class="test-equal""#));
    }

    #[test]
    fn calls_on_processing_with_timing() {
        let (mut view, calls) = recording(DiffMatchPatch::new("a", "b"));
        view.render();

        let calls = calls.borrow();
        assert_eq!(calls.len(), 1);
        let (timing, segments) = &calls[0];
        assert!(timing.main >= 0.0);
        assert!(timing.cleanup >= 0.0);
        assert!((timing.total - (timing.main + timing.cleanup)).abs() < 1e-9);
        assert_eq!(original_text(segments), "a");
        assert_eq!(modified_text(segments), "b");
    }

    #[test]
    fn uses_default_values_for_optional_props() {
        let view = DiffMatchPatch::new("foo", "bar");
        assert_eq!(view.current_options(), DiffOptions::default());
        assert_eq!(view.current_options().timeout, 1.0);
        assert!(!view.current_options().cleanup_semantic);
        assert_eq!(view.current_options().cleanup_efficiency, 4);
    }

    #[test]
    fn accepts_all_documented_props() {
        let (view, calls) = recording(
            DiffMatchPatch::new("a", "b")
                .timeout(2.0)
                .cleanup_semantic(true)
                .cleanup_efficiency(8)
                .renderer_classes(RendererClasses::new("del", "ins", "eq"))
                .renderers(Renderers::default()),
        );
        let mut view = view;
        let html = view.render().into_string();
        assert!(html.contains(r#"class="del""#));
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn does_not_recompute_without_changes() {
        let (mut view, calls) = recording(DiffMatchPatch::new("abc", "abd"));
        assert!(view.refresh());
        assert!(!view.refresh());
        view.render();
        view.segments();
        assert_eq!(calls.borrow().len(), 1);

        // Setting an identical value is not a change
        view.set_original_text("abc");
        assert!(!view.is_stale());
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn every_input_triggers_recomputation() {
        let (mut view, calls) = recording(DiffMatchPatch::new("abc", "abd"));
        view.refresh();

        view.set_original_text("xbc");
        assert!(view.refresh());
        view.set_modified_text("xbd");
        assert!(view.refresh());

        let mut options = view.current_options();
        options.timeout = 0.0;
        view.set_options(options);
        assert!(view.refresh());
        options.cleanup_semantic = true;
        view.set_options(options);
        assert!(view.refresh());
        options.cleanup_efficiency = 2;
        view.set_options(options);
        assert!(view.refresh());

        assert_eq!(calls.borrow().len(), 6);
    }

    #[test]
    fn renderer_changes_do_not_recompute() {
        let (mut view, calls) = recording(DiffMatchPatch::new("abc", "abd"));
        view.render();
        view.set_renderer_classes(RendererClasses::new("r", "i", "e"));
        let html = view.render().into_string();
        assert!(html.contains(r#"class="r""#));
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn never_shows_stale_results() {
        let mut view = DiffMatchPatch::new("one", "one");
        assert_eq!(view.segments(), [Segment::equal("one")]);
        view.set_modified_text("two");
        let segments = view.segments().to_vec();
        assert_eq!(modified_text(&segments), "two");
        assert!(segments.iter().any(|s| s.kind != SegmentKind::Equal));
    }

    #[test]
    fn custom_remove_renderer_takes_precedence() {
        let html = DiffMatchPatch::new("foo shoo", "bar shoo")
            .renderers(Renderers::new().remove(|text| html! { s.custom { (text) } }))
            .renderer_classes(RendererClasses::new("r", "i", "e"))
            .render()
            .into_string();
        assert!(html.contains(r#"<s class="custom">foo</s>"#));
        assert!(!html.contains(r#"class="r""#));
        assert!(html.contains(r#"class="i""#));
    }

    #[test]
    fn empty_texts_and_unlimited_timeout() {
        let (mut view, calls) = recording(DiffMatchPatch::new("", "").timeout(0.0));
        assert_eq!(view.render().into_string(), "");
        assert_eq!(view.stats(), DiffStats::default());
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn stats_follow_current_inputs() {
        let mut view = DiffMatchPatch::new("hello cat", "hello dog");
        assert_eq!(view.stats().added_count, 3);
        view.set_modified_text("hello");
        assert_eq!(view.stats().added_count, 0);
        assert_eq!(view.stats().removed_count, 4);
    }
}
