//! Print the HTML for a small diff, once with CSS classes and once with
//! custom renderers.
//!
//! cargo run --example render_html

use diff_view::{DiffMatchPatch, RendererClasses, Renderers};
use maud::html;

fn main() {
    tracing_subscriber::fmt::init();

    let mut classed = DiffMatchPatch::new("The quick brown fox", "The quick red fox jumps")
        .cleanup_semantic(true)
        .renderer_classes(RendererClasses::new("diff-remove", "diff-insert", "diff-equal"))
        .on_processing(|timing, segments| {
            println!(
                "{} segments in {:.3} ms (main {:.3}, cleanup {:.3})",
                segments.len(),
                timing.total,
                timing.main,
                timing.cleanup
            );
        });
    println!("{}", classed.render().into_string());

    let mut custom = DiffMatchPatch::new("line one\nline two", "line one\nline 2")
        .renderers(
            Renderers::new()
                .remove(|text| html! { del { (text) } })
                .insert(|text| html! { ins { (text) } })
                .line_break(|| html! { br.nl; }),
        );
    println!("{}", custom.render().into_string());
}
