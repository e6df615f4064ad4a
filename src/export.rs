//! Standalone HTML export of a rendered diff.

use crate::diff::{Computation, DiffStats, Segment, Timing};
use chrono::{DateTime, Local};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Machine readable copy of the diff embedded in the page
#[derive(Serialize)]
struct PageData<'a> {
    timing: &'a Timing,
    stats: DiffStats,
    segments: &'a [Segment],
}

/// Build a complete HTML document around an already rendered diff `body`
pub fn standalone_page(
    title: &str,
    computation: &Computation,
    body: Markup,
    generated_at: DateTime<Local>,
) -> Result<Markup, ExportError> {
    let data = PageData {
        timing: &computation.timing,
        stats: DiffStats::from_segments(&computation.segments),
        segments: &computation.segments,
    };
    // Keep segment text from closing the script element early
    let json = serde_json::to_string(&data)?.replace("</", "<\\/");
    let timing = &computation.timing;

    Ok(html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { (title) }
                style { "body{font-family:monospace;white-space:pre-wrap;margin:2rem}" }
            }
            body {
                h1 { (title) }
                p.timing {
                    (format!(
                        "main {:.3} ms, cleanup {:.3} ms, total {:.3} ms",
                        timing.main, timing.cleanup, timing.total
                    ))
                }
                p.generated { "Generated " (generated_at.format("%Y-%m-%d %H:%M:%S").to_string()) }
                div data-testid="diff-result" { (body) }
                script type="application/json" id="diff-data" { (PreEscaped(json)) }
            }
        }
    })
}

/// Write the page for `computation` to `path`
pub fn write_page(
    path: &Path,
    title: &str,
    computation: &Computation,
    body: Markup,
) -> Result<(), ExportError> {
    let page = standalone_page(title, computation, body, Local::now())?;
    fs::write(path, page.into_string())?;
    info!("Exported diff to {:?}", path);
    Ok(())
}
