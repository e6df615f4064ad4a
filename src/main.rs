use diff_view::app::DiffViewApp;
use diff_view::constant;
use diff_view::ui;
use std::fs;
use std::path::{Path, PathBuf};

fn main() -> eframe::Result {
    tracing_subscriber::fmt::init();

    // Optional: diff-view [original-file] [modified-file]
    let mut paths = std::env::args().skip(1).map(PathBuf::from);
    let original = paths.next().map(|p| read_input(&p)).unwrap_or_default();
    let modified = paths.next().map(|p| read_input(&p)).unwrap_or_default();

    let options = ui::viewport::build_viewport();

    eframe::run_native(
        constant::DEFAULT_WINDOW_TITLE,
        options,
        Box::new(move |cc| Ok(Box::new(DiffViewApp::new(cc, original, modified)))),
    )
}

fn read_input(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::error!("Failed to read {:?}: {}", path, e);
            String::new()
        }
    }
}
