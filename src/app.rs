use crate::component::DiffMatchPatch;
use crate::config::Config;
use crate::constant::{APP_NAME, EXPORT_FILE_NAME};
use crate::diff::{self, DiffOptions, Timing};
use crate::export;
use crate::style::configure_style;
use crate::ui::diff_view::render_diff_view;
use crate::ui::options_bar::{OptionsBar, OptionsBarAction, OptionsBarState};
use egui::RichText;
use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, error};

pub struct DiffViewApp {
    original: String,
    modified: String,
    options: DiffOptions,
    view: DiffMatchPatch,
    /// Written by the processing callback on every recomputation
    last_timing: Rc<Cell<Option<Timing>>>,
    config: Config,
}

impl DiffViewApp {
    pub fn new(cc: &eframe::CreationContext<'_>, original: String, modified: String) -> Self {
        configure_style(&cc.egui_ctx);
        Self::with_config(Config::default(), original, modified)
    }

    fn with_config(config: Config, original: String, modified: String) -> Self {
        let options = config.settings.diff;
        let last_timing = Rc::new(Cell::new(None));
        let sink = Rc::clone(&last_timing);
        let view = DiffMatchPatch::new(original.clone(), modified.clone())
            .options(options)
            .renderer_classes(config.settings.classes.clone())
            .on_processing(move |timing, segments| {
                debug!(segments = segments.len(), total_ms = timing.total, "Diff recomputed");
                sink.set(Some(*timing));
            });

        Self {
            original,
            modified,
            options,
            view,
            last_timing,
            config,
        }
    }

    /// Push editor contents and options into the component; it decides
    /// itself whether anything changed
    fn sync_inputs(&mut self) {
        if self.view.original_text() != self.original {
            self.view.set_original_text(self.original.clone());
        }
        if self.view.modified_text() != self.modified {
            self.view.set_modified_text(self.modified.clone());
        }
        self.view.set_options(self.options);
    }

    fn export_html(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .set_directory(self.config.export_dir())
            .set_file_name(EXPORT_FILE_NAME)
            .add_filter("HTML", &["html"])
            .save_file()
        else {
            return;
        };

        let body = self.view.render();
        let computation = self.view.computation();
        match export::write_page(&path, APP_NAME, &computation, body) {
            Ok(()) => self.config.remember_export(&path),
            Err(e) => error!("Failed to export diff to {:?}: {}", path, e),
        }
    }
}

impl eframe::App for DiffViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("options_panel").show(ctx, |ui| {
            let has_changes = diff::has_changes(self.view.segments());
            let state = OptionsBarState {
                options: &mut self.options,
                timing: self.last_timing.get(),
                stats: self.view.stats(),
                has_changes,
            };
            match OptionsBar::show(ui, state) {
                Some(OptionsBarAction::ExportHtml) => self.export_html(),
                Some(OptionsBarAction::SwapTexts) => {
                    std::mem::swap(&mut self.original, &mut self.modified);
                }
                None => {}
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.columns(2, |columns| {
                columns[0].label(RichText::new("Original").strong());
                columns[0].add(
                    egui::TextEdit::multiline(&mut self.original)
                        .code_editor()
                        .desired_rows(10)
                        .desired_width(f32::INFINITY),
                );
                columns[1].label(RichText::new("Modified").strong());
                columns[1].add(
                    egui::TextEdit::multiline(&mut self.modified)
                        .code_editor()
                        .desired_rows(10)
                        .desired_width(f32::INFINITY),
                );
            });

            self.sync_inputs();
            if self.view.refresh() {
                // The options bar above was drawn with the previous result
                ctx.request_repaint();
            }

            ui.separator();
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    render_diff_view(ui, self.view.segments());
                });
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.config.settings.diff = self.options;
        if let Err(e) = self.config.save() {
            error!("Failed to save settings on exit: {}", e);
        }
    }
}
