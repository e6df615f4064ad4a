use crate::diff::{DiffOptions, DiffStats, Timing};
use egui::{Align, Color32, Layout, RichText, Ui};

pub enum OptionsBarAction {
    ExportHtml,
    SwapTexts,
}

pub struct OptionsBar;

pub struct OptionsBarState<'a> {
    pub options: &'a mut DiffOptions,
    pub timing: Option<Timing>,
    pub stats: DiffStats,
    /// False when the texts differ only in whitespace
    pub has_changes: bool,
}

impl OptionsBar {
    /// Draw the option controls; edits are written straight into `state.options`
    pub fn show(ui: &mut Ui, state: OptionsBarState<'_>) -> Option<OptionsBarAction> {
        let OptionsBarState {
            options,
            timing,
            stats,
            has_changes,
        } = state;

        let mut action = None;

        ui.horizontal(|ui| {
            ui.with_layout(Layout::left_to_right(Align::Center), |ui| {
                ui.label("Timeout (s)");
                ui.add(
                    egui::DragValue::new(&mut options.timeout)
                        .speed(0.1)
                        .range(0.0..=60.0),
                )
                .on_hover_text("0 means unlimited");

                ui.checkbox(&mut options.cleanup_semantic, "Semantic cleanup");

                ui.label("Efficiency cost");
                ui.add(egui::DragValue::new(&mut options.cleanup_efficiency).range(0..=32))
                    .on_hover_text("0 disables efficiency cleanup");

                ui.separator();
                if !has_changes {
                    ui.label(RichText::new("No changes").weak());
                }
                ui.label(RichText::new(format!("+{}", stats.added_count)).color(Color32::from_rgb(0, 100, 0)));
                ui.label(RichText::new(format!("-{}", stats.removed_count)).color(Color32::from_rgb(150, 0, 0)));
                if let Some(timing) = timing {
                    ui.label(
                        RichText::new(format!(
                            "main {:.2} ms · cleanup {:.2} ms · total {:.2} ms",
                            timing.main, timing.cleanup, timing.total
                        ))
                        .monospace(),
                    );
                }
            });

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.button("Export HTML").clicked() {
                    action = Some(OptionsBarAction::ExportHtml);
                }
                if ui.button("⇄").on_hover_text("Swap texts").clicked() {
                    action = Some(OptionsBarAction::SwapTexts);
                }
            });
        });

        action
    }
}
