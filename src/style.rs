use egui::{Color32, Context, Stroke, Style, Visuals};

pub fn configure_style(ctx: &Context) {
    let mut style = Style::default();

    // Editors and diff sit close together, keep spacing tight
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.window_margin = egui::Margin::same(10);

    ctx.set_style(style);

    let mut visuals = Visuals::light();
    visuals.window_shadow = egui::epaint::Shadow::NONE;
    visuals.popup_shadow = egui::epaint::Shadow::NONE;
    visuals.extreme_bg_color = Color32::from_gray(250);
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, Color32::from_gray(220));
    visuals.selection.bg_fill = Color32::from_rgb(200, 220, 255);

    ctx.set_visuals(visuals);
}
