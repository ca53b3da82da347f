// src/gui/components/export_bar.rs

use eframe::egui;

use super::level_color;
use crate::gui::app::App;

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let eval = app.evaluator.evaluate();

    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("SNII/VIEP Metrics").strong());
        ui.separator();
        ui.label(
            egui::RichText::new(format!("{}% {}", eval.score, eval.level))
                .color(level_color(eval.level))
                .strong(),
        );

        ui.separator();

        // --- Output field ---
        ui.label("Export to:");
        if ui
            .add(egui::TextEdit::singleline(&mut app.state.gui.export_dir_text)
                .desired_width(220.0)
                .font(egui::TextStyle::Monospace))
            .changed()
        {
            app.state.gui.export_dir_dirty = true;
            logd!("UI: export_dir_text changed (dirty=true) → {}", app.state.gui.export_dir_text);
        }
    });

    // --- Actions (Check / Export / Evaluation) ---
    ui.horizontal(|ui| {
        if ui.button("Check now").clicked() {
            logd!("UI: manual check");
            app.check_now();
        }

        if ui.button("Export JSON").clicked() {
            app.export_report();
        }

        let blue = egui::Color32::from_rgb(0x00, 0x3b, 0x5c);
        if ui
            .add(
                egui::Button::new(egui::RichText::new("Show evaluation").color(egui::Color32::WHITE).strong())
                    .fill(blue),
            )
            .clicked()
        {
            logf!("UI: evaluation panel opened");
            app.state.gui.show_panel = true;
        }

        ui.label(format!("Status: {}", app.status));
    });

    if let Some(path) = &app.state.gui.last_export {
        ui.label(egui::RichText::new(format!("Last export: {}", path.display())).small().weak());
    }
}
