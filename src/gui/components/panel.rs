// src/gui/components/panel.rs
//
// Evaluation overlay: identity, score, per-dimension progress and criteria,
// current counts and the change log, with export and close actions.

use eframe::egui::{self, Color32, RichText};

use super::{level_color, percent_color};
use crate::gui::app::App;
use crate::record::CountField;
use crate::report::{signed, Report};
use crate::score::Dimension;

const TITLE: Color32 = Color32::from_rgb(0x00, 0x3b, 0x5c);

pub fn draw(ctx: &egui::Context, app: &mut App) {
    let report = app.evaluator.report();
    let max_h = ctx.screen_rect().height() * 0.8;

    let mut export = false;
    let mut close = false;

    let modal = egui::Modal::new(egui::Id::new("evaluation_panel")).show(ctx, |ui| {
        ui.set_width(720.0);

        egui::ScrollArea::vertical().max_height(max_h).show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(RichText::new("📊 SNII/VIEP Metrics Evaluation").size(22.0).color(TITLE).strong());
                ui.label(RichText::new("Live evaluation").weak());
            });
            ui.add_space(12.0);

            identity(ui, &report);
            ui.add_space(12.0);
            score_banner(ui, &report);
            ui.add_space(12.0);

            ui.label(RichText::new("📋 Evaluated dimensions").size(16.0).color(TITLE).strong());
            for dim in &report.evaluation.dimensions {
                dimension(ui, dim);
            }

            ui.add_space(12.0);
            current_data(ui, &report);
            ui.add_space(12.0);
            change_list(ui, &report);
        });

        ui.separator();
        ui.horizontal(|ui| {
            let download = egui::Button::new(RichText::new("📥 Download JSON report").color(Color32::WHITE).strong())
                .fill(TITLE);
            if ui.add(download).clicked() {
                export = true;
            }
            if ui.button("Close").clicked() {
                close = true;
            }
        });
    });

    if export {
        logf!("UI: export from evaluation panel");
        app.export_report();
    }
    if close || modal.should_close() {
        logd!("UI: evaluation panel closed");
        app.state.gui.show_panel = false;
    }
}

fn identity(ui: &mut egui::Ui, report: &Report) {
    ui.group(|ui| {
        ui.set_width(ui.available_width());
        ui.label(RichText::new(format!("Investigator: {}", report.investigator)).size(16.0).color(TITLE).strong());
        ui.label(format!("Institution: {}", report.institution));
        ui.label(format!("ORCID: {}", report.orcid));
        ui.label(format!("Generated: {}", report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")));
    });
}

fn score_banner(ui: &mut egui::Ui, report: &Report) {
    let eval = &report.evaluation;
    egui::Frame::new()
        .fill(level_color(eval.level))
        .corner_radius(10.0)
        .inner_margin(16.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(format!("{}%", eval.score)).size(40.0).color(Color32::WHITE).strong());
                ui.label(RichText::new(eval.level.label()).size(18.0).color(Color32::WHITE));
                ui.label(RichText::new(&report.recommendation).color(Color32::WHITE));
            });
        });
}

fn dimension(ui: &mut egui::Ui, dim: &Dimension) {
    let pct = dim.percent();
    let color = percent_color(pct);

    ui.group(|ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.label(RichText::new(&dim.name).color(TITLE).strong());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(RichText::new(format!("{pct}%")).color(color).strong());
            });
        });
        ui.add(egui::ProgressBar::new(f32::from(pct) / 100.0).fill(color));
        for c in &dim.criteria {
            let (mark, tint) = if c.satisfied { ('✓', percent_color(100)) } else { ('✗', percent_color(0)) };
            ui.colored_label(tint, format!("{mark} {}", c.name));
        }
    });
}

fn current_data(ui: &mut egui::Ui, report: &Report) {
    ui.label(RichText::new("📈 Current data").size(16.0).color(TITLE).strong());
    ui.group(|ui| {
        ui.set_width(ui.available_width());
        for field in CountField::ALL {
            ui.label(format!("{}: {}", field.label(), report.record.count(field)));
        }
    });
}

fn change_list(ui: &mut egui::Ui, report: &Report) {
    ui.label(RichText::new("🔄 Detected changes").size(16.0).color(TITLE).strong());
    ui.group(|ui| {
        ui.set_width(ui.available_width());
        if report.changes.is_empty() {
            ui.label(RichText::new("No changes recorded yet.").weak());
            return;
        }
        ui.label(format!("Total changes: {}", report.changes.len()));
        for c in &report.changes {
            ui.label(format!(
                "• {} ({}) - Impact: {}%",
                c.kind,
                c.timestamp.format("%Y-%m-%d %H:%M:%S"),
                signed(c.impact)
            ));
        }
    });
}
