// src/gui/components/change_table.rs
//
// Session change log as a table. Purely a view.

use eframe::egui::{self, Align, Layout, RichText};
use egui_extras::{Column, TableBuilder};

use super::percent_color;
use crate::gui::app::App;
use crate::record::CountField;
use crate::report::signed;

const ROW_H: f32 = 20.0;

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let changes = app.evaluator.changes();

    ui.horizontal(|ui| {
        ui.strong("Detected changes");
        ui.label(format!("(this session: {}, all sessions: {})", changes.len(), app.evaluator.history().len()));
    });

    if changes.is_empty() {
        ui.label(RichText::new("No changes recorded yet.").weak());
        return;
    }

    let mut table = TableBuilder::new(ui)
        .striped(true)
        .min_scrolled_height(0.0)
        .column(Column::initial(150.0).resizable(true).clip(true))
        .column(Column::initial(190.0).resizable(true).clip(true))
        .column(Column::exact(60.0));
    for _ in CountField::ALL {
        table = table.column(Column::initial(70.0).at_least(40.0));
    }

    table
        .header(24.0, |mut header| {
            header.col(|ui| { ui.strong("When"); });
            header.col(|ui| { ui.strong("Kind"); });
            header.col(|ui| { ui.strong("Impact"); });
            for field in CountField::ALL {
                header.col(|ui| {
                    ui.strong(field.label()).on_hover_text("before → after, relative to startup");
                });
            }
        })
        .body(|mut body| {
            // newest first
            for change in changes.iter().rev() {
                body.row(ROW_H, |mut row| {
                    row.col(|ui| {
                        ui.label(change.timestamp.format("%Y-%m-%d %H:%M:%S").to_string());
                    });
                    row.col(|ui| {
                        ui.label(change.kind.label());
                    });
                    row.col(|ui| {
                        let tint = if change.impact >= 0 { percent_color(100) } else { percent_color(0) };
                        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                            ui.colored_label(tint, format!("{}%", signed(change.impact)));
                        });
                    });
                    for field in CountField::ALL {
                        let (before, after) = change.details.get(field);
                        row.col(|ui| {
                            let text = format!("{before} → {after}");
                            if before == after {
                                ui.label(RichText::new(text).weak());
                            } else {
                                ui.label(RichText::new(text).strong());
                            }
                        });
                    }
                });
            }
        });
}
