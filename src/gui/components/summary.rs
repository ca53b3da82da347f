// src/gui/components/summary.rs
//
// Identity, presence and the live counts next to the startup baseline.

use eframe::egui::{self, Color32, RichText};

use crate::gui::app::App;
use crate::record::CountField;

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let record = app.evaluator.record();
    let baseline = app.evaluator.baseline();

    ui.heading(if record.name.is_empty() { "(unnamed investigator)" } else { record.name.as_str() });
    if !record.institution.is_empty() {
        ui.label(&record.institution);
    }
    if !record.title.is_empty() {
        ui.label(RichText::new(&record.title).italics());
    }
    ui.label(format!("ORCID: {}", record.orcid));
    ui.add_space(6.0);

    ui.horizontal_wrapped(|ui| {
        let links = [
            ("ORCID", record.has_orcid),
            ("CVU", record.has_cvu),
            ("Google Scholar", record.has_google_scholar),
            ("ResearchGate", record.has_research_gate),
            ("LinkedIn", record.has_linked_in),
        ];
        for (name, present) in links {
            let (mark, color) = if present {
                ('✓', Color32::from_rgb(0x51, 0xcf, 0x66))
            } else {
                ('✗', Color32::from_rgb(0xff, 0x6b, 0x6b))
            };
            ui.colored_label(color, format!("{mark} {name}"));
        }
    });
    ui.add_space(6.0);

    egui::Grid::new("counts")
        .striped(true)
        .num_columns(3)
        .show(ui, |ui| {
            ui.strong("Field");
            ui.strong("Now");
            ui.strong("At startup");
            ui.end_row();

            for field in CountField::ALL {
                let now = record.count(field);
                let then = baseline.count(field);
                ui.label(field.label());
                if now == then {
                    ui.label(now.to_string());
                } else {
                    ui.label(RichText::new(now.to_string()).strong());
                }
                ui.label(then.to_string());
                ui.end_row();
            }
        });

    ui.label(
        RichText::new(format!("Last read {}", record.captured_at.format("%Y-%m-%d %H:%M:%S UTC")))
            .small()
            .weak(),
    );
}
