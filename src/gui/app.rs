// src/gui/app.rs
use std::{error::Error, path::PathBuf, time::Duration};

use eframe::egui;

use crate::{
    config::state::AppState,
    core::clock::{Clock, Interval, SystemClock},
    file::normalize_separators,
    Evaluator,
};

use super::components::{change_table, export_bar, panel, summary};

pub fn run(
    native: eframe::NativeOptions,
    state: AppState,
    evaluator: Evaluator,
) -> Result<(), Box<dyn Error>> {
    eframe::run_native(
        "SNII/VIEP Metrics",
        native,
        Box::new(|_cc| Ok(Box::new(App::new(state, evaluator)))),
    )?;
    Ok(())
}

pub struct App {
    // single source of truth (UI thread only)
    pub state: AppState,
    pub evaluator: Evaluator,

    // detection timer
    pub interval: Interval,
    clock: SystemClock,

    pub status: String,
}

impl App {
    pub fn new(state: AppState, evaluator: Evaluator) -> Self {
        let interval = Interval::new(state.options.tick_interval());
        let status = if evaluator.storage_degraded() {
            s!("Store unavailable, keeping data in memory")
        } else {
            format!("Watching {}", evaluator.source_label())
        };
        logf!("Init: GUI ready, tick every {}s", interval.period().as_secs());

        Self {
            state,
            evaluator,
            interval,
            clock: SystemClock,
            status,
        }
    }

    /* ---------- actions ---------- */

    /// Run one detection pass and reflect it in the status line.
    pub fn check_now(&mut self) {
        match self.evaluator.tick() {
            Some(change) => {
                self.status = format!(
                    "Change detected: {} (impact {}%)",
                    change.kind,
                    crate::report::signed(change.impact)
                );
            }
            None if self.evaluator.storage_degraded() => {
                self.status = s!("No changes (store unavailable, in memory only)");
            }
            None => {}
        }
    }

    /// Write the JSON report to the directory in the export field.
    pub fn export_report(&mut self) {
        let gui = &mut self.state.gui;
        if gui.export_dir_dirty {
            self.state.options.export_dir = PathBuf::from(normalize_separators(gui.export_dir_text.trim()));
            gui.export_dir_dirty = false;
            logf!("Export: dir set → {}", self.state.options.export_dir.display());
        }

        match self.evaluator.export(&self.state.options.export_dir) {
            Ok(path) => {
                self.status = format!("Exported {}", path.display());
                self.state.gui.last_export = Some(path);
            }
            Err(e) => {
                loge!("Export: Error: {}", e);
                self.status = format!("Export error: {e}");
            }
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = self.clock.now();
        if self.interval.due(now) {
            self.check_now();
        }
        let wait = self.interval.remaining(now).max(Duration::from_millis(250));
        ctx.request_repaint_after(wait);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            export_bar::draw(ui, self);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            summary::draw(ui, self);

            ui.separator();

            change_table::draw(ui, self);
        });

        if self.state.gui.show_panel {
            panel::draw(ctx, self);
        }
    }
}
