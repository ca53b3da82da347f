// src/config/state.rs
use std::path::PathBuf;

use super::options::AppOptions;

#[derive(Clone, Debug)]
pub struct GuiState {
    /// Evaluation overlay visible
    pub show_panel: bool,

    pub window_w: u32,
    pub window_h: u32,

    /// Export directory as typed in the text field
    pub export_dir_text: String,
    pub export_dir_dirty: bool,

    pub last_export: Option<PathBuf>,
}

impl Default for GuiState {
    fn default() -> Self {
        Self {
            show_panel: false,
            window_w: 900,
            window_h: 640,
            export_dir_text: s!(),
            export_dir_dirty: false,
            last_export: None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub options: AppOptions,
    pub gui: GuiState,
}

impl AppState {
    pub fn new(options: AppOptions) -> Self {
        let gui = GuiState {
            export_dir_text: options.export_dir.to_string_lossy().into_owned(),
            ..GuiState::default()
        };
        Self { options, gui }
    }
}
