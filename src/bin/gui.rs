// src/bin/gui.rs
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]
use std::path::{Path, PathBuf};

use eframe::egui::{IconData, ViewportBuilder};
use metricas::{
    config::{consts::CONFIG_FILE, options::AppOptions, state::AppState},
    core::clock::SystemClock,
    document::HtmlFile,
    gui,
    store::FileStore,
    Evaluator,
};

/// Three rising bars on a dark square, drawn in code.
fn app_icon() -> IconData {
    const SIZE: u32 = 32;
    let rgba = image::RgbaImage::from_fn(SIZE, SIZE, |x, y| {
        let bar = match x {
            6..=10 => Some(20),
            14..=18 => Some(13),
            22..=26 => Some(6),
            _ => None,
        };
        match bar {
            Some(top) if y >= top && y < 27 => image::Rgba([0x51, 0xcf, 0x66, 0xff]),
            _ => image::Rgba([0x00, 0x3b, 0x5c, 0xff]),
        }
    });
    IconData { rgba: rgba.into_raw(), width: SIZE, height: SIZE }
}

fn main() {
    let config = Path::new(CONFIG_FILE);
    let (options, loaded) = AppOptions::load(config);
    metricas::log::init(&options.store_dir, false);
    loaded.report(config);

    let page = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| options.page.clone())
        .unwrap_or_else(|| PathBuf::from("index.html"));

    let evaluator = Evaluator::from_options(
        Box::new(HtmlFile::new(page)),
        Box::new(FileStore::under(&options.store_dir)),
        Box::new(SystemClock),
        &options,
    );

    let state = AppState::new(options);
    let native = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_icon(app_icon())
            .with_inner_size([state.gui.window_w as f32, state.gui.window_h as f32]),
        ..Default::default()
    };

    if let Err(e) = gui::run(native, state, evaluator) {
        eprintln!("GUI failed: {}", e);
        std::process::exit(1);
    }
}
