// src/log.rs
use std::fs::{self, OpenOptions};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use crate::config::consts::LOG_FILE;

/// Install the global subscriber.
///
/// Events go to `<store_dir>/debug.log` (appended) and, when `stderr` is set,
/// to the terminal as well. `RUST_LOG` overrides the default `info` filter.
/// Only the first call in a process takes effect.
pub fn init(store_dir: &Path, stderr: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = open_log_file(store_dir).map(|file| {
        fmt::layer()
            .with_ansi(false)
            .with_target(false)
            .with_writer(Mutex::new(file))
            .boxed()
    });

    let stderr_layer = stderr.then(|| {
        fmt::layer()
            .with_ansi(std::io::stderr().is_terminal())
            .with_target(false)
            .with_writer(std::io::stderr)
            .boxed()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .ok();
}

fn open_log_file(store_dir: &Path) -> Option<fs::File> {
    if fs::create_dir_all(store_dir).is_err() {
        return None;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(store_dir.join(LOG_FILE))
        .ok()
}
