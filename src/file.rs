// src/file.rs

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;

use crate::config::consts::{EXPORT_EXT, EXPORT_PREFIX};
use crate::error::{MetricsError, Result};
use crate::report::Report;

/// `metricas_snii_viep_<YYYY-MM-DD>.json`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("{EXPORT_PREFIX}{}.{EXPORT_EXT}", date.format("%Y-%m-%d"))
}

/// Write `report` as pretty JSON into `dir`, named after its generation date.
/// Returns the final path written to.
pub fn export_report(report: &Report, dir: &Path) -> Result<PathBuf> {
    if !dir.as_os_str().is_empty() {
        ensure_directory(dir)?;
    }
    let path = dir.join(export_file_name(report.generated_at.date_naive()));
    let contents = report.to_json()?;
    fs::write(&path, contents)?;
    logf!("Export: wrote {} ({} changes)", path.display(), report.changes.len());
    Ok(path)
}

pub fn normalize_separators(p: &str) -> String {
    let sep = std::path::MAIN_SEPARATOR;
    p.chars().map(|c| if c == '/' || c == '\\' { sep } else { c }).collect()
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(MetricsError::Io(std::io::Error::other(format!(
            "Path exists but is not a directory: {}",
            dir.display()
        ))));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}
