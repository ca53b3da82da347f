// src/report.rs
use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::detect::ChangeEvent;
use crate::record::{CountField, MetricRecord};
use crate::score::{self, EvaluationResult};

/// Everything shown in the panel and written to the export file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub investigator: String,
    pub institution: String,
    pub orcid: String,
    pub evaluation: EvaluationResult,
    pub recommendation: String,
    pub record: MetricRecord,
    /// Changes detected during this session.
    pub changes: Vec<ChangeEvent>,
    /// Changes detected across sessions, oldest first.
    pub history: Vec<ChangeEvent>,
    pub generated_at: DateTime<Utc>,
}

impl Report {
    pub fn build(
        record: &MetricRecord,
        changes: &[ChangeEvent],
        history: &[ChangeEvent],
        generated_at: DateTime<Utc>,
    ) -> Self {
        let evaluation = score::evaluate(record);
        Self {
            investigator: record.name.clone(),
            institution: record.institution.clone(),
            orcid: record.orcid.clone(),
            recommendation: s!(evaluation.level.recommendation()),
            evaluation,
            record: record.clone(),
            changes: changes.to_vec(),
            history: history.to_vec(),
            generated_at,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

/// `[#####-----]` for a percentage.
pub fn progress_bar(percent: u8, width: usize) -> String {
    let filled = (usize::from(percent.min(100)) * width + 50) / 100;
    let mut bar = String::with_capacity(width + 2);
    bar.push('[');
    bar.extend(std::iter::repeat_n('#', filled));
    bar.extend(std::iter::repeat_n('-', width - filled));
    bar.push(']');
    bar
}

/// `+2` / `-3` / `0`
pub fn signed(n: i32) -> String {
    if n > 0 { format!("+{n}") } else { n.to_string() }
}

/// Plain-text rendering of the report, grouped by dimension.
pub fn render_summary(report: &Report) -> String {
    let eval = &report.evaluation;
    let mut out = String::new();

    let _ = writeln!(out, "SNII/VIEP metrics evaluation");
    let _ = writeln!(out, "Investigator: {}", report.investigator);
    let _ = writeln!(out, "Institution:  {}", report.institution);
    let _ = writeln!(out, "ORCID:        {}", report.orcid);
    let _ = writeln!(out, "Generated:    {}", report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"));
    let _ = writeln!(out);
    let _ = writeln!(out, "Score: {}% {} ({})", eval.score, eval.level, report.recommendation);
    let _ = writeln!(out);

    let width = eval.dimensions.iter().map(|d| d.name.chars().count()).max().unwrap_or(0);
    for dim in &eval.dimensions {
        let pct = dim.percent();
        let _ = writeln!(out, "{:<width$}  {} {:>3}%", dim.name, progress_bar(pct, 20), pct);
        for c in &dim.criteria {
            let mark = if c.satisfied { '✓' } else { '✗' };
            let _ = writeln!(out, "  {mark} {}", c.name);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Current data");
    for field in CountField::ALL {
        let _ = writeln!(out, "  {}: {}", field.label(), report.record.count(field));
    }

    let _ = writeln!(out);
    if report.changes.is_empty() {
        let _ = writeln!(out, "No changes recorded yet.");
    } else {
        let _ = writeln!(out, "Detected changes: {}", report.changes.len());
        for c in &report.changes {
            let _ = writeln!(
                out,
                "  {} ({}) impact {}%",
                c.kind,
                c.timestamp.format("%Y-%m-%d %H:%M:%S"),
                signed(c.impact)
            );
        }
    }
    out
}
