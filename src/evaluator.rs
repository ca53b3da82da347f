// src/evaluator.rs
use std::path::{Path, PathBuf};

use crate::config::options::AppOptions;
use crate::core::clock::Clock;
use crate::detect::{ChangeDetector, ChangeEvent};
use crate::document::DocumentSource;
use crate::error::Result;
use crate::file;
use crate::record::MetricRecord;
use crate::report::Report;
use crate::score::{self, EvaluationResult};
use crate::specs::Extractor;
use crate::store::{KeyValueStore, SnapshotStore};

/// The metrics service: owns the live record, the startup baseline and the
/// change logs. Constructed by the hosting front end with its collaborators.
pub struct Evaluator {
    source: Box<dyn DocumentSource>,
    store: SnapshotStore,
    clock: Box<dyn Clock>,
    extractor: Extractor,
    detector: ChangeDetector,
    record: MetricRecord,
    changes: Vec<ChangeEvent>,
    history: Vec<ChangeEvent>,
    history_limit: usize,
}

impl Evaluator {
    /// Extract the page once, store it as the baseline, restore the persisted
    /// history and start an empty session log.
    ///
    /// `history_limit` caps the cross-session history (0 keeps everything).
    pub fn new(
        source: Box<dyn DocumentSource>,
        kv: Box<dyn KeyValueStore>,
        clock: Box<dyn Clock>,
        extractor: Extractor,
        history_limit: usize,
    ) -> Self {
        let mut store = SnapshotStore::new(kv);
        let now = clock.now();
        let record = extractor.extract_from(source.as_ref(), now);

        if !store.save_baseline(&record, now) {
            logw!("Init: baseline kept in memory only");
        }
        let mut history = store.load_history();
        trim_history(&mut history, history_limit);
        if !store.save_log(&[], &history) {
            logw!("Init: change log kept in memory only");
        }

        logf!(
            "Init: source={} pub={} pat={} thesis={} books={} media={} history={}",
            source.describe(),
            record.publications,
            record.patents,
            record.theses,
            record.books,
            record.multimedia,
            history.len()
        );

        Self {
            source,
            store,
            clock,
            extractor,
            detector: ChangeDetector::new(record.clone()),
            record,
            changes: Vec::new(),
            history,
            history_limit,
        }
    }

    pub fn from_options(
        source: Box<dyn DocumentSource>,
        kv: Box<dyn KeyValueStore>,
        clock: Box<dyn Clock>,
        options: &AppOptions,
    ) -> Self {
        let extractor = Extractor::new(options.profile.clone(), options.extract.clone());
        Self::new(source, kv, clock, extractor, options.store.history_limit)
    }

    /// One detection pass: re-extract, and log a change if the page moved
    /// since the previous pass.
    pub fn tick(&mut self) -> Option<ChangeEvent> {
        let now = self.clock.now();
        let stored = self.store.load_baseline();
        let fresh = self.extractor.extract_from(self.source.as_ref(), now);
        let previous = std::mem::replace(&mut self.record, fresh);

        let event = self.detector.check(stored.as_ref(), &previous, &self.record, now)?;
        logf!("Detect: {} impact={}", event.kind, event.impact);

        self.changes.push(event.clone());
        self.history.push(event.clone());
        trim_history(&mut self.history, self.history_limit);
        if !self.store.save_log(&self.changes, &self.history) {
            logw!("Detect: change log kept in memory only");
        }
        Some(event)
    }

    pub fn evaluate(&self) -> EvaluationResult {
        score::evaluate(&self.record)
    }

    pub fn report(&self) -> Report {
        Report::build(&self.record, &self.changes, &self.history, self.clock.now())
    }

    /// Write the current report into `dir`.
    pub fn export(&self, dir: &Path) -> Result<PathBuf> {
        file::export_report(&self.report(), dir)
    }

    pub fn record(&self) -> &MetricRecord {
        &self.record
    }

    pub fn baseline(&self) -> &MetricRecord {
        self.detector.startup_baseline()
    }

    pub fn changes(&self) -> &[ChangeEvent] {
        &self.changes
    }

    pub fn history(&self) -> &[ChangeEvent] {
        &self.history
    }

    /// True when the store has failed and state lives in memory only.
    pub fn storage_degraded(&self) -> bool {
        self.store.is_degraded()
    }

    pub fn source_label(&self) -> String {
        self.source.describe()
    }
}

/// Drop the oldest events beyond `limit` (0 means no limit).
fn trim_history(history: &mut Vec<ChangeEvent>, limit: usize) {
    if limit > 0 && history.len() > limit {
        let excess = history.len() - limit;
        history.drain(..excess);
    }
}
