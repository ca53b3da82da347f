// src/detect.rs
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::{CountField, MetricRecord};

pub const IMPACT_LIMIT: i64 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeKind {
    PublicationAddition,
    PatentAddition,
    ThesisAddition,
    BookAddition,
    MultimediaAddition,
    PublicationRemoval,
    PatentRemoval,
    ThesisRemoval,
    BookRemoval,
    MultimediaRemoval,
    Modification,
}

impl ChangeKind {
    pub fn addition(field: CountField) -> Self {
        match field {
            CountField::Publications => Self::PublicationAddition,
            CountField::Patents => Self::PatentAddition,
            CountField::Theses => Self::ThesisAddition,
            CountField::Books => Self::BookAddition,
            CountField::Multimedia => Self::MultimediaAddition,
        }
    }

    pub fn removal(field: CountField) -> Self {
        match field {
            CountField::Publications => Self::PublicationRemoval,
            CountField::Patents => Self::PatentRemoval,
            CountField::Theses => Self::ThesisRemoval,
            CountField::Books => Self::BookRemoval,
            CountField::Multimedia => Self::MultimediaRemoval,
        }
    }

    /// Single kind for a change: the first increased field in priority order,
    /// else the first decreased one, else `Modification`.
    ///
    /// Simultaneous changes collapse into one kind; see [`ChangeKind::all_between`]
    /// for the full picture.
    pub fn classify(before: &MetricRecord, after: &MetricRecord) -> Self {
        let fields = CountField::ALL;
        if let Some(f) = fields.iter().find(|f| after.count(**f) > before.count(**f)) {
            return Self::addition(*f);
        }
        if let Some(f) = fields.iter().find(|f| after.count(**f) < before.count(**f)) {
            return Self::removal(*f);
        }
        Self::Modification
    }

    /// One kind per moved count, in priority order. `[Modification]` when no
    /// count moved.
    pub fn all_between(before: &MetricRecord, after: &MetricRecord) -> Vec<Self> {
        let kinds: Vec<Self> = CountField::ALL
            .iter()
            .filter_map(|f| match after.count(*f).cmp(&before.count(*f)) {
                std::cmp::Ordering::Greater => Some(Self::addition(*f)),
                std::cmp::Ordering::Less => Some(Self::removal(*f)),
                std::cmp::Ordering::Equal => None,
            })
            .collect();
        if kinds.is_empty() { vec![Self::Modification] } else { kinds }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::PublicationAddition => "PUBLICATION_ADDITION",
            Self::PatentAddition => "PATENT_ADDITION",
            Self::ThesisAddition => "THESIS_ADDITION",
            Self::BookAddition => "BOOK_ADDITION",
            Self::MultimediaAddition => "MULTIMEDIA_ADDITION",
            Self::PublicationRemoval => "PUBLICATION_REMOVAL",
            Self::PatentRemoval => "PATENT_REMOVAL",
            Self::ThesisRemoval => "THESIS_REMOVAL",
            Self::BookRemoval => "BOOK_REMOVAL",
            Self::MultimediaRemoval => "MULTIMEDIA_REMOVAL",
            Self::Modification => "MODIFICATION",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Weighted sum of the signed count deltas, clamped to ±100.
pub fn impact(before: &MetricRecord, after: &MetricRecord) -> i32 {
    let raw: i64 = CountField::ALL
        .iter()
        .map(|f| (i64::from(after.count(*f)) - i64::from(before.count(*f))) * f.impact_weight())
        .sum();
    raw.clamp(-IMPACT_LIMIT, IMPACT_LIMIT) as i32
}

/// Before/after values of the five counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeDetails {
    pub publications_before: u32,
    pub publications_after: u32,
    pub patents_before: u32,
    pub patents_after: u32,
    pub theses_before: u32,
    pub theses_after: u32,
    pub books_before: u32,
    pub books_after: u32,
    pub multimedia_before: u32,
    pub multimedia_after: u32,
}

impl ChangeDetails {
    pub fn between(before: &MetricRecord, after: &MetricRecord) -> Self {
        Self {
            publications_before: before.publications,
            publications_after: after.publications,
            patents_before: before.patents,
            patents_after: after.patents,
            theses_before: before.theses,
            theses_after: after.theses,
            books_before: before.books,
            books_after: after.books,
            multimedia_before: before.multimedia,
            multimedia_after: after.multimedia,
        }
    }

    pub fn get(&self, field: CountField) -> (u32, u32) {
        match field {
            CountField::Publications => (self.publications_before, self.publications_after),
            CountField::Patents => (self.patents_before, self.patents_after),
            CountField::Theses => (self.theses_before, self.theses_after),
            CountField::Books => (self.books_before, self.books_after),
            CountField::Multimedia => (self.multimedia_before, self.multimedia_after),
        }
    }
}

/// One count that moved between two records.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldDelta {
    pub field: CountField,
    pub before: u32,
    pub after: u32,
}

impl FieldDelta {
    pub fn delta(&self) -> i64 {
        i64::from(self.after) - i64::from(self.before)
    }
}

/// A detected change. Never mutated once logged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub timestamp: DateTime<Utc>,
    pub kind: ChangeKind,
    pub details: ChangeDetails,
    pub impact: i32,
}

impl ChangeEvent {
    pub fn between(before: &MetricRecord, after: &MetricRecord, at: DateTime<Utc>) -> Self {
        Self {
            timestamp: at,
            kind: ChangeKind::classify(before, after),
            details: ChangeDetails::between(before, after),
            impact: impact(before, after),
        }
    }

    /// Every count that moved, in priority order.
    pub fn deltas(&self) -> Vec<FieldDelta> {
        CountField::ALL
            .iter()
            .map(|f| {
                let (before, after) = self.details.get(*f);
                FieldDelta { field: *f, before, after }
            })
            .filter(|d| d.before != d.after)
            .collect()
    }
}

/// Decides whether a fresh extraction is a change and, if so, describes it
/// against the baseline captured at startup.
///
/// The baseline is never re-armed: every event is measured from the startup
/// snapshot, while the trigger compares consecutive extractions.
#[derive(Clone, Debug)]
pub struct ChangeDetector {
    startup: MetricRecord,
}

impl ChangeDetector {
    pub fn new(startup: MetricRecord) -> Self {
        Self { startup }
    }

    pub fn startup_baseline(&self) -> &MetricRecord {
        &self.startup
    }

    /// `stored` is the baseline as read back from the store this tick; when
    /// it is missing the startup copy is used.
    pub fn check(
        &self,
        stored: Option<&MetricRecord>,
        previous: &MetricRecord,
        current: &MetricRecord,
        at: DateTime<Utc>,
    ) -> Option<ChangeEvent> {
        if previous.same_content(current) {
            return None;
        }
        let baseline = stored.unwrap_or(&self.startup);
        Some(ChangeEvent::between(baseline, current, at))
    }
}
