// src/record.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Flat snapshot of what the landing page shows at `captured_at`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricRecord {
    // Identity
    pub name: String,
    pub institution: String,
    pub title: String,
    pub orcid: String,
    pub google_scholar: String,

    // Counts
    pub publications: u32,
    pub patents: u32,
    pub theses: u32,
    pub books: u32,
    pub multimedia: u32,

    // Digital presence
    pub has_orcid: bool,
    pub has_cvu: bool,
    pub has_google_scholar: bool,
    pub has_research_gate: bool,
    pub has_linked_in: bool,

    pub captured_at: DateTime<Utc>,
}

impl MetricRecord {
    /// A record with no identity, zero counts and no presence.
    pub fn empty(captured_at: DateTime<Utc>) -> Self {
        Self {
            name: s!(),
            institution: s!(),
            title: s!(),
            orcid: s!(),
            google_scholar: s!(),
            publications: 0,
            patents: 0,
            theses: 0,
            books: 0,
            multimedia: 0,
            has_orcid: false,
            has_cvu: false,
            has_google_scholar: false,
            has_research_gate: false,
            has_linked_in: false,
            captured_at,
        }
    }

    pub fn count(&self, field: CountField) -> u32 {
        match field {
            CountField::Publications => self.publications,
            CountField::Patents => self.patents,
            CountField::Theses => self.theses,
            CountField::Books => self.books,
            CountField::Multimedia => self.multimedia,
        }
    }

    /// Equality of everything except the capture time.
    pub fn same_content(&self, other: &Self) -> bool {
        let aligned = Self { captured_at: other.captured_at, ..self.clone() };
        aligned == *other
    }
}

/// The five counted fields, in classification priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountField {
    Publications,
    Patents,
    Theses,
    Books,
    Multimedia,
}

impl CountField {
    pub const ALL: [CountField; 5] = [
        CountField::Publications,
        CountField::Patents,
        CountField::Theses,
        CountField::Books,
        CountField::Multimedia,
    ];

    /// Points one unit of this field moves the impact score.
    pub fn impact_weight(self) -> i64 {
        match self {
            CountField::Publications => 2,
            CountField::Patents => 3,
            CountField::Theses => 2,
            CountField::Books => 3,
            CountField::Multimedia => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CountField::Publications => "Publications",
            CountField::Patents => "IMPI patents",
            CountField::Theses => "Supervised theses",
            CountField::Books => "Books/Chapters",
            CountField::Multimedia => "Multimedia resources",
        }
    }
}
