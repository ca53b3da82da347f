// src/score.rs
//! Weighted SNII/VIEP rubric.
//!
//! Seven fixed dimensions, each made of weighted boolean criteria over a
//! [`MetricRecord`]. Evaluation is a pure function of the record.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::MetricRecord;

struct CriterionSpec {
    name: &'static str,
    weight: u32,
    check: fn(&MetricRecord) -> bool,
}

struct DimensionSpec {
    name: &'static str,
    weight: u32,
    criteria: &'static [CriterionSpec],
}

static RUBRIC: &[DimensionSpec] = &[
    DimensionSpec {
        name: "Global Identity",
        weight: 15,
        criteria: &[
            CriterionSpec { name: "ORCID", weight: 15, check: |r| r.has_orcid },
            CriterionSpec { name: "CVU SNII", weight: 15, check: |r| r.has_cvu },
            CriterionSpec { name: "Google Scholar", weight: 10, check: |r| r.has_google_scholar },
        ],
    },
    DimensionSpec {
        name: "Publications",
        weight: 20,
        criteria: &[
            CriterionSpec { name: "At least 3 with DOI", weight: 20, check: |r| r.publications >= 3 },
        ],
    },
    DimensionSpec {
        name: "Books/Chapters",
        weight: 15,
        criteria: &[
            CriterionSpec { name: "At least 1 with ISBN", weight: 15, check: |r| r.books >= 1 },
        ],
    },
    DimensionSpec {
        name: "Human Resources Training",
        weight: 15,
        criteria: &[
            CriterionSpec { name: "At least 2 supervised theses", weight: 15, check: |r| r.theses >= 2 },
        ],
    },
    DimensionSpec {
        name: "Patents/Innovation",
        weight: 15,
        criteria: &[
            CriterionSpec { name: "At least 1 registered patent", weight: 15, check: |r| r.patents >= 1 },
        ],
    },
    DimensionSpec {
        name: "Multimedia",
        weight: 10,
        criteria: &[
            CriterionSpec {
                name: "Landing page with multimedia content",
                weight: 10,
                check: |r| r.multimedia >= 5,
            },
        ],
    },
    DimensionSpec {
        name: "Digital Presence",
        weight: 10,
        criteria: &[
            CriterionSpec { name: "ResearchGate", weight: 5, check: |r| r.has_research_gate },
            CriterionSpec { name: "LinkedIn", weight: 5, check: |r| r.has_linked_in },
        ],
    },
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    pub name: String,
    pub satisfied: bool,
    pub weight: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    pub name: String,
    pub weight: u32,
    pub criteria: Vec<Criterion>,
}

impl Dimension {
    /// Satisfied weight over total weight, as a percentage in [0, 100].
    pub fn score(&self) -> f64 {
        let total: u32 = self.criteria.iter().map(|c| c.weight).sum();
        if total == 0 {
            return 0.0;
        }
        let met: u32 = self.criteria.iter().filter(|c| c.satisfied).map(|c| c.weight).sum();
        f64::from(met) / f64::from(total) * 100.0
    }

    /// `score()` rounded for display.
    pub fn percent(&self) -> u8 {
        self.score().round().clamp(0.0, 100.0) as u8
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Level {
    Complies,
    Partial,
    InProgress,
}

impl Level {
    pub fn from_score(score: u8) -> Self {
        match score {
            70.. => Level::Complies,
            50.. => Level::Partial,
            _ => Level::InProgress,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Level::Complies => "COMPLIES",
            Level::Partial => "PARTIAL",
            Level::InProgress => "IN_PROGRESS",
        }
    }

    /// Display colour as `#rrggbb`.
    pub fn color(self) -> &'static str {
        match self {
            Level::Complies => "#51cf66",
            Level::Partial => "#ffd43b",
            Level::InProgress => "#ff6b6b",
        }
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Level::Complies => (0x51, 0xcf, 0x66),
            Level::Partial => (0xff, 0xd4, 0x3b),
            Level::InProgress => (0xff, 0x6b, 0x6b),
        }
    }

    pub fn recommendation(self) -> &'static str {
        match self {
            Level::Complies => "Ready for SNII/VIEP evaluation",
            Level::Partial => "Complete the missing fields",
            Level::InProgress => "Add more academic output",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub dimensions: Vec<Dimension>,
    pub score: u8,
    pub level: Level,
}

/// Score `record` against the rubric.
pub fn evaluate(record: &MetricRecord) -> EvaluationResult {
    let dimensions: Vec<Dimension> = RUBRIC
        .iter()
        .map(|d| Dimension {
            name: s!(d.name),
            weight: d.weight,
            criteria: d
                .criteria
                .iter()
                .map(|c| Criterion { name: s!(c.name), satisfied: (c.check)(record), weight: c.weight })
                .collect(),
        })
        .collect();

    let score = aggregate(&dimensions);
    EvaluationResult { dimensions, score, level: Level::from_score(score) }
}

/// Weight-normalized average of the dimension scores, rounded.
fn aggregate(dimensions: &[Dimension]) -> u8 {
    let total_weight: u32 = dimensions.iter().map(|d| d.weight).sum();
    if total_weight == 0 {
        return 0;
    }
    let weighted: f64 = dimensions
        .iter()
        .map(|d| d.score() / 100.0 * f64::from(d.weight))
        .sum();
    (weighted / f64::from(total_weight) * 100.0).round().clamp(0.0, 100.0) as u8
}
