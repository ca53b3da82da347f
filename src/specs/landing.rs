// src/specs/landing.rs

use chrono::{DateTime, Utc};

use crate::config::consts::*;
use crate::config::options::{ExtractOptions, Profile};
use crate::core::sanitize::{last_path_segment, query_param};
use crate::document::{DocumentReader, DocumentSource, EmptyDocument};
use crate::record::MetricRecord;

/// Reads a [`MetricRecord`] out of the landing page.
#[derive(Clone, Debug, Default)]
pub struct Extractor {
    profile: Profile,
    options: ExtractOptions,
}

impl Extractor {
    pub fn new(profile: Profile, options: ExtractOptions) -> Self {
        Self { profile, options }
    }

    /// Load the page from `source` and extract it. An unavailable page is
    /// logged and read as an empty document.
    pub fn extract_from(&self, source: &dyn DocumentSource, captured_at: DateTime<Utc>) -> MetricRecord {
        match source.load() {
            Ok(doc) => self.extract(doc.as_ref(), captured_at),
            Err(e) => {
                logw!("Extract: {} unavailable ({}), using empty document", source.describe(), e);
                self.extract(&EmptyDocument, captured_at)
            }
        }
    }

    pub fn extract(&self, doc: &dyn DocumentReader, captured_at: DateTime<Utc>) -> MetricRecord {
        let record = MetricRecord {
            name: self.name(doc),
            institution: self.profile.institution.clone(),
            title: self.profile.title.clone(),
            orcid: self.orcid(doc),
            google_scholar: self.google_scholar(doc),

            publications: count_publications(doc),
            patents: with_fallback(doc.count_in_section(PATENTS_HEADING, ".card"), self.options.patents_fallback),
            theses: count_theses(doc),
            books: with_fallback(doc.count_in_section(BOOKS_HEADING, ".card"), self.options.books_fallback),
            multimedia: count_multimedia(doc),

            has_orcid: has_link(doc, LINK_ORCID),
            has_cvu: has_link(doc, LINK_CVU),
            has_google_scholar: has_link(doc, LINK_SCHOLAR),
            has_research_gate: has_link(doc, LINK_RESEARCHGATE),
            has_linked_in: has_link(doc, LINK_LINKEDIN),

            captured_at,
        };
        logd!(
            "Extract: pub={} pat={} thesis={} books={} media={}",
            record.publications, record.patents, record.theses, record.books, record.multimedia
        );
        record
    }

    fn name(&self, doc: &dyn DocumentReader) -> String {
        if !self.profile.name.is_empty() {
            return self.profile.name.clone();
        }
        doc.text("h1").unwrap_or_default()
    }

    fn orcid(&self, doc: &dyn DocumentReader) -> String {
        if !self.profile.orcid.is_empty() {
            return self.profile.orcid.clone();
        }
        link_href(doc, LINK_ORCID)
            .and_then(|href| last_path_segment(&href))
            .unwrap_or_default()
    }

    fn google_scholar(&self, doc: &dyn DocumentReader) -> String {
        if !self.profile.google_scholar.is_empty() {
            return self.profile.google_scholar.clone();
        }
        link_href(doc, LINK_SCHOLAR)
            .and_then(|href| query_param(&href, "user"))
            .unwrap_or_default()
    }
}

/* ---------- helpers ---------- */

/// Cards whose DOI label actually mentions a DOI.
fn count_publications(doc: &dyn DocumentReader) -> u32 {
    to_count(doc.count_containing("section .card", ".doi-label", DOI_MARKER))
}

/// Body rows of the supervised-theses table.
fn count_theses(doc: &dyn DocumentReader) -> u32 {
    doc.table_rows().map(to_count).unwrap_or(0)
}

fn count_multimedia(doc: &dyn DocumentReader) -> u32 {
    to_count(doc.count("audio") + doc.count("img"))
}

fn with_fallback(found: usize, fallback: Option<u32>) -> u32 {
    match (found, fallback) {
        (0, Some(n)) => n,
        (n, _) => to_count(n),
    }
}

fn link_selector(fragment: &str) -> String {
    format!("a[href*='{fragment}']")
}

fn has_link(doc: &dyn DocumentReader, fragment: &str) -> bool {
    doc.count(&link_selector(fragment)) > 0
}

fn link_href(doc: &dyn DocumentReader, fragment: &str) -> Option<String> {
    doc.attr(&link_selector(fragment), "href")
}

fn to_count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
