// src/document.rs
//! Read-only view of the landing page.
//!
//! The extractor only needs a handful of structural queries, so the page is
//! reached through [`DocumentReader`] and a fresh reader is obtained on every
//! tick from a [`DocumentSource`]. The HTML-backed reader lives in
//! `core::html`; [`EmptyDocument`] stands in when the page cannot be loaded.

use std::{fs, path::PathBuf};

use crate::core::html::HtmlDocument;
use crate::error::{MetricsError, Result};

/// Structural queries over a materialized document tree.
///
/// Selectors are CSS selectors. An invalid selector never panics: counts are
/// zero and lookups are `None`.
pub trait DocumentReader {
    /// Number of elements matching `selector`.
    fn count(&self, selector: &str) -> usize;

    /// Number of elements matching `selector` that have a descendant matching
    /// `child` whose text contains `needle`.
    fn count_containing(&self, selector: &str, child: &str, needle: &str) -> usize;

    /// Number of distinct elements matching `selector` inside any `<section>`
    /// whose own `<h2>` heading (not one of a nested section) contains `heading`.
    fn count_in_section(&self, heading: &str, selector: &str) -> usize;

    /// Body rows of the first `<table>`, or `None` when there is no table.
    fn table_rows(&self) -> Option<usize>;

    /// Whitespace-normalized text of the first element matching `selector`.
    fn text(&self, selector: &str) -> Option<String>;

    /// Attribute `name` of the first element matching `selector`.
    fn attr(&self, selector: &str, name: &str) -> Option<String>;
}

/// A document with nothing in it.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyDocument;

impl DocumentReader for EmptyDocument {
    fn count(&self, _selector: &str) -> usize { 0 }
    fn count_containing(&self, _selector: &str, _child: &str, _needle: &str) -> usize { 0 }
    fn count_in_section(&self, _heading: &str, _selector: &str) -> usize { 0 }
    fn table_rows(&self) -> Option<usize> { None }
    fn text(&self, _selector: &str) -> Option<String> { None }
    fn attr(&self, _selector: &str, _name: &str) -> Option<String> { None }
}

/// Produces a reader over the current state of the page.
pub trait DocumentSource {
    fn load(&self) -> Result<Box<dyn DocumentReader>>;

    /// Short label for logs and the status line.
    fn describe(&self) -> String {
        s!("document")
    }
}

impl<F> DocumentSource for F
where
    F: Fn() -> Result<Box<dyn DocumentReader>>,
{
    fn load(&self) -> Result<Box<dyn DocumentReader>> {
        self()
    }
}

/// An HTML file on disk, re-read and re-parsed on every load.
#[derive(Clone, Debug)]
pub struct HtmlFile {
    path: PathBuf,
}

impl HtmlFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DocumentSource for HtmlFile {
    fn load(&self) -> Result<Box<dyn DocumentReader>> {
        let text = fs::read_to_string(&self.path).map_err(|e| {
            MetricsError::ExtractionUnavailable(format!("{}: {}", self.path.display(), e))
        })?;
        Ok(Box::new(HtmlDocument::parse(&text)))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
