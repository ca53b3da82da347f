//! # Page "specs" module
//!
//! This module hosts the **page-specific extraction specifications**: where the
//! ground truth lives in the landing page and how to read it into a
//! [`MetricRecord`](crate::record::MetricRecord).
//!
//! ## What lives here
//! - **Selector choice** for each counted field (cards with a DOI label, cards
//!   under the "Patentes"/"Libros" headings, thesis table rows, media elements).
//! - **Identity resolution**: configured profile first, page content second.
//! - **Tolerant extraction**: a page that is missing or lacks a section yields
//!   zeros and `false`, never an error.
//!
//! ## What does **not** live here
//! - **Persistence** (`store`), **change classification** (`detect`),
//!   **scoring** (`score`) or any GUI concern.
//!
//! ## Typical call chain
//! ```text
//! Evaluator::tick → DocumentSource::load → specs::landing::Extractor::extract
//!                                      ↘  MetricRecord
//!                    detect::ChangeEvent::between (outside of specs)
//! ```
//!
//! ## Testing notes
//! - Specs are tested **offline** against inline HTML fixtures through
//!   `core::html::HtmlDocument`.
pub mod landing;

pub use landing::Extractor;
