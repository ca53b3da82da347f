// tests/common/mod.rs
//
// Landing-page fixtures and injectable collaborators shared by the
// integration tests.
#![allow(dead_code)]

use std::{cell::RefCell, rc::Rc};

use chrono::{DateTime, TimeZone, Utc};
use metricas::core::html::HtmlDocument;
use metricas::document::{DocumentReader, DocumentSource};
use metricas::error::{MetricsError, Result};
use metricas::record::MetricRecord;
use metricas::store::{KeyValueStore, MemoryStore};

pub fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap()
}

/// What the fixture page shows.
#[derive(Clone, Debug)]
pub struct Page {
    pub name: &'static str,
    pub publications: u32,
    pub patents: u32,
    pub theses: u32,
    pub books: u32,
    pub images: u32,
    pub audio: u32,
    pub orcid: bool,
    pub cvu: bool,
    pub scholar: bool,
    pub research_gate: bool,
    pub linked_in: bool,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            name: "Dra. Elena Ruiz",
            publications: 0,
            patents: 0,
            theses: 0,
            books: 0,
            images: 0,
            audio: 0,
            orcid: true,
            cvu: true,
            scholar: true,
            research_gate: true,
            linked_in: true,
        }
    }
}

impl Page {
    pub fn html(&self) -> String {
        let mut h = String::from("<!DOCTYPE html><html><body>\n");
        h.push_str(&format!("<h1>{}</h1>\n", self.name));

        h.push_str("<section><h2>Publicaciones</h2>\n");
        for i in 0..self.publications {
            h.push_str(&format!(
                r#"<div class="card"><span class="doi-label">DOI: 10.1000/{i}</span></div>"#
            ));
        }
        // a card without a DOI never counts
        h.push_str(r#"<div class="card"><span class="doi-label">En prensa</span></div>"#);
        h.push_str("</section>\n");

        h.push_str("<section><h2>Patentes</h2>\n");
        for i in 0..self.patents {
            h.push_str(&format!(r#"<div class="card">MX/a/2024/{i}</div>"#));
        }
        h.push_str("</section>\n");

        h.push_str("<section><h2>Libros y Capítulos</h2>\n");
        for i in 0..self.books {
            h.push_str(&format!(r#"<div class="card">ISBN 978-{i}</div>"#));
        }
        h.push_str("</section>\n");

        h.push_str("<table><thead><tr><th>Tesista</th></tr></thead><tbody>\n");
        for i in 0..self.theses {
            h.push_str(&format!("<tr><td>Alumno {i}</td></tr>"));
        }
        h.push_str("</tbody></table>\n");

        for i in 0..self.images {
            h.push_str(&format!(r#"<img src="img{i}.png">"#));
        }
        for i in 0..self.audio {
            h.push_str(&format!(r#"<audio src="clip{i}.mp3"></audio>"#));
        }

        let links = [
            (self.orcid, "https://orcid.org/0000-0002-7153-2202"),
            (self.cvu, "https://example.mx/cvu/123456"),
            (self.scholar, "https://scholar.google.com/citations?user=xKa-ixAAAAAJ"),
            (self.research_gate, "https://www.researchgate.net/profile/E-Ruiz"),
            (self.linked_in, "https://www.linkedin.com/in/eruiz"),
        ];
        for (present, href) in links {
            if present {
                h.push_str(&format!(r#"<a href="{href}">link</a>"#));
            }
        }

        h.push_str("</body></html>\n");
        h
    }
}

/// A page the test can rewrite between ticks.
#[derive(Clone)]
pub struct LivePage(Rc<RefCell<String>>);

impl LivePage {
    pub fn new(page: &Page) -> Self {
        Self(Rc::new(RefCell::new(page.html())))
    }

    pub fn set(&self, page: &Page) {
        *self.0.borrow_mut() = page.html();
    }

    pub fn source(&self) -> Box<dyn DocumentSource> {
        let html = Rc::clone(&self.0);
        Box::new(move || -> Result<Box<dyn DocumentReader>> {
            Ok(Box::new(HtmlDocument::parse(&html.borrow())))
        })
    }
}

/// A memory store the test can inspect while the evaluator owns it.
#[derive(Clone, Default)]
pub struct SharedStore(pub Rc<RefCell<MemoryStore>>);

impl SharedStore {
    pub fn raw(&self, key: &str) -> Option<String> {
        self.0.borrow().get(key).unwrap()
    }

    pub fn put(&self, key: &str, value: &str) {
        self.0.borrow_mut().set(key, value).unwrap();
    }
}

impl KeyValueStore for SharedStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.0.borrow().get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.0.borrow_mut().set(key, value)
    }
}

/// A store whose every access fails, like a full or blocked storage.
pub struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Err(MetricsError::StorageUnavailable { key: key.into(), reason: "blocked".into() })
    }

    fn set(&mut self, key: &str, _value: &str) -> Result<()> {
        Err(MetricsError::StorageUnavailable { key: key.into(), reason: "quota exceeded".into() })
    }
}

/// A record with the given counts and every presence flag set.
pub fn record(publications: u32, patents: u32, theses: u32, books: u32, multimedia: u32) -> MetricRecord {
    MetricRecord {
        name: "Dra. Elena Ruiz".into(),
        publications,
        patents,
        theses,
        books,
        multimedia,
        has_orcid: true,
        has_cvu: true,
        has_google_scholar: true,
        has_research_gate: true,
        has_linked_in: true,
        ..MetricRecord::empty(start())
    }
}
