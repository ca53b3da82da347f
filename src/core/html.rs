// src/core/html.rs
// Selector queries over a parsed page, backed by `scraper`.

use std::collections::HashSet;

use scraper::{ElementRef, Html, Selector};

use super::sanitize::normalize_ws;
use crate::document::DocumentReader;

pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    pub fn parse(text: &str) -> Self {
        Self { html: Html::parse_document(text) }
    }

    fn first(&self, selector: &str) -> Option<ElementRef<'_>> {
        let sel = compile(selector)?;
        self.html.select(&sel).next()
    }
}

impl DocumentReader for HtmlDocument {
    fn count(&self, selector: &str) -> usize {
        compile(selector).map_or(0, |sel| self.html.select(&sel).count())
    }

    // Like `querySelector`: only the first `child` match of each element is inspected.
    fn count_containing(&self, selector: &str, child: &str, needle: &str) -> usize {
        let (Some(outer), Some(inner)) = (compile(selector), compile(child)) else {
            return 0;
        };
        self.html
            .select(&outer)
            .filter(|el| {
                el.select(&inner)
                    .next()
                    .is_some_and(|c| element_text(c).contains(needle))
            })
            .count()
    }

    fn count_in_section(&self, heading: &str, selector: &str) -> usize {
        let (Some(section), Some(h2), Some(item)) =
            (compile("section"), compile("h2"), compile(selector))
        else {
            return 0;
        };
        // A section matches on its own heading, not on one of a nested section.
        // Nested sections share cards; each card counts once.
        self.html
            .select(&section)
            .filter(|sec| {
                sec.select(&h2).any(|h| {
                    enclosing_section(h) == Some(*sec) && element_text(h).contains(heading)
                })
            })
            .flat_map(|sec| sec.select(&item).map(|card| card.id()))
            .collect::<HashSet<_>>()
            .len()
    }

    fn table_rows(&self) -> Option<usize> {
        let rows = compile("tbody tr")?;
        let table = self.first("table")?;
        Some(table.select(&rows).count())
    }

    fn text(&self, selector: &str) -> Option<String> {
        let el = self.first(selector)?;
        let txt = element_text(el);
        (!txt.is_empty()).then_some(txt)
    }

    fn attr(&self, selector: &str, name: &str) -> Option<String> {
        self.first(selector)?.value().attr(name).map(|v| s!(v))
    }
}

fn compile(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(sel) => Some(sel),
        Err(e) => {
            logd!("Html: invalid selector {:?}: {:?}", selector, e);
            None
        }
    }
}

fn enclosing_section(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == "section")
}

fn element_text(el: ElementRef<'_>) -> String {
    normalize_ws(&el.text().collect::<String>())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <h1>  Dra. Ana   Pérez </h1>
          <section>
            <h2>Artículos</h2>
            <div class="card"><span class="doi-label">DOI: 10.1/a</span></div>
            <div class="card"><span class="doi-label">ISSN 1234</span></div>
            <div class="card"><p>no label</p></div>
          </section>
          <section>
            <h2>Patentes registradas</h2>
            <div class="card">P1</div>
            <div class="card">P2</div>
          </section>
          <table>
            <thead><tr><th>Alumno</th></tr></thead>
            <tbody><tr><td>A</td></tr><tr><td>B</td></tr></tbody>
          </table>
          <a href="https://orcid.org/0000-0001-0000-0001">ORCID</a>
        </body></html>
    "#;

    #[test]
    fn counts_plain_selector() {
        let doc = HtmlDocument::parse(PAGE);
        assert_eq!(doc.count("section .card"), 5);
        assert_eq!(doc.count("audio"), 0);
    }

    #[test]
    fn count_containing_checks_first_child_text() {
        let doc = HtmlDocument::parse(PAGE);
        assert_eq!(doc.count_containing("section .card", ".doi-label", "DOI"), 1);
    }

    #[test]
    fn count_in_section_matches_heading_substring() {
        let doc = HtmlDocument::parse(PAGE);
        assert_eq!(doc.count_in_section("Patentes", ".card"), 2);
        assert_eq!(doc.count_in_section("Libros", ".card"), 0);
    }

    #[test]
    fn count_in_section_counts_nested_cards_once() {
        let doc = HtmlDocument::parse(
            r#"<section id="content">
                 <section><h2>Patentes</h2><div class="card">P1</div></section>
                 <section><h2>Libros</h2><div class="card">L1</div></section>
               </section>"#,
        );
        assert_eq!(doc.count(".card"), 2);
        assert_eq!(doc.count_in_section("Patentes", ".card"), 1);
        assert_eq!(doc.count_in_section("Libros", ".card"), 1);
    }

    #[test]
    fn table_rows_ignores_header_rows() {
        let doc = HtmlDocument::parse(PAGE);
        assert_eq!(doc.table_rows(), Some(2));
        assert_eq!(HtmlDocument::parse("<p>none</p>").table_rows(), None);
    }

    #[test]
    fn text_and_attr_lookups() {
        let doc = HtmlDocument::parse(PAGE);
        assert_eq!(doc.text("h1").as_deref(), Some("Dra. Ana Pérez"));
        assert_eq!(
            doc.attr("a[href*='orcid.org']", "href").as_deref(),
            Some("https://orcid.org/0000-0001-0000-0001")
        );
    }

    #[test]
    fn invalid_selector_is_zero() {
        let doc = HtmlDocument::parse(PAGE);
        assert_eq!(doc.count("section["), 0);
        assert_eq!(doc.text("[[["), None);
    }
}
