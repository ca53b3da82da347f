// tests/evaluator.rs
//
// The service end to end: injected page, store and clock, driven tick by tick.
mod common;

use std::time::Duration;

use common::{start, FailingStore, LivePage, Page, SharedStore};
use metricas::config::consts::{KEY_BASELINE, KEY_BASELINE_AT, KEY_CHANGES, KEY_HISTORY};
use metricas::config::options::AppOptions;
use metricas::core::clock::{Clock, ManualClock};
use metricas::detect::{ChangeEvent, ChangeKind};
use metricas::document::{DocumentReader, HtmlFile};
use metricas::error::{MetricsError, Result};
use metricas::record::MetricRecord;
use metricas::score::Level;
use metricas::store::{KeyValueStore, MemoryStore};
use metricas::Evaluator;

fn evaluator(page: &LivePage, kv: Box<dyn KeyValueStore>, clock: &ManualClock) -> Evaluator {
    Evaluator::from_options(page.source(), kv, Box::new(clock.clone()), &AppOptions::default())
}

fn pubs(n: u32) -> Page {
    Page { publications: n, ..Page::default() }
}

#[test]
fn startup_scenario_scores_in_progress() {
    let page = LivePage::new(&Page {
        publications: 2,
        theses: 1,
        images: 2,
        audio: 1,
        ..Page::default()
    });
    let clock = ManualClock::new(start());
    let ev = evaluator(&page, Box::new(MemoryStore::new()), &clock);

    let r = ev.record();
    assert_eq!((r.publications, r.patents, r.theses, r.books, r.multimedia), (2, 0, 1, 0, 3));
    assert_eq!(r.name, "Dra. Elena Ruiz");
    assert_eq!(r.orcid, "0000-0002-7153-2202");
    assert_eq!(r.google_scholar, "xKa-ixAAAAAJ");
    assert_eq!(r.captured_at, start());

    let eval = ev.evaluate();
    assert_eq!(eval.score, 25);
    assert_eq!(eval.level, Level::InProgress);
    assert_eq!(eval, ev.evaluate());
}

#[test]
fn baseline_is_persisted_at_startup() {
    let page = LivePage::new(&pubs(3));
    let store = SharedStore::default();
    let clock = ManualClock::new(start());
    let _ev = evaluator(&page, Box::new(store.clone()), &clock);

    let stored: MetricRecord = serde_json::from_str(&store.raw(KEY_BASELINE).unwrap()).unwrap();
    assert_eq!(stored.publications, 3);
    assert!(store.raw(KEY_BASELINE_AT).unwrap().starts_with("2026-03-14T09:30:00"));
    assert_eq!(store.raw(KEY_CHANGES).as_deref(), Some("[]"));
}

#[test]
fn unchanged_page_fires_nothing() {
    let page = LivePage::new(&pubs(3));
    let clock = ManualClock::new(start());
    let mut ev = evaluator(&page, Box::new(MemoryStore::new()), &clock);

    for _ in 0..3 {
        clock.advance(Duration::from_secs(5));
        assert_eq!(ev.tick(), None);
    }
    assert!(ev.changes().is_empty());
}

#[test]
fn added_publication_is_logged_and_persisted() {
    let page = LivePage::new(&pubs(3));
    let store = SharedStore::default();
    let clock = ManualClock::new(start());
    let mut ev = evaluator(&page, Box::new(store.clone()), &clock);

    page.set(&pubs(4));
    clock.advance(Duration::from_secs(5));
    let change = ev.tick().unwrap();

    assert_eq!(change.kind, ChangeKind::PublicationAddition);
    assert_eq!(change.impact, 2);
    assert_eq!(change.timestamp, clock.now());
    assert_eq!(ev.record().publications, 4);
    assert_eq!(ev.changes(), &[change.clone()]);

    let persisted: Vec<ChangeEvent> = serde_json::from_str(&store.raw(KEY_CHANGES).unwrap()).unwrap();
    assert_eq!(persisted, vec![change.clone()]);
    let history: Vec<ChangeEvent> = serde_json::from_str(&store.raw(KEY_HISTORY).unwrap()).unwrap();
    assert_eq!(history, vec![change]);

    // the live record now matches the page: quiet again
    clock.advance(Duration::from_secs(5));
    assert_eq!(ev.tick(), None);
    assert_eq!(ev.changes().len(), 1);
}

#[test]
fn baseline_is_not_rearmed_after_a_change() {
    let page = LivePage::new(&pubs(3));
    let clock = ManualClock::new(start());
    let mut ev = evaluator(&page, Box::new(MemoryStore::new()), &clock);

    page.set(&pubs(4));
    assert_eq!(ev.tick().map(|c| c.impact), Some(2));

    page.set(&pubs(5));
    let second = ev.tick().unwrap();
    assert_eq!(second.kind, ChangeKind::PublicationAddition);
    assert_eq!(second.impact, 4);
    assert_eq!(second.details.publications_before, 3);
    assert_eq!(ev.baseline().publications, 3);

    // back to the startup value: a change between ticks, none against the baseline
    page.set(&pubs(3));
    let third = ev.tick().unwrap();
    assert_eq!(third.kind, ChangeKind::Modification);
    assert_eq!(third.impact, 0);
}

#[test]
fn removed_thesis_is_negative() {
    let page = LivePage::new(&Page { theses: 2, ..Page::default() });
    let clock = ManualClock::new(start());
    let mut ev = evaluator(&page, Box::new(MemoryStore::new()), &clock);

    page.set(&Page { theses: 1, ..Page::default() });
    let change = ev.tick().unwrap();
    assert_eq!(change.kind, ChangeKind::ThesisRemoval);
    assert_eq!(change.impact, -2);
}

#[test]
fn link_change_is_a_modification() {
    let page = LivePage::new(&Page::default());
    let clock = ManualClock::new(start());
    let mut ev = evaluator(&page, Box::new(MemoryStore::new()), &clock);
    let before = ev.evaluate().score;

    page.set(&Page { linked_in: false, ..Page::default() });
    let change = ev.tick().unwrap();
    assert_eq!(change.kind, ChangeKind::Modification);
    assert_eq!(change.impact, 0);
    assert_eq!(ev.evaluate().score, before - 5);
}

#[test]
fn stored_baseline_is_read_back_each_tick() {
    let page = LivePage::new(&pubs(3));
    let store = SharedStore::default();
    let clock = ManualClock::new(start());
    let mut ev = evaluator(&page, Box::new(store.clone()), &clock);

    let older = MetricRecord { publications: 0, ..ev.record().clone() };
    store.put(KEY_BASELINE, &serde_json::to_string(&older).unwrap());

    page.set(&pubs(4));
    let change = ev.tick().unwrap();
    assert_eq!(change.details.publications_before, 0);
    assert_eq!(change.impact, 8);
}

#[test]
fn malformed_stored_baseline_falls_back_to_startup_copy() {
    let page = LivePage::new(&pubs(3));
    let store = SharedStore::default();
    let clock = ManualClock::new(start());
    let mut ev = evaluator(&page, Box::new(store.clone()), &clock);

    store.put(KEY_BASELINE, "{\"publications\": ");
    page.set(&pubs(4));
    let change = ev.tick().unwrap();
    assert_eq!(change.details.publications_before, 3);
    assert_eq!(change.impact, 2);
    assert!(!ev.storage_degraded());
}

#[test]
fn storage_failure_degrades_to_memory() {
    let page = LivePage::new(&pubs(3));
    let clock = ManualClock::new(start());
    let mut ev = evaluator(&page, Box::new(FailingStore), &clock);
    assert!(ev.storage_degraded());

    page.set(&pubs(4));
    let change = ev.tick().unwrap();
    assert_eq!(change.kind, ChangeKind::PublicationAddition);
    assert_eq!(change.impact, 2);

    page.set(&pubs(2));
    let change = ev.tick().unwrap();
    assert_eq!(change.kind, ChangeKind::PublicationRemoval);
    assert_eq!(ev.changes().len(), 2);
    assert_eq!(ev.history().len(), 2);
}

#[test]
fn history_survives_restarts() {
    let store = SharedStore::default();
    let clock = ManualClock::new(start());

    let page = LivePage::new(&pubs(1));
    let mut first = evaluator(&page, Box::new(store.clone()), &clock);
    page.set(&pubs(2));
    first.tick().unwrap();
    drop(first);

    clock.advance(Duration::from_secs(3600));
    let mut second = evaluator(&page, Box::new(store.clone()), &clock);
    assert!(second.changes().is_empty());
    assert_eq!(second.history().len(), 1);
    assert_eq!(second.baseline().publications, 2);

    // the previous session's log is cleared as soon as the new one starts
    assert_eq!(store.raw(KEY_CHANGES).as_deref(), Some("[]"));
    let history: Vec<ChangeEvent> = serde_json::from_str(&store.raw(KEY_HISTORY).unwrap()).unwrap();
    assert_eq!(history.len(), 1);

    page.set(&Page { publications: 2, patents: 1, ..Page::default() });
    let change = second.tick().unwrap();
    assert_eq!(change.kind, ChangeKind::PatentAddition);
    assert_eq!(change.impact, 3);
    assert_eq!(second.history().len(), 2);

    let history: Vec<ChangeEvent> = serde_json::from_str(&store.raw(KEY_HISTORY).unwrap()).unwrap();
    assert_eq!(history.len(), 2);
    let changes: Vec<ChangeEvent> = serde_json::from_str(&store.raw(KEY_CHANGES).unwrap()).unwrap();
    assert_eq!(changes.len(), 1);
}

#[test]
fn history_keeps_only_the_newest_events() {
    let store = SharedStore::default();
    let clock = ManualClock::new(start());
    let mut options = AppOptions::default();
    options.store.history_limit = 2;

    let page = LivePage::new(&pubs(1));
    let mut ev = Evaluator::from_options(page.source(), Box::new(store.clone()), Box::new(clock.clone()), &options);
    for n in 2..=4 {
        page.set(&pubs(n));
        clock.advance(Duration::from_secs(5));
        ev.tick().unwrap();
    }
    assert_eq!(ev.changes().len(), 3);
    let kept: Vec<u32> = ev.history().iter().map(|c| c.details.publications_after).collect();
    assert_eq!(kept, vec![3, 4]);

    let persisted: Vec<ChangeEvent> = serde_json::from_str(&store.raw(KEY_HISTORY).unwrap()).unwrap();
    assert_eq!(persisted.len(), 2);

    // a tighter limit also trims what is restored at startup
    options.store.history_limit = 1;
    let restarted = Evaluator::from_options(page.source(), Box::new(store.clone()), Box::new(clock.clone()), &options);
    assert_eq!(restarted.history().len(), 1);
    assert_eq!(restarted.history()[0].details.publications_after, 4);
    let persisted: Vec<ChangeEvent> = serde_json::from_str(&store.raw(KEY_HISTORY).unwrap()).unwrap();
    assert_eq!(persisted.len(), 1);
}

#[test]
fn missing_page_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let clock = ManualClock::new(start());
    let ev = Evaluator::from_options(
        Box::new(HtmlFile::new(dir.path().join("absent.html"))),
        Box::new(MemoryStore::new()),
        Box::new(clock.clone()),
        &AppOptions::default(),
    );
    assert!(ev.record().same_content(&MetricRecord::empty(start())));
    assert_eq!(ev.evaluate().score, 0);
}

#[test]
fn page_that_comes_back_is_detected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("index.html");
    let clock = ManualClock::new(start());
    let mut ev = Evaluator::from_options(
        Box::new(HtmlFile::new(&path)),
        Box::new(MemoryStore::new()),
        Box::new(clock.clone()),
        &AppOptions::default(),
    );

    std::fs::write(&path, Page { books: 2, ..Page::default() }.html()).unwrap();
    clock.advance(Duration::from_secs(5));
    let change = ev.tick().unwrap();
    assert_eq!(change.kind, ChangeKind::BookAddition);
    assert_eq!(change.impact, 6);
    assert!(ev.record().has_orcid);
}

#[test]
fn closure_sources_can_fail_between_ticks() {
    use std::cell::Cell;
    use std::rc::Rc;
    use metricas::core::html::HtmlDocument;

    let up = Rc::new(Cell::new(true));
    let flag = Rc::clone(&up);
    let html = pubs(3).html();
    let source = move || -> Result<Box<dyn DocumentReader>> {
        if flag.get() {
            Ok(Box::new(HtmlDocument::parse(&html)))
        } else {
            Err(MetricsError::ExtractionUnavailable("offline".into()))
        }
    };

    let clock = ManualClock::new(start());
    let mut ev = Evaluator::from_options(
        Box::new(source),
        Box::new(MemoryStore::new()),
        Box::new(clock.clone()),
        &AppOptions::default(),
    );

    up.set(false);
    let change = ev.tick().unwrap();
    assert_eq!(change.kind, ChangeKind::PublicationRemoval);
    assert_eq!(change.impact, -6);
    assert_eq!(ev.record().publications, 0);
}
