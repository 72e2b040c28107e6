#![forbid(unsafe_code)]

//! End-to-end browsing: search narrows the view, the window slices it, and
//! focus moves through it.

use serde_json::{Value, json};
use shelf::prelude::*;
use shelf::{GridNavigationController, GridWindow, WindowRange};

fn catalog(n: usize) -> Vec<Value> {
    (0..n)
        .map(|i| {
            let title = if i % 10 == 0 {
                format!("Mars Chronicle {i}")
            } else {
                format!("Volume {i}")
            };
            json!({ "title": title, "author": { "name": format!("Author {}", i % 7) }, "id": i })
        })
        .collect()
}

fn ids(browser: &Browser<Value>, range: &WindowRange) -> Vec<u64> {
    browser
        .window_records(range)
        .filter_map(|(_, record)| record["id"].as_u64())
        .collect()
}

#[test]
fn reference_window_over_unfiltered_catalog() {
    let mut browser =
        Browser::new(catalog(100), SearchOptions::new(["title"]).unwrap(), 50.0).unwrap();
    let range = browser.visible(500.0, 1000.0);
    assert_eq!(range.start(), 17);
    assert_eq!(range.end_inclusive(), Some(33));
    assert_eq!(range.total_extent, 5000.0);
    assert_eq!(ids(&browser, &range).first(), Some(&17));
}

#[test]
fn search_then_window_then_navigate() {
    let options = SearchOptions::new(["title", "author.name"])
        .unwrap()
        .with_threshold(0.8)
        .unwrap();
    let mut browser = Browser::new(catalog(200), options, 40.0).unwrap();

    browser.set_query("mars");
    // Every tenth title contains "mars".
    assert_eq!(browser.len(), 20);
    let range = browser.visible(120.0, 0.0);
    assert_eq!(range.indices, 0..7);
    assert_eq!(range.total_extent, 800.0);
    // Equal scores keep collection order.
    assert_eq!(ids(&browser, &range), [0, 10, 20, 30, 40, 50, 60]);

    let mut offset = 0.0;
    for _ in 0..5 {
        offset = browser.navigate(Direction::Down, 120.0, offset).unwrap();
    }
    assert_eq!(browser.position(), Some(5));
    // Item 5 spans 200..240, so the viewport must end at 240.
    assert_eq!(offset, 120.0);

    let mut activated = None;
    assert!(browser.activate(|index, record| activated = Some((index, record["id"].clone()))));
    assert_eq!(activated, Some((50, json!(50))));
}

#[test]
fn clearing_the_query_restores_collection_order() {
    let mut browser =
        Browser::new(catalog(30), SearchOptions::new(["title"]).unwrap(), 10.0).unwrap();
    browser.set_query("chronicle");
    let narrowed = browser.len();
    assert!(narrowed < 30);
    browser.set_query("   ");
    assert_eq!(browser.len(), 30);
    assert!(browser.ranking().is_unfiltered());
    let all: Vec<u64> = browser.view().filter_map(|r| r["id"].as_u64()).collect();
    assert_eq!(all, (0..30).collect::<Vec<u64>>());
}

#[test]
fn memo_serves_repeated_queries() {
    let mut browser =
        Browser::new(catalog(50), SearchOptions::new(["title"]).unwrap(), 10.0).unwrap();
    for q in ["mar", "mars", "mar", "mars"] {
        browser.set_query(q);
    }
    assert_eq!(browser.ranker().stats().hits, 2);
}

#[test]
fn pointer_focus_rejects_positions_outside_the_view() {
    let mut browser =
        Browser::new(catalog(10), SearchOptions::new(["title"]).unwrap(), 10.0).unwrap();
    browser.focus(3).unwrap();
    assert!(matches!(browser.focus(10), Err(Error::Nav(_))));
    assert_eq!(browser.position(), Some(3));
    assert!(browser.is_current(3));
}

#[test]
fn grid_browsing_over_search_results() {
    let records = catalog(100);
    let options = SearchOptions::new(["title"])
        .unwrap()
        .with_threshold(0.8)
        .unwrap();
    let hits = rank_single_key(&records, "mars", &options);
    assert_eq!(hits.len(), 10);

    let columns = GridWindow::columns_for(700.0, 200.0, 20.0);
    assert_eq!(columns, 3);
    let grid = GridWindow::new(150.0, columns)
        .unwrap()
        .with_gap(20.0)
        .unwrap()
        .with_overscan(0);
    let range = grid.compute(hits.len(), 340.0, 0.0);
    assert_eq!(range.rows, 0..3);
    assert_eq!(range.items, 0..9);

    // 10 results in 3 columns: the last row holds only item 9.
    let mut nav = GridNavigationController::new(hits.len(), columns).unwrap();
    nav.set_position(2, 2).unwrap();
    assert_eq!(nav.move_down(), Some((3, 0)));
    assert_eq!(nav.index(), Some(9));
}
