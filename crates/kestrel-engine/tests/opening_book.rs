//! Integration tests for opening-book lookup through the engine driver.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use kestrel_core::{Position, Square, uci};
use kestrel_engine::book::pack_move;
use kestrel_engine::{BookEntry, BookError, Decision, Engine, EngineConfig, OpeningBook};

fn record(position: &Position, from: Square, to: Square, weight: u16) -> BookEntry {
    BookEntry {
        key: position.hash(),
        raw_move: pack_move(from, to, None),
        weight,
        learn: 0,
    }
}

/// A small book covering 1.e4 / 1.d4 and black's replies to 1.e4.
fn small_book() -> OpeningBook {
    let start = Position::startpos();
    let mut after_e4 = start.clone();
    after_e4.play_uci("e2e4").unwrap();

    OpeningBook::from_entries(vec![
        record(&start, Square::E2, Square::E4, 4),
        record(&start, Square::D2, Square::D4, 1),
        record(&after_e4, Square::C7, Square::C5, 2),
        record(&after_e4, Square::E7, Square::E5, 2),
    ])
}

fn config(seed: u64) -> EngineConfig {
    EngineConfig {
        depth: 2,
        seed: Some(seed),
        ..EngineConfig::default()
    }
}

fn temp_book_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("kestrel-{}-{name}.bin", std::process::id()))
}

// ── Loading ───────────────────────────────────────────────────────────────────

#[test]
fn book_file_round_trips_through_disk() {
    let book = small_book();
    let path = temp_book_path("roundtrip");
    let bytes: Vec<u8> = book
        .entries_for(Position::startpos().hash())
        .iter()
        .flat_map(|entry| entry.to_bytes())
        .collect();
    fs::write(&path, &bytes).unwrap();

    let loaded = OpeningBook::open(&path).unwrap();
    fs::remove_file(&path).ok();

    assert_eq!(loaded.len(), 2);
    assert_eq!(
        loaded.entries_for(Position::startpos().hash()),
        book.entries_for(Position::startpos().hash())
    );
}

#[test]
fn truncated_file_is_rejected() {
    let path = temp_book_path("truncated");
    fs::write(&path, [0u8; 20]).unwrap();
    let err = OpeningBook::open(&path).unwrap_err();
    fs::remove_file(&path).ok();
    assert!(matches!(err, BookError::Truncated { len: 20 }));
}

// ── Lookup through the driver ─────────────────────────────────────────────────

#[test]
fn book_moves_are_played_while_in_book() {
    let mut engine = Engine::new(config(11), Some(Arc::new(small_book()))).unwrap();

    let first = engine.decide().unwrap().unwrap();
    assert!(matches!(first, Decision::Book(_)));
    let first = uci(first.best_move());
    assert!(first == "e2e4" || first == "d2d4", "{first}");
}

#[test]
fn book_miss_falls_back_to_search() {
    let mut engine = Engine::new(config(5), Some(Arc::new(small_book()))).unwrap();
    engine.apply_uci("g1f3").unwrap();
    let decision = engine.decide().unwrap().unwrap();
    assert!(matches!(decision, Decision::Searched { .. }));
    assert!(engine.nodes() > 0);
}

#[test]
fn empty_book_always_searches() {
    let mut engine = Engine::new(config(0), Some(Arc::new(OpeningBook::default()))).unwrap();
    for _ in 0..3 {
        let decision = engine.decide().unwrap().unwrap();
        assert!(matches!(decision, Decision::Searched { .. }));
    }
}

#[test]
fn same_seed_replays_same_book_line() {
    let book = Arc::new(small_book());
    let line = |seed| {
        let mut engine = Engine::new(config(seed), Some(Arc::clone(&book))).unwrap();
        engine.apply_uci("e2e4").unwrap();
        (0..4)
            .map(|_| uci(engine.decide().unwrap().unwrap().best_move()))
            .collect::<Vec<_>>()
    };
    assert_eq!(line(99), line(99));
}

#[test]
fn one_book_is_shared_by_many_engines() {
    let book = Arc::new(small_book());
    let mut engines: Vec<Engine> = (0..4)
        .map(|seed| Engine::new(config(seed), Some(Arc::clone(&book))).unwrap())
        .collect();

    for engine in &mut engines {
        let decision = engine.decide().unwrap().unwrap();
        assert!(matches!(decision, Decision::Book(_)));
    }
    assert_eq!(Arc::strong_count(&book), 5);
    assert_eq!(book.len(), 4);
}
