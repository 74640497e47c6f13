//! Engine-level behaviour through the `Engine` trait.

use chess_core::{move_to_uci, Engine, Position};
use tuned_engine::{search, OpeningBook, TunedEngine, WeightKey, WeightVector, MATE_SCORE};

#[test]
fn test_free_search_returns_legal_move() {
    let pos = Position::startpos();
    let mv = search(&pos, 1, &WeightVector::default()).expect("moves exist");
    assert!(pos.legal_moves().contains(&mv));
}

#[test]
fn test_free_search_on_finished_game() {
    let pos = Position::from_fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1").unwrap();
    assert_eq!(search(&pos, 2, &WeightVector::default()), None);
}

#[test]
fn test_book_move_skips_search() {
    let mut engine = TunedEngine::default();
    let pos = Position::startpos();

    let result = engine.search(&pos, 4);
    assert!(result.from_book);
    assert_eq!(result.nodes, 0);
    assert_eq!(move_to_uci(&pos, result.best_move.unwrap()), "e2e4");
    assert!(engine.cache().is_empty());
}

#[test]
fn test_empty_book_searches_from_start() {
    let mut engine = TunedEngine::default().with_book(OpeningBook::empty());
    let result = engine.search(&Position::startpos(), 2);
    assert!(!result.from_book);
    assert!(result.nodes > 20);
}

#[test]
fn test_unusable_book_entry_falls_back_to_search() {
    let start = Position::startpos().fingerprint();
    let book = OpeningBook::from_entries([(start, "e2e5")]);
    let mut engine = TunedEngine::default().with_book(book);

    let result = engine.search(&Position::startpos(), 1);
    assert!(!result.from_book);
    assert!(result.best_move.is_some());
}

#[test]
fn test_engine_reports_mate_score() {
    let pos = Position::from_fen("6k1/5ppp/8/8/8/8/5PPP/4R1K1 w - - 0 1").unwrap();
    let mut engine = TunedEngine::default();
    let result = engine.search(&pos, 3);
    assert_eq!(move_to_uci(&pos, result.best_move.unwrap()), "e1e8");
    assert_eq!(result.score, MATE_SCORE + 2);
}

#[test]
fn test_changing_weights_clears_cache() {
    let mut engine = TunedEngine::default().with_book(OpeningBook::empty());
    engine.search(&Position::startpos(), 2);
    assert!(!engine.cache().is_empty());

    engine.set_weights(*engine.weights());
    assert!(!engine.cache().is_empty(), "same weights keep the cache");

    engine.set_weights(WeightVector::default().with(WeightKey::Queen, 950));
    assert!(engine.cache().is_empty());
    assert_eq!(engine.weights()[WeightKey::Queen], 950);
}

#[test]
fn test_new_game_clears_cache() {
    let mut engine = TunedEngine::default().with_book(OpeningBook::empty());
    engine.search(&Position::startpos(), 2);
    engine.new_game();
    assert!(engine.cache().is_empty());
}

#[test]
fn test_short_self_play_stays_legal() {
    let mut white = TunedEngine::named("white", WeightVector::DEFAULT);
    let mut black = TunedEngine::named("black", WeightVector::RIVAL);
    let mut pos = Position::startpos();

    for ply in 0..12 {
        if pos.is_game_over() {
            break;
        }
        let engine: &mut dyn Engine = if ply % 2 == 0 { &mut white } else { &mut black };
        let mv = engine.search(&pos, 2).best_move.expect("game not over");
        assert!(pos.is_legal(mv));
        pos.make_move(mv);
    }
    assert_eq!(white.name(), "white");
}
