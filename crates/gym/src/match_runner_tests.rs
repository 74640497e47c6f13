use super::*;
use chess_core::{parse_uci_move, SearchResult};
use tuned_engine::{TunedEngine, WeightVector};

/// Plays the first legal move and remembers its color in every game.
#[derive(Default)]
struct FirstMoveEngine {
    colors: Vec<Color>,
    fresh: bool,
}

impl Engine for FirstMoveEngine {
    fn search(&mut self, pos: &Position, depth: u8) -> SearchResult {
        if self.fresh {
            self.colors.push(pos.side_to_move());
            self.fresh = false;
        }
        SearchResult {
            best_move: pos.legal_moves().first().copied(),
            score: 0,
            depth,
            nodes: 1,
            from_book: false,
        }
    }

    fn name(&self) -> &str {
        "first-move"
    }

    fn new_game(&mut self) {
        self.fresh = true;
    }
}

/// Plays a fixed list of moves.
struct ScriptedEngine {
    moves: Vec<&'static str>,
    next: usize,
}

impl ScriptedEngine {
    fn new(moves: &[&'static str]) -> Self {
        Self {
            moves: moves.to_vec(),
            next: 0,
        }
    }
}

impl Engine for ScriptedEngine {
    fn search(&mut self, pos: &Position, depth: u8) -> SearchResult {
        let best_move = self
            .moves
            .get(self.next)
            .and_then(|txt| parse_uci_move(pos, txt).ok());
        self.next += 1;
        SearchResult {
            best_move,
            score: 0,
            depth,
            nodes: 0,
            from_book: false,
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }

    fn new_game(&mut self) {
        self.next = 0;
    }
}

#[test]
fn test_self_play() {
    let mut engine1 = TunedEngine::new(WeightVector::DEFAULT);
    let mut engine2 = TunedEngine::new(WeightVector::RIVAL);

    let config = MatchConfig {
        num_games: 2,
        depth: 1,
        max_plies: Some(30),
        ..Default::default()
    };

    let runner = MatchRunner::new(config);
    let result = runner.run_match(&mut engine1, &mut engine2).unwrap();

    // Self-play should complete without panic
    assert_eq!(result.total_games(), 2);
}

#[test]
fn test_fools_mate_is_scored_for_black() {
    let mut white = ScriptedEngine::new(&["f2f3", "g2g4"]);
    let mut black = ScriptedEngine::new(&["e7e5", "d8h4"]);

    let runner = MatchRunner::new(MatchConfig::default());
    let game = runner.play_game(&mut white, &mut black).unwrap();

    assert_eq!(game.result, GameResult::Loss);
    assert_eq!(game.termination, Some(Termination::Checkmate));
    assert_eq!(game.plies, 4);
    assert_eq!(game.moves, ["f2f3", "e7e5", "g2g4", "d8h4"]);
}

#[test]
fn test_missing_move_in_live_game_is_error() {
    let mut white = ScriptedEngine::new(&["e2e4"]);
    let mut black = ScriptedEngine::new(&[]);

    let runner = MatchRunner::new(MatchConfig::default());
    let err = runner.play_game(&mut white, &mut black).unwrap_err();

    match err {
        GymError::NoMove { engine, fen } => {
            assert_eq!(engine, "scripted");
            assert_eq!(fen, "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_ply_cap_scores_draw() {
    let mut white = FirstMoveEngine::default();
    let mut black = FirstMoveEngine::default();

    let runner = MatchRunner::new(MatchConfig {
        max_plies: Some(6),
        ..Default::default()
    });
    let game = runner.play_game(&mut white, &mut black).unwrap();

    assert_eq!(game.result, GameResult::Draw);
    assert_eq!(game.termination, None);
    assert_eq!(game.plies, 6);
}

#[test]
fn test_colors_alternate() {
    let mut engine1 = FirstMoveEngine::default();
    let mut engine2 = FirstMoveEngine::default();

    let runner = MatchRunner::new(MatchConfig {
        num_games: 3,
        max_plies: Some(4),
        ..Default::default()
    });
    let result = runner.run_match(&mut engine1, &mut engine2).unwrap();

    assert_eq!(result.draws, 3);
    assert_eq!(engine1.colors, [Color::White, Color::Black, Color::White]);
    assert_eq!(engine2.colors, [Color::Black, Color::White, Color::Black]);
}

#[test]
fn test_fixed_colors() {
    let mut engine1 = FirstMoveEngine::default();
    let mut engine2 = FirstMoveEngine::default();

    let runner = MatchRunner::new(MatchConfig {
        num_games: 2,
        max_plies: Some(2),
        alternate_colors: false,
        ..Default::default()
    });
    runner.run_match(&mut engine1, &mut engine2).unwrap();

    assert_eq!(engine1.colors, [Color::White, Color::White]);
}
