//! Match runner for playing games between engines

use chess_core::{move_to_uci, Color, Engine, Position, Termination};
use tracing::{debug, info};

use crate::error::GymError;
use crate::results::{GameResult, MatchResult};

/// Configuration for a match
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Number of games to play
    pub num_games: u32,
    /// Search depth for engines
    pub depth: u8,
    /// Plies after which the game is scored as a draw (None = play until
    /// the rules end the game)
    pub max_plies: Option<u32>,
    /// Whether to alternate colors each game
    pub alternate_colors: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            num_games: 2,
            depth: 3,
            max_plies: None,
            alternate_colors: true,
        }
    }
}

/// How a single game went
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    /// Result from White's perspective
    pub result: GameResult,
    /// Why the game ended; `None` when the ply cap was reached
    pub termination: Option<Termination>,
    /// Half-moves played
    pub plies: u32,
    /// Moves in UCI notation
    pub moves: Vec<String>,
}

/// Runs matches between two engines
pub struct MatchRunner {
    config: MatchConfig,
}

impl MatchRunner {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    /// Run a match between two engines
    ///
    /// Returns the result from engine1's perspective
    pub fn run_match(
        &self,
        engine1: &mut dyn Engine,
        engine2: &mut dyn Engine,
    ) -> Result<MatchResult, GymError> {
        let mut result = MatchResult::new();

        for game_num in 0..self.config.num_games {
            let engine1_white = !self.config.alternate_colors || game_num % 2 == 0;

            let game = if engine1_white {
                self.play_game(engine1, engine2)?
            } else {
                self.play_game(engine2, engine1)?
            };
            let engine1_result = if engine1_white {
                game.result
            } else {
                game.result.flip()
            };
            result.record(engine1_result);

            info!(
                game = game_num + 1,
                of = self.config.num_games,
                white = if engine1_white { engine1.name() } else { engine2.name() },
                black = if engine1_white { engine2.name() } else { engine1.name() },
                result = ?game.result,
                termination = ?game.termination,
                plies = game.plies,
                score = %format!("{}-{}-{}", result.wins, result.losses, result.draws),
                "game finished"
            );
        }

        Ok(result)
    }

    /// Play a single game from the start position.
    ///
    /// An engine that returns no move while the game is still running is an
    /// error; nothing is scored for that game.
    pub fn play_game(
        &self,
        white: &mut dyn Engine,
        black: &mut dyn Engine,
    ) -> Result<GameRecord, GymError> {
        let mut pos = Position::startpos();
        let mut moves = Vec::new();
        white.new_game();
        black.new_game();

        loop {
            if let Some(outcome) = pos.outcome() {
                return Ok(GameRecord {
                    result: GameResult::for_side(&outcome, Color::White),
                    termination: Some(outcome.termination),
                    plies: moves.len() as u32,
                    moves,
                });
            }
            if self.config.max_plies.is_some_and(|cap| moves.len() as u32 >= cap) {
                return Ok(GameRecord {
                    result: GameResult::Draw,
                    termination: None,
                    plies: moves.len() as u32,
                    moves,
                });
            }

            let engine: &mut dyn Engine = match pos.side_to_move() {
                Color::White => &mut *white,
                Color::Black => &mut *black,
            };
            let search = engine.search(&pos, self.config.depth);
            let mv = search.best_move.ok_or_else(|| GymError::NoMove {
                engine: engine.name().to_string(),
                fen: pos.fingerprint(),
            })?;

            let uci = move_to_uci(&pos, mv);
            debug!(
                ply = moves.len() + 1,
                engine = engine.name(),
                mv = %uci,
                score = search.score,
                nodes = search.nodes,
                book = search.from_book,
                "move"
            );
            pos.make_move(mv);
            moves.push(uci);
        }
    }
}

#[cfg(test)]
#[path = "match_runner_tests.rs"]
mod match_runner_tests;
