//! Gym CLI
//!
//! Tune the engine through self-play, pit profiles against each other, or
//! ask for a single move.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chess_core::{move_to_uci, Engine, Position};
use clap::{Parser, Subcommand, ValueEnum};
use gym::{run_arena, GymConfig, MatchConfig, ModelStore, Trainer};
use tracing_subscriber::EnvFilter;
use tuned_engine::{evaluate, game_phase, TunedEngine, WeightVector};

const DEFAULT_CONFIG: &str = "gym.toml";

#[derive(Parser, Debug)]
#[command(name = "gym", about = "Self-play tuning for the tuned chess engine")]
struct Cli {
    /// TOML config file (defaults to ./gym.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Model file, overriding the config
    #[arg(long, global = true)]
    model: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run tuning generations, saving the model after each
    Train {
        #[arg(long)]
        generations: Option<u32>,
        /// Self-play search depth
        #[arg(long)]
        depth: Option<u8>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Play the tuned model against the rival profile
    Arena {
        #[arg(long, default_value_t = 2)]
        games: u32,
        #[arg(long)]
        depth: Option<u8>,
        /// Score games still running after this many plies as draws
        #[arg(long)]
        max_plies: Option<u32>,
    },
    /// Print the engine's move for a position
    Bestmove {
        /// Position in FEN (start position when omitted)
        #[arg(long)]
        fen: Option<String>,
        #[arg(long)]
        depth: Option<u8>,
        #[arg(long, value_enum, default_value_t = Profile::Model)]
        profile: Profile,
    },
    /// Print the static evaluation of a position
    Eval {
        #[arg(long)]
        fen: Option<String>,
        #[arg(long, value_enum, default_value_t = Profile::Model)]
        profile: Profile,
    },
}

/// Which weights to search with
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Profile {
    /// The persisted tuned model
    Model,
    /// Built-in defaults
    Default,
    /// Built-in aggressive profile
    Rival,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(model) = cli.model {
        config.model_path = model;
    }
    let store = ModelStore::new(&config.model_path);

    match cli.command {
        Command::Train {
            generations,
            depth,
            seed,
        } => {
            if let Some(depth) = depth {
                config.tuning_depth = depth;
            }
            if seed.is_some() {
                config.seed = seed;
            }
            let generations = generations.unwrap_or(config.generations);

            let mut trainer = Trainer::new(store, config);
            let start = trainer.model().clone();
            println!(
                "Starting at generation {} (rating {})",
                start.generation, start.rating
            );
            for _ in 0..generations {
                let report = trainer.step().context("tuning generation failed")?;
                println!(
                    "Generation {:>4}: {} {} -> {} | mutant {:.1}/2 | {} | rating {}",
                    report.generation,
                    report.mutation.key,
                    report.mutation.before,
                    report.mutation.after,
                    report.mutant_score,
                    report.verdict,
                    report.rating
                );
            }
            println!("Weights: {}", trainer.model().weights);
        }

        Command::Arena {
            games,
            depth,
            max_plies,
        } => {
            let model = store.load_or_default();
            let match_config = MatchConfig {
                num_games: games,
                depth: depth.unwrap_or(config.play_depth),
                max_plies,
                alternate_colors: true,
            };
            let result = run_arena(model.weights, WeightVector::RIVAL, match_config)
                .context("arena match failed")?;
            println!(
                "Model vs rival: {} wins, {} losses, {} draws ({:.1}%)",
                result.wins,
                result.losses,
                result.draws,
                result.score() * 100.0
            );
        }

        Command::Bestmove {
            fen,
            depth,
            profile,
        } => {
            let pos = parse_position(fen.as_deref())?;
            let weights = profile_weights(profile, &store);
            let mut engine = TunedEngine::new(weights);
            let result = engine.search(&pos, depth.unwrap_or(config.play_depth));
            match result.best_move {
                Some(mv) => println!(
                    "bestmove {} score {} nodes {}{}",
                    move_to_uci(&pos, mv),
                    result.score,
                    result.nodes,
                    if result.from_book { " (book)" } else { "" }
                ),
                None => println!("bestmove (none)"),
            }
        }

        Command::Eval { fen, profile } => {
            let pos = parse_position(fen.as_deref())?;
            let weights = profile_weights(profile, &store);
            println!(
                "eval {} ({:?})",
                evaluate(&pos, &weights),
                game_phase(&pos)
            );
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<GymConfig> {
    match path {
        Some(path) => GymConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display())),
        None if Path::new(DEFAULT_CONFIG).exists() => GymConfig::from_file(Path::new(DEFAULT_CONFIG))
            .with_context(|| format!("loading config {DEFAULT_CONFIG}")),
        None => Ok(GymConfig::default()),
    }
}

fn parse_position(fen: Option<&str>) -> Result<Position> {
    match fen {
        Some(fen) => Ok(Position::from_fen(fen)?),
        None => Ok(Position::startpos()),
    }
}

fn profile_weights(profile: Profile, store: &ModelStore) -> WeightVector {
    match profile {
        Profile::Model => store.load_or_default().weights,
        Profile::Default => WeightVector::DEFAULT,
        Profile::Rival => WeightVector::RIVAL,
    }
}
