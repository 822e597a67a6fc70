//! Noughts - command-line front end.

#![warn(missing_docs)]

mod cli;
mod play;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use noughts::{Board, Evaluation, GameConfig, Mode, Player, Timeline, best_move, evaluate};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            single_ai,
            ai_delay_ms,
        } => {
            let config = load_config(config.as_deref(), single_ai, ai_delay_ms)?;
            play::run(config).await
        }
        Command::BestMove { board, ai, json } => run_best_move(&board, ai.into(), json),
        Command::Evaluate { board, json } => run_evaluate(&board, json),
        Command::Replay { moves, json } => run_replay(&moves, json),
    }
}

/// Builds the play configuration from an optional file plus flag overrides.
#[instrument]
fn load_config(
    path: Option<&std::path::Path>,
    single_ai: bool,
    ai_delay_ms: Option<u64>,
) -> Result<GameConfig> {
    let mut config = match path {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig::default(),
    };
    if single_ai {
        config = config.with_mode(Mode::SingleAi);
    }
    if let Some(delay) = ai_delay_ms {
        config = config.with_ai_delay_ms(delay);
    }
    info!(?config, "Configuration resolved");
    Ok(config)
}

fn parse_board(text: &str) -> Result<Board> {
    text.parse::<Board>()
        .with_context(|| format!("Could not read board {:?}", text))
}

#[instrument]
fn run_best_move(text: &str, ai: Player, json: bool) -> Result<()> {
    let board = parse_board(text)?;
    let choice = best_move(&board, ai);

    if json {
        let value = serde_json::json!({
            "ai": ai,
            "board": board,
            "move": choice.map(|pos| pos.to_index()),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{}", board.display());
    match choice {
        Some(pos) => println!("{} plays {} ({})", ai, pos.to_index(), pos),
        None => println!("No empty cell left"),
    }
    Ok(())
}

#[instrument]
fn run_evaluate(text: &str, json: bool) -> Result<()> {
    let board = parse_board(text)?;
    let evaluation = evaluate(&board);

    if json {
        println!("{}", serde_json::to_string(&evaluation)?);
        return Ok(());
    }

    println!("{}", board.display());
    match evaluation {
        Evaluation::Continue => println!("In play; {} to move", next_side(&board)),
        Evaluation::Terminal(outcome) => println!("{}", outcome),
    }
    Ok(())
}

#[instrument]
fn run_replay(moves: &[usize], json: bool) -> Result<()> {
    let timeline = Timeline::replay(moves)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&timeline)?);
        return Ok(());
    }

    for (index, snapshot) in timeline.snapshots().iter().enumerate() {
        println!("{:>2}: {}", index, snapshot.describe(index));
        println!("{}", snapshot.board().display());
        println!();
    }
    match evaluate(timeline.current().board()) {
        Evaluation::Continue => println!("In play; {} to move", timeline.side_to_move()),
        Evaluation::Terminal(outcome) => println!("{}", outcome),
    }
    Ok(())
}

/// Side to move on an arbitrary board, by mark count.
fn next_side(board: &Board) -> Player {
    let placed = board.squares().iter().filter(|s| s.player().is_some()).count();
    Player::for_ply(placed)
}
