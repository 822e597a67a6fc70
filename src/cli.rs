//! Command-line interface for noughts.

use clap::{Parser, Subcommand, ValueEnum};
use noughts::Player;

/// Noughts - noughts-and-crosses with time travel and an unbeatable AI
#[derive(Parser, Debug)]
#[command(name = "noughts")]
#[command(about = "Noughts-and-crosses engine with an alpha-beta AI", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play an interactive game on the terminal
    Play {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Start against the AI instead of a second human
        #[arg(long)]
        single_ai: bool,

        /// Override the AI pacing delay in milliseconds
        #[arg(long)]
        ai_delay_ms: Option<u64>,
    },

    /// Print the AI's move for a board
    BestMove {
        /// Nine cells of X, O or '.', row-major (e.g. "XX..O....")
        #[arg(short, long)]
        board: String,

        /// Side the AI plays
        #[arg(long, value_enum, default_value = "o")]
        ai: Side,

        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Classify a board as won, tied or still in play
    Evaluate {
        /// Nine cells of X, O or '.', row-major
        #[arg(short, long)]
        board: String,

        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Play a comma-separated list of cell indices and print the history
    Replay {
        /// Cell indices 0-8, X first (e.g. "4,0,8")
        #[arg(short, long, value_delimiter = ',')]
        moves: Vec<usize>,

        /// Emit JSON
        #[arg(long)]
        json: bool,
    },
}

/// A side selectable on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Crosses
    X,
    /// Noughts
    O,
}

impl From<Side> for Player {
    fn from(side: Side) -> Self {
        match side {
            Side::X => Player::X,
            Side::O => Player::O,
        }
    }
}
