//! Terminal outcomes and board evaluations.

use super::types::Player;
use serde::{Deserialize, Serialize};

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Player completed a line.
    Winner(Player),
    /// Board filled with no completed line.
    Tie,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Winner(player) => Some(*player),
            Outcome::Tie => None,
        }
    }

    /// Returns true if the game was tied.
    pub fn is_tie(&self) -> bool {
        matches!(self, Outcome::Tie)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(player) => write!(f, "Winner: {}", player),
            Outcome::Tie => write!(f, "Game tied"),
        }
    }
}

/// Result of evaluating a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Evaluation {
    /// The game continues.
    Continue,
    /// The board is terminal.
    Terminal(Outcome),
}

impl Evaluation {
    /// Returns the outcome if the board is terminal.
    pub fn outcome(self) -> Option<Outcome> {
        match self {
            Evaluation::Continue => None,
            Evaluation::Terminal(outcome) => Some(outcome),
        }
    }

    /// Returns true if the board is terminal.
    pub fn is_terminal(self) -> bool {
        matches!(self, Evaluation::Terminal(_))
    }
}
