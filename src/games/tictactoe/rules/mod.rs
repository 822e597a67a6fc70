//! Game rules for noughts-and-crosses.
//!
//! Pure functions over a [`Board`]; nothing here mutates game state.
//! [`evaluate`] is the single terminal-state query used by the timeline,
//! the controller and the search.

pub mod draw;
pub mod win;

pub use draw::{is_full, is_tie};
pub use win::{LINES, check_winner, winning_line};

use super::error::GameError;
use super::outcome::{Evaluation, Outcome};
use super::{Board, Square};
use tracing::instrument;

/// Classifies a board as won, tied, or still in play.
#[instrument(level = "trace")]
pub fn evaluate(board: &Board) -> Evaluation {
    if let Some(winner) = check_winner(board) {
        Evaluation::Terminal(Outcome::Winner(winner))
    } else if is_full(board) {
        Evaluation::Terminal(Outcome::Tie)
    } else {
        Evaluation::Continue
    }
}

/// [`evaluate`] over a raw cell slice, which must hold exactly 9 cells.
pub fn evaluate_cells(cells: &[Square]) -> Result<Evaluation, GameError> {
    let board = Board::try_from(cells)?;
    Ok(evaluate(&board))
}
