//! Minimax search with alpha-beta pruning.
//!
//! Scores are always taken from the AI's point of view: +1 when the AI
//! completes a line, -1 when its opponent does, 0 for a tie. Levels where
//! the AI places maximize, levels where the opponent places minimize.
//! The tree is small enough to search exhaustively, so there is no depth
//! limit and no heuristic evaluation.

use super::error::GameError;
use super::outcome::{Evaluation, Outcome};
use super::rules::evaluate;
use super::{Board, Player, Position, Square};
use tracing::{debug, instrument};

const SCORE_MIN: i32 = -1000;
const SCORE_MAX: i32 = 1000;

/// Score of a terminal board the AI won.
pub const WIN_SCORE: i32 = 1;
/// Score of a terminal board the AI lost.
pub const LOSS_SCORE: i32 = -1;
/// Score of a tied board.
pub const TIE_SCORE: i32 = 0;

/// Best root move found by a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// Chosen cell.
    pub position: Position,
    /// Minimax value of the chosen cell.
    pub score: i32,
    /// Nodes visited below the root.
    pub nodes: u64,
}

/// Exhaustive minimax searcher for a fixed AI side.
#[derive(Debug)]
pub struct Minimax {
    ai: Player,
    nodes: u64,
}

impl Minimax {
    /// Creates a searcher that plays as `ai`.
    pub fn new(ai: Player) -> Self {
        Self { ai, nodes: 0 }
    }

    /// Searches every empty cell of `board` for the AI's best placement.
    ///
    /// Root cells are tried in ascending index order and only a strictly
    /// greater score replaces the current choice, so ties resolve to the
    /// lowest index. Each root child gets the full window so its score is
    /// exact. Returns `None` when the board has no empty cell.
    #[instrument(skip(self, board), fields(ai = %self.ai))]
    pub fn search(&mut self, board: &Board) -> Option<SearchResult> {
        self.nodes = 0;
        let mut scratch = *board;
        let mut best: Option<(Position, i32)> = None;

        for pos in Position::valid_moves(&scratch) {
            scratch.set(pos, Square::Occupied(self.ai));
            let score = self.minimax(&mut scratch, self.ai.opponent(), SCORE_MIN, SCORE_MAX);
            scratch.set(pos, Square::Empty);

            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((pos, score));
            }
        }

        debug_assert_eq!(&scratch, board, "scratch board must be restored");

        let (position, score) = best?;
        debug!(
            position = position.to_index(),
            score,
            nodes = self.nodes,
            "Search complete"
        );
        Some(SearchResult {
            position,
            score,
            nodes: self.nodes,
        })
    }

    fn minimax(&mut self, board: &mut Board, mover: Player, alpha: i32, beta: i32) -> i32 {
        self.nodes += 1;

        if let Evaluation::Terminal(outcome) = evaluate(board) {
            return self.terminal_score(outcome);
        }

        let maximizing = mover == self.ai;
        let mut alpha = alpha;
        let mut beta = beta;
        let mut best = if maximizing { SCORE_MIN } else { SCORE_MAX };

        for pos in Position::valid_moves(board) {
            board.set(pos, Square::Occupied(mover));
            let score = self.minimax(board, mover.opponent(), alpha, beta);
            board.set(pos, Square::Empty);

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }

            if beta <= alpha {
                break;
            }
        }

        best
    }

    fn terminal_score(&self, outcome: Outcome) -> i32 {
        match outcome {
            Outcome::Winner(player) if player == self.ai => WIN_SCORE,
            Outcome::Winner(_) => LOSS_SCORE,
            Outcome::Tie => TIE_SCORE,
        }
    }
}

/// Returns the optimal cell for `ai` to play on `board`.
///
/// Deterministic; `None` only when the board has no empty cell.
pub fn best_move(board: &Board, ai: Player) -> Option<Position> {
    Minimax::new(ai).search(board).map(|result| result.position)
}

/// [`best_move`] over a raw cell slice, which must hold exactly 9 cells.
pub fn best_move_cells(cells: &[Square], ai: Player) -> Result<Option<Position>, GameError> {
    let board = Board::try_from(cells)?;
    Ok(best_move(&board, ai))
}
