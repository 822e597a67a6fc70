//! Error types for game operations.
//!
//! All of these are recoverable: the operation that produced one left the
//! game state exactly as it was.

/// Why a move request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveRejection {
    /// The target cell already holds a mark.
    #[display("cell is already occupied")]
    Occupied,

    /// The index does not name a cell (must be 0-8).
    #[display("cell is off the board")]
    OffBoard,

    /// The game has a recorded outcome.
    #[display("game is over")]
    GameOver,

    /// The AI is choosing its move.
    #[display("AI is thinking")]
    AiThinking,

    /// It is the AI's turn in single-player mode.
    #[display("it is not the human player's turn")]
    NotHumansTurn,
}

/// Error that can occur when operating on a game.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum GameError {
    /// A placement was refused.
    #[display("Invalid move at cell {}: {}", index, reason)]
    InvalidMove {
        /// Requested cell index.
        index: usize,
        /// Why the move was refused.
        reason: MoveRejection,
    },

    /// A rewind target is outside the recorded history.
    #[display("Snapshot {} is out of range (history holds {})", index, len)]
    OutOfRange {
        /// Requested snapshot index.
        index: usize,
        /// Number of snapshots in the history.
        len: usize,
    },

    /// A board did not have exactly 9 cells.
    #[display("Malformed board: expected 9 cells, got {}", len)]
    MalformedBoard {
        /// Number of cells supplied.
        len: usize,
    },

    /// Board text held a character that is neither a mark nor an empty cell.
    #[display("Unrecognised board symbol {:?} at offset {}", symbol, offset)]
    UnknownSymbol {
        /// The offending character.
        symbol: char,
        /// Character offset into the input.
        offset: usize,
    },
}

impl GameError {
    /// Shorthand for an [`GameError::InvalidMove`].
    pub fn invalid_move(index: usize, reason: MoveRejection) -> Self {
        GameError::InvalidMove { index, reason }
    }
}

impl std::error::Error for GameError {}
