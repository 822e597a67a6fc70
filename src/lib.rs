//! Noughts - a noughts-and-crosses engine with time travel and an unbeatable AI
//!
//! # Architecture
//!
//! - **Rules**: pure terminal-state evaluation over a 9-cell board
//! - **Search**: exhaustive minimax with alpha-beta pruning for the AI side
//! - **Timeline**: one snapshot per ply, with rewind and truncating appends
//! - **Controller**: turn alternation, AI turns, status and notifications
//! - **Session**: async driver that paces the AI's moves
//!
//! # Example
//!
//! ```
//! use noughts::{GameConfig, GameController, GameStatus, Mode};
//!
//! let config = GameConfig::new().with_mode(Mode::SingleAi).with_ai_delay_ms(0);
//! let mut game = GameController::new(&config);
//!
//! game.request_move(4).unwrap();
//! // The AI has already replied.
//! assert_eq!(game.timeline().cursor(), 2);
//! assert_eq!(game.status(), GameStatus::Running);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod games;
mod session;

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig};

// Crate-level exports - Session driver
pub use session::GameSession;

// Crate-level exports - Game types
pub use games::tictactoe::{
    AI_PLAYER, AiTicket, Board, CELL_COUNT, Evaluation, GameController, GameError, GameEvent,
    GameStatus, Minimax, Mode, MoveRejection, Outcome, Player, Position, SearchResult, Snapshot,
    Square, Timeline, best_move, best_move_cells, evaluate, evaluate_cells,
};

// Crate-level exports - Rule helpers
pub use games::tictactoe::rules::{LINES, check_winner, is_full, is_tie, winning_line};
