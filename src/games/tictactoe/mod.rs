mod controller;
mod error;
mod outcome;
mod position;
pub mod rules;
pub mod search;
mod timeline;
mod types;

pub use controller::{AI_PLAYER, AiTicket, GameController, GameEvent, GameStatus, Mode};
pub use error::{GameError, MoveRejection};
pub use outcome::{Evaluation, Outcome};
pub use position::Position;
pub use rules::{evaluate, evaluate_cells};
pub use search::{Minimax, SearchResult, best_move, best_move_cells};
pub use timeline::{Snapshot, Timeline};
pub use types::{Board, CELL_COUNT, Player, Square};
