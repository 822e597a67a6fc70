//! Game controller: turn alternation, AI turns, and state notifications.
//!
//! The controller is synchronous and owns the [`Timeline`]. When the AI has
//! to move it enters [`GameStatus::Thinking`] and issues an [`AiTicket`]
//! stamped with the current epoch. Reset, rewind and leaving single-AI mode
//! bump the epoch, so a ticket resolved after any of those is ignored.

use super::error::{GameError, MoveRejection};
use super::outcome::{Evaluation, Outcome};
use super::rules::evaluate;
use super::search::best_move;
use super::timeline::{Snapshot, Timeline};
use super::{Board, Player, Position};
use crate::config::GameConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Side played by the AI in single-AI mode.
pub const AI_PLAYER: Player = Player::O;

/// Who controls the O side.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Two humans alternate X and O.
    #[default]
    #[display("two-player")]
    TwoPlayer,
    /// A human plays X against the AI as O.
    #[display("single-ai")]
    SingleAi,
}

impl Mode {
    /// Returns the other mode.
    pub fn toggle(self) -> Self {
        match self {
            Self::TwoPlayer => Self::SingleAi,
            Self::SingleAi => Self::TwoPlayer,
        }
    }
}

/// Whether the game accepts moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Accepting moves.
    Running,
    /// The AI is choosing a move; human moves are refused.
    Thinking,
    /// Not accepting moves. Carries the outcome when the board at the
    /// cursor is terminal; `None` marks a paused review point that a fresh
    /// move resumes.
    Stopped(Option<Outcome>),
}

impl GameStatus {
    /// Outcome of a finished game.
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            GameStatus::Stopped(outcome) => *outcome,
            _ => None,
        }
    }

    /// Returns true while moves are accepted.
    pub fn is_running(&self) -> bool {
        matches!(self, GameStatus::Running)
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameStatus::Running => write!(f, "Running"),
            GameStatus::Thinking => write!(f, "AI thinking"),
            GameStatus::Stopped(Some(outcome)) => write!(f, "{}", outcome),
            GameStatus::Stopped(None) => write!(f, "Paused"),
        }
    }
}

/// State change notification for presentation layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A mark was placed, producing snapshot `index`.
    MoveApplied {
        /// Snapshot index.
        index: usize,
        /// Cell that changed.
        position: Position,
        /// Player who placed.
        player: Player,
    },
    /// Status transition.
    StatusChanged(GameStatus),
    /// Mode transition.
    ModeChanged(Mode),
    /// The AI started choosing a move.
    AiThinking,
    /// Cursor moved back in history.
    Rewound {
        /// Snapshot now under the cursor.
        index: usize,
    },
    /// History cleared.
    Reset,
}

/// Permission to apply one deferred AI move, valid for a single epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiTicket {
    epoch: u64,
}

impl AiTicket {
    /// Epoch the ticket was issued in.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

/// Owns one game: its timeline, status, mode and subscribers.
#[derive(Debug)]
pub struct GameController {
    timeline: Timeline,
    status: GameStatus,
    mode: Mode,
    epoch: u64,
    ai_delay: Duration,
    scheduled: Option<AiTicket>,
    subscribers: Vec<mpsc::UnboundedSender<GameEvent>>,
}

impl GameController {
    /// Creates a controller with a fresh game.
    #[instrument(skip(config), fields(mode = %config.mode()))]
    pub fn new(config: &GameConfig) -> Self {
        info!("Creating game controller");
        Self {
            timeline: Timeline::new(),
            status: GameStatus::Running,
            mode: *config.mode(),
            epoch: 0,
            ai_delay: config.ai_delay(),
            scheduled: None,
            subscribers: Vec::new(),
        }
    }

    /// Board at the cursor.
    pub fn current_board(&self) -> Board {
        *self.timeline.current().board()
    }

    /// Current status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Side to move at the cursor.
    pub fn current_side(&self) -> Player {
        self.timeline.side_to_move()
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Move history.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Epoch counter; bumped whenever pending AI moves become stale.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Configured AI pacing delay.
    pub fn ai_delay(&self) -> Duration {
        self.ai_delay
    }

    /// Registers a listener for state changes.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<GameEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    /// Places the side to move at cell `index`.
    ///
    /// A paused review point resumes on a successful move. In single-AI
    /// mode the AI's reply is started afterwards: resolved before returning
    /// when the delay is zero, otherwise scheduled as an [`AiTicket`].
    ///
    /// # Errors
    ///
    /// `InvalidMove` when the cell is off the board or occupied, the game is
    /// over, the AI is thinking, or it is the AI's turn. State is unchanged.
    #[instrument(skip(self), fields(status = ?self.status, mode = %self.mode))]
    pub fn request_move(&mut self, index: usize) -> Result<Snapshot, GameError> {
        let rejection = match self.status {
            GameStatus::Thinking => Some(MoveRejection::AiThinking),
            GameStatus::Stopped(Some(_)) => Some(MoveRejection::GameOver),
            GameStatus::Running | GameStatus::Stopped(None) => {
                if self.is_ai_turn() {
                    Some(MoveRejection::NotHumansTurn)
                } else {
                    None
                }
            }
        };
        if let Some(reason) = rejection {
            warn!(index, %reason, "Move rejected");
            return Err(GameError::invalid_move(index, reason));
        }

        let player = self.timeline.side_to_move();
        let snapshot = self.timeline.append(index).inspect_err(|e| {
            warn!(index, error = %e, "Move rejected");
        })?;
        self.record_placement(snapshot, player);

        if self.status.is_running() && self.is_ai_turn() {
            self.begin_ai_turn();
        }

        Ok(snapshot)
    }

    /// Moves the cursor to snapshot `index` and stops the game there.
    ///
    /// The outcome is recomputed for that point: a terminal board stops with
    /// its outcome, any other board is left paused. Pending AI moves are
    /// cancelled.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if no snapshot has that index. State is unchanged.
    #[instrument(skip(self))]
    pub fn request_rewind(&mut self, index: usize) -> Result<Snapshot, GameError> {
        let snapshot = self.timeline.rewind(index).inspect_err(|e| {
            warn!(index, error = %e, "Rewind rejected");
        })?;
        self.cancel_pending_ai();
        self.emit(GameEvent::Rewound { index });
        self.set_status(GameStatus::Stopped(evaluate(snapshot.board()).outcome()));
        info!(index, status = %self.status, "Rewound history");
        Ok(snapshot)
    }

    /// Leaves a paused review point.
    ///
    /// In single-AI mode with O to move the AI is started. Any other status
    /// is left untouched. Returns the resulting status.
    #[instrument(skip(self))]
    pub fn request_resume(&mut self) -> GameStatus {
        if self.status == GameStatus::Stopped(None) {
            info!(cursor = self.timeline.cursor(), "Resuming play");
            self.set_status(GameStatus::Running);
            if self.is_ai_turn() {
                self.begin_ai_turn();
            }
        }
        self.status
    }

    /// Discards the game and starts a fresh one in the same mode.
    #[instrument(skip(self))]
    pub fn request_reset(&mut self) {
        self.timeline.reset();
        self.cancel_pending_ai();
        self.emit(GameEvent::Reset);
        self.set_status(GameStatus::Running);
        info!(epoch = self.epoch, "Game reset");
    }

    /// Flips between two-player and single-AI mode.
    ///
    /// Entering single-AI mode on O's turn starts the AI at once. Leaving it
    /// while the AI is thinking cancels that move and hands O to a human.
    #[instrument(skip(self), fields(from = %self.mode))]
    pub fn toggle_mode(&mut self) -> Mode {
        self.mode = self.mode.toggle();
        self.emit(GameEvent::ModeChanged(self.mode));
        info!(mode = %self.mode, "Mode toggled");

        match self.mode {
            Mode::SingleAi => {
                if self.status.is_running() && self.is_ai_turn() {
                    self.begin_ai_turn();
                }
            }
            Mode::TwoPlayer => {
                if self.status == GameStatus::Thinking {
                    self.cancel_pending_ai();
                    self.set_status(GameStatus::Running);
                }
            }
        }

        self.mode
    }

    /// Hands out the AI move waiting to be scheduled, if any.
    pub fn take_scheduled_ai_move(&mut self) -> Option<AiTicket> {
        self.scheduled.take()
    }

    /// Applies the AI's move for `ticket`.
    ///
    /// Returns `None` without touching state when the ticket is stale: its
    /// epoch is outdated or the controller is no longer thinking.
    #[instrument(skip(self), fields(epoch = self.epoch))]
    pub fn resolve_ai_move(&mut self, ticket: AiTicket) -> Option<Snapshot> {
        if ticket.epoch != self.epoch || self.status != GameStatus::Thinking {
            debug!(ticket_epoch = ticket.epoch, status = %self.status, "Discarding stale AI move");
            return None;
        }
        if self.scheduled == Some(ticket) {
            self.scheduled = None;
        }

        let board = self.current_board();
        let Some(pos) = best_move(&board, AI_PLAYER) else {
            if !self.apply_outcome_if_terminal() {
                self.set_status(GameStatus::Running);
            }
            return None;
        };

        match self.timeline.append(pos.to_index()) {
            Ok(snapshot) => {
                self.record_placement(snapshot, AI_PLAYER);
                Some(snapshot)
            }
            Err(e) => {
                warn!(error = %e, "AI produced an unplayable move");
                self.set_status(GameStatus::Running);
                None
            }
        }
    }

    /// Stops the game if the board at the cursor is terminal.
    ///
    /// Returns true when an outcome was recorded.
    fn apply_outcome_if_terminal(&mut self) -> bool {
        match evaluate(self.timeline.current().board()) {
            Evaluation::Terminal(outcome) => {
                info!(%outcome, "Game over");
                self.set_status(GameStatus::Stopped(Some(outcome)));
                true
            }
            Evaluation::Continue => false,
        }
    }

    fn record_placement(&mut self, snapshot: Snapshot, player: Player) {
        let index = self.timeline.cursor();
        if let Some(position) = snapshot.changed() {
            info!(index, cell = position.to_index(), %player, "Move applied");
            self.emit(GameEvent::MoveApplied {
                index,
                position,
                player,
            });
        }
        if !self.apply_outcome_if_terminal() {
            self.set_status(GameStatus::Running);
        }
    }

    fn is_ai_turn(&self) -> bool {
        self.mode == Mode::SingleAi && self.timeline.side_to_move() == AI_PLAYER
    }

    fn begin_ai_turn(&mut self) {
        let ticket = AiTicket { epoch: self.epoch };
        self.set_status(GameStatus::Thinking);
        self.emit(GameEvent::AiThinking);

        if self.ai_delay.is_zero() {
            self.resolve_ai_move(ticket);
        } else {
            debug!(
                epoch = ticket.epoch,
                delay_ms = self.ai_delay.as_millis() as u64,
                "AI move scheduled"
            );
            self.scheduled = Some(ticket);
        }
    }

    fn cancel_pending_ai(&mut self) {
        self.epoch += 1;
        self.scheduled = None;
    }

    fn set_status(&mut self, status: GameStatus) {
        if self.status != status {
            self.status = status;
            self.emit(GameEvent::StatusChanged(status));
        }
    }

    fn emit(&mut self, event: GameEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

impl Default for GameController {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}
