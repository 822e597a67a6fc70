//! Async session driver for the deferred AI move.
//!
//! [`GameController`] only issues an [`AiTicket`] when the AI has to move.
//! The session turns each ticket into a tokio task that sleeps for the
//! configured delay and then resolves it. Tickets made stale in the
//! meantime by a reset, rewind or mode toggle resolve to nothing.

use crate::config::GameConfig;
use crate::games::tictactoe::{
    AiTicket, Board, GameController, GameError, GameEvent, GameStatus, Mode, Player, Snapshot,
    Timeline,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, instrument};

/// Shared handle to a single game.
///
/// Cloning yields another handle to the same game. Must be used inside a
/// tokio runtime when the AI delay is non-zero.
#[derive(Debug, Clone)]
pub struct GameSession {
    controller: Arc<Mutex<GameController>>,
}

impl GameSession {
    /// Creates a session with a fresh game.
    #[instrument(skip(config))]
    pub fn new(config: &GameConfig) -> Self {
        Self {
            controller: Arc::new(Mutex::new(GameController::new(config))),
        }
    }

    /// Board at the cursor.
    pub fn current_board(&self) -> Board {
        self.lock().current_board()
    }

    /// Current status.
    pub fn status(&self) -> GameStatus {
        self.lock().status()
    }

    /// Side to move at the cursor.
    pub fn current_side(&self) -> Player {
        self.lock().current_side()
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.lock().mode()
    }

    /// Copy of the move history.
    pub fn timeline(&self) -> Timeline {
        self.lock().timeline().clone()
    }

    /// Registers a listener for state changes.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<GameEvent> {
        self.lock().subscribe()
    }

    /// See [`GameController::request_move`].
    pub fn request_move(&self, index: usize) -> Result<Snapshot, GameError> {
        self.drive(|controller| controller.request_move(index))
    }

    /// See [`GameController::request_rewind`].
    pub fn request_rewind(&self, index: usize) -> Result<Snapshot, GameError> {
        self.drive(|controller| controller.request_rewind(index))
    }

    /// See [`GameController::request_resume`].
    pub fn request_resume(&self) -> GameStatus {
        self.drive(GameController::request_resume)
    }

    /// See [`GameController::request_reset`].
    pub fn request_reset(&self) {
        self.drive(GameController::request_reset)
    }

    /// See [`GameController::toggle_mode`].
    pub fn toggle_mode(&self) -> Mode {
        self.drive(GameController::toggle_mode)
    }

    /// Runs `f` on the controller, then schedules any AI move it issued.
    fn drive<R>(&self, f: impl FnOnce(&mut GameController) -> R) -> R {
        let (result, ticket, delay) = {
            let mut controller = self.lock();
            let result = f(&mut *controller);
            (result, controller.take_scheduled_ai_move(), controller.ai_delay())
        };
        if let Some(ticket) = ticket {
            self.schedule(ticket, delay);
        }
        result
    }

    #[instrument(skip(self))]
    fn schedule(&self, ticket: AiTicket, delay: Duration) {
        let controller = Arc::clone(&self.controller);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut controller = controller.lock().unwrap_or_else(PoisonError::into_inner);
            match controller.resolve_ai_move(ticket) {
                Some(snapshot) => debug!(changed = ?snapshot.changed(), "Deferred AI move applied"),
                None => debug!(epoch = ticket.epoch(), "Deferred AI move dropped"),
            }
        });
    }

    fn lock(&self) -> MutexGuard<'_, GameController> {
        self.controller.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
