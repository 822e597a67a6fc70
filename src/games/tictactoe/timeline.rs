//! Move history with time travel.
//!
//! The timeline holds one snapshot per ply and a cursor. Rewinding only
//! moves the cursor; the next append discards every snapshot after it, so
//! history never forks.
//!
//! Deserialized timelines are rebuilt move by move, so a stored history that
//! could not have been played is rejected rather than loaded.

use super::error::{GameError, MoveRejection};
use super::{Board, Player, Position, Square};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, instrument};

/// Board state after one ply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    board: Board,
    changed: Option<Position>,
}

impl Snapshot {
    /// The empty opening snapshot.
    pub fn initial() -> Self {
        Self {
            board: Board::new(),
            changed: None,
        }
    }

    /// Board at this ply.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Cell placed to reach this snapshot; `None` for the opening.
    pub fn changed(&self) -> Option<Position> {
        self.changed
    }

    /// History label such as `move 3 (2,1)`, with 1-based column and row.
    pub fn describe(&self, index: usize) -> String {
        match self.changed {
            Some(pos) => {
                let (col, row) = pos.coordinates();
                format!("move {} ({},{})", index, col, row)
            }
            None => "game start".to_string(),
        }
    }
}

/// Ordered snapshots plus a cursor into them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Timeline {
    snapshots: Vec<Snapshot>,
    cursor: usize,
}

impl Timeline {
    /// Creates a timeline holding only the opening snapshot.
    #[instrument]
    pub fn new() -> Self {
        Self {
            snapshots: vec![Snapshot::initial()],
            cursor: 0,
        }
    }

    /// Builds a timeline by appending `moves` (cell indices) in order.
    #[instrument]
    pub fn replay(moves: &[usize]) -> Result<Self, GameError> {
        let mut timeline = Self::new();
        for &index in moves {
            timeline.append(index)?;
        }
        Ok(timeline)
    }

    /// Snapshot under the cursor.
    pub fn current(&self) -> &Snapshot {
        &self.snapshots[self.cursor]
    }

    /// Cursor index.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// All recorded snapshots, including any ahead of the cursor.
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// Number of recorded snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always false; the opening snapshot is never removed.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Whether the cursor sits on the newest snapshot.
    pub fn at_latest(&self) -> bool {
        self.cursor + 1 == self.snapshots.len()
    }

    /// Side to move at the cursor, derived from ply parity.
    pub fn side_to_move(&self) -> Player {
        Player::for_ply(self.cursor)
    }

    /// Places the side to move at cell `index`.
    ///
    /// Snapshots after the cursor are discarded before the new one is pushed.
    ///
    /// # Errors
    ///
    /// `InvalidMove` if `index` is not a cell or the cell is occupied in the
    /// cursor's snapshot. The timeline is unchanged on error.
    #[instrument(skip(self), fields(cursor = self.cursor))]
    pub fn append(&mut self, index: usize) -> Result<Snapshot, GameError> {
        let pos = Position::from_index(index)
            .ok_or_else(|| GameError::invalid_move(index, MoveRejection::OffBoard))?;
        if !self.current().board.is_empty(pos) {
            return Err(GameError::invalid_move(index, MoveRejection::Occupied));
        }

        let mut board = self.current().board;
        board.set(pos, Square::Occupied(self.side_to_move()));

        let discarded = self.snapshots.len() - (self.cursor + 1);
        if discarded > 0 {
            debug!(discarded, "Truncating forward history");
        }
        self.snapshots.truncate(self.cursor + 1);

        let snapshot = Snapshot {
            board,
            changed: Some(pos),
        };
        self.snapshots.push(snapshot);
        self.cursor += 1;
        Ok(snapshot)
    }

    /// Moves the cursor to `index` without touching the snapshots.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if no snapshot has that index.
    #[instrument(skip(self))]
    pub fn rewind(&mut self, index: usize) -> Result<Snapshot, GameError> {
        let snapshot = *self.snapshots.get(index).ok_or(GameError::OutOfRange {
            index,
            len: self.snapshots.len(),
        })?;
        self.cursor = index;
        Ok(snapshot)
    }

    /// Drops all history, leaving only the opening snapshot.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Unchecked wire form of a [`Timeline`].
#[derive(Deserialize)]
struct TimelineRecord {
    snapshots: Vec<Snapshot>,
    cursor: usize,
}

impl TimelineRecord {
    /// Replays the recorded moves and checks each stored snapshot against
    /// the board they produce.
    fn rebuild(self) -> Result<Timeline, String> {
        let Some((first, rest)) = self.snapshots.split_first() else {
            return Err("timeline has no snapshots".to_string());
        };
        if *first != Snapshot::initial() {
            return Err("first snapshot is not the empty board".to_string());
        }

        let mut timeline = Timeline::new();
        for (offset, stored) in rest.iter().enumerate() {
            let index = offset + 1;
            let pos = stored
                .changed
                .ok_or_else(|| format!("snapshot {} records no move", index))?;
            let replayed = timeline
                .append(pos.to_index())
                .map_err(|e| format!("snapshot {}: {}", index, e))?;
            if replayed != *stored {
                return Err(format!("snapshot {} does not follow from the one before", index));
            }
        }

        if self.cursor >= timeline.len() {
            return Err(GameError::OutOfRange {
                index: self.cursor,
                len: timeline.len(),
            }
            .to_string());
        }
        timeline.cursor = self.cursor;
        Ok(timeline)
    }
}

impl<'de> Deserialize<'de> for Timeline {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        TimelineRecord::deserialize(deserializer)?
            .rebuild()
            .map_err(serde::de::Error::custom)
    }
}
