//! Core domain types for noughts-and-crosses.

use super::error::GameError;
use super::position::Position;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// Player in the game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum Player {
    /// Player X (goes first).
    #[display("X")]
    X,
    /// Player O (goes second).
    #[display("O")]
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Side to move after `ply` placements; X moves on even plies.
    pub fn for_ply(ply: usize) -> Self {
        if ply % 2 == 0 { Player::X } else { Player::O }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell occupied by a player.
    Occupied(Player),
}

impl Square {
    /// Returns the occupying player, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Square::Empty => None,
            Square::Occupied(player) => Some(player),
        }
    }
}

/// 3x3 board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; CELL_COUNT],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a board from a full set of squares.
    pub fn from_squares(squares: [Square; CELL_COUNT]) -> Self {
        Self { squares }
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Sets the square at the given position.
    pub fn set(&mut self, pos: Position, square: Square) {
        self.squares[pos.to_index()] = square;
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns all squares.
    pub fn squares(&self) -> &[Square; CELL_COUNT] {
        &self.squares
    }

    /// Formats the board as a human-readable grid, empty cells numbered 1-9.
    #[instrument(skip(self))]
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => (pos + 1).to_string(),
                    Square::Occupied(player) => player.to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl TryFrom<&[Square]> for Board {
    type Error = GameError;

    fn try_from(cells: &[Square]) -> Result<Self, Self::Error> {
        let squares: [Square; CELL_COUNT] = cells
            .try_into()
            .map_err(|_| GameError::MalformedBoard { len: cells.len() })?;
        Ok(Self { squares })
    }
}

impl FromStr for Board {
    type Err = GameError;

    /// Parses nine cells written as `X`, `O`, or one of `.`, `-`, `_` for empty.
    /// Whitespace and `|` separators are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = Vec::with_capacity(CELL_COUNT);
        for (offset, c) in s.chars().enumerate() {
            let square = match c {
                'x' | 'X' => Square::Occupied(Player::X),
                'o' | 'O' | '0' => Square::Occupied(Player::O),
                '.' | '-' | '_' => Square::Empty,
                '|' => continue,
                c if c.is_whitespace() => continue,
                symbol => return Err(GameError::UnknownSymbol { symbol, offset }),
            };
            cells.push(square);
        }
        Board::try_from(cells.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_board() {
        let board: Board = "XX. .O. ...".parse().unwrap();
        assert_eq!(board.get(Position::TopLeft), Square::Occupied(Player::X));
        assert_eq!(board.get(Position::Center), Square::Occupied(Player::O));
        assert!(board.is_empty(Position::TopRight));
    }

    #[test]
    fn test_parse_rejects_short_board() {
        let result = "XO.".parse::<Board>();
        assert_eq!(result, Err(GameError::MalformedBoard { len: 3 }));
    }

    #[test]
    fn test_parse_reports_unknown_symbol() {
        let result = "XQ.......".parse::<Board>();
        assert_eq!(result, Err(GameError::UnknownSymbol { symbol: 'Q', offset: 1 }));

        let result = "XX. .Z. ...".parse::<Board>();
        assert_eq!(result, Err(GameError::UnknownSymbol { symbol: 'Z', offset: 5 }));
    }

    #[test]
    fn test_try_from_wrong_length() {
        let cells = [Square::Empty; 10];
        assert_eq!(
            Board::try_from(&cells[..]),
            Err(GameError::MalformedBoard { len: 10 })
        );
    }

    #[test]
    fn test_display_numbers_empty_cells() {
        let mut board = Board::new();
        board.set(Position::Center, Square::Occupied(Player::X));
        assert_eq!(board.display(), "1|2|3\n-+-+-\n4|X|6\n-+-+-\n7|8|9");
    }

    #[test]
    fn test_player_for_ply() {
        assert_eq!(Player::for_ply(0), Player::X);
        assert_eq!(Player::for_ply(1), Player::O);
        assert_eq!(Player::for_ply(4), Player::X);
    }
}
