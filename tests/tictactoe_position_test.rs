//! Tests for board positions and move generation.

use noughts::{Board, Player, Position, Square};

#[test]
fn test_position_to_index() {
    assert_eq!(Position::TopLeft.to_index(), 0);
    assert_eq!(Position::Center.to_index(), 4);
    assert_eq!(Position::BottomRight.to_index(), 8);
}

#[test]
fn test_position_from_index() {
    assert_eq!(Position::from_index(0), Some(Position::TopLeft));
    assert_eq!(Position::from_index(4), Some(Position::Center));
    assert_eq!(Position::from_index(8), Some(Position::BottomRight));
    assert_eq!(Position::from_index(9), None);
}

#[test]
fn test_coordinates_are_column_then_row() {
    assert_eq!(Position::TopLeft.coordinates(), (1, 1));
    assert_eq!(Position::MiddleRight.coordinates(), (3, 2));
    assert_eq!(Position::BottomCenter.coordinates(), (2, 3));
}

#[test]
fn test_from_label_or_number() {
    assert_eq!(Position::from_label_or_number("1"), Some(Position::TopLeft));
    assert_eq!(Position::from_label_or_number("9"), Some(Position::BottomRight));
    assert_eq!(Position::from_label_or_number("0"), None);
    assert_eq!(Position::from_label_or_number("Center"), Some(Position::Center));
    assert_eq!(Position::from_label_or_number("middle left"), Some(Position::MiddleLeft));
    assert_eq!(Position::from_label_or_number("nowhere"), None);
}

#[test]
fn test_from_label_requires_whole_label() {
    assert_eq!(Position::from_label_or_number("TOP-RIGHT"), Some(Position::TopRight));
    assert_eq!(Position::from_label_or_number("top"), None);
    assert_eq!(Position::from_label_or_number("cent"), None);
}

#[test]
fn test_valid_moves_empty_board() {
    let board = Board::new();
    let valid = Position::valid_moves(&board);
    assert_eq!(valid, Position::ALL);
}

#[test]
fn test_valid_moves_filters_occupied() {
    let mut board = Board::new();
    board.set(Position::TopLeft, Square::Occupied(Player::X));
    board.set(Position::Center, Square::Occupied(Player::O));

    let valid = Position::valid_moves(&board);
    assert_eq!(valid.len(), 7);
    assert!(!valid.contains(&Position::TopLeft));
    assert!(!valid.contains(&Position::Center));
    assert!(valid.windows(2).all(|w| w[0] < w[1]));
}
