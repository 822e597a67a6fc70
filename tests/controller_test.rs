//! Tests for the game controller state machine.

use noughts::{
    AI_PLAYER, GameConfig, GameController, GameError, GameEvent, GameStatus, Mode, MoveRejection,
    Outcome, Player, Position, Square,
};

fn two_player() -> GameController {
    GameController::new(&GameConfig::new().with_ai_delay_ms(0))
}

fn single_ai(delay_ms: u64) -> GameController {
    GameController::new(
        &GameConfig::new()
            .with_mode(Mode::SingleAi)
            .with_ai_delay_ms(delay_ms),
    )
}

fn play(game: &mut GameController, moves: &[usize]) {
    for &index in moves {
        game.request_move(index).expect("legal move");
    }
}

#[test]
fn test_two_player_alternates() {
    let mut game = two_player();
    assert_eq!(game.current_side(), Player::X);
    play(&mut game, &[4]);
    assert_eq!(game.current_side(), Player::O);
    play(&mut game, &[0]);
    assert_eq!(game.current_board().get(Position::TopLeft), Square::Occupied(Player::O));
    assert_eq!(game.status(), GameStatus::Running);
}

#[test]
fn test_same_cell_twice_rejected() {
    let mut game = two_player();
    play(&mut game, &[4]);
    let board = game.current_board();

    let result = game.request_move(4);
    assert_eq!(
        result,
        Err(GameError::InvalidMove {
            index: 4,
            reason: MoveRejection::Occupied
        })
    );
    assert_eq!(game.current_board(), board);
    assert_eq!(game.current_side(), Player::O);
}

#[test]
fn test_win_stops_game() {
    let mut game = two_player();
    play(&mut game, &[0, 3, 1, 4, 2]);
    assert_eq!(game.status(), GameStatus::Stopped(Some(Outcome::Winner(Player::X))));

    let result = game.request_move(8);
    assert!(matches!(
        result,
        Err(GameError::InvalidMove {
            reason: MoveRejection::GameOver,
            ..
        })
    ));
    assert_eq!(game.timeline().len(), 6);
}

#[test]
fn test_full_board_draw() {
    let mut game = two_player();
    // X O X / X O O / O X X
    play(&mut game, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);
    assert_eq!(game.status(), GameStatus::Stopped(Some(Outcome::Tie)));
    assert_eq!(game.status().outcome(), Some(Outcome::Tie));
}

#[test]
fn test_rewind_to_mid_game_pauses() {
    let mut game = two_player();
    play(&mut game, &[0, 4, 8]);

    let snapshot = game.request_rewind(1).unwrap();
    assert_eq!(snapshot.changed(), Some(Position::TopLeft));
    assert_eq!(game.status(), GameStatus::Stopped(None));
    assert_eq!(game.current_side(), Player::O);
    assert_eq!(game.timeline().len(), 4);
}

#[test]
fn test_rewind_to_finished_point_recomputes_outcome() {
    let mut game = two_player();
    play(&mut game, &[0, 3, 1, 4, 2]);
    game.request_rewind(2).unwrap();
    game.request_rewind(5).unwrap();
    assert_eq!(game.status(), GameStatus::Stopped(Some(Outcome::Winner(Player::X))));
}

#[test]
fn test_rewind_out_of_range_is_noop() {
    let mut game = two_player();
    play(&mut game, &[0]);
    let epoch = game.epoch();

    assert_eq!(
        game.request_rewind(5),
        Err(GameError::OutOfRange { index: 5, len: 2 })
    );
    assert_eq!(game.status(), GameStatus::Running);
    assert_eq!(game.epoch(), epoch);
}

#[test]
fn test_move_after_rewind_resumes_and_truncates() {
    let mut game = two_player();
    play(&mut game, &[0, 4, 8, 2, 6]);
    game.request_rewind(2).unwrap();

    let snapshot = game.request_move(1).unwrap();
    assert_eq!(snapshot.changed(), Some(Position::TopCenter));
    assert_eq!(game.status(), GameStatus::Running);
    assert_eq!(game.timeline().len(), 4);
    assert_eq!(game.timeline().cursor(), 3);
}

#[test]
fn test_reset_clears_history_and_keeps_mode() {
    let mut game = single_ai(0);
    play(&mut game, &[4]);
    let epoch = game.epoch();

    game.request_reset();
    assert_eq!(game.timeline().len(), 1);
    assert_eq!(game.status(), GameStatus::Running);
    assert_eq!(game.mode(), Mode::SingleAi);
    assert!(game.epoch() > epoch);
}

#[test]
fn test_single_ai_replies_immediately_without_delay() {
    let mut game = single_ai(0);
    play(&mut game, &[0]);

    assert_eq!(game.timeline().cursor(), 2);
    assert_eq!(game.status(), GameStatus::Running);
    // Center is the only reply to a corner opening that does not lose.
    assert_eq!(game.current_board().get(Position::Center), Square::Occupied(AI_PLAYER));
}

#[test]
fn test_single_ai_blocks() {
    let mut game = single_ai(0);
    play(&mut game, &[0]);
    let reply = game.timeline().current().changed().unwrap();
    assert_eq!(reply, Position::Center);
    play(&mut game, &[1]);
    assert_eq!(game.current_board().get(Position::TopRight), Square::Occupied(AI_PLAYER));
}

#[test]
fn test_thinking_blocks_human_moves() {
    let mut game = single_ai(350);
    play(&mut game, &[4]);
    assert_eq!(game.status(), GameStatus::Thinking);

    let result = game.request_move(0);
    assert!(matches!(
        result,
        Err(GameError::InvalidMove {
            reason: MoveRejection::AiThinking,
            ..
        })
    ));

    let ticket = game.take_scheduled_ai_move().unwrap();
    let snapshot = game.resolve_ai_move(ticket).unwrap();
    assert!(snapshot.changed().is_some());
    assert_eq!(game.status(), GameStatus::Running);
    assert_eq!(game.current_side(), Player::X);
}

#[test]
fn test_stale_ticket_after_reset_is_noop() {
    let mut game = single_ai(350);
    play(&mut game, &[4]);
    let ticket = game.take_scheduled_ai_move().unwrap();

    game.request_reset();
    assert_eq!(game.resolve_ai_move(ticket), None);
    assert_eq!(game.timeline().len(), 1);
    assert_eq!(game.status(), GameStatus::Running);
}

#[test]
fn test_stale_ticket_after_rewind_is_noop() {
    let mut game = single_ai(350);
    play(&mut game, &[4]);
    let ticket = game.take_scheduled_ai_move().unwrap();

    game.request_rewind(0).unwrap();
    assert_eq!(game.resolve_ai_move(ticket), None);
    assert_eq!(game.timeline().len(), 2);
    assert_eq!(game.status(), GameStatus::Stopped(None));
}

#[test]
fn test_toggle_into_ai_on_o_turn_moves_at_once() {
    let mut game = two_player();
    play(&mut game, &[4]);
    assert_eq!(game.toggle_mode(), Mode::SingleAi);

    assert_eq!(game.timeline().cursor(), 2);
    assert_eq!(game.current_side(), Player::X);
    assert_eq!(game.status(), GameStatus::Running);
}

#[test]
fn test_toggle_into_ai_on_x_turn_waits() {
    let mut game = two_player();
    game.toggle_mode();
    assert_eq!(game.mode(), Mode::SingleAi);
    assert_eq!(game.timeline().cursor(), 0);
}

#[test]
fn test_toggle_out_of_ai_cancels_thinking() {
    let mut game = single_ai(350);
    play(&mut game, &[4]);
    let ticket = game.take_scheduled_ai_move().unwrap();

    assert_eq!(game.toggle_mode(), Mode::TwoPlayer);
    assert_eq!(game.status(), GameStatus::Running);
    assert_eq!(game.resolve_ai_move(ticket), None);

    // O is now a human.
    play(&mut game, &[0]);
    assert_eq!(game.current_board().get(Position::TopLeft), Square::Occupied(Player::O));
}

#[test]
fn test_resume_on_ai_turn_starts_ai() {
    let mut game = single_ai(0);
    play(&mut game, &[0, 2]);
    game.request_rewind(1).unwrap();

    let result = game.request_move(8);
    assert!(matches!(
        result,
        Err(GameError::InvalidMove {
            reason: MoveRejection::NotHumansTurn,
            ..
        })
    ));

    assert_eq!(game.request_resume(), GameStatus::Running);
    assert_eq!(game.timeline().cursor(), 2);
    assert_eq!(game.timeline().len(), 3);
    assert_eq!(game.current_side(), Player::X);
}

#[test]
fn test_subscribers_see_state_changes() {
    let mut game = two_player();
    let mut events = game.subscribe();

    play(&mut game, &[0, 3, 1, 4, 2]);
    game.request_reset();

    let mut received = Vec::new();
    while let Ok(event) = events.try_recv() {
        received.push(event);
    }

    assert_eq!(
        received[0],
        GameEvent::MoveApplied {
            index: 1,
            position: Position::TopLeft,
            player: Player::X
        }
    );
    assert!(received.contains(&GameEvent::StatusChanged(GameStatus::Stopped(Some(
        Outcome::Winner(Player::X)
    )))));
    assert!(received.contains(&GameEvent::Reset));
    assert_eq!(
        received.last(),
        Some(&GameEvent::StatusChanged(GameStatus::Running))
    );
}

#[test]
fn test_dropped_subscriber_is_pruned() {
    let mut game = two_player();
    drop(game.subscribe());
    let mut live = game.subscribe();

    play(&mut game, &[4]);
    assert!(live.try_recv().is_ok());
}
