//! Interactive terminal game over stdin.

use anyhow::Result;
use noughts::{GameConfig, GameSession, GameStatus, Mode, Position};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, instrument};

/// One line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Place(Position),
    Jump(usize),
    Resume,
    Reset,
    ToggleAi,
    History,
    Help,
    Quit,
    Unknown(String),
}

impl Input {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        let mut words = line.split_whitespace();
        match (words.next(), words.next()) {
            (Some("jump"), Some(n)) => n
                .parse()
                .map(Input::Jump)
                .unwrap_or_else(|_| Input::Unknown(line.to_string())),
            (Some("resume"), None) => Input::Resume,
            (Some("reset"), None) => Input::Reset,
            (Some("ai"), None) => Input::ToggleAi,
            (Some("history"), None) => Input::History,
            (Some("help"), None) => Input::Help,
            (Some("quit" | "exit"), None) => Input::Quit,
            _ => Position::from_label_or_number(line)
                .map(Input::Place)
                .unwrap_or_else(|| Input::Unknown(line.to_string())),
        }
    }
}

const HELP: &str = "\
Commands:
  1-9 or a label   place a mark (\"center\", \"top-left\", ...)
  jump N           go back to move N (0 is the empty board)
  resume           continue from the move you jumped to
  reset            start over
  ai               toggle playing against the AI
  history          list recorded moves
  quit             leave";

/// Runs the interactive loop until `quit` or end of input.
#[instrument(skip(config), fields(mode = %config.mode()))]
pub async fn run(config: GameConfig) -> Result<()> {
    info!("Starting interactive game");
    let session = GameSession::new(&config);
    let mut events = session.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Noughts and Crosses ({})", session.mode());
    println!("{}", HELP);
    render(&session);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if !handle(&session, Input::parse(&line)) {
                    break;
                }
            }
            Some(event) = events.recv() => {
                debug!(?event, "Game event");
                while let Ok(event) = events.try_recv() {
                    debug!(?event, "Game event");
                }
                render(&session);
            }
        }
    }

    info!("Interactive game finished");
    Ok(())
}

/// Applies one input. Returns false when the player quits.
fn handle(session: &GameSession, input: Input) -> bool {
    match input {
        Input::Place(pos) => {
            if let Err(e) = session.request_move(pos.to_index()) {
                println!("{}", e);
            }
        }
        Input::Jump(index) => {
            if let Err(e) = session.request_rewind(index) {
                println!("{}", e);
            }
        }
        Input::Resume => {
            session.request_resume();
        }
        Input::Reset => session.request_reset(),
        Input::ToggleAi => {
            session.toggle_mode();
        }
        Input::History => print_history(session),
        Input::Help => println!("{}", HELP),
        Input::Quit => return false,
        Input::Unknown(text) => println!("Unrecognised input: {:?} (type 'help')", text),
    }
    true
}

fn render(session: &GameSession) {
    let timeline = session.timeline();
    println!();
    println!("{}", timeline.current().board().display());
    match session.status() {
        GameStatus::Running => println!("Next player: {}", session.current_side()),
        GameStatus::Thinking => println!("AI is thinking..."),
        GameStatus::Stopped(Some(outcome)) => println!("{}", outcome),
        GameStatus::Stopped(None) => println!(
            "Viewing move {} of {}; play a cell or 'resume' to continue from here",
            timeline.cursor(),
            timeline.len() - 1
        ),
    }
    if session.mode() == Mode::SingleAi {
        println!("(playing against the AI)");
    }
}

fn print_history(session: &GameSession) {
    let timeline = session.timeline();
    for (index, snapshot) in timeline.snapshots().iter().enumerate() {
        let marker = if index == timeline.cursor() { ">" } else { " " };
        println!("{} {:>2}: {}", marker, index, snapshot.describe(index));
    }
}
