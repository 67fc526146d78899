use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A discrete player command, produced from one key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    Reset,
    Quit,
}

/// Maps a key event to a command. Releases, repeats and unbound keys map to
/// `None` and are ignored.
pub fn map_key(key: KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(Command::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Left | KeyCode::Char('h') => Some(Command::MoveLeft),
        KeyCode::Right | KeyCode::Char('l') => Some(Command::MoveRight),
        KeyCode::Down | KeyCode::Char('j') => Some(Command::SoftDrop),
        KeyCode::Up | KeyCode::Char('k') => Some(Command::Rotate),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Reset),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

/// Reads every event already waiting on the terminal without blocking and
/// returns the recognized commands in arrival order.
pub fn drain_pending() -> io::Result<Vec<Command>> {
    let mut commands = Vec::new();
    while event::poll(Duration::ZERO)? {
        if let Event::Key(key) = event::read()? {
            if let Some(command) = map_key(key) {
                commands.push(command);
            }
        }
    }
    Ok(commands)
}
