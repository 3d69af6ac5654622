//! Key mapping from terminal events to game commands.
//!
//! The arrow keys move in the horizontal plane: Left/Right along x and
//! Up/Down along z (Up is away from the viewer). Each rotation axis has a key
//! pair, the first turning +1 and the second −1 quarter turn.

use crate::types::{Axis, Command};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to game commands.
pub fn handle_key_event(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        // Movement
        KeyCode::Left => Some(Command::MoveX(-1)),
        KeyCode::Right => Some(Command::MoveX(1)),
        KeyCode::Up => Some(Command::MoveZ(-1)),
        KeyCode::Down => Some(Command::MoveZ(1)),

        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            // Rotation
            'z' => Some(Command::Rotate(Axis::Y, 1)),
            'x' => Some(Command::Rotate(Axis::Y, -1)),
            'a' => Some(Command::Rotate(Axis::X, 1)),
            's' => Some(Command::Rotate(Axis::X, -1)),
            'q' => Some(Command::Rotate(Axis::Z, 1)),
            'w' => Some(Command::Rotate(Axis::Z, -1)),

            // Drops
            ' ' => Some(Command::HardDrop),
            'e' => Some(Command::SoftDrop),

            'r' => Some(Command::Reset),
            _ => None,
        },

        KeyCode::Enter => Some(Command::Start),

        _ => None,
    }
}

/// Check if key should quit the game.
///
/// `q` rotates, so quitting is Esc or Ctrl-C.
pub fn should_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
            && key.modifiers.contains(KeyModifiers::CONTROL))
}
