//! Key mapping from terminal events to scroll actions.

use crate::types::ScrollAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to scroll actions.
pub fn handle_key_event(key: KeyEvent) -> Option<ScrollAction> {
    match key.code {
        // Camera movement
        KeyCode::Left
        | KeyCode::Char('h')
        | KeyCode::Char('H')
        | KeyCode::Char('a')
        | KeyCode::Char('A') => Some(ScrollAction::MoveLeft),
        KeyCode::Right
        | KeyCode::Char('l')
        | KeyCode::Char('L')
        | KeyCode::Char('d')
        | KeyCode::Char('D') => Some(ScrollAction::MoveRight),
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(ScrollAction::MoveUp),
        KeyCode::Down
        | KeyCode::Char('j')
        | KeyCode::Char('J')
        | KeyCode::Char('s')
        | KeyCode::Char('S') => Some(ScrollAction::MoveDown),

        // View
        KeyCode::Char('v') | KeyCode::Char('V') | KeyCode::Tab => {
            Some(ScrollAction::ToggleBufferView)
        }
        KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Home => Some(ScrollAction::JumpHome),

        _ => None,
    }
}

/// Check if key should quit the program.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
