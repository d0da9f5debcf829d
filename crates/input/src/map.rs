//! Key mapping from terminal events to harness actions.

use crate::types::RunnerAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to harness actions.
pub fn map_key(key: KeyEvent) -> Option<RunnerAction> {
    if should_quit(key) {
        return Some(RunnerAction::Quit);
    }
    match key.code {
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Char(' ') => {
            Some(RunnerAction::TogglePause)
        }
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
