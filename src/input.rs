//! Keyboard controls.
//!
//! - `s`: start the rain
//! - `x`: stop the rain
//! - `h`: show/hide the status bar
//! - `q`, `Esc`, `Ctrl+C`: quit

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Start,
    Stop,
    ToggleStatus,
    Quit,
    /// Not bound to anything
    None,
}

/// Map a key event to an action. Only presses count; repeats and
/// releases map to [`KeyAction::None`].
pub fn handle_key_event(event: KeyEvent) -> KeyAction {
    let KeyEvent {
        code,
        modifiers,
        kind,
        ..
    } = event;

    if kind != KeyEventKind::Press {
        return KeyAction::None;
    }

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') | KeyCode::Char('C') => KeyAction::Quit,
            _ => KeyAction::None,
        };
    }

    match code {
        KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Start,
        KeyCode::Char('x') | KeyCode::Char('X') => KeyAction::Stop,
        KeyCode::Char('h') | KeyCode::Char('H') => KeyAction::ToggleStatus,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
        _ => KeyAction::None,
    }
}
