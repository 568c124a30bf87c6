//! Keyboard handling for the message input.

/// Keys the input distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Other,
}

/// A key press in the message input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub shift: bool,
}

impl KeyEvent {
    pub fn enter() -> Self {
        Self {
            key: Key::Enter,
            shift: false,
        }
    }

    pub fn shift_enter() -> Self {
        Self {
            key: Key::Enter,
            shift: true,
        }
    }
}

/// What should happen for a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Suppress the input's default handling and send the draft.
    Send,
    /// Let the input control handle it (shift+Enter inserts a newline).
    Default,
}

impl KeyAction {
    pub fn for_event(event: KeyEvent) -> Self {
        match event {
            KeyEvent {
                key: Key::Enter,
                shift: false,
            } => KeyAction::Send,
            _ => KeyAction::Default,
        }
    }
}
