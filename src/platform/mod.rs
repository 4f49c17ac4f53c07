//! Platform abstraction layer
//!
//! Handles terminal specifics for:
//! - Input events (crossterm → `PlatformEvent`, key bindings)
//! - Time (session clock, frame pacing)

pub mod input;
pub mod time;

use glam::IVec2;

use crate::sim::{InputEvent, MatchKey};

pub use input::{KeyTracker, TerminalGuard, TerminalInput};
pub use time::{FrameLimiter, SessionClock};

/// Keys the game distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    Char(char),
    Up,
    Down,
    Left,
    Right,
    Enter,
    Backspace,
    Tab,
    BackTab,
    Esc,
}

impl Key {
    /// Identity used for press/release pairing (letters are case-folded)
    pub fn normalized(self) -> Key {
        match self {
            Key::Char(c) => Key::Char(c.to_ascii_lowercase()),
            other => other,
        }
    }
}

/// Frontend-neutral input event; mouse positions are in field units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformEvent {
    KeyDown(Key),
    /// Auto-repeat of a held key; only text entry reacts to it
    KeyRepeat(Key),
    KeyUp(Key),
    MouseMove(IVec2),
    MouseDown(IVec2),
    Quit,
}

/// Match controls: W/S left paddle, arrows right paddle, Space pause,
/// I toggles the AI, R resets, Esc leaves the match
pub fn match_key(key: Key) -> Option<MatchKey> {
    let key = match key.normalized() {
        Key::Char('w') => MatchKey::LeftUp,
        Key::Char('s') => MatchKey::LeftDown,
        Key::Up => MatchKey::RightUp,
        Key::Down => MatchKey::RightDown,
        Key::Char(' ') => MatchKey::Pause,
        Key::Char('i') => MatchKey::ToggleAi,
        Key::Char('r') => MatchKey::Reset,
        Key::Esc => MatchKey::Escape,
        _ => return None,
    };
    Some(key)
}

/// Translate a platform event into a match input edge
pub fn match_input(event: &PlatformEvent) -> Option<InputEvent> {
    match *event {
        PlatformEvent::KeyDown(key) => match_key(key).map(InputEvent::KeyDown),
        PlatformEvent::KeyUp(key) => match_key(key).map(InputEvent::KeyUp),
        PlatformEvent::Quit => Some(InputEvent::Quit),
        PlatformEvent::KeyRepeat(_)
        | PlatformEvent::MouseMove(_)
        | PlatformEvent::MouseDown(_) => None,
    }
}
