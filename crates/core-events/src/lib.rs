//! Backend-neutral key codes consumed by the interactive widgets.
//!
//! The terminal backend decodes raw input into `Key`; widgets only ever match
//! on these variants. Special keys are distinct from printable characters so
//! that `Key::Char` always means "this character was typed".

use std::fmt;

/// One decoded key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Tab,
    /// Shift-Tab.
    BackTab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    Delete,
    /// A key the backend read but could not decode (or a special key read
    /// without keypad mode).
    Unknown,
}

impl Key {
    /// Printable character payload, if any. Control characters are not printable.
    pub fn printable(&self) -> Option<char> {
        match self {
            Key::Char(c) if !c.is_control() => Some(*c),
            _ => None,
        }
    }

    /// Keys still delivered when the backend reads without keypad mode.
    pub fn survives_without_keypad(&self) -> bool {
        matches!(
            self,
            Key::Char(_) | Key::Enter | Key::Esc | Key::Backspace | Key::Tab
        )
    }

    /// Variant name without the payload, for logs that must not carry typed
    /// text.
    pub fn kind(&self) -> &'static str {
        match self {
            Key::Char(_) => "char",
            Key::Enter => "enter",
            Key::Esc => "esc",
            Key::Backspace => "backspace",
            Key::Tab => "tab",
            Key::BackTab => "back_tab",
            Key::Up => "up",
            Key::Down => "down",
            Key::Left => "left",
            Key::Right => "right",
            Key::Home => "home",
            Key::End => "end",
            Key::Delete => "delete",
            Key::Unknown => "unknown",
        }
    }

    /// Build a key sequence that types `text` one character at a time.
    pub fn typed(text: &str) -> impl Iterator<Item = Key> + '_ {
        text.chars().map(Key::Char)
    }
}

impl From<char> for Key {
    fn from(c: char) -> Self {
        match c {
            '\n' | '\r' => Key::Enter,
            '\t' => Key::Tab,
            '\x1b' => Key::Esc,
            '\x08' | '\x7f' => Key::Backspace,
            other => Key::Char(other),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "Char({c:?})"),
            other => write!(f, "{other:?}"),
        }
    }
}
