use core_events::Key;
use crossterm::event::{
    KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyEventKind as CKeyEventKind,
    KeyModifiers as CKeyModifiers,
};

/// Map a crossterm key event into a `Key`.
///
/// Returns `None` for releases and for key codes that carry no meaning to the
/// widgets (modifier-only presses, media keys).
pub fn map_key_event(event: &CKeyEvent) -> Option<Key> {
    if matches!(event.kind, CKeyEventKind::Release) {
        return None;
    }
    if event.modifiers.contains(CKeyModifiers::SHIFT) && event.code == CKeyCode::Tab {
        return Some(Key::BackTab);
    }
    if let CKeyCode::Char(c) = event.code {
        let ctrl = event.modifiers.contains(CKeyModifiers::CONTROL);
        let alt = event.modifiers.contains(CKeyModifiers::ALT);
        // Ctrl+Alt together is AltGr on some layouts and still types `c`.
        match (ctrl, alt) {
            (true, false) => return Some(map_control_char(c)),
            (false, true) => return Some(Key::Unknown),
            _ => {}
        }
    }
    map_key_code(&event.code)
}

/// Control chords that a terminal reports as the named key's control code.
fn map_control_char(c: char) -> Key {
    match c.to_ascii_lowercase() {
        'j' | 'm' => Key::Enter,
        '[' => Key::Esc,
        'i' => Key::Tab,
        'h' => Key::Backspace,
        _ => Key::Unknown,
    }
}

/// Convert a crossterm key code into a `Key`.
pub fn map_key_code(code: &CKeyCode) -> Option<Key> {
    let key = match code {
        CKeyCode::Char(c) => Key::from(*c),
        CKeyCode::Enter => Key::Enter,
        CKeyCode::Esc => Key::Esc,
        CKeyCode::Backspace => Key::Backspace,
        CKeyCode::Tab => Key::Tab,
        CKeyCode::BackTab => Key::BackTab,
        CKeyCode::Up => Key::Up,
        CKeyCode::Down => Key::Down,
        CKeyCode::Left => Key::Left,
        CKeyCode::Right => Key::Right,
        CKeyCode::Home => Key::Home,
        CKeyCode::End => Key::End,
        CKeyCode::Delete => Key::Delete,
        CKeyCode::PageUp
        | CKeyCode::PageDown
        | CKeyCode::Insert
        | CKeyCode::F(_)
        | CKeyCode::KeypadBegin => Key::Unknown,
        CKeyCode::Null
        | CKeyCode::CapsLock
        | CKeyCode::ScrollLock
        | CKeyCode::NumLock
        | CKeyCode::PrintScreen
        | CKeyCode::Pause
        | CKeyCode::Menu
        | CKeyCode::Media(_)
        | CKeyCode::Modifier(_) => return None,
    };
    Some(key)
}
