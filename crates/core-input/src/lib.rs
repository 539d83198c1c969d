//! Blocking key input backed by `crossterm::event::read`.
//!
//! Reads are strictly sequential: one call blocks until one decodable key
//! press is available. Non-key events (resize, focus, mouse, paste) and key
//! releases are skipped.

mod key_token;

pub use key_token::{map_key_code, map_key_event};

use core_events::Key;
use crossterm::event::{self, Event as CEvent};
use std::io;

/// Block until the next key press and decode it.
///
/// Without `keypad` only printable characters, Enter, Tab, Backspace and
/// Escape are decoded; every other special key arrives as `Key::Unknown`.
pub fn read_key(keypad: bool) -> io::Result<Key> {
    loop {
        match event::read()? {
            CEvent::Key(ev) => {
                let Some(key) = map_key_event(&ev) else {
                    continue;
                };
                let key = apply_keypad(key, keypad);
                trace_key(key, keypad);
                return Ok(key);
            }
            CEvent::Paste(text) => {
                tracing::trace!(target: "input.paste", size_bytes = text.len(), "paste_ignored");
            }
            _ => {}
        }
    }
}

/// Typed characters never reach the log; only the key kind does.
fn trace_key(key: Key, keypad: bool) {
    tracing::trace!(
        target: "input",
        keypad,
        kind = key.kind(),
        printable = key.printable().is_some(),
        "key_read"
    );
}

/// Collapse special keys when keypad decoding is off.
pub fn apply_keypad(key: Key, keypad: bool) -> Key {
    if keypad || key.survives_without_keypad() {
        key
    } else {
        Key::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex, MutexGuard};
    use tracing::Level;
    use tracing::subscriber::with_default;
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone)]
    struct BufferWriter {
        inner: Arc<Mutex<Vec<u8>>>,
    }

    impl BufferWriter {
        fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
            let buf = Arc::new(Mutex::new(Vec::new()));
            (Self { inner: buf.clone() }, buf)
        }
    }

    struct LockedWriter<'a> {
        guard: MutexGuard<'a, Vec<u8>>,
    }

    impl Write for LockedWriter<'_> {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.guard.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for BufferWriter {
        type Writer = LockedWriter<'a>;

        fn make_writer(&'a self) -> Self::Writer {
            LockedWriter {
                guard: self.inner.lock().expect("log buffer poisoned"),
            }
        }
    }

    #[test]
    fn key_trace_omits_typed_characters() {
        let (writer, buffer) = BufferWriter::new();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::TRACE)
            .with_target(true)
            .with_ansi(false)
            .without_time()
            .with_writer(writer)
            .finish();

        with_default(subscriber, || {
            for key in Key::typed("hunter2") {
                trace_key(key, true);
            }
            trace_key(Key::Enter, true);
        });

        let log_output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(log_output.contains("TRACE input:"));
        assert_eq!(log_output.matches("key_read").count(), 8);
        assert!(log_output.contains("kind=\"char\""));
        assert!(log_output.contains("kind=\"enter\""));
        for c in "hunter2".chars() {
            assert!(!log_output.contains(&format!("'{c}'")));
        }
        assert!(!log_output.contains("Char("));
    }

    #[test]
    fn keypad_off_hides_arrows() {
        assert_eq!(apply_keypad(Key::Up, false), Key::Unknown);
        assert_eq!(apply_keypad(Key::Up, true), Key::Up);
        assert_eq!(apply_keypad(Key::Char('q'), false), Key::Char('q'));
        assert_eq!(apply_keypad(Key::Esc, false), Key::Esc);
    }
}
