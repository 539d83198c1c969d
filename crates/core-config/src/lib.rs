//! Configuration loading and parsing.
//!
//! Parses `tuikit.toml` (or an override path provided by the binary) into
//! widget behaviour policies:
//!
//! ```toml
//! [selection]
//! escape = "discard"   # or "keep"
//! centered = false
//!
//! [editor]
//! down_wraps = false
//! ```
//!
//! Every field is optional. A missing file yields defaults; a malformed file
//! yields defaults plus a warning under the `config` target. Unknown fields
//! are ignored.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, io, path::PathBuf};
use tracing::{info, warn};

pub const FILE_NAME: &str = "tuikit.toml";

/// What Escape does to a selection in progress.
#[derive(Debug, Deserialize, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EscapeSetting {
    Keep,
    #[default]
    Discard,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct SelectionConfig {
    #[serde(default)]
    pub escape: EscapeSetting,
    #[serde(default)]
    pub centered: bool,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EditorConfig {
    #[serde(default)]
    pub down_wraps: bool,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub selection: SelectionConfig,
    #[serde(default)]
    pub editor: EditorConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub path: Option<PathBuf>, // file the values came from, if any
    pub file: ConfigFile,
}

/// Local `tuikit.toml` first, then the platform config dir (XDG / AppData).
pub fn discover() -> PathBuf {
    let local = PathBuf::from(FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("tuikit").join(FILE_NAME);
    }
    local
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Config::default()),
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_unreadable");
            return Ok(Config::default());
        }
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(
                target: "config",
                path = %path.display(),
                escape = ?file.selection.escape,
                centered = file.selection.centered,
                down_wraps = file.editor.down_wraps,
                "config_loaded"
            );
            Ok(Config {
                path: Some(path),
                file,
            })
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed");
            Ok(Config::default())
        }
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

    fn write_config(text: &str) -> tempfile::NamedTempFile {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), text).unwrap();
        tmp
    }

    #[test]
    fn default_config_when_missing_file() {
        let cfg = load_from(Some(PathBuf::from("__nonexistent_hopefully__.toml"))).unwrap();
        assert_eq!(cfg.file.selection.escape, EscapeSetting::Discard);
        assert!(!cfg.file.selection.centered);
        assert!(!cfg.file.editor.down_wraps);
        assert!(cfg.path.is_none());
    }

    #[test]
    fn parses_selection_and_editor_tables() {
        let tmp = write_config(
            "[selection]\nescape = \"keep\"\ncentered = true\n[editor]\ndown_wraps = true\n",
        );
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.file.selection.escape, EscapeSetting::Keep);
        assert!(cfg.file.selection.centered);
        assert!(cfg.file.editor.down_wraps);
        assert_eq!(cfg.path.as_deref(), Some(tmp.path()));
    }

    #[test]
    fn partial_tables_fill_in_defaults() {
        let tmp = write_config("[editor]\ndown_wraps = true\n");
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.file.selection.escape, EscapeSetting::Discard);
        assert!(cfg.file.editor.down_wraps);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let tmp = write_config("[selection]\ncolor = \"red\"\n[theme]\nname = \"x\"\n");
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.file.selection.escape, EscapeSetting::Discard);
        assert!(cfg.path.is_some());
    }

    #[test]
    fn parse_error_falls_back_to_defaults_with_warning() {
        let tmp = write_config("[selection]\nescape = \"sometimes\"\n");
        let (writer, buffer) = BufferWriter::new();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::INFO)
            .with_target(true)
            .with_ansi(false)
            .without_time()
            .with_writer(writer)
            .finish();

        let cfg = with_default(subscriber, || load_from(Some(tmp.path().to_path_buf()))).unwrap();

        let log_output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(log_output.contains("WARN config:"));
        assert!(log_output.contains("config_parse_failed"));
        assert_eq!(cfg.file.selection.escape, EscapeSetting::Discard);
        assert!(cfg.path.is_none());
    }
}
