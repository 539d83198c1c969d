//! Labelled multi-field entry form.
//!
//! The editor owns the labels and the cursor; the values belong to the caller
//! and are reached through one `Editable` adapter per field, supplied to
//! `run`. Navigation keys move between fields and the confirm control; every
//! other key goes to the focused field's adapter.
//!
//! A field line reads `<label padded to max+2>  <value>`. When the value does
//! not fit, only its tail is shown so the most recent input stays next to the
//! cursor. The value itself is never truncated.

use crate::confirm::draw_confirm;
use crate::editable::Editable;
use crate::{WidgetError, WidgetResult};
use core_events::Key;
use core_model::Region;
use core_render::TitledSurface;
use core_render::text::skip_bytes;
use core_terminal::Terminal;
use tracing::{debug, info, trace};

/// Columns between the padded label and the value.
const SEPARATOR: usize = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationPolicy {
    /// Down on the confirm control wraps to the first field (Tab always wraps).
    pub down_wraps: bool,
}

/// Field cursor and termination flags. Index `count` is the confirm control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorCursor {
    field: usize,
    count: usize,
    quit: bool,
    escape: bool,
    policy: NavigationPolicy,
}

impl EditorCursor {
    pub fn new(count: usize, policy: NavigationPolicy) -> Self {
        Self {
            field: 0,
            count,
            quit: false,
            escape: false,
            policy,
        }
    }

    pub fn field(&self) -> usize {
        self.field
    }

    pub fn on_confirm(&self) -> bool {
        self.field == self.count
    }

    pub fn is_terminated(&self) -> bool {
        self.quit
    }

    pub fn cancelled(&self) -> bool {
        self.escape
    }

    /// Apply a navigation or termination key. Returns `false` when the key is
    /// not one and belongs to the focused value instead.
    pub fn navigate(&mut self, key: Key) -> bool {
        match key {
            Key::Up => self.field = self.field.saturating_sub(1),
            Key::Down => {
                if self.field < self.count {
                    self.field += 1;
                } else if self.policy.down_wraps {
                    self.field = 0;
                }
            }
            Key::Tab => {
                self.field = if self.on_confirm() { 0 } else { self.field + 1 };
            }
            Key::BackTab => {
                self.field = if self.field == 0 {
                    self.count
                } else {
                    self.field - 1
                };
            }
            Key::Enter => {
                if self.on_confirm() {
                    self.quit = true;
                }
            }
            Key::Esc => {
                self.escape = true;
                self.quit = true;
            }
            _ => return false,
        }
        true
    }
}

/// Bytes of the value hidden on the left so that label, separator, value and
/// a trailing cursor cell fit in `width` columns.
pub fn scroll_offset(label_width: usize, value_len: usize, width: usize) -> usize {
    let visible = width.saturating_sub(label_width + SEPARATOR + 1);
    value_len.saturating_sub(visible)
}

pub struct FieldEditor {
    surface: TitledSurface,
    labels: Vec<String>,
    policy: NavigationPolicy,
    cursor: EditorCursor,
}

impl FieldEditor {
    /// Draw the labels and the (unfocused) confirm control.
    pub fn new<I, S>(term: &Terminal, title: &str, labels: I, region: Region) -> WidgetResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let surface = TitledSurface::new(term, title, region)?;
        let mut labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let width = labels.iter().map(String::len).max().unwrap_or(0) + 2;
        for label in &mut labels {
            let pad = width - label.len();
            label.extend(std::iter::repeat_n(' ', pad));
        }
        let policy = NavigationPolicy::default();
        let editor = Self {
            cursor: EditorCursor::new(labels.len(), policy),
            surface,
            labels,
            policy,
        };
        let content = editor.surface.content();
        for (i, label) in editor.labels.iter().enumerate() {
            let Ok(row) = u16::try_from(i) else { break };
            content.write_text(row, 0, label)?;
        }
        draw_confirm(content, editor.surface.region().width, false)?;
        content.refresh()?;
        debug!(target: "widget.editor", fields = editor.labels.len(), "editor_created");
        Ok(editor)
    }

    pub fn with_navigation_policy(mut self, policy: NavigationPolicy) -> Self {
        self.policy = policy;
        self.cursor = EditorCursor::new(self.labels.len(), policy);
        self
    }

    /// Labels as displayed (padded to a common width).
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn cursor(&self) -> &EditorCursor {
        &self.cursor
    }

    pub fn surface(&self) -> &TitledSurface {
        &self.surface
    }

    /// Edit `values` (one per field, in field order) until the confirm
    /// control is activated or Escape is pressed. Returns `true` on normal
    /// completion and `false` when cancelled. Edits made before Escape stay
    /// in the values.
    pub fn run(&mut self, values: &mut [&mut dyn Editable]) -> WidgetResult<bool> {
        if values.len() != self.labels.len() {
            return Err(WidgetError::ValueCount {
                expected: self.labels.len(),
                got: values.len(),
            });
        }
        let term = self.surface.content().terminal().clone();
        term.set_echo(false);
        self.surface.content_mut().set_keypad(true);
        self.cursor = EditorCursor::new(self.labels.len(), self.policy);

        for (i, value) in values.iter().enumerate() {
            self.draw_field(i, &**value)?;
        }

        loop {
            self.show_focus(values)?;
            let key = self.surface.content().read_key()?;
            if self.cursor.navigate(key) {
                trace!(target: "widget.editor", field = self.cursor.field(), "editor_moved");
                if self.cursor.is_terminated() {
                    break;
                }
                continue;
            }
            if self.cursor.on_confirm() {
                continue;
            }
            let field = self.cursor.field();
            let delta = values[field].process(key);
            if delta.changed() {
                self.draw_field(field, &*values[field])?;
            }
        }

        term.set_cursor_visible(false)?;
        self.surface.content().refresh()?;
        info!(
            target: "widget.editor",
            fields = self.labels.len(),
            cancelled = self.cursor.cancelled(),
            "editor_finished"
        );
        Ok(!self.cursor.cancelled())
    }

    /// Erase and redraw one field line. Returns the column just past the
    /// rendered value.
    fn draw_field(&self, field: usize, value: &dyn Editable) -> WidgetResult<u16> {
        let content = self.surface.content();
        let Ok(row) = u16::try_from(field) else {
            return Ok(0);
        };
        let label = &self.labels[field];
        let text = value.content();
        let offset = scroll_offset(label.len(), text.len(), usize::from(content.region().width));
        let shown = skip_bytes(&text, offset);
        content.clear_to_eol(row, 0)?;
        content.write_text(row, 0, &format!("{label}  {shown}"))?;
        let end = label.len() + SEPARATOR + shown.chars().count();
        Ok(u16::try_from(end).unwrap_or(u16::MAX))
    }

    fn show_focus(&self, values: &[&mut dyn Editable]) -> WidgetResult<()> {
        let term = self.surface.content().terminal();
        let content = self.surface.content();
        let outer_width = self.surface.region().width;
        if self.cursor.on_confirm() {
            term.set_cursor_visible(false)?;
            draw_confirm(content, outer_width, true)?;
        } else {
            draw_confirm(content, outer_width, false)?;
            let field = self.cursor.field();
            let col = self.draw_field(field, &*values[field])?;
            let row = u16::try_from(field).unwrap_or(u16::MAX);
            content.move_cursor(row, col)?;
            term.set_cursor_visible(true)?;
        }
        content.refresh()?;
        Ok(())
    }
}
