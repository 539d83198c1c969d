//! Per-field value editing protocol used by `FieldEditor`.
//!
//! An adapter borrows one caller-owned value for the duration of an
//! interaction, consumes key presses, mutates the value in place and reports
//! whether its rendered content grew, shrank or stayed the same. The editor
//! never sees the concrete value type.

use core_events::Key;

/// Effect of one key press on an adapter's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditDelta {
    Unchanged,
    Appended,
    Deleted,
}

impl EditDelta {
    pub fn changed(self) -> bool {
        self != EditDelta::Unchanged
    }
}

pub trait Editable {
    fn process(&mut self, key: Key) -> EditDelta;

    /// Current content as it should be rendered.
    fn content(&self) -> String;
}

/// Free-form text: printable characters append, Backspace pops.
pub struct TextValue<'a> {
    value: &'a mut String,
}

impl<'a> TextValue<'a> {
    pub fn new(value: &'a mut String) -> Self {
        Self { value }
    }
}

impl Editable for TextValue<'_> {
    fn process(&mut self, key: Key) -> EditDelta {
        match key {
            Key::Backspace => match self.value.pop() {
                Some(_) => EditDelta::Deleted,
                None => EditDelta::Unchanged,
            },
            other => match other.printable() {
                Some(c) => {
                    self.value.push(c);
                    EditDelta::Appended
                }
                None => EditDelta::Unchanged,
            },
        }
    }

    fn content(&self) -> String {
        self.value.clone()
    }
}

/// Signed integer edited digit by digit.
///
/// Digits append (overflow is ignored), Backspace drops the last digit and
/// `-` flips the sign of a non-zero value.
pub struct IntegerValue<'a> {
    value: &'a mut i64,
}

impl<'a> IntegerValue<'a> {
    pub fn new(value: &'a mut i64) -> Self {
        Self { value }
    }
}

impl Editable for IntegerValue<'_> {
    fn process(&mut self, key: Key) -> EditDelta {
        let current = *self.value;
        match key {
            Key::Backspace if current != 0 => {
                *self.value = current / 10;
                EditDelta::Deleted
            }
            Key::Char('-') if current != 0 => {
                *self.value = current.saturating_neg();
                if *self.value < 0 {
                    EditDelta::Appended
                } else {
                    EditDelta::Deleted
                }
            }
            Key::Char(c) => {
                let Some(digit) = c.to_digit(10) else {
                    return EditDelta::Unchanged;
                };
                let digit = i64::from(digit);
                let signed = if current < 0 { -digit } else { digit };
                match current.checked_mul(10).and_then(|v| v.checked_add(signed)) {
                    Some(next) if next != current => {
                        *self.value = next;
                        EditDelta::Appended
                    }
                    _ => EditDelta::Unchanged,
                }
            }
            _ => EditDelta::Unchanged,
        }
    }

    fn content(&self) -> String {
        self.value.to_string()
    }
}

/// Yes/no flag: Space toggles, `y` / `n` set.
pub struct ToggleValue<'a> {
    value: &'a mut bool,
}

impl<'a> ToggleValue<'a> {
    pub fn new(value: &'a mut bool) -> Self {
        Self { value }
    }

    fn set(&mut self, next: bool) -> EditDelta {
        if *self.value == next {
            return EditDelta::Unchanged;
        }
        *self.value = next;
        // "no" -> "yes" grows the rendered text.
        if next {
            EditDelta::Appended
        } else {
            EditDelta::Deleted
        }
    }
}

impl Editable for ToggleValue<'_> {
    fn process(&mut self, key: Key) -> EditDelta {
        match key {
            Key::Char(' ') => {
                let next = !*self.value;
                self.set(next)
            }
            Key::Char('y') | Key::Char('Y') => self.set(true),
            Key::Char('n') | Key::Char('N') => self.set(false),
            _ => EditDelta::Unchanged,
        }
    }

    fn content(&self) -> String {
        let text = if *self.value { "yes" } else { "no" };
        text.to_string()
    }
}
