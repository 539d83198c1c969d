//! Command queue used by the crossterm backend to present a region.
//!
//! A refresh is translated into `MoveTo` / `SetAttr` / `Print` commands that
//! are queued and flushed once, so a region never shows half-drawn on screen.
//! Consecutive cells sharing an attribute are batched into one `Print`.
//!
//! Invariants:
//! * Commands preserve ordering; nothing is flushed mid-region.
//! * Positions are absolute screen coordinates; the caller clips.

use crate::buffer::Cell;
use crate::glyph::Attr;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Print, SetAttribute},
};
use std::io::{self, Write};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    MoveTo(u16, u16),
    SetAttr(Attr),
    Print(String),
}

#[derive(Default)]
pub(crate) struct Writer {
    cmds: Vec<Command>,
    current: Option<Attr>,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cmds.push(Command::MoveTo(x, y));
    }

    /// Queue one row of cells starting at `(x, y)`.
    pub fn cells(&mut self, x: u16, y: u16, cells: &[Cell]) {
        self.move_to(x, y);
        let mut run = String::new();
        for cell in cells {
            if self.current != Some(cell.attr) {
                if !run.is_empty() {
                    self.cmds.push(Command::Print(std::mem::take(&mut run)));
                }
                self.cmds.push(Command::SetAttr(cell.attr));
                self.current = Some(cell.attr);
            }
            run.push(cell.ch);
        }
        if !run.is_empty() {
            self.cmds.push(Command::Print(run));
        }
    }

    #[cfg(test)]
    pub fn commands(&self) -> &[Command] {
        &self.cmds
    }

    pub fn flush<W: Write>(self, out: &mut W) -> io::Result<()> {
        for c in self.cmds {
            match c {
                Command::MoveTo(x, y) => {
                    queue!(out, MoveTo(x, y))?;
                }
                Command::SetAttr(attr) => {
                    queue!(out, SetAttribute(Attribute::Reset))?;
                    if attr.contains(Attr::REVERSE) {
                        queue!(out, SetAttribute(Attribute::Reverse))?;
                    }
                    if attr.contains(Attr::BOLD) {
                        queue!(out, SetAttribute(Attribute::Bold))?;
                    }
                    if attr.contains(Attr::UNDERLINE) {
                        queue!(out, SetAttribute(Attribute::Underlined))?;
                    }
                }
                Command::Print(s) => {
                    queue!(out, Print(s))?;
                }
            }
        }
        queue!(out, SetAttribute(Attribute::Reset))?;
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(ch: char, attr: Attr) -> Cell {
        Cell { ch, attr }
    }

    #[test]
    fn batches_runs_sharing_an_attribute() {
        let mut w = Writer::new();
        w.cells(
            2,
            1,
            &[
                cell('a', Attr::NORMAL),
                cell('b', Attr::NORMAL),
                cell('c', Attr::REVERSE),
                cell('d', Attr::NORMAL),
            ],
        );
        assert_eq!(
            w.commands(),
            &[
                Command::MoveTo(2, 1),
                Command::SetAttr(Attr::NORMAL),
                Command::Print("ab".into()),
                Command::SetAttr(Attr::REVERSE),
                Command::Print("c".into()),
                Command::SetAttr(Attr::NORMAL),
                Command::Print("d".into()),
            ]
        );
    }

    #[test]
    fn flush_emits_escape_sequences() {
        let mut w = Writer::new();
        w.cells(0, 0, &[cell('x', Attr::REVERSE)]);
        let mut out = Vec::new();
        w.flush(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains('x'));
        assert!(text.contains("\x1b[7m"), "reverse video expected: {text:?}");
    }
}
