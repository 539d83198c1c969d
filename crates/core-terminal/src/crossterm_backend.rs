//! Crossterm-backed terminal.
//!
//! Entering switches to raw mode and the alternate screen; leaving (or
//! dropping the backend) restores the terminal even on early return or panic
//! unwinding. Raw mode already suppresses the tty echo, so the echo flag is
//! implemented in software by `TerminalBackend::read_key`.
//!
//! Refresh keeps the rows last presented for each region and only re-emits
//! rows that changed, unless the region was `clear`ed since.

use crate::buffer::{Cell, RegionHandle, RegionTable};
use crate::writer::Writer;
use crate::{BackendResult, TerminalBackend};
use core_events::Key;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    terminal::{
        self, EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode,
        enable_raw_mode,
    },
};
use std::collections::BTreeMap;
use std::io::{Stdout, Write, stdout};
use tracing::{debug, trace};

pub struct CrosstermBackend {
    entered: bool,
    out: Stdout,
    regions: RegionTable,
    presented: BTreeMap<RegionHandle, Vec<Vec<Cell>>>,
    echo: bool,
    cursor_visible: bool,
}

impl Default for CrosstermBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CrosstermBackend {
    /// Echo starts on, as on a freshly opened terminal; widgets that read
    /// silently turn it off themselves.
    pub fn new() -> Self {
        Self {
            entered: false,
            out: stdout(),
            regions: RegionTable::new(),
            presented: BTreeMap::new(),
            echo: true,
            cursor_visible: true,
        }
    }

    pub fn enter(&mut self) -> BackendResult<()> {
        if !self.entered {
            enable_raw_mode()?;
            execute!(self.out, EnterAlternateScreen)?;
            self.entered = true;
            debug!(target: "terminal", "entered_alternate_screen");
        }
        Ok(())
    }

    pub fn leave(&mut self) -> BackendResult<()> {
        if self.entered {
            execute!(self.out, LeaveAlternateScreen, Show)?;
            disable_raw_mode()?;
            self.entered = false;
            debug!(target: "terminal", "left_alternate_screen");
        }
        Ok(())
    }

    pub fn set_title(&mut self, title: &str) -> BackendResult<()> {
        execute!(self.out, SetTitle(title))?;
        Ok(())
    }
}

impl TerminalBackend for CrosstermBackend {
    fn regions(&self) -> &RegionTable {
        &self.regions
    }

    fn regions_mut(&mut self) -> &mut RegionTable {
        &mut self.regions
    }

    fn screen_limits(&self) -> (u16, u16) {
        // Fall back to the classic 24x80 when the size cannot be queried
        // (output redirected).
        match terminal::size() {
            Ok((cols, rows)) => (rows, cols),
            Err(_) => (24, 80),
        }
    }

    fn refresh(&mut self, handle: RegionHandle) -> BackendResult<()> {
        let buffer = self.regions.get_mut(handle)?;
        let force = buffer.take_repaint();
        let region = buffer.region();
        let previous = self.presented.entry(handle).or_default();
        let mut writer = Writer::new();
        let mut emitted = 0usize;
        for row in 0..region.height {
            let cells = buffer.row(row);
            let idx = usize::from(row);
            let unchanged = !force && previous.get(idx).is_some_and(|p| p.as_slice() == cells);
            if unchanged {
                continue;
            }
            writer.cells(region.x, region.y + row, cells);
            emitted += 1;
        }
        *previous = (0..region.height).map(|r| buffer.row(r).to_vec()).collect();
        let (cy, cx) = buffer.cursor();
        writer.flush(&mut self.out)?;
        queue!(self.out, MoveTo(region.x + cx, region.y + cy))?;
        self.out.flush()?;
        trace!(target: "terminal", %handle, rows = emitted, force, "region_presented");
        Ok(())
    }

    fn release(&mut self, handle: RegionHandle) -> BackendResult<()> {
        let buffer = self.regions.remove(handle)?;
        self.presented.remove(&handle);
        trace!(target: "terminal", %handle, region = %buffer.region(), "region_released");
        Ok(())
    }

    fn next_key(&mut self, keypad: bool) -> BackendResult<Key> {
        Ok(core_input::read_key(keypad)?)
    }

    fn set_cursor_visible(&mut self, visible: bool) -> BackendResult<()> {
        if visible != self.cursor_visible {
            if visible {
                execute!(self.out, Show)?;
            } else {
                execute!(self.out, Hide)?;
            }
            self.cursor_visible = visible;
        }
        Ok(())
    }

    fn set_echo(&mut self, on: bool) {
        self.echo = on;
    }

    fn echo(&self) -> bool {
        self.echo
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessBackend;

    #[test]
    fn echo_defaults_match_headless() {
        let live = CrosstermBackend::new();
        let headless = HeadlessBackend::new(1, 1);
        assert!(live.echo());
        assert_eq!(live.echo(), headless.echo());
        assert!(!live.entered);
    }
}
