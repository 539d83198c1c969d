//! In-memory backend used by tests and by anything that wants to render
//! widgets without a tty.
//!
//! The "physical screen" is a cell grid. `refresh` copies a region's buffer
//! onto it, exactly like a terminal would show the region. Keys come from a
//! scripted queue; an exhausted queue reports `BackendError::InputClosed`
//! instead of blocking forever.

use crate::buffer::{Cell, RegionHandle, RegionTable};
use crate::{BackendError, BackendResult, TerminalBackend};
use core_events::Key;
use core_model::Region;
use std::collections::VecDeque;

#[derive(Debug)]
pub struct HeadlessBackend {
    height: u16,
    width: u16,
    screen: Vec<Cell>,
    regions: RegionTable,
    keys: VecDeque<Key>,
    echo: bool,
    cursor_visible: bool,
    cursor: (u16, u16),
    refresh_log: Vec<RegionHandle>,
    release_log: Vec<Region>,
}

impl HeadlessBackend {
    pub fn new(height: u16, width: u16) -> Self {
        Self {
            height,
            width,
            screen: vec![Cell::BLANK; usize::from(height) * usize::from(width)],
            regions: RegionTable::new(),
            keys: VecDeque::new(),
            echo: true,
            cursor_visible: true,
            cursor: (0, 0),
            refresh_log: Vec::new(),
            release_log: Vec::new(),
        }
    }

    pub fn with_keys(mut self, keys: impl IntoIterator<Item = Key>) -> Self {
        self.keys.extend(keys);
        self
    }

    pub fn push_keys(&mut self, keys: impl IntoIterator<Item = Key>) {
        self.keys.extend(keys);
    }

    pub fn pending_keys(&self) -> usize {
        self.keys.len()
    }

    pub fn cell(&self, y: u16, x: u16) -> Option<Cell> {
        if y < self.height && x < self.width {
            Some(self.screen[usize::from(y) * usize::from(self.width) + usize::from(x)])
        } else {
            None
        }
    }

    /// Screen row `y` as plain text.
    pub fn line(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.cell(y, x))
            .map(|c| c.ch)
            .collect()
    }

    /// Whole screen, rows right-trimmed.
    pub fn lines(&self) -> Vec<String> {
        (0..self.height)
            .map(|y| self.line(y).trim_end().to_string())
            .collect()
    }

    /// Screen row `y` restricted to columns `[x, x + width)`.
    pub fn slice(&self, y: u16, x: u16, width: u16) -> String {
        (x..x.saturating_add(width))
            .filter_map(|col| self.cell(y, col))
            .map(|c| c.ch)
            .collect()
    }

    pub fn is_blank(&self) -> bool {
        self.screen.iter().all(|c| *c == Cell::BLANK)
    }

    /// Hardware cursor position in screen coordinates.
    pub fn cursor(&self) -> (u16, u16) {
        self.cursor
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    /// Handles in the order they were refreshed.
    pub fn refresh_log(&self) -> &[RegionHandle] {
        &self.refresh_log
    }

    /// Regions in the order they were released.
    pub fn release_log(&self) -> &[Region] {
        &self.release_log
    }

    pub fn live_regions(&self) -> usize {
        self.regions.len()
    }
}

impl TerminalBackend for HeadlessBackend {
    fn regions(&self) -> &RegionTable {
        &self.regions
    }

    fn regions_mut(&mut self) -> &mut RegionTable {
        &mut self.regions
    }

    fn screen_limits(&self) -> (u16, u16) {
        (self.height, self.width)
    }

    fn refresh(&mut self, handle: RegionHandle) -> BackendResult<()> {
        let buffer = self.regions.get_mut(handle)?;
        buffer.take_repaint();
        let region = buffer.region();
        for row in 0..region.height {
            let y = region.y + row;
            if y >= self.height {
                break;
            }
            for (col, cell) in buffer.row(row).iter().enumerate() {
                let x = usize::from(region.x) + col;
                if x >= usize::from(self.width) {
                    break;
                }
                self.screen[usize::from(y) * usize::from(self.width) + x] = *cell;
            }
        }
        let (cy, cx) = buffer.cursor();
        self.cursor = (region.y + cy, region.x + cx);
        self.refresh_log.push(handle);
        Ok(())
    }

    fn release(&mut self, handle: RegionHandle) -> BackendResult<()> {
        let buffer = self.regions.remove(handle)?;
        self.release_log.push(buffer.region());
        Ok(())
    }

    fn next_key(&mut self, keypad: bool) -> BackendResult<Key> {
        let key = self.keys.pop_front().ok_or(BackendError::InputClosed)?;
        Ok(core_input::apply_keypad(key, keypad))
    }

    fn set_cursor_visible(&mut self, visible: bool) -> BackendResult<()> {
        self.cursor_visible = visible;
        Ok(())
    }

    fn set_echo(&mut self, on: bool) {
        self.echo = on;
    }

    fn echo(&self) -> bool {
        self.echo
    }
}
