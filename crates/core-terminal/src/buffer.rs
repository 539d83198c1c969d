//! Off-screen cell buffers backing every allocated region.
//!
//! Writes land in a `RegionBuffer`; nothing reaches the physical screen until
//! the owning backend refreshes the region.
//!
//! Invariants:
//! * `cells.len() == height * width` at all times (resize reallocates).
//! * Writes outside the region are dropped; text is clipped at the right edge
//!   and never wraps onto the next row.
//! * The region cursor always addresses a cell inside the region (or (0,0)
//!   for the degenerate case, which allocation rejects anyway).

use crate::glyph::{Attr, Glyph};
use crate::{BackendError, BackendResult};
use core_model::Region;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub ch: char,
    pub attr: Attr,
}

impl Cell {
    pub const BLANK: Cell = Cell {
        ch: ' ',
        attr: Attr::NORMAL,
    };
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}

/// Opaque id of an allocated backend region. Ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegionHandle(u32);

impl fmt::Display for RegionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct RegionBuffer {
    region: Region,
    cells: Vec<Cell>,
    cursor: (u16, u16),
    attr: Attr,
    /// Set by `clear`; the next refresh repaints every row.
    repaint: bool,
}

impl RegionBuffer {
    pub fn new(region: Region) -> Self {
        let len = usize::from(region.height) * usize::from(region.width);
        Self {
            region,
            cells: vec![Cell::BLANK; len],
            cursor: (0, 0),
            attr: Attr::NORMAL,
            repaint: true,
        }
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn cursor(&self) -> (u16, u16) {
        self.cursor
    }

    pub fn attr(&self) -> Attr {
        self.attr
    }

    pub fn set_attr(&mut self, attr: Attr) {
        self.attr = attr;
    }

    pub fn cell(&self, y: u16, x: u16) -> Option<Cell> {
        self.index(y, x).map(|i| self.cells[i])
    }

    /// Cells of row `y`, left to right.
    pub fn row(&self, y: u16) -> &[Cell] {
        if y >= self.region.height {
            return &[];
        }
        let w = usize::from(self.region.width);
        let start = usize::from(y) * w;
        &self.cells[start..start + w]
    }

    /// Row `y` as plain text (attributes dropped).
    pub fn row_text(&self, y: u16) -> String {
        self.row(y).iter().map(|c| c.ch).collect()
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|c| *c == Cell::BLANK)
    }

    pub fn take_repaint(&mut self) -> bool {
        std::mem::take(&mut self.repaint)
    }

    fn index(&self, y: u16, x: u16) -> Option<usize> {
        if y < self.region.height && x < self.region.width {
            Some(usize::from(y) * usize::from(self.region.width) + usize::from(x))
        } else {
            None
        }
    }

    fn park_cursor(&mut self, y: u16, x: u16) {
        let max_y = self.region.height.saturating_sub(1);
        let max_x = self.region.width.saturating_sub(1);
        self.cursor = (y.min(max_y), x.min(max_x));
    }

    fn put(&mut self, y: u16, x: u16, ch: char) -> bool {
        let attr = self.attr;
        match self.index(y, x) {
            Some(i) => {
                self.cells[i] = Cell { ch, attr };
                true
            }
            None => false,
        }
    }

    /// Write `text` starting at `(y, x)`, clipped at the right edge.
    pub fn write_text(&mut self, y: u16, x: u16, text: &str) {
        let mut col = x;
        for ch in text.chars().filter(|c| !c.is_control()) {
            if !self.put(y, col, ch) {
                break;
            }
            col = col.saturating_add(1);
        }
        self.park_cursor(y, col);
    }

    /// Write at the current cursor.
    pub fn print(&mut self, text: &str) {
        let (y, x) = self.cursor;
        self.write_text(y, x, text);
    }

    pub fn write_glyph(&mut self, y: u16, x: u16, glyph: Glyph) {
        if self.put(y, x, glyph.as_char()) {
            self.park_cursor(y, x.saturating_add(1));
        }
    }

    /// Box around the full extent of the region.
    pub fn draw_border(&mut self) {
        let (h, w) = (self.region.height, self.region.width);
        if h < 2 || w < 2 {
            return;
        }
        for x in 1..w - 1 {
            self.put(0, x, Glyph::HLine.as_char());
            self.put(h - 1, x, Glyph::HLine.as_char());
        }
        for y in 1..h - 1 {
            self.put(y, 0, Glyph::VLine.as_char());
            self.put(y, w - 1, Glyph::VLine.as_char());
        }
        self.put(0, 0, Glyph::UpperLeft.as_char());
        self.put(0, w - 1, Glyph::UpperRight.as_char());
        self.put(h - 1, 0, Glyph::LowerLeft.as_char());
        self.put(h - 1, w - 1, Glyph::LowerRight.as_char());
    }

    pub fn erase(&mut self) {
        self.cells.fill(Cell::BLANK);
        self.cursor = (0, 0);
    }

    pub fn clear(&mut self) {
        self.erase();
        self.repaint = true;
    }

    /// Blank from `(y, x)` to the end of that row.
    pub fn clear_to_eol(&mut self, y: u16, x: u16) {
        for col in x..self.region.width {
            if let Some(i) = self.index(y, col) {
                self.cells[i] = Cell::BLANK;
            }
        }
        self.park_cursor(y, x);
    }

    pub fn move_cursor(&mut self, y: u16, x: u16) {
        self.park_cursor(y, x);
    }

    /// Resize in place keeping the overlapping top-left block.
    pub fn resize(&mut self, height: u16, width: u16) {
        let mut next = RegionBuffer::new(self.region.with_size(height, width));
        for y in 0..height.min(self.region.height) {
            for x in 0..width.min(self.region.width) {
                if let (Some(src), Some(dst)) = (self.index(y, x), next.index(y, x)) {
                    next.cells[dst] = self.cells[src];
                }
            }
        }
        next.attr = self.attr;
        let (cy, cx) = self.cursor;
        next.park_cursor(cy, cx);
        *self = next;
    }
}

/// Handle → buffer bookkeeping shared by every backend.
#[derive(Debug, Default)]
pub struct RegionTable {
    next_id: u32,
    regions: BTreeMap<RegionHandle, RegionBuffer>,
}

impl RegionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a buffer for an already bounds-checked region.
    pub fn insert(&mut self, region: Region) -> RegionHandle {
        let handle = RegionHandle(self.next_id);
        self.next_id += 1;
        self.regions.insert(handle, RegionBuffer::new(region));
        handle
    }

    pub fn remove(&mut self, handle: RegionHandle) -> BackendResult<RegionBuffer> {
        self.regions
            .remove(&handle)
            .ok_or(BackendError::StaleHandle(handle))
    }

    pub fn get(&self, handle: RegionHandle) -> BackendResult<&RegionBuffer> {
        self.regions
            .get(&handle)
            .ok_or(BackendError::StaleHandle(handle))
    }

    pub fn get_mut(&mut self, handle: RegionHandle) -> BackendResult<&mut RegionBuffer> {
        self.regions
            .get_mut(&handle)
            .ok_or(BackendError::StaleHandle(handle))
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
