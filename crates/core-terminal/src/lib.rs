//! Terminal backend abstraction, crossterm implementation and a headless
//! in-memory implementation for tests.
//!
//! The widgets never talk to a terminal directly. They allocate rectangular
//! regions from a `TerminalBackend`, draw into those regions and ask the
//! backend to refresh them onto the physical screen. Each backend supplies the
//! device-specific half (screen size, presenting a region, reading keys,
//! cursor visibility); the region bookkeeping is shared through
//! `RegionTable` and the provided trait methods.
//!
//! Ownership model: one `Terminal` handle (`Rc<RefCell<..>>`) is cloned into
//! every surface so that a surface can erase and release its region when it
//! is dropped. The handle is deliberately `!Send`: a terminal has one focus and
//! one thread drives it.

pub mod buffer;
pub mod crossterm_backend;
pub mod glyph;
pub mod headless;
mod writer;

pub use buffer::{Cell, RegionBuffer, RegionHandle, RegionTable};
pub use crossterm_backend::CrosstermBackend;
pub use glyph::{Attr, Glyph};
pub use headless::HeadlessBackend;

use core_events::Key;
use core_model::{LayoutError, Region};
use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Error)]
pub enum BackendError {
    /// Region request rejected by the screen bounds check.
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Terminal I/O failed.
    #[error("terminal io error: {0}")]
    Io(#[from] io::Error),

    /// Handle does not name a live region.
    #[error("region {0} was already released")]
    StaleHandle(RegionHandle),

    /// No more key input will arrive.
    #[error("input closed")]
    InputClosed,
}

pub type BackendResult<T> = Result<T, BackendError>;

/// The capabilities the widget layer consumes from a terminal.
///
/// Implementors provide storage plus the device-specific operations; drawing
/// into regions is shared by the provided methods.
pub trait TerminalBackend {
    fn regions(&self) -> &RegionTable;
    fn regions_mut(&mut self) -> &mut RegionTable;

    /// `(max_height, max_width)` of the physical screen.
    fn screen_limits(&self) -> (u16, u16);

    /// Flush one region onto the physical screen and park the hardware
    /// cursor at that region's cursor.
    fn refresh(&mut self, handle: RegionHandle) -> BackendResult<()>;

    /// Block until one key is available.
    fn next_key(&mut self, keypad: bool) -> BackendResult<Key>;

    fn set_cursor_visible(&mut self, visible: bool) -> BackendResult<()>;

    fn set_echo(&mut self, on: bool);

    fn echo(&self) -> bool;

    fn allocate_region(&mut self, region: Region) -> BackendResult<RegionHandle> {
        region.check_within(self.screen_limits())?;
        let handle = self.regions_mut().insert(region);
        trace!(target: "terminal", %handle, %region, "region_allocated");
        Ok(handle)
    }

    fn release(&mut self, handle: RegionHandle) -> BackendResult<()> {
        let buffer = self.regions_mut().remove(handle)?;
        trace!(target: "terminal", %handle, region = %buffer.region(), "region_released");
        Ok(())
    }

    fn write_text(&mut self, handle: RegionHandle, y: u16, x: u16, text: &str) -> BackendResult<()> {
        self.regions_mut().get_mut(handle)?.write_text(y, x, text);
        Ok(())
    }

    /// Write at the region's current cursor.
    fn print(&mut self, handle: RegionHandle, text: &str) -> BackendResult<()> {
        self.regions_mut().get_mut(handle)?.print(text);
        Ok(())
    }

    fn write_glyph(&mut self, handle: RegionHandle, y: u16, x: u16, glyph: Glyph) -> BackendResult<()> {
        self.regions_mut().get_mut(handle)?.write_glyph(y, x, glyph);
        Ok(())
    }

    fn draw_border(&mut self, handle: RegionHandle) -> BackendResult<()> {
        self.regions_mut().get_mut(handle)?.draw_border();
        Ok(())
    }

    /// Blank every cell and force a full repaint on the next refresh.
    fn clear(&mut self, handle: RegionHandle) -> BackendResult<()> {
        self.regions_mut().get_mut(handle)?.clear();
        Ok(())
    }

    /// Blank every cell without forcing a full repaint.
    fn erase(&mut self, handle: RegionHandle) -> BackendResult<()> {
        self.regions_mut().get_mut(handle)?.erase();
        Ok(())
    }

    fn clear_to_eol(&mut self, handle: RegionHandle, y: u16, x: u16) -> BackendResult<()> {
        self.regions_mut().get_mut(handle)?.clear_to_eol(y, x);
        Ok(())
    }

    /// Resize keeping the origin; the new extent must still fit the screen.
    fn resize(&mut self, handle: RegionHandle, height: u16, width: u16) -> BackendResult<()> {
        let target = self.regions().get(handle)?.region().with_size(height, width);
        target.check_within(self.screen_limits())?;
        self.regions_mut().get_mut(handle)?.resize(height, width);
        trace!(target: "terminal", %handle, region = %target, "region_resized");
        Ok(())
    }

    fn move_cursor(&mut self, handle: RegionHandle, y: u16, x: u16) -> BackendResult<()> {
        self.regions_mut().get_mut(handle)?.move_cursor(y, x);
        Ok(())
    }

    fn set_attr(&mut self, handle: RegionHandle, attr: Attr) -> BackendResult<()> {
        self.regions_mut().get_mut(handle)?.set_attr(attr);
        Ok(())
    }

    fn attr(&self, handle: RegionHandle) -> BackendResult<Attr> {
        Ok(self.regions().get(handle)?.attr())
    }

    /// Read one key on behalf of a region, echoing printable keys into it
    /// when echo is on.
    fn read_key(&mut self, handle: RegionHandle, keypad: bool) -> BackendResult<Key> {
        self.regions().get(handle)?;
        let key = self.next_key(keypad)?;
        if let Some(c) = key.printable().filter(|_| self.echo()) {
            let mut tmp = [0u8; 4];
            self.regions_mut().get_mut(handle)?.print(c.encode_utf8(&mut tmp));
        }
        Ok(key)
    }
}

/// Shared single-threaded handle to a backend.
#[derive(Clone)]
pub struct Terminal {
    backend: Rc<RefCell<dyn TerminalBackend>>,
}

impl Terminal {
    pub fn new<B: TerminalBackend + 'static>(backend: B) -> Self {
        Self {
            backend: Rc::new(RefCell::new(backend)),
        }
    }

    pub fn from_shared(backend: Rc<RefCell<dyn TerminalBackend>>) -> Self {
        Self { backend }
    }

    /// Headless terminal plus a typed handle for inspecting the screen.
    pub fn headless(
        height: u16,
        width: u16,
        keys: impl IntoIterator<Item = Key>,
    ) -> (Self, Rc<RefCell<HeadlessBackend>>) {
        let backend = Rc::new(RefCell::new(HeadlessBackend::new(height, width).with_keys(keys)));
        let shared: Rc<RefCell<dyn TerminalBackend>> = backend.clone();
        (Self::from_shared(shared), backend)
    }

    /// Run `f` with exclusive access to the backend.
    pub fn with<R>(&self, f: impl FnOnce(&mut dyn TerminalBackend) -> R) -> R {
        f(&mut *self.backend.borrow_mut())
    }

    /// Like `with`, but yields `None` instead of panicking when the backend
    /// is already borrowed. Used on drop paths.
    pub fn try_with<R>(&self, f: impl FnOnce(&mut dyn TerminalBackend) -> R) -> Option<R> {
        let mut guard = self.backend.try_borrow_mut().ok()?;
        Some(f(&mut *guard))
    }

    pub fn screen_limits(&self) -> (u16, u16) {
        self.backend.borrow().screen_limits()
    }

    pub fn set_echo(&self, on: bool) {
        self.with(|b| b.set_echo(on));
    }

    pub fn set_cursor_visible(&self, visible: bool) -> BackendResult<()> {
        self.with(|b| b.set_cursor_visible(visible))
    }
}
