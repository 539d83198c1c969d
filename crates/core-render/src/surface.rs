use core_events::Key;
use core_model::Region;
use core_terminal::{Attr, BackendResult, Glyph, RegionHandle, Terminal};
use tracing::{trace, warn};

/// One exclusively owned backend region.
pub struct Surface {
    term: Terminal,
    handle: RegionHandle,
    region: Region,
    keypad: bool,
}

impl Surface {
    /// Allocate `region` on the backend. Fails fast with a layout error when
    /// the region does not fit the screen.
    pub fn new(term: &Terminal, region: Region) -> BackendResult<Self> {
        let handle = term.with(|b| b.allocate_region(region))?;
        trace!(target: "surface", %handle, %region, "surface_created");
        Ok(Self {
            term: term.clone(),
            handle,
            region,
            keypad: false,
        })
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn handle(&self) -> RegionHandle {
        self.handle
    }

    pub fn terminal(&self) -> &Terminal {
        &self.term
    }

    /// `(max_height, max_width)` of the whole screen.
    pub fn screen_limits(&self) -> (u16, u16) {
        self.term.screen_limits()
    }

    pub fn refresh(&self) -> BackendResult<()> {
        self.term.with(|b| b.refresh(self.handle))
    }

    pub fn clear(&self) -> BackendResult<()> {
        self.term.with(|b| b.clear(self.handle))
    }

    pub fn erase(&self) -> BackendResult<()> {
        self.term.with(|b| b.erase(self.handle))
    }

    pub fn clear_to_eol(&self, y: u16, x: u16) -> BackendResult<()> {
        self.term.with(|b| b.clear_to_eol(self.handle, y, x))
    }

    pub fn resize(&mut self, height: u16, width: u16) -> BackendResult<()> {
        self.term.with(|b| b.resize(self.handle, height, width))?;
        self.region = self.region.with_size(height, width);
        Ok(())
    }

    pub fn move_cursor(&self, y: u16, x: u16) -> BackendResult<()> {
        self.term.with(|b| b.move_cursor(self.handle, y, x))
    }

    pub fn write_text(&self, y: u16, x: u16, text: &str) -> BackendResult<()> {
        self.term.with(|b| b.write_text(self.handle, y, x, text))
    }

    /// Write at the current cursor.
    pub fn print(&self, text: &str) -> BackendResult<()> {
        self.term.with(|b| b.print(self.handle, text))
    }

    pub fn write_glyph(&self, y: u16, x: u16, glyph: Glyph) -> BackendResult<()> {
        self.term.with(|b| b.write_glyph(self.handle, y, x, glyph))
    }

    pub fn draw_border(&self) -> BackendResult<()> {
        self.term.with(|b| b.draw_border(self.handle))
    }

    pub fn attribute_on(&self, attr: Attr) -> BackendResult<()> {
        self.term.with(|b| {
            let current = b.attr(self.handle)?;
            b.set_attr(self.handle, current | attr)
        })
    }

    pub fn attribute_off(&self, attr: Attr) -> BackendResult<()> {
        self.term.with(|b| {
            let current = b.attr(self.handle)?;
            b.set_attr(self.handle, current - attr)
        })
    }

    pub fn attribute_set(&self, attr: Attr) -> BackendResult<()> {
        self.term.with(|b| b.set_attr(self.handle, attr))
    }

    /// Write `text` with `attr` set, restoring the previous attributes after.
    pub fn write_text_with(&self, y: u16, x: u16, text: &str, attr: Attr) -> BackendResult<()> {
        self.term.with(|b| {
            let previous = b.attr(self.handle)?;
            b.set_attr(self.handle, attr)?;
            b.write_text(self.handle, y, x, text)?;
            b.set_attr(self.handle, previous)
        })
    }

    /// Decode special keys (arrows, backspace, ...) on subsequent reads.
    pub fn set_keypad(&mut self, on: bool) {
        self.keypad = on;
    }

    pub fn keypad(&self) -> bool {
        self.keypad
    }

    /// Block until one key is available.
    pub fn read_key(&self) -> BackendResult<Key> {
        self.term.with(|b| b.read_key(self.handle, self.keypad))
    }
}

impl Drop for Surface {
    fn drop(&mut self) {
        let handle = self.handle;
        let released = self.term.try_with(|b| {
            b.erase(handle)?;
            b.refresh(handle)?;
            b.release(handle)
        });
        match released {
            Some(Ok(())) => trace!(target: "surface", %handle, "surface_released"),
            Some(Err(err)) => warn!(target: "surface", %handle, %err, "surface_release_failed"),
            None => warn!(target: "surface", %handle, "surface_release_skipped_backend_busy"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_terminal::{BackendError, Terminal};

    #[test]
    fn drop_erases_before_release() {
        let (term, screen) = Terminal::headless(5, 10, []);
        {
            let s = Surface::new(&term, Region::new(2, 4, 1, 1)).unwrap();
            s.write_text(0, 0, "abcd").unwrap();
            s.refresh().unwrap();
            assert_eq!(screen.borrow().line(1), " abcd     ");
        }
        let screen = screen.borrow();
        assert!(screen.is_blank(), "dropped surface must leave no glyphs");
        assert_eq!(screen.live_regions(), 0);
        assert_eq!(screen.release_log(), &[Region::new(2, 4, 1, 1)]);
    }

    #[test]
    fn out_of_bounds_surface_is_rejected() {
        let (term, _) = Terminal::headless(5, 10, []);
        let err = Surface::new(&term, Region::new(3, 3, 4, 0)).err().unwrap();
        assert!(matches!(err, BackendError::Layout(_)));
    }

    #[test]
    fn attribute_toggles_compose() {
        let (term, screen) = Terminal::headless(1, 4, []);
        let s = Surface::new(&term, Region::sized(1, 4)).unwrap();
        s.attribute_on(Attr::REVERSE).unwrap();
        s.attribute_on(Attr::BOLD).unwrap();
        s.attribute_off(Attr::REVERSE).unwrap();
        s.write_text(0, 0, "x").unwrap();
        s.write_text_with(0, 1, "y", Attr::REVERSE).unwrap();
        s.write_text(0, 2, "z").unwrap();
        s.refresh().unwrap();
        let screen = screen.borrow();
        assert_eq!(screen.cell(0, 0).unwrap().attr, Attr::BOLD);
        assert_eq!(screen.cell(0, 1).unwrap().attr, Attr::REVERSE);
        assert_eq!(screen.cell(0, 2).unwrap().attr, Attr::BOLD);
    }

    #[test]
    fn keypad_controls_decoding() {
        let (term, _) = Terminal::headless(1, 4, [Key::Down, Key::Down]);
        let mut s = Surface::new(&term, Region::sized(1, 4)).unwrap();
        assert_eq!(s.read_key().unwrap(), Key::Unknown);
        s.set_keypad(true);
        assert_eq!(s.read_key().unwrap(), Key::Down);
    }

    #[test]
    fn resize_tracks_region() {
        let (term, _) = Terminal::headless(10, 10, []);
        let mut s = Surface::new(&term, Region::new(2, 2, 1, 1)).unwrap();
        s.resize(4, 6).unwrap();
        assert_eq!(s.region(), Region::new(4, 6, 1, 1));
        assert!(s.resize(20, 2).is_err());
        assert_eq!(s.region(), Region::new(4, 6, 1, 1));
    }
}
