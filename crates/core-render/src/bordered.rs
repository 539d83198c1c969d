use crate::surface::Surface;
use core_model::Region;
use core_terminal::{BackendResult, Terminal};
use tracing::trace;

/// A content surface framed by a one-cell border drawn on its own region.
///
/// Field order is drop order: the content goes before the frame.
pub struct BorderedSurface {
    content: Surface,
    frame: Surface,
}

impl BorderedSurface {
    /// Allocate the frame over `region`, draw its border, then allocate the
    /// content inset by one cell.
    pub fn new(term: &Terminal, region: Region) -> BackendResult<Self> {
        let inner = region.inset(1)?;
        let frame = Surface::new(term, region)?;
        frame.draw_border()?;
        frame.refresh()?;
        let content = Surface::new(term, inner)?;
        trace!(target: "surface", outer = %region, inner = %inner, "bordered_created");
        Ok(Self { content, frame })
    }

    /// Outer bounds, border included.
    pub fn region(&self) -> Region {
        self.frame.region()
    }

    pub fn content(&self) -> &Surface {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut Surface {
        &mut self.content
    }

    pub fn frame(&self) -> &Surface {
        &self.frame
    }

    /// Swap the content for a fresh surface over `region`. The old content is
    /// erased and released once the new one exists.
    pub fn replace_content(&mut self, region: Region) -> BackendResult<()> {
        let next = Surface::new(self.frame.terminal(), region)?;
        let keypad = self.content.keypad();
        drop(std::mem::replace(&mut self.content, next));
        self.content.set_keypad(keypad);
        Ok(())
    }

    /// Border first, then content.
    pub fn refresh(&self) -> BackendResult<()> {
        self.frame.refresh()?;
        self.content.refresh()
    }
}
