use crate::bordered::BorderedSurface;
use crate::surface::Surface;
use crate::text::title_layout;
use core_model::{LayoutError, Region};
use core_terminal::{Attr, BackendResult, Terminal};
use tracing::trace;

/// Rows of the boxed title bar.
pub const TITLE_HEIGHT: u16 = 3;
/// Rows between the outer top edge and the first content row.
pub const CONTENT_OFFSET: u16 = 1 + TITLE_HEIGHT;
/// Rows consumed by border and title; content height is `height - 5`.
pub const DECORATION_HEIGHT: u16 = CONTENT_OFFSET + 1;
/// Columns consumed by the border; content width is `width - 2`.
pub const DECORATION_WIDTH: u16 = 2;

/// Bordered surface with a centred title bar under the top border.
///
/// Requires `height > DECORATION_HEIGHT` and `width > DECORATION_WIDTH`.
/// Dropping releases the title, then the content, then the frame.
pub struct TitledSurface {
    title: Surface,
    body: BorderedSurface,
    title_text: String,
}

impl TitledSurface {
    pub fn new(term: &Terminal, title: &str, region: Region) -> BackendResult<Self> {
        if region.height <= DECORATION_HEIGHT || region.width <= DECORATION_WIDTH {
            return Err(LayoutError::TooSmall {
                region,
                min_height: DECORATION_HEIGHT + 1,
                min_width: DECORATION_WIDTH + 1,
            }
            .into());
        }
        let mut body = BorderedSurface::new(term, region)?;
        let inner = body.content().region();
        let title_surface = Surface::new(term, inner.top(TITLE_HEIGHT))?;
        body.replace_content(inner.below(TITLE_HEIGHT)?)?;
        let titled = Self {
            title: title_surface,
            body,
            title_text: title.to_string(),
        };
        titled.draw_title(Attr::NORMAL)?;
        trace!(
            target: "surface",
            outer = %region,
            content = %titled.content().region(),
            title_len = title.len(),
            "titled_created"
        );
        Ok(titled)
    }

    fn draw_title(&self, attr: Attr) -> BackendResult<()> {
        self.title.erase()?;
        self.title.draw_border()?;
        let (col, shown) = title_layout(self.title.region().width, &self.title_text);
        self.title.write_text_with(1, col, shown, attr)?;
        self.title.refresh()
    }

    /// Redraw the title text with `attr` (bold, reverse, ...).
    pub fn attr_title(&self, attr: Attr) -> BackendResult<()> {
        self.draw_title(attr)
    }

    pub fn title(&self) -> &str {
        &self.title_text
    }

    /// Outer bounds, border included.
    pub fn region(&self) -> Region {
        self.body.region()
    }

    pub fn content(&self) -> &Surface {
        self.body.content()
    }

    pub fn content_mut(&mut self) -> &mut Surface {
        self.body.content_mut()
    }

    pub fn title_surface(&self) -> &Surface {
        &self.title
    }

    pub fn frame(&self) -> &Surface {
        self.body.frame()
    }

    /// Border, content, title, in that order.
    pub fn refresh(&self) -> BackendResult<()> {
        self.body.refresh()?;
        self.title.refresh()
    }
}
