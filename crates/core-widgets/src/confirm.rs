//! The `[ OK ]` control shared by the selection and field-editor widgets.

use core_render::Surface;
use core_terminal::{Attr, BackendResult};

pub(crate) const CONFIRM_LABEL: &str = "[ OK ]";

/// Draw the confirm control on the last content row, roughly centred on the
/// outer window width.
pub(crate) fn draw_confirm(content: &Surface, outer_width: u16, highlight: bool) -> BackendResult<()> {
    let row = content.region().height.saturating_sub(1);
    let col = (outer_width / 2).saturating_sub(4);
    let attr = if highlight { Attr::REVERSE } else { Attr::NORMAL };
    content.write_text_with(row, col, CONFIRM_LABEL, attr)
}
