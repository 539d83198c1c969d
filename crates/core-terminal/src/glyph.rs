//! Line-drawing glyphs and cell attributes.

use bitflags::bitflags;

/// Symbols a backend must be able to draw in a single cell.
///
/// Tee naming follows the direction the stem points *into* the box:
/// `TeeDown` is the `┬` on a top border, `TeeRight` the `├` on a left edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Glyph {
    HLine,
    VLine,
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
    TeeDown,
    TeeUp,
    TeeRight,
    TeeLeft,
    Cross,
}

impl Glyph {
    pub const fn as_char(self) -> char {
        match self {
            Glyph::HLine => '─',
            Glyph::VLine => '│',
            Glyph::UpperLeft => '┌',
            Glyph::UpperRight => '┐',
            Glyph::LowerLeft => '└',
            Glyph::LowerRight => '┘',
            Glyph::TeeDown => '┬',
            Glyph::TeeUp => '┴',
            Glyph::TeeRight => '├',
            Glyph::TeeLeft => '┤',
            Glyph::Cross => '┼',
        }
    }
}

bitflags! {
    /// On/off cell attributes. Empty means normal text.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Attr: u8 {
        const REVERSE   = 0b0000_0001;
        const BOLD      = 0b0000_0010;
        const UNDERLINE = 0b0000_0100;
    }
}

impl Attr {
    pub const NORMAL: Attr = Attr::empty();
}
