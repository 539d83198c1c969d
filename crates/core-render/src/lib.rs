//! Surfaces: owned backend regions and the decorated variants built from them.
//!
//! Composition is by ownership, innermost first:
//!
//! * `Surface` owns one backend region and exposes the drawing and input
//!   primitives.
//! * `BorderedSurface` owns a frame surface (border only) and a content
//!   surface inset by one cell on every side.
//! * `TitledSurface` owns a `BorderedSurface` plus a boxed title bar of
//!   `TITLE_HEIGHT` rows and moves the content below the title block.
//!
//! Dropping any surface erases its region, refreshes the blank region and only
//! then releases it, so a parent reused after a child goes away never shows
//! stale glyphs.

pub mod bordered;
pub mod surface;
pub mod text;
pub mod titled;

pub use bordered::BorderedSurface;
pub use surface::Surface;
pub use titled::{
    CONTENT_OFFSET, DECORATION_HEIGHT, DECORATION_WIDTH, TITLE_HEIGHT, TitledSurface,
};
