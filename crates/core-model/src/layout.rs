//! Rectangular regions and the arithmetic used to nest them.
//!
//! A `Region` is the `(height, width, y, x)` rectangle a widget occupies on
//! the backend screen. Nesting is done by fixed insets: a bordered surface
//! shrinks its region by one cell on every side, a titled surface
//! additionally drops the title block from the top.
//!
//! Invariants:
//! * A child derived through `inset` / `below` always lies inside its parent.
//! * Derivation never underflows; a parent too small for the requested inset
//!   yields `LayoutError::TooSmall` instead of a wrapped-around rectangle.
//! * Regions are plain values. Whoever allocated the backend surface owns the
//!   lifetime, the region only describes bounds.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Region {
    pub height: u16,
    pub width: u16,
    pub y: u16,
    pub x: u16,
}

impl Region {
    pub const fn new(height: u16, width: u16, y: u16, x: u16) -> Self {
        Self {
            height,
            width,
            y,
            x,
        }
    }

    /// Region anchored at the screen origin.
    pub const fn sized(height: u16, width: u16) -> Self {
        Self::new(height, width, 0, 0)
    }

    /// One past the last row, in screen coordinates.
    pub fn bottom(&self) -> u32 {
        u32::from(self.y) + u32::from(self.height)
    }

    /// One past the last column, in screen coordinates.
    pub fn right(&self) -> u32 {
        u32::from(self.x) + u32::from(self.width)
    }

    pub fn is_degenerate(&self) -> bool {
        self.height == 0 || self.width == 0
    }

    /// True when `other` lies entirely inside `self`.
    pub fn contains(&self, other: &Region) -> bool {
        other.y >= self.y
            && other.x >= self.x
            && other.bottom() <= self.bottom()
            && other.right() <= self.right()
    }

    /// Shrink by `n` cells on each side.
    pub fn inset(&self, n: u16) -> LayoutResult<Region> {
        let need = n.saturating_mul(2);
        if self.height <= need || self.width <= need {
            return Err(LayoutError::TooSmall {
                region: *self,
                min_height: need.saturating_add(1),
                min_width: need.saturating_add(1),
            });
        }
        Ok(Region::new(
            self.height - need,
            self.width - need,
            self.y + n,
            self.x + n,
        ))
    }

    /// Drop `rows` rows from the top, keeping the bottom edge fixed.
    pub fn below(&self, rows: u16) -> LayoutResult<Region> {
        if self.height <= rows {
            return Err(LayoutError::TooSmall {
                region: *self,
                min_height: rows.saturating_add(1),
                min_width: self.width,
            });
        }
        Ok(Region::new(
            self.height - rows,
            self.width,
            self.y + rows,
            self.x,
        ))
    }

    /// Keep only the top `rows` rows.
    pub fn top(&self, rows: u16) -> Region {
        Region::new(rows.min(self.height), self.width, self.y, self.x)
    }

    /// Same origin, new extent.
    pub fn with_size(&self, height: u16, width: u16) -> Region {
        Region::new(height, width, self.y, self.x)
    }

    /// Fail fast when the region does not fit a `(max_height, max_width)` screen.
    pub fn check_within(&self, limits: (u16, u16)) -> LayoutResult<()> {
        if self.is_degenerate() {
            return Err(LayoutError::Degenerate { region: *self });
        }
        let (max_height, max_width) = limits;
        if self.bottom() > u32::from(max_height) || self.right() > u32::from(max_width) {
            return Err(LayoutError::OutOfBounds {
                region: *self,
                max_height,
                max_width,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{}@({},{})",
            self.height, self.width, self.y, self.x
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// Region extends past the backend screen.
    #[error("region {region} exceeds screen limits {max_height}x{max_width}")]
    OutOfBounds {
        region: Region,
        max_height: u16,
        max_width: u16,
    },

    /// Region too small for the requested decoration.
    #[error("region {region} too small, needs at least {min_height}x{min_width}")]
    TooSmall {
        region: Region,
        min_height: u16,
        min_width: u16,
    },

    /// Zero height or width.
    #[error("region {region} has no area")]
    Degenerate { region: Region },
}

pub type LayoutResult<T> = Result<T, LayoutError>;

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn inset_shrinks_every_side() {
        let r = Region::new(10, 20, 2, 3);
        let inner = r.inset(1).unwrap();
        assert_eq!(inner, Region::new(8, 18, 3, 4));
        assert!(r.contains(&inner));
    }

    #[test]
    fn inset_rejects_regions_without_interior() {
        let r = Region::new(2, 20, 0, 0);
        assert!(matches!(r.inset(1), Err(LayoutError::TooSmall { .. })));
    }

    #[test]
    fn below_keeps_bottom_edge() {
        let r = Region::new(8, 18, 1, 1);
        let content = r.below(3).unwrap();
        assert_eq!(content, Region::new(5, 18, 4, 1));
        assert_eq!(content.bottom(), r.bottom());
    }

    #[test]
    fn check_within_flags_overflow() {
        let r = Region::new(10, 10, 20, 75);
        let err = r.check_within((24, 80)).unwrap_err();
        assert_eq!(
            err,
            LayoutError::OutOfBounds {
                region: r,
                max_height: 24,
                max_width: 80,
            }
        );
        assert!(Region::new(4, 5, 20, 75).check_within((24, 80)).is_ok());
    }

    #[test]
    fn check_within_rejects_zero_area() {
        let r = Region::new(0, 10, 0, 0);
        assert!(matches!(
            r.check_within((24, 80)),
            Err(LayoutError::Degenerate { .. })
        ));
    }

    proptest! {
        #[test]
        fn derived_regions_stay_inside_parent(
            h in 0u16..200, w in 0u16..200, y in 0u16..100, x in 0u16..100, rows in 0u16..10
        ) {
            let parent = Region::new(h, w, y, x);
            if let Ok(inner) = parent.inset(1) {
                prop_assert!(parent.contains(&inner));
                if let Ok(content) = inner.below(rows) {
                    prop_assert!(parent.contains(&content));
                }
            }
        }
    }
}
