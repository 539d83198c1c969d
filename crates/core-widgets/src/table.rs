//! Box-drawn table over rows of any type.
//!
//! Column text comes from a generator `(row, column) -> String`. Column
//! widths are either pinned by the caller or derived as the longest of the
//! header and every generated cell in that column. Layout is byte based:
//!
//! ```text
//! ┌───┬─────┐   top border, one tee per column boundary
//! │ A │ BB  │   headers, one space of padding each side
//! ├───┼─────┤   separator
//! │ x │ yyy │   one line per row, cells cut / padded to the column width
//! └───┴─────┘   bottom border
//! ```
//!
//! A fitted table is `rows + 4` high and `1 + Σ(width + 3)` wide. The table
//! is passive: it draws on construction and on every mutation, erasing the
//! surface first, and never reads input.

use crate::{WidgetError, WidgetResult};
use core_model::Region;
use core_render::Surface;
use core_render::text::fit;
use core_terminal::{Attr, BackendError, Glyph, Terminal};
use tracing::debug;

pub type Generator<T> = Box<dyn Fn(&T, usize) -> String>;

/// Everything needed to build a `Table`.
pub struct TableSource<T> {
    pub headers: Vec<String>,
    pub rows: Vec<T>,
    pub generator: Generator<T>,
    /// Pinned column widths; derived from the data when `None`.
    pub lengths: Option<Vec<usize>>,
    /// Shrink / grow the surface to exactly fit the table.
    pub auto_resize: bool,
}

impl<T> TableSource<T> {
    pub fn new<H, S, F>(headers: H, generator: F) -> Self
    where
        H: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&T, usize) -> String + 'static,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
            generator: Box::new(generator),
            lengths: None,
            auto_resize: false,
        }
    }

    pub fn rows(mut self, rows: Vec<T>) -> Self {
        self.rows = rows;
        self
    }

    pub fn lengths(mut self, lengths: Vec<usize>) -> Self {
        self.lengths = Some(lengths);
        self
    }

    pub fn auto_resize(mut self, on: bool) -> Self {
        self.auto_resize = on;
        self
    }
}

/// One drawing instruction at column `x` of a grid line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece {
    Glyph { x: usize, glyph: Glyph },
    Text { x: usize, text: String, highlighted: bool },
}

pub type GridLine = Vec<Piece>;

/// Per column: max(header length, longest generated cell).
pub fn compute_lengths<T>(
    headers: &[String],
    rows: &[T],
    generator: &dyn Fn(&T, usize) -> String,
) -> Vec<usize> {
    headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            rows.iter()
                .map(|row| generator(row, col).len())
                .fold(header.len(), usize::max)
        })
        .collect()
}

/// `(height, width)` of a table with these widths and `rows` data rows,
/// saturating at `u16::MAX`.
pub fn fitted_size(lengths: &[usize], rows: usize) -> (u16, u16) {
    let height = rows.saturating_add(4);
    let width = lengths
        .iter()
        .fold(1usize, |acc, len| acc.saturating_add(len.saturating_add(3)));
    (
        u16::try_from(height).unwrap_or(u16::MAX),
        u16::try_from(width).unwrap_or(u16::MAX),
    )
}

fn border_line(lengths: &[usize], left: Glyph, junction: Glyph, right: Glyph) -> GridLine {
    let mut line = vec![Piece::Glyph { x: 0, glyph: left }];
    let mut x = 0;
    for (i, len) in lengths.iter().enumerate() {
        for j in 0..len + 2 {
            line.push(Piece::Glyph {
                x: x + j + 1,
                glyph: Glyph::HLine,
            });
        }
        x += len + 3;
        let glyph = if i + 1 == lengths.len() { right } else { junction };
        line.push(Piece::Glyph { x, glyph });
    }
    line
}

fn cell_line(
    lengths: &[usize],
    cells: impl Iterator<Item = String>,
    highlighted: bool,
) -> GridLine {
    let mut line = vec![Piece::Glyph {
        x: 0,
        glyph: Glyph::VLine,
    }];
    let mut x = 1;
    for (len, cell) in lengths.iter().zip(cells) {
        line.push(Piece::Text {
            x,
            text: format!(" {} ", fit(&cell, *len)),
            highlighted,
        });
        x += len + 3;
        line.push(Piece::Glyph {
            x: x - 1,
            glyph: Glyph::VLine,
        });
    }
    line
}

/// Compose the full grid. `highlight` names a data row drawn in reverse
/// video; indices past the data are ignored. No headers means no grid.
pub fn compose_table<T>(
    headers: &[String],
    rows: &[T],
    generator: &dyn Fn(&T, usize) -> String,
    lengths: &[usize],
    highlight: Option<usize>,
) -> Vec<GridLine> {
    if headers.is_empty() {
        return Vec::new();
    }
    let mut grid = Vec::with_capacity(rows.len() + 4);
    grid.push(border_line(
        lengths,
        Glyph::UpperLeft,
        Glyph::TeeDown,
        Glyph::UpperRight,
    ));
    grid.push(cell_line(lengths, headers.iter().cloned(), false));
    grid.push(border_line(
        lengths,
        Glyph::TeeRight,
        Glyph::Cross,
        Glyph::TeeLeft,
    ));
    for (n, row) in rows.iter().enumerate() {
        let cells = (0..headers.len()).map(move |col| generator(row, col));
        grid.push(cell_line(lengths, cells, highlight == Some(n)));
    }
    grid.push(border_line(
        lengths,
        Glyph::LowerLeft,
        Glyph::TeeUp,
        Glyph::LowerRight,
    ));
    grid
}

pub struct Table<T> {
    surface: Surface,
    headers: Vec<String>,
    rows: Vec<T>,
    generator: Generator<T>,
    lengths: Vec<usize>,
    pinned: bool,
    highlight: Option<usize>,
}

impl<T> Table<T> {
    /// Allocate the surface, lay out columns and draw.
    pub fn new(term: &Terminal, source: TableSource<T>, region: Region) -> WidgetResult<Self> {
        let surface = Surface::new(term, region)?;
        let pinned = source.lengths.is_some();
        let mut table = Self {
            surface,
            headers: source.headers,
            rows: source.rows,
            generator: source.generator,
            lengths: Vec::new(),
            pinned,
            highlight: None,
        };
        match source.lengths {
            Some(lengths) => {
                table.check_lengths(&lengths)?;
                table.lengths = lengths;
            }
            None => table.derive_lengths(),
        }
        if source.auto_resize {
            table.fit_surface()?;
        }
        table.redraw()?;
        Ok(table)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn lengths(&self) -> &[usize] {
        &self.lengths
    }

    pub fn lengths_pinned(&self) -> bool {
        self.pinned
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlight
    }

    pub fn region(&self) -> Region {
        self.surface.region()
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// For keypad toggling when a caller reads keys through the table.
    pub fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    /// Replace the rows. Widths are re-derived unless pinned; `auto_resize`
    /// refits the surface. Any highlight is dropped.
    /// A refit that would leave the screen fails before anything changes.
    pub fn set_data(&mut self, rows: Vec<T>, auto_resize: bool) -> WidgetResult<()> {
        if auto_resize {
            let lengths = if self.pinned {
                self.lengths.clone()
            } else {
                compute_lengths(&self.headers, &rows, self.generator.as_ref())
            };
            self.check_fit(&lengths, rows.len())?;
        }
        self.surface.erase()?;
        self.rows = rows;
        self.highlight = None;
        if !self.pinned {
            self.derive_lengths();
        }
        if auto_resize {
            self.fit_surface()?;
        }
        self.redraw()
    }

    /// Pin column widths. The count must match the headers.
    pub fn set_lengths(&mut self, lengths: Vec<usize>) -> WidgetResult<()> {
        self.check_lengths(&lengths)?;
        self.surface.erase()?;
        self.lengths = lengths;
        self.pinned = true;
        self.redraw()
    }

    /// Drop pinned widths and derive them from the data again.
    pub fn unpin_lengths(&mut self) -> WidgetResult<()> {
        self.surface.erase()?;
        self.pinned = false;
        self.derive_lengths();
        self.redraw()
    }

    pub fn set_generator<F>(&mut self, generator: F) -> WidgetResult<()>
    where
        F: Fn(&T, usize) -> String + 'static,
    {
        self.surface.erase()?;
        self.generator = Box::new(generator);
        if !self.pinned {
            self.derive_lengths();
        }
        self.redraw()
    }

    /// Redraw with row `index` in reverse video. Out-of-range indices clear
    /// the highlight instead of failing.
    pub fn highlight_row(&mut self, index: usize) -> WidgetResult<()> {
        self.surface.erase()?;
        self.highlight = (index < self.rows.len()).then_some(index);
        self.redraw()
    }

    pub fn clear_highlight(&mut self) -> WidgetResult<()> {
        self.surface.erase()?;
        self.highlight = None;
        self.redraw()
    }

    /// The grid as currently laid out.
    pub fn compose(&self) -> Vec<GridLine> {
        compose_table(
            &self.headers,
            &self.rows,
            self.generator.as_ref(),
            &self.lengths,
            self.highlight,
        )
    }

    fn check_lengths(&self, lengths: &[usize]) -> WidgetResult<()> {
        if lengths.len() != self.headers.len() {
            return Err(WidgetError::LengthCount {
                expected: self.headers.len(),
                got: lengths.len(),
            });
        }
        Ok(())
    }

    fn derive_lengths(&mut self) {
        self.lengths = compute_lengths(&self.headers, &self.rows, self.generator.as_ref());
    }

    /// Bounds check for a fitted grid at the current origin.
    fn check_fit(&self, lengths: &[usize], rows: usize) -> WidgetResult<()> {
        let (height, width) = fitted_size(lengths, rows);
        self.surface
            .region()
            .with_size(height, width)
            .check_within(self.surface.screen_limits())
            .map_err(BackendError::from)?;
        Ok(())
    }

    fn fit_surface(&mut self) -> WidgetResult<()> {
        self.check_fit(&self.lengths, self.rows.len())?;
        let (height, width) = fitted_size(&self.lengths, self.rows.len());
        // Blank the old extent on screen; a shrink would otherwise leave it behind.
        self.surface.erase()?;
        self.surface.refresh()?;
        self.surface.resize(height, width)?;
        debug!(target: "widget.table", height, width, "table_resized");
        Ok(())
    }

    fn redraw(&self) -> WidgetResult<()> {
        let grid = self.compose();
        for (y, line) in grid.iter().enumerate() {
            let Ok(y) = u16::try_from(y) else { break };
            for piece in line {
                match piece {
                    Piece::Glyph { x, glyph } => {
                        if let Ok(x) = u16::try_from(*x) {
                            self.surface.write_glyph(y, x, *glyph)?;
                        }
                    }
                    Piece::Text {
                        x,
                        text,
                        highlighted,
                    } => {
                        if let Ok(x) = u16::try_from(*x) {
                            let attr = if *highlighted {
                                Attr::REVERSE
                            } else {
                                Attr::NORMAL
                            };
                            self.surface.write_text_with(y, x, text, attr)?;
                        }
                    }
                }
            }
        }
        self.surface.refresh()?;
        debug!(
            target: "widget.table",
            rows = self.rows.len(),
            columns = self.headers.len(),
            pinned = self.pinned,
            highlight = ?self.highlight,
            "table_drawn"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn pair_gen(row: &(String, String), col: usize) -> String {
        if col == 0 { row.0.clone() } else { row.1.clone() }
    }

    fn headers(h: &[&str]) -> Vec<String> {
        h.iter().map(|s| s.to_string()).collect()
    }

    fn render_text(grid: &[GridLine]) -> Vec<String> {
        grid.iter()
            .map(|line| {
                let mut out: Vec<char> = Vec::new();
                for piece in line {
                    let (x, text) = match piece {
                        Piece::Glyph { x, glyph } => (*x, glyph.as_char().to_string()),
                        Piece::Text { x, text, .. } => (*x, text.clone()),
                    };
                    for (i, ch) in text.chars().enumerate() {
                        if out.len() <= x + i {
                            out.resize(x + i + 1, ' ');
                        }
                        out[x + i] = ch;
                    }
                }
                out.into_iter().collect()
            })
            .collect()
    }

    #[test]
    fn lengths_take_longest_of_header_and_cells() {
        let rows = vec![("x".to_string(), "yyy".to_string())];
        assert_eq!(compute_lengths(&headers(&["A", "BB"]), &rows, &pair_gen), vec![1, 3]);
    }

    #[test]
    fn no_rows_means_header_widths() {
        let rows: Vec<(String, String)> = Vec::new();
        assert_eq!(compute_lengths(&headers(&["Name", "Id"]), &rows, &pair_gen), vec![4, 2]);
    }

    #[test]
    fn fitted_size_counts_borders_and_padding() {
        assert_eq!(fitted_size(&[1, 3], 1), (5, 11));
        assert_eq!(fitted_size(&[], 0), (4, 1));
    }

    #[test]
    fn grid_matches_box_drawing_layout() {
        let rows = vec![("x".to_string(), "yyy".to_string())];
        let h = headers(&["A", "BB"]);
        let grid = compose_table(&h, &rows, &pair_gen, &[1, 3], None);
        assert_eq!(
            render_text(&grid),
            vec![
                "┌───┬─────┐",
                "│ A │ BB  │",
                "├───┼─────┤",
                "│ x │ yyy │",
                "└───┴─────┘",
            ]
        );
    }

    #[test]
    fn long_cells_are_cut_not_wrapped() {
        let rows = vec![("abcdef".to_string(), "z".to_string())];
        let h = headers(&["A", "B"]);
        let grid = compose_table(&h, &rows, &pair_gen, &[3, 1], None);
        assert_eq!(render_text(&grid)[3], "│ abc │ z │");
    }

    #[test]
    fn highlight_marks_only_that_row_text() {
        let rows = vec![
            ("a".to_string(), "b".to_string()),
            ("c".to_string(), "d".to_string()),
        ];
        let h = headers(&["A", "B"]);
        let grid = compose_table(&h, &rows, &pair_gen, &[1, 1], Some(1));
        let lit: Vec<usize> = grid
            .iter()
            .enumerate()
            .filter(|(_, line)| {
                line.iter()
                    .any(|p| matches!(p, Piece::Text { highlighted: true, .. }))
            })
            .map(|(y, _)| y)
            .collect();
        assert_eq!(lit, vec![4]);
    }

    #[test]
    fn no_headers_compose_nothing() {
        let rows: Vec<(String, String)> = vec![("a".into(), "b".into())];
        assert!(compose_table(&[], &rows, &pair_gen, &[], None).is_empty());
    }

    proptest! {
        #[test]
        fn derived_width_covers_every_cell(
            data in proptest::collection::vec(("[a-z]{0,12}", "[a-z]{0,12}"), 0..8),
            h0 in "[A-Z]{0,6}",
            h1 in "[A-Z]{0,6}",
        ) {
            let h = vec![h0, h1];
            let lengths = compute_lengths(&h, &data, &pair_gen);
            for col in 0..2 {
                prop_assert!(lengths[col] >= h[col].len());
                for row in &data {
                    prop_assert!(lengths[col] >= pair_gen(row, col).len());
                }
            }
        }

        #[test]
        fn composition_is_deterministic(
            data in proptest::collection::vec(("[a-z]{0,5}", "[a-z]{0,5}"), 0..5),
            hl in proptest::option::of(0usize..6),
        ) {
            let h = headers(&["K", "V"]);
            let lengths = compute_lengths(&h, &data, &pair_gen);
            let a = compose_table(&h, &data, &pair_gen, &lengths, hl);
            let b = compose_table(&h, &data, &pair_gen, &lengths, hl);
            prop_assert_eq!(&a, &b);
            prop_assert_eq!(a.len(), data.len() + 4);
            let (_, width) = fitted_size(&lengths, data.len());
            let top = render_text(&a[..1]);
            prop_assert_eq!(top[0].chars().count(), usize::from(width));
        }
    }
}
