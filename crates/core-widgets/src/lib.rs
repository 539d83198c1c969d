//! Interactive and passive widgets drawn on `core-render` surfaces.
//!
//! * `Table` renders a box-drawn grid from rows of any type via a generator.
//! * `SelectionWidget` runs a single- or multi-select state machine over an
//!   option list.
//! * `FieldEditor` runs a navigation/edit state machine over labelled fields,
//!   forwarding key presses to caller-owned values through `Editable`.
//!
//! The interactive widgets block in `run` until the user confirms or presses
//! Escape. Each loop iteration processes exactly one key, then redraws.

mod confirm;
pub mod editable;
pub mod field_editor;
pub mod selection;
pub mod table;

pub use editable::{EditDelta, Editable, IntegerValue, TextValue, ToggleValue};
pub use field_editor::{EditorCursor, FieldEditor, NavigationPolicy};
pub use selection::{EscapePolicy, Selection, SelectionOptions, SelectionState, SelectionWidget};
pub use table::{
    Generator, GridLine, Piece, Table, TableSource, compose_table, compute_lengths, fitted_size,
};

use core_terminal::BackendError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WidgetError {
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// `FieldEditor::run` needs exactly one value per field.
    #[error("expected {expected} editable values, got {got}")]
    ValueCount { expected: usize, got: usize },

    /// Pinned column widths must match the header count.
    #[error("expected {expected} column widths, got {got}")]
    LengthCount { expected: usize, got: usize },
}

pub type WidgetResult<T> = Result<T, WidgetError>;
