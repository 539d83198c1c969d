//! Geometry shared by the terminal backend, the surfaces and the widgets.
//!
//! Everything is expressed in terminal cell units (`u16`), origin top-left.

pub mod layout;

pub use layout::{LayoutError, LayoutResult, Region};
