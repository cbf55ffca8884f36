//! Excel (.xlsx) spreadsheet writing.
//!
//! - [`cell`]: A1 addressing and the [`CellValue`] model
//! - [`writer`]: worksheet serialization, the style table and
//!   [`WorkbookWriter`], which assembles the complete package

pub mod cell;
pub mod writer;

pub use cell::{CellValue, cell_ref, column_to_letters};
pub use writer::{MutableWorksheet, StylesBuilder, WorkbookWriter};
