//! Live-room analytics conversion.
//!
//! The pipeline runs in stages:
//!
//! 1. [`payload`] extracts the series records from the doubly-encoded document
//! 2. [`fields`] derives the column order from the union of record keys
//! 3. [`labels`] maps each field to its display label
//! 4. [`rows`] projects the header rows and one data row per record
//! 5. [`convert`] hands the grid to the workbook writer and saves it

pub mod convert;
pub mod fields;
pub mod labels;
pub mod payload;
pub mod rows;

pub use convert::{
    ConvertOptions, build_workbook, convert_file, default_output_name, validate_sheet_name,
};
pub use fields::order_fields;
pub use labels::LabelTable;
pub use payload::{Record, extract_series, load_series};
pub use rows::project_rows;
