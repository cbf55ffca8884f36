//! Office Open XML (OOXML) writing.
//!
//! The implementation is based on the Open Packaging Conventions (OPC).
//!
//! # Architecture
//!
//! 1. **OPC Layer** (`opc`): package model, relationships, ZIP output
//! 2. **Shared Parts** (`common`): core and extended document properties
//! 3. **Spreadsheet** (`xlsx`): worksheet, styles and workbook assembly
//!
//! # Example
//!
//! ```rust,no_run
//! use livesheet::ooxml::xlsx::{MutableWorksheet, WorkbookWriter};
//!
//! let mut sheet = MutableWorksheet::new("data".to_string(), 1);
//! sheet.push_row(["timeMinute", "pcuTotal"]);
//! sheet.push_row(["00:00", "10"]);
//! WorkbookWriter::new(sheet).save("out.xlsx")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod common;
pub mod opc;
pub mod xlsx;

// Re-export commonly used types from OPC layer
pub use opc::{OpcPackage, PackURI};

pub use common::{AppProperties, DocumentProperties};
