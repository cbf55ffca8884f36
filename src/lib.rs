//! Livesheet - convert live-room analytics payloads into XLSX workbooks
//!
//! The analytics service delivers a JSON document whose `data.data_string`
//! field holds a second JSON document with the per-minute `data.series`.
//! This crate extracts that series, derives a stable column order with a
//! second header row of display labels, and writes the table as a
//! single-sheet workbook assembled directly from OPC parts.
//!
//! # Example
//!
//! ```no_run
//! use livesheet::live::{ConvertOptions, convert_file};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let written = convert_file(
//!     Path::new("room.json"),
//!     Path::new("live_data"),
//!     None,
//!     &ConvertOptions::default(),
//! )?;
//! println!("Wrote {}", written.display());
//! # Ok(())
//! # }
//! ```

/// Error types, XML text helpers and atomic file output.
pub mod common;

/// Workbook index for the output directory.
pub mod index;

/// The analytics conversion pipeline.
pub mod live;

/// Subscriber setup for the binaries.
pub mod logging;

/// OOXML package writing (OPC layer, document properties, spreadsheet parts).
pub mod ooxml;

pub use common::{Error, ErrorKind, Result};
pub use live::{ConvertOptions, LabelTable, convert_file};
