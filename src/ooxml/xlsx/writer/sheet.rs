//! Worksheet serialization.
//!
//! Cells are written as inline strings, one `<row>` per stored row, with
//! empty cells left out of the row entirely.

use crate::common::xml::escape_cell_text;
use crate::ooxml::opc::constants::namespace;
use crate::ooxml::xlsx::cell::{CellValue, cell_ref};
use std::fmt::Write as FmtWrite;

/// A mutable worksheet for writing.
///
/// Rows are stored densely in order; a row may be shorter than its
/// neighbours, and missing trailing cells are treated as empty.
#[derive(Debug, Clone)]
pub struct MutableWorksheet {
    /// Worksheet name
    name: String,
    /// Sheet ID
    sheet_id: u32,
    /// Row-major cell grid (0-based internally)
    rows: Vec<Vec<CellValue>>,
}

impl MutableWorksheet {
    /// Create a new empty worksheet.
    pub fn new(name: String, sheet_id: u32) -> Self {
        Self {
            name,
            sheet_id,
            rows: Vec::new(),
        }
    }

    /// Get the worksheet name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the sheet ID.
    pub fn sheet_id(&self) -> u32 {
        self.sheet_id
    }

    /// Append a row after the last one.
    pub fn push_row<I, V>(&mut self, cells: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    /// Number of rows, including rows with no emitted cells.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of cells that will be written.
    pub fn cell_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|value| value.is_emitted())
            .count()
    }

    /// Serialize the worksheet to XML.
    ///
    /// Lines are joined with `\n` and there is no trailing newline. Every row
    /// gets a `<row>` element even if none of its cells are emitted.
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(256 + self.rows.len() * 128);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        let _ = write!(xml, "\n<worksheet xmlns=\"{}\">", namespace::SML_MAIN);
        xml.push_str("\n  <sheetData>");

        for (row_idx, cells) in self.rows.iter().enumerate() {
            // NOTE: Excel uses 1-based row numbering
            let row_num = row_idx as u32 + 1;
            let _ = write!(xml, "\n    <row r=\"{}\">", row_num);
            for (col_idx, value) in cells.iter().enumerate() {
                Self::write_cell(&mut xml, row_num, col_idx as u32 + 1, value);
            }
            xml.push_str("\n    </row>");
        }

        xml.push_str("\n  </sheetData>");
        xml.push_str("\n</worksheet>");
        xml
    }

    fn write_cell(xml: &mut String, row: u32, col: u32, value: &CellValue) {
        let Some(text) = value.to_text() else {
            return;
        };
        let _ = write!(
            xml,
            r#"
      <c r="{}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
            cell_ref(row, col),
            escape_cell_text(&text)
        );
    }
}
