//! Cell values and A1-style cell addressing.

use std::fmt;

/// Convert a 1-based column number to Excel column letters
/// (1 -> "A", 26 -> "Z", 27 -> "AA", 703 -> "AAA").
///
/// Column 0 has no letters and yields an empty string.
pub fn column_to_letters(col: u32) -> String {
    let mut letters = Vec::with_capacity(3);
    let mut col = col;

    while col > 0 {
        col -= 1;
        letters.push((col % 26) as u8 + b'A');
        col /= 26;
    }

    letters.iter().rev().map(|&b| b as char).collect()
}

/// A1-style reference for a 1-based row and column, e.g. `(3, 28)` -> `"AB3"`.
pub fn cell_ref(row: u32, col: u32) -> String {
    let mut reference = column_to_letters(col);
    reference.push_str(itoa::Buffer::new().format(row));
    reference
}

/// A value stored in a worksheet cell.
///
/// Every value is written as an inline string; the variants only control how
/// the text is rendered.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Empty cell
    #[default]
    Empty,
    /// Boolean value
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit unsigned integer
    UInt(u64),
    /// Any other JSON number, kept exactly as written in the source
    Number(String),
    /// String value
    String(String),
}

impl CellValue {
    /// Whether the cell produces a `<c>` element.
    ///
    /// Empty cells and empty strings are omitted from the row entirely.
    #[inline]
    pub fn is_emitted(&self) -> bool {
        match self {
            CellValue::Empty => false,
            CellValue::String(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// Text rendered into the cell, or `None` when the cell is not emitted.
    pub fn to_text(&self) -> Option<String> {
        if !self.is_emitted() {
            return None;
        }
        Some(self.to_string())
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Bool(b) => f.write_str(if *b { "True" } else { "False" }),
            CellValue::Int(i) => f.write_str(itoa::Buffer::new().format(*i)),
            CellValue::UInt(u) => f.write_str(itoa::Buffer::new().format(*u)),
            CellValue::Number(n) => f.write_str(n),
            CellValue::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<u64> for CellValue {
    fn from(u: u64) -> Self {
        CellValue::UInt(u)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Empty, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_column_to_letters() {
        assert_eq!(column_to_letters(1), "A");
        assert_eq!(column_to_letters(26), "Z");
        assert_eq!(column_to_letters(27), "AA");
        assert_eq!(column_to_letters(702), "ZZ");
        assert_eq!(column_to_letters(703), "AAA");
        assert_eq!(column_to_letters(16384), "XFD");
        assert_eq!(column_to_letters(0), "");
    }

    #[test]
    fn test_cell_ref() {
        assert_eq!(cell_ref(1, 1), "A1");
        assert_eq!(cell_ref(3, 28), "AB3");
        assert_eq!(cell_ref(1048576, 16384), "XFD1048576");
    }

    #[test]
    fn test_value_rendering() {
        assert_eq!(CellValue::from("00:00").to_text().as_deref(), Some("00:00"));
        assert_eq!(CellValue::Int(-42).to_text().as_deref(), Some("-42"));
        assert_eq!(CellValue::UInt(u64::MAX).to_text().as_deref(), Some("18446744073709551615"));
        assert_eq!(
            CellValue::Number("100000000000000000000".to_string()).to_text().as_deref(),
            Some("100000000000000000000")
        );
        assert_eq!(CellValue::Number("1.5e-7".to_string()).to_text().as_deref(), Some("1.5e-7"));
        assert_eq!(CellValue::Bool(true).to_text().as_deref(), Some("True"));
        assert_eq!(CellValue::Bool(false).to_text().as_deref(), Some("False"));
        assert_eq!(CellValue::Int(0).to_text().as_deref(), Some("0"));
    }

    #[test]
    fn test_empty_values_not_emitted() {
        assert!(!CellValue::Empty.is_emitted());
        assert!(!CellValue::from("").is_emitted());
        assert!(!CellValue::from(None::<i64>).is_emitted());
        assert_eq!(CellValue::from("").to_text(), None);
        assert!(CellValue::from(" ").is_emitted());
    }

    proptest! {
        #[test]
        fn prop_column_letters_are_uppercase(col in 1u32..=1_000_000) {
            let letters = column_to_letters(col);
            prop_assert!(!letters.is_empty());
            prop_assert!(letters.bytes().all(|b| b.is_ascii_uppercase()));
        }

        #[test]
        fn prop_column_letters_preserve_order(a in 1u32..=100_000, b in 1u32..=100_000) {
            let (la, lb) = (column_to_letters(a), column_to_letters(b));
            // Shorter codes sort first, then lexicographically within a length
            prop_assert_eq!((la.len(), la).cmp(&(lb.len(), lb)), a.cmp(&b));
        }
    }
}
