//! XML text helpers shared by every part serializer.

pub mod escape;

pub use escape::{escape_cell_text, escape_xml};
