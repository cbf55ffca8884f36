//! Metadata parts shared by every OOXML document type.

pub mod properties;

pub use properties::{AppProperties, DocumentProperties};
