//! Unified error types for livesheet.
//!
//! This module provides the error type returned by extraction, packaging and
//! file output, along with a fieldless [`ErrorKind`] used for reporting.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, ErrorKind, Result};
