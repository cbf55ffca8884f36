//! Common types and utilities shared across the crate.
//!
//! This module provides the unified error type, XML text helpers and atomic
//! file output used by both the OOXML writer and the conversion pipeline.

// Submodule declarations
pub mod error;
pub mod fs;
pub mod xml;

// Re-exports for convenience
pub use error::{Error, ErrorKind, Result};
