//! Unified error types for livesheet.
//!
//! Every failure of a conversion run surfaces as one of these variants. All of
//! them are deterministic data or environment problems, so none are retried.
use std::fmt;

use thiserror::Error;

use crate::ooxml::opc::error::OpcError;

/// Main error type for livesheet operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Outer document or embedded `data_string` is not valid JSON
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// A required path is absent at either JSON nesting level
    #[error("Missing field: {0}")]
    MissingField(String),

    /// A field exists but has the wrong shape
    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    /// A conversion option has a value the workbook cannot carry
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// `data.series` parsed but holds no records
    #[error("data.series is empty, nothing to write")]
    EmptySeries,

    /// Filesystem read or write failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The OPC package could not be assembled or serialized
    #[error("Package error: {0}")]
    Package(#[from] OpcError),
}

impl Error {
    /// Classify this error for reporting.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MalformedDocument(_) => ErrorKind::MalformedDocument,
            Error::MissingField(_) => ErrorKind::MissingField,
            Error::TypeMismatch(_) => ErrorKind::TypeMismatch,
            Error::InvalidOption(_) => ErrorKind::InvalidOption,
            Error::EmptySeries => ErrorKind::EmptySeries,
            Error::Io(_) => ErrorKind::IoFailure,
            Error::Package(OpcError::IoError(_)) => ErrorKind::IoFailure,
            Error::Package(_) => ErrorKind::Package,
        }
    }
}

/// Fieldless classification of [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedDocument,
    MissingField,
    TypeMismatch,
    InvalidOption,
    EmptySeries,
    IoFailure,
    Package,
}

impl ErrorKind {
    /// Name used in diagnostics, e.g. `error[MissingField]`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MalformedDocument => "MalformedDocument",
            ErrorKind::MissingField => "MissingField",
            ErrorKind::TypeMismatch => "TypeMismatch",
            ErrorKind::InvalidOption => "InvalidOption",
            ErrorKind::EmptySeries => "EmptySeries",
            ErrorKind::IoFailure => "IOFailure",
            ErrorKind::Package => "Package",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result type for livesheet operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(ErrorKind::IoFailure.to_string(), "IOFailure");
        assert_eq!(
            Error::MissingField("data.data_string".into()).kind(),
            ErrorKind::MissingField
        );
        assert_eq!(Error::EmptySeries.kind(), ErrorKind::EmptySeries);
        assert_eq!(
            Error::InvalidOption("sheet name".into()).kind().as_str(),
            "InvalidOption"
        );
    }

    #[test]
    fn test_package_io_is_io_failure() {
        let err: Error = OpcError::IoError(std::io::Error::other("disk full")).into();
        assert_eq!(err.kind(), ErrorKind::IoFailure);

        let err: Error = OpcError::PartNotFound("/xl/styles.xml".into()).into();
        assert_eq!(err.kind(), ErrorKind::Package);
    }
}
