//! Extraction of the analytics series from a doubly-encoded JSON document.
//!
//! The outer document carries the real payload as a JSON string at
//! `data.data_string`; that string in turn holds `data.series`, an array of
//! flat per-minute records.

use crate::common::{Error, Result};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::debug;

/// One series entry: field name to value, in document order.
pub type Record = Map<String, Value>;

const DATA_STRING_PATH: [&str; 2] = ["data", "data_string"];
const SERIES_PATH: [&str; 2] = ["data", "series"];

/// Read `path` and extract its series.
pub fn load_series<P: AsRef<Path>>(path: P) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    debug!(path = %path.display(), bytes = bytes.len(), "read payload");
    extract_series(&bytes)
}

/// Extract the series records from raw document bytes.
///
/// Checks are made in nesting order, so the first problem found is the one
/// reported. An empty series is an error.
pub fn extract_series(bytes: &[u8]) -> Result<Vec<Record>> {
    let outer: Value = serde_json::from_slice(bytes)
        .map_err(|e| Error::MalformedDocument(format!("document is not valid JSON: {}", e)))?;

    let data_string = lookup(&outer, &DATA_STRING_PATH, "")?
        .as_str()
        .ok_or_else(|| Error::TypeMismatch("data.data_string must be a string".to_string()))?;

    let inner: Value = serde_json::from_str(data_string).map_err(|e| {
        Error::MalformedDocument(format!("data.data_string is not valid JSON: {}", e))
    })?;

    let series = lookup(&inner, &SERIES_PATH, "data_string.")?
        .as_array()
        .ok_or_else(|| Error::TypeMismatch("data.series must be a list".to_string()))?;

    let records = series
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            entry.as_object().cloned().ok_or_else(|| {
                Error::TypeMismatch(format!("data.series[{}] must be an object", i))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if records.is_empty() {
        return Err(Error::EmptySeries);
    }

    debug!(records = records.len(), "extracted series");
    Ok(records)
}

/// Walk `path` through nested objects.
///
/// A missing key is `MissingField`; a non-object on the way is `TypeMismatch`.
/// `prefix` only decorates messages.
fn lookup<'a>(root: &'a Value, path: &[&str], prefix: &str) -> Result<&'a Value> {
    let mut current = root;
    for (depth, key) in path.iter().enumerate() {
        let object = current.as_object().ok_or_else(|| {
            let parent = if depth == 0 {
                "document root".to_string()
            } else {
                format!("{}{}", prefix, path[..depth].join("."))
            };
            Error::TypeMismatch(format!("{} must be an object", parent))
        })?;
        current = object.get(*key).ok_or_else(|| {
            Error::MissingField(format!("{}{}", prefix, path[..=depth].join(".")))
        })?;
    }
    Ok(current)
}
