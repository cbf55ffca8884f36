//! Directory index of produced workbooks.
//!
//! Lists the workbook files in a directory, newest-name first, and writes
//! them to `index.json` for the dashboard that serves them.

use crate::common::Result;
use crate::common::fs::atomic_write_bytes;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Directory scanned by default.
pub const DEFAULT_DIR: &str = "live_data";

/// Name of the index file written into the scanned directory.
pub const INDEX_FILE_NAME: &str = "index.json";

/// Contents of `index.json`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FileIndex {
    pub files: Vec<String>,
}

impl FileIndex {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Pretty JSON with two-space indentation; non-ASCII names are kept as is.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// List regular files in `dir` whose extension matches `ext`, ignoring case.
///
/// Names are sorted in descending order. `ext` is given without the dot.
pub fn build_index<P: AsRef<Path>>(dir: P, ext: &str) -> Result<FileIndex> {
    let dir = dir.as_ref();
    let mut files = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(ext));
        if !matches {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => files.push(name),
            Err(name) => warn!(name = ?name, "skipping file name that is not UTF-8"),
        }
    }

    files.sort_unstable_by(|a, b| b.cmp(a));
    debug!(dir = %dir.display(), files = files.len(), "built index");
    Ok(FileIndex { files })
}

/// Index the workbooks in `dir` and write `<dir>/index.json`.
///
/// Returns the index and the path written.
pub fn write_index<P: AsRef<Path>>(dir: P) -> Result<(FileIndex, PathBuf)> {
    let dir = dir.as_ref();
    let index = build_index(dir, crate::live::convert::OUTPUT_EXTENSION)?;
    let path = dir.join(INDEX_FILE_NAME);
    atomic_write_bytes(&path, index.to_json()?.as_bytes())?;
    Ok((index, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ErrorKind;
    use std::fs;

    #[test]
    fn test_build_index_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["2024-01-01.xlsx", "2024-03-01.XLSX", "2024-02-01.xlsx", "notes.txt", "xlsx"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        fs::create_dir(dir.path().join("nested.xlsx")).unwrap();

        let index = build_index(dir.path(), "xlsx").unwrap();
        assert_eq!(
            index.files,
            ["2024-03-01.XLSX", "2024-02-01.xlsx", "2024-01-01.xlsx"]
        );
    }

    #[test]
    fn test_write_index_json() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("直播_1.xlsx"), b"").unwrap();
        fs::write(dir.path().join("直播_2.xlsx"), b"").unwrap();

        let (index, path) = write_index(dir.path()).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(path, dir.path().join("index.json"));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "{\n  \"files\": [\n    \"直播_2.xlsx\",\n    \"直播_1.xlsx\"\n  ]\n}"
        );

        // index.json itself is not listed on the next run
        let (again, _) = write_index(dir.path()).unwrap();
        assert_eq!(again, index);
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = build_index(dir.path().join("absent"), "xlsx").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IoFailure);
    }
}
