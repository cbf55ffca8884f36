//! Atomic file output.
//!
//! Writes go to a temp file in the destination directory (avoids cross-device
//! renames), are flushed and synced, and then renamed over the destination. If
//! anything fails before the rename, the destination is left untouched and the
//! temp file is removed.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

fn parent_dir_or_dot(path: &Path) -> &Path {
    // `Path::parent` is `Some("")` for bare relative names like `out.xlsx`.
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}

/// Atomically write a file by:
/// - creating parent directories (if needed)
/// - writing to a temp file in the same directory
/// - flushing + syncing the temp file
/// - renaming it into place with replace semantics
pub fn atomic_write<T>(
    dest: impl AsRef<Path>,
    write_fn: impl FnOnce(&mut File) -> io::Result<T>,
) -> io::Result<T> {
    let dest = dest.as_ref();
    let dir = parent_dir_or_dot(dest);
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    let out = write_fn(tmp.as_file_mut())?;

    tmp.as_file_mut().flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(dest).map_err(|err| err.error)?;

    // Directory sync is best-effort; the file is already in place.
    let _ = File::open(dir).and_then(|d| d.sync_all());

    Ok(out)
}

/// Convenience helper for atomically writing a full byte slice to disk.
pub fn atomic_write_bytes(dest: impl AsRef<Path>, bytes: &[u8]) -> io::Result<()> {
    atomic_write(dest, |file| file.write_all(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creates_parent_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("nested").join("out.bin");

        atomic_write_bytes(&dest, b"hello").unwrap();
        assert_eq!(fs::read(&dest).unwrap(), b"hello");
    }

    #[test]
    fn test_failed_write_does_not_clobber_destination() {
        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("existing.bin");
        fs::write(&dest, b"sentinel").unwrap();

        let err = atomic_write(&dest, |file| {
            file.write_all(b"partial")?;
            Err::<(), _>(io::Error::other("simulated write failure"))
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "simulated write failure");

        assert_eq!(fs::read(&dest).unwrap(), b"sentinel");
        let remaining: Vec<_> = fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        assert_eq!(remaining, vec![dest]);
    }
}
