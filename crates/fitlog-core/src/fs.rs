//! Filesystem utilities for atomic operations.

use std::fs;
use std::io;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Copy `source` to `destination` through a temp file in the destination
/// directory, so readers never observe a half-written copy.
///
/// Returns the number of bytes copied.
///
/// # Errors
///
/// Returns an error if the destination has no parent directory, the copy
/// fails, or the final rename fails even after the fallback attempt.
pub fn copy_atomic(source: &Path, destination: &Path) -> io::Result<u64> {
    let parent = destination.parent().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "Destination has no parent directory",
        )
    })?;
    if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent)?;
    }

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("System time error: {}", e)))?
        .as_nanos();
    let temp_path = parent.join(format!(".fitlog-copy-{}.tmp", nanos));

    let bytes = match fs::copy(source, &temp_path) {
        Ok(bytes) => bytes,
        Err(err) => {
            let _ = fs::remove_file(&temp_path);
            return Err(err);
        }
    };

    rename_with_fallback(&temp_path, destination)?;
    Ok(bytes)
}

/// Rename a file, with fallback for platforms where rename fails if the target exists.
///
/// If the rename ultimately fails, the temp file is cleaned up.
///
/// # Errors
///
/// Returns an error if the rename fails even after the fallback attempt.
pub fn rename_with_fallback(temp_path: &Path, destination: &Path) -> io::Result<()> {
    if let Err(initial_err) = fs::rename(temp_path, destination) {
        let _ = fs::remove_file(destination);
        fs::rename(temp_path, destination).map_err(|retry_err| {
            let _ = fs::remove_file(temp_path);
            io::Error::new(
                retry_err.kind(),
                format!(
                    "Atomic rename failed (initial: {}, retry: {})",
                    initial_err, retry_err
                ),
            )
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_copy_atomic_creates_destination() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("fitlog.db");
        let dest = dir.path().join("backups").join("fitlog.db.bak");

        File::create(&source).unwrap().write_all(b"sets").unwrap();

        let bytes = copy_atomic(&source, &dest).unwrap();

        assert_eq!(bytes, 4);
        assert_eq!(fs::read_to_string(&dest).unwrap(), "sets");
        assert!(source.exists());
    }

    #[test]
    fn test_copy_atomic_overwrites_existing() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("fitlog.db");
        let dest = dir.path().join("backup.db");

        File::create(&dest).unwrap().write_all(b"old").unwrap();
        File::create(&source).unwrap().write_all(b"new").unwrap();

        copy_atomic(&source, &dest).unwrap();

        assert_eq!(fs::read_to_string(&dest).unwrap(), "new");
        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_copy_atomic_missing_source_fails() {
        let dir = tempdir().unwrap();
        let result = copy_atomic(&dir.path().join("nope.db"), &dir.path().join("out.db"));
        assert!(result.is_err());
        assert!(!dir.path().join("out.db").exists());
    }
}
