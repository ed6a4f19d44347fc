//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Serialize;

use crate::error::{RosterError, RosterResult};

/// Read a JSON document, returning `None` if the file doesn't exist
///
/// A file that exists but does not parse is reported as
/// [`RosterError::CorruptStore`].
pub fn read_json_value<P: AsRef<Path>>(path: P) -> RosterResult<Option<serde_json::Value>> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(None);
    }

    let file = File::open(path)
        .map_err(|e| RosterError::Io(format!("Failed to open {}: {}", path.display(), e)))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map(Some)
        .map_err(|e| RosterError::corrupt(path, e))
}

/// Write JSON to a file atomically (write to temp, then rename)
///
/// The target is either completely replaced or left as it was. On failure
/// the returned [`RosterError::Persist`] names the step that failed.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> RosterResult<()>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| RosterError::persist(parent, "create directory", e))?;
    }

    // Temp file must live in the same directory for the rename to be atomic
    let temp_path = temp_path_for(path);

    let file = File::create(&temp_path)
        .map_err(|e| RosterError::persist(&temp_path, "create", e))?;

    let mut writer = BufWriter::new(file);
    let written = serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| RosterError::persist(path, "serialize", e))
        .and_then(|_| {
            writer
                .flush()
                .map_err(|e| RosterError::persist(&temp_path, "flush", e))
        })
        .and_then(|_| {
            writer
                .get_ref()
                .sync_all()
                .map_err(|e| RosterError::persist(&temp_path, "sync", e))
        });

    if let Err(e) = written {
        drop(writer);
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }
    drop(writer);

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        RosterError::persist(path, "rename", e)
    })?;

    Ok(())
}

/// Move an unreadable file aside so a later save cannot overwrite it
///
/// Returns the new location (`<file>.corrupt-<timestamp>`).
pub fn quarantine<P: AsRef<Path>>(path: P) -> RosterResult<PathBuf> {
    let path = path.as_ref();
    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    let mut target = path.as_os_str().to_owned();
    target.push(format!(".corrupt-{}", stamp));
    let target = PathBuf::from(target);

    fs::rename(path, &target).map_err(|e| RosterError::persist(path, "move aside", e))?;
    Ok(target)
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut temp = path.as_os_str().to_owned();
    temp.push(".tmp");
    PathBuf::from(temp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct TestData {
        name: String,
        value: i32,
    }

    #[test]
    fn test_read_nonexistent_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nonexistent.json");

        assert!(read_json_value(&path).unwrap().is_none());
    }

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.json");

        let data = TestData {
            name: "test".to_string(),
            value: 42,
        };

        write_json_atomic(&path, &data).unwrap();
        let value = read_json_value(&path).unwrap().unwrap();
        let loaded: TestData = serde_json::from_value(value).unwrap();
        assert_eq!(data, loaded);
    }

    #[test]
    fn test_atomic_write_no_temp_file_left() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.json");

        write_json_atomic(&path, &TestData::default()).unwrap();

        assert!(path.exists());
        assert!(!temp_dir.path().join("test.json.tmp").exists());
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("test.json");

        write_json_atomic(&path, &TestData::default()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_invalid_json_is_corrupt() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "not json at all").unwrap();

        let err = read_json_value(&path).unwrap_err();
        assert!(matches!(err, RosterError::CorruptStore { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_failed_write_keeps_previous_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.json");
        write_json_atomic(&path, &TestData { name: "good".into(), value: 1 }).unwrap();

        // A directory squatting on the temp path makes the write fail
        fs::create_dir(temp_dir.path().join("data.json.tmp")).unwrap();
        let err = write_json_atomic(&path, &TestData { name: "new".into(), value: 2 }).unwrap_err();
        assert!(matches!(err, RosterError::Persist { operation: "create", .. }));

        let value = read_json_value(&path).unwrap().unwrap();
        let kept: TestData = serde_json::from_value(value).unwrap();
        assert_eq!(kept.name, "good");
    }

    #[test]
    fn test_quarantine_moves_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("employees.json");
        fs::write(&path, "{{{").unwrap();

        let moved = quarantine(&path).unwrap();
        assert!(!path.exists());
        assert!(moved.exists());
        assert!(moved
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("employees.json.corrupt-"));
    }
}
