//! Atomic JSON file helpers
//!
//! Every store persists through these, so a crash mid-write never leaves a
//! half-written data file behind.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::error::QuincenaResult;

/// Read JSON from `path`, falling back to `T::default()` when the file
/// does not exist yet
pub fn read_json<T, P>(path: P) -> QuincenaResult<T>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        debug!(path = %path.display(), "data file missing, using defaults");
        return Ok(T::default());
    }

    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Write JSON to `path` atomically: serialize into a sibling temp file,
/// fsync, then rename over the target
pub fn write_json_atomic<T, P>(path: P, data: &T) -> QuincenaResult<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    // The temp file must live in the same directory for the rename to be atomic
    let temp_path = path.with_extension("json.tmp");
    let mut writer = BufWriter::new(File::create(&temp_path)?);
    serde_json::to_writer_pretty(&mut writer, data)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuincenaError;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct TestData {
        name: String,
        value: i32,
    }

    #[test]
    fn test_read_missing_file_yields_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.json");

        let data: TestData = read_json(&path).unwrap();
        assert_eq!(data, TestData::default());
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
        let loaded: TestData = read_json(&path).unwrap();
        assert_eq!(data, loaded);
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.json");
        let temp_path = temp_dir.path().join("test.json.tmp");

        let data = TestData {
            name: "test".to_string(),
            value: 42,
        };
        write_json_atomic(&path, &data).unwrap();

        assert!(path.exists());
        assert!(!temp_path.exists());
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("test.json");

        write_json_atomic(&path, &TestData::default()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_corrupt_file_reports_json_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("corrupt.json");
        fs::write(&path, "not json at all").unwrap();

        let err = read_json::<TestData, _>(&path).unwrap_err();
        assert!(matches!(err, QuincenaError::Json(_)));
    }
}
