//! JSON file helpers
//!
//! Each save replaces the whole file through a sibling temp file and a
//! rename, so a crash mid-write leaves either the old or the new contents on
//! disk, never a mix.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::MonthwiseError;

/// Read JSON from a file, returning the default value if the file doesn't exist
pub fn read_json<T, P>(path: P) -> Result<T, MonthwiseError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path).map_err(|e| {
        MonthwiseError::Storage(format!("Failed to open {}: {}", path.display(), e))
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        MonthwiseError::Storage(format!("Failed to parse {}: {}", path.display(), e))
    })
}

/// Write JSON to a file atomically (write to temp, sync, then rename)
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), MonthwiseError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            MonthwiseError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = temp_path_for(path);
    let file = File::create(&temp_path)
        .map_err(|e| MonthwiseError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| MonthwiseError::Storage(format!("Failed to serialize data: {}", e)))?;
    writer
        .flush()
        .map_err(|e| MonthwiseError::Storage(format!("Failed to flush data: {}", e)))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| MonthwiseError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        MonthwiseError::Storage(format!("Failed to replace {}: {}", path.display(), e))
    })
}

// Temp file lives next to the target so the rename stays on one filesystem
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct Ledger {
        months: Vec<String>,
    }

    #[test]
    fn test_missing_file_reads_as_default() {
        let temp_dir = TempDir::new().unwrap();
        let data: Ledger = read_json(temp_dir.path().join("missing.json")).unwrap();
        assert_eq!(data, Ledger::default());
    }

    #[test]
    fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("ledger.json");
        let data = Ledger {
            months: vec!["2025-01".into(), "2025-02".into()],
        };

        write_json_atomic(&path, &data).unwrap();
        let loaded: Ledger = read_json(&path).unwrap();

        assert_eq!(loaded, data);
        assert!(!temp_dir.path().join("nested").join("ledger.json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_is_a_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.json");
        fs::write(&path, "{ not json").unwrap();

        let result: Result<Ledger, _> = read_json(&path);
        assert!(matches!(result, Err(MonthwiseError::Storage(_))));
    }

    #[test]
    fn test_failed_rename_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        // A non-empty directory at the target path makes the rename fail
        let path = temp_dir.path().join("ledger.json");
        fs::create_dir_all(path.join("blocker")).unwrap();

        let result = write_json_atomic(&path, &Ledger::default());
        assert!(result.is_err());
        assert!(!temp_dir.path().join("ledger.json.tmp").exists());
    }
}
