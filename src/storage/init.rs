//! Storage initialization
//!
//! First-run setup: directories, settings and empty data files. Budget
//! categories are not seeded here; a month gets its template the first time
//! it is opened with no data anywhere.

use std::path::PathBuf;

use crate::config::{MonthwisePaths, Settings};
use crate::error::MonthwiseError;

use super::categories::CategoryData;
use super::file_io::write_json_atomic;
use super::rollovers::RolloverData;

/// Initialize storage for a fresh installation.
///
/// Existing files are left alone. Returns the files that were created.
pub fn initialize_storage(paths: &MonthwisePaths) -> Result<Vec<PathBuf>, MonthwiseError> {
    paths.ensure_directories()?;

    let mut created = Vec::new();

    if !paths.settings_file().exists() {
        Settings::default().save(paths)?;
        created.push(paths.settings_file());
    }
    if !paths.categories_file().exists() {
        write_json_atomic(paths.categories_file(), &CategoryData::default())?;
        created.push(paths.categories_file());
    }
    if !paths.rollovers_file().exists() {
        write_json_atomic(paths.rollovers_file(), &RolloverData::default())?;
        created.push(paths.rollovers_file());
    }
    if !paths.transactions_file().exists() {
        write_json_atomic(paths.transactions_file(), &serde_json::json!({ "transactions": [] }))?;
        created.push(paths.transactions_file());
    }

    Ok(created)
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &MonthwisePaths) -> bool {
    !paths.is_initialized()
}
