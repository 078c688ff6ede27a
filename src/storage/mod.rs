//! Storage layer for Monthwise
//!
//! Provides JSON file storage with atomic writes and the audit log that
//! records every persisted budget change.

pub mod categories;
pub mod file_io;
pub mod init;
pub mod rollovers;
pub mod transactions;

pub use categories::CategoryRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use rollovers::RolloverRepository;
pub use transactions::TransactionRepository;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType, Operation};
use crate::config::paths::MonthwisePaths;
use crate::error::MonthwiseError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: MonthwisePaths,
    pub categories: CategoryRepository,
    pub rollovers: RolloverRepository,
    pub transactions: TransactionRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: MonthwisePaths) -> Result<Self, MonthwiseError> {
        paths.ensure_directories()?;

        Ok(Self {
            categories: CategoryRepository::new(paths.categories_file()),
            rollovers: RolloverRepository::new(paths.rollovers_file()),
            transactions: TransactionRepository::new(paths.transactions_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &MonthwisePaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), MonthwiseError> {
        self.categories.load()?;
        self.rollovers.load()?;
        self.transactions.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), MonthwiseError> {
        self.categories.save()?;
        self.rollovers.save()?;
        self.transactions.save()?;
        Ok(())
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Record the creation of an entity
    pub fn log_create<T: Serialize + ?Sized>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), MonthwiseError> {
        let mut entry = AuditEntry::new(Operation::Create, entity_type, entity_id).after(entity);
        entry.entity_name = entity_name;
        self.audit.log(&entry)
    }

    /// Record an in-place change of an entity
    pub fn log_update<T: Serialize + ?Sized>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> Result<(), MonthwiseError> {
        let mut entry = AuditEntry::new(Operation::Update, entity_type, entity_id)
            .before(before)
            .after(after);
        entry.entity_name = entity_name;
        entry.diff_summary = diff_summary;
        self.audit.log(&entry)
    }

    /// Record the removal of an entity
    pub fn log_delete<T: Serialize + ?Sized>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), MonthwiseError> {
        let mut entry = AuditEntry::new(Operation::Delete, entity_type, entity_id).before(entity);
        entry.entity_name = entity_name;
        self.audit.log(&entry)
    }

    /// Record a whole-list replacement for a month
    pub fn log_replace<T: Serialize + ?Sized>(
        &self,
        entity_type: EntityType,
        month: impl Into<String>,
        before: &T,
        after: &T,
        diff_summary: impl Into<String>,
    ) -> Result<(), MonthwiseError> {
        let entry = AuditEntry::new(Operation::Replace, entity_type, month)
            .before(before)
            .after(after)
            .summary(diff_summary);
        self.audit.log(&entry)
    }
}
