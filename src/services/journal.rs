//! Compensation log for multi-step month flows
//!
//! Reset, copy and bootstrap write categories and rollovers in separate
//! steps with no shared transaction. Before the first step the month's
//! categories and outgoing transfers are snapshotted; if a later step fails
//! the snapshot stays available so the caller can put the month back.

use serde::Serialize;
use tracing::{error, info, warn};

use crate::audit::EntityType;
use crate::error::{MonthwiseError, MonthwiseResult};
use crate::models::{BudgetCategory, MonthKey, Transfer};
use crate::storage::Storage;

/// Snapshot of a month taken before a multi-step flow
#[derive(Debug, Clone, Serialize)]
pub struct CompensationLog {
    pub flow: &'static str,
    pub month: MonthKey,
    pub completed: Vec<&'static str>,
    categories_before: Vec<BudgetCategory>,
    rollovers_before: Vec<Transfer>,
}

impl CompensationLog {
    /// Snapshot `month` ahead of `flow`
    pub fn begin(storage: &Storage, flow: &'static str, month: MonthKey) -> MonthwiseResult<Self> {
        Ok(Self {
            flow,
            month,
            completed: Vec::new(),
            categories_before: storage.categories.for_month(month)?,
            rollovers_before: storage.rollovers.outgoing(month)?,
        })
    }

    /// Run one step, recording it on success.
    ///
    /// A step saves its file before writing the audit entry, so a failing
    /// first step may already have reached disk. In that case memory is
    /// reloaded from disk: if the month still matches the snapshot the
    /// original error is returned, otherwise the failure is a `PartialWrite`.
    /// Any failure after the first completed step is a `PartialWrite` too,
    /// and leaves the log ready for `repair`.
    pub fn step<T>(
        &mut self,
        storage: &Storage,
        name: &'static str,
        action: impl FnOnce() -> MonthwiseResult<T>,
    ) -> MonthwiseResult<T> {
        match action() {
            Ok(value) => {
                self.completed.push(name);
                Ok(value)
            }
            Err(err) if self.completed.is_empty() && self.disk_matches_snapshot(storage) => {
                Err(err)
            }
            Err(err) => {
                error!(
                    flow = self.flow,
                    month = %self.month,
                    completed = ?self.completed,
                    failed_step = name,
                    error = %err,
                    "flow left month partially written"
                );
                Err(MonthwiseError::PartialWrite {
                    flow: self.flow,
                    completed: self.completed.clone(),
                    failed_step: name,
                    message: err.to_string(),
                })
            }
        }
    }

    pub fn categories_before(&self) -> &[BudgetCategory] {
        &self.categories_before
    }

    pub fn rollovers_before(&self) -> &[Transfer] {
        &self.rollovers_before
    }

    /// Reload from disk and compare the month against the snapshot.
    ///
    /// A failed reload counts as a mismatch since the disk state is unknown.
    fn disk_matches_snapshot(&self, storage: &Storage) -> bool {
        let reloaded = storage
            .categories
            .load()
            .and_then(|_| storage.rollovers.load())
            .and_then(|_| {
                Ok((
                    storage.categories.for_month(self.month)?,
                    storage.rollovers.outgoing(self.month)?,
                ))
            });

        match reloaded {
            Ok((mut categories, mut rollovers)) => {
                let mut categories_before = self.categories_before.clone();
                let mut rollovers_before = self.rollovers_before.clone();
                categories.sort_by_key(|c| c.id);
                categories_before.sort_by_key(|c| c.id);
                rollovers.sort_by_key(|t| t.id);
                rollovers_before.sort_by_key(|t| t.id);
                categories == categories_before && rollovers == rollovers_before
            }
            Err(err) => {
                warn!(month = %self.month, error = %err, "could not reload month after failed step");
                false
            }
        }
    }

    fn restore_memory(&self, storage: &Storage) -> MonthwiseResult<()> {
        storage
            .categories
            .replace_month(self.month, self.categories_before.clone())?;
        storage
            .rollovers
            .replace_outgoing(self.month, self.rollovers_before.clone())?;
        Ok(())
    }

    /// Put the month's categories and outgoing transfers back as snapshotted
    pub fn repair(&self, storage: &Storage) -> MonthwiseResult<()> {
        let mixed = storage.categories.for_month(self.month)?;
        self.restore_memory(storage)?;
        storage.categories.save()?;
        storage.rollovers.save()?;

        storage.log_replace(
            EntityType::BudgetMonth,
            self.month.to_string(),
            &mixed,
            &self.categories_before,
            format!(
                "repaired {} after [{}]: {} categories, {} transfers",
                self.flow,
                self.completed.join(", "),
                self.categories_before.len(),
                self.rollovers_before.len()
            ),
        )?;
        info!(flow = self.flow, month = %self.month, "restored month from compensation log");

        Ok(())
    }
}
