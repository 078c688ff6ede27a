//! Month bootstrapper
//!
//! Decides what happens when a month has no categories yet, and runs the
//! explicit reset flow. Multi-step writes go through a `CompensationLog`.

use std::cell::RefCell;

use tracing::{info, warn};

use crate::error::{MonthwiseError, MonthwiseResult};
use crate::models::{default_template, BudgetCategory, MonthKey};
use crate::storage::Storage;

use super::category::CategoryStore;
use super::journal::CompensationLog;
use super::rollover::RolloverLedger;
use super::session::BudgetSession;

/// Where a month stands after evaluation
#[derive(Debug, Clone, PartialEq)]
pub enum BootstrapState {
    /// The month already has categories
    Ready { categories: Vec<BudgetCategory> },
    /// No month had data; the default template was written
    NoData { applied: Vec<BudgetCategory> },
    /// Other months have data; waiting for the user to copy or start fresh
    CopyPending { source: MonthKey },
    /// The month stays empty
    Fresh,
}

impl BootstrapState {
    /// Categories now present in the month
    pub fn categories(&self) -> &[BudgetCategory] {
        match self {
            Self::Ready { categories } => categories,
            Self::NoData { applied } => applied,
            Self::CopyPending { .. } | Self::Fresh => &[],
        }
    }
}

/// User answer to `CopyPending`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapChoice {
    Copy,
    StartFresh,
}

/// How an explicit reset rebuilds the month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetMode {
    /// Replace the month's categories with a copy of another month's
    CloneFrom(MonthKey),
    /// Delete every category of the month
    Clear,
}

/// What a completed reset did
#[derive(Debug, Clone, PartialEq)]
pub struct ResetOutcome {
    pub categories: Vec<BudgetCategory>,
    pub removed_transfers: usize,
}

/// Month with data closest to `target`.
///
/// Distance is in calendar months; months after the target count 0.9 of
/// their distance. Exact ties go to the later month. `target` itself is
/// never returned.
pub fn nearest_month(target: MonthKey, candidates: &[MonthKey]) -> Option<MonthKey> {
    // Scaled by 10 so the 0.9 weight stays integral
    let weighted = |candidate: &MonthKey| {
        let delta = target.months_until(candidate);
        if delta > 0 {
            delta * 9
        } else {
            -delta * 10
        }
    };

    candidates
        .iter()
        .filter(|m| **m != target)
        .min_by(|a, b| weighted(a).cmp(&weighted(b)).then_with(|| b.cmp(a)))
        .copied()
}

pub struct MonthBootstrapper<'a> {
    storage: &'a Storage,
    auto_apply_template: bool,
    pending_repair: RefCell<Option<CompensationLog>>,
}

impl<'a> MonthBootstrapper<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            auto_apply_template: true,
            pending_repair: RefCell::new(None),
        }
    }

    /// Whether `NoData` writes the default template (default) or yields `Fresh`
    pub fn with_auto_apply(mut self, auto_apply_template: bool) -> Self {
        self.auto_apply_template = auto_apply_template;
        self
    }

    fn categories(&self) -> CategoryStore<'a> {
        CategoryStore::new(self.storage)
    }

    /// Classify the session's month, applying the template when nothing
    /// anywhere has data
    pub fn evaluate(&self, session: &BudgetSession) -> MonthwiseResult<BootstrapState> {
        let month = session.month;
        let store = self.categories();

        let categories = store.load_categories(month)?;
        if !categories.is_empty() {
            return Ok(BootstrapState::Ready { categories });
        }

        let others: Vec<MonthKey> = store
            .get_months_with_data()?
            .into_iter()
            .filter(|m| *m != month)
            .collect();

        if let Some(source) = nearest_month(month, &others) {
            info!(%month, %source, "month is empty; copy pending");
            return Ok(BootstrapState::CopyPending { source });
        }

        if !self.auto_apply_template {
            return Ok(BootstrapState::Fresh);
        }

        let mut log = CompensationLog::begin(self.storage, "bootstrap", month)?;
        let applied = self.run_step(&mut log, "apply template", || {
            store.save_all_categories(month, default_template(month))
        })?;
        info!(%month, count = applied.len(), "applied default template");

        Ok(BootstrapState::NoData { applied })
    }

    /// Act on the user's answer. Only `CopyPending` writes; other states are
    /// returned as evaluated.
    pub fn resolve(
        &self,
        session: &BudgetSession,
        choice: BootstrapChoice,
    ) -> MonthwiseResult<BootstrapState> {
        let state = self.evaluate(session)?;
        let BootstrapState::CopyPending { source } = state else {
            return Ok(state);
        };

        match choice {
            BootstrapChoice::StartFresh => {
                info!(month = %session.month, "starting month fresh");
                Ok(BootstrapState::Fresh)
            }
            BootstrapChoice::Copy => {
                let month = session.month;
                let store = self.categories();
                let mut log = CompensationLog::begin(self.storage, "bootstrap copy", month)?;
                let categories = self.run_step(&mut log, "copy categories", || {
                    store.copy_from_month(source, month)
                })?;
                Ok(BootstrapState::Ready { categories })
            }
        }
    }

    /// Explicit reset of the session's month.
    ///
    /// Purges the month's outgoing transfers. Incoming transfers that name
    /// this month as destination are left in place.
    pub fn reset_budget(
        &self,
        session: &BudgetSession,
        mode: ResetMode,
    ) -> MonthwiseResult<ResetOutcome> {
        let month = session.month;
        let store = self.categories();
        let ledger = RolloverLedger::new(self.storage);

        if let ResetMode::CloneFrom(source) = mode {
            if !store.has_categories(source)? {
                return Err(MonthwiseError::month_not_found(source.to_string()));
            }
        }

        let mut log = CompensationLog::begin(self.storage, "reset", month)?;
        let categories = match mode {
            ResetMode::CloneFrom(source) => self.run_step(&mut log, "copy categories", || {
                store.copy_from_month(source, month)
            })?,
            ResetMode::Clear => self.run_step(&mut log, "clear categories", || {
                store.save_all_categories(month, Vec::new())
            })?,
        };
        let removed_transfers = self.run_step(&mut log, "delete rollovers", || {
            ledger.delete_month_rollovers(month)
        })?;

        let incoming = ledger.load_incoming(month)?.len();
        if incoming > 0 {
            warn!(%month, incoming, "reset left incoming transfers in place");
        }
        info!(%month, ?mode, categories = categories.len(), removed_transfers, "reset month");

        Ok(ResetOutcome {
            categories,
            removed_transfers,
        })
    }

    fn run_step<T>(
        &self,
        log: &mut CompensationLog,
        name: &'static str,
        action: impl FnOnce() -> MonthwiseResult<T>,
    ) -> MonthwiseResult<T> {
        let result = log.step(self.storage, name, action);
        if matches!(result, Err(MonthwiseError::PartialWrite { .. })) {
            *self.pending_repair.borrow_mut() = Some(log.clone());
        }
        result
    }

    /// Whether a failed flow left a month that `repair` can restore
    pub fn has_pending_repair(&self) -> bool {
        self.pending_repair.borrow().is_some()
    }

    /// Restore the month a failed flow left half-written.
    ///
    /// Returns `false` when there is nothing to repair. On failure the log
    /// is kept so the repair can be retried.
    pub fn repair(&self) -> MonthwiseResult<bool> {
        let Some(log) = self.pending_repair.borrow_mut().take() else {
            return Ok(false);
        };

        if let Err(err) = log.repair(self.storage) {
            *self.pending_repair.borrow_mut() = Some(log);
            return Err(err);
        }
        Ok(true)
    }
}
