//! In-memory transaction store
//!
//! Useful for embedding the ledger over transactions loaded elsewhere, and
//! as the store behind service tests.

use std::sync::RwLock;

use crate::error::{MonthwiseError, MonthwiseResult};
use crate::models::{MonthKey, Transaction};

use super::{
    account_allowed, distinct_accounts, evaluate_aggregate, evaluate_history, AggregateRequest,
    AggregateRow, HistoryRequest, MonthTotal, TransactionQuery,
};

/// A transaction store held entirely in memory
#[derive(Debug, Default)]
pub struct MemoryTransactions {
    rows: RwLock<Vec<Transaction>>,
}

impl MemoryTransactions {
    pub fn new(rows: Vec<Transaction>) -> Self {
        Self {
            rows: RwLock::new(rows),
        }
    }

    pub fn insert(&self, txn: Transaction) -> MonthwiseResult<()> {
        let mut rows = self
            .rows
            .write()
            .map_err(|e| MonthwiseError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        rows.push(txn);
        Ok(())
    }

    fn read(&self) -> MonthwiseResult<std::sync::RwLockReadGuard<'_, Vec<Transaction>>> {
        self.rows
            .read()
            .map_err(|e| MonthwiseError::Storage(format!("Failed to acquire read lock: {}", e)))
    }
}

impl TransactionQuery for MemoryTransactions {
    fn aggregate(&self, request: &AggregateRequest) -> MonthwiseResult<Vec<AggregateRow>> {
        Ok(evaluate_aggregate(self.read()?.iter(), request))
    }

    fn history(&self, request: &HistoryRequest) -> MonthwiseResult<Vec<MonthTotal>> {
        Ok(evaluate_history(self.read()?.iter(), request))
    }

    fn account_names(&self) -> MonthwiseResult<Vec<String>> {
        Ok(distinct_accounts(self.read()?.iter()))
    }

    fn transactions(
        &self,
        month: MonthKey,
        accounts: Option<&[String]>,
    ) -> MonthwiseResult<Vec<Transaction>> {
        Ok(self
            .read()?
            .iter()
            .filter(|t| month.contains(t.date) && account_allowed(accounts, &t.account))
            .cloned()
            .collect())
    }
}
