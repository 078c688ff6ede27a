//! Transaction repository for JSON storage
//!
//! A local read model of tagged transactions, persisted to transactions.json
//! and indexed by month. It backs the `TransactionQuery` contract for the
//! binary; ingestion and tag editing happen elsewhere.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::MonthwiseError;
use crate::models::{MonthKey, Transaction, TransactionId};
use crate::query::{
    account_allowed, distinct_accounts, evaluate_aggregate, evaluate_history, AggregateRequest,
    AggregateRow, HistoryRequest, MonthTotal, TransactionQuery,
};

use super::file_io::{read_json, write_json_atomic};

/// Serializable transaction data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    transactions: Vec<Transaction>,
}

/// Repository for transaction persistence with a month index
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<HashMap<TransactionId, Transaction>>,
    /// Index: month -> transaction_ids
    by_month: RwLock<HashMap<MonthKey, Vec<TransactionId>>>,
}

impl TransactionRepository {
    /// Create a new transaction repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_month: RwLock::new(HashMap::new()),
        }
    }

    /// Load transactions from disk and build the month index
    pub fn load(&self) -> Result<(), MonthwiseError> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| MonthwiseError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_month = self
            .by_month
            .write()
            .map_err(|e| MonthwiseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        by_month.clear();

        for txn in file_data.transactions {
            by_month
                .entry(MonthKey::from_date(txn.date))
                .or_default()
                .push(txn.id);
            data.insert(txn.id, txn);
        }

        Ok(())
    }

    /// Save transactions to disk, oldest first
    pub fn save(&self) -> Result<(), MonthwiseError> {
        let data = self
            .data
            .read()
            .map_err(|e| MonthwiseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        transactions.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));

        write_json_atomic(&self.path, &TransactionData { transactions })
    }

    /// Insert a transaction
    pub fn insert(&self, txn: Transaction) -> Result<(), MonthwiseError> {
        txn.validate().map_err(MonthwiseError::Validation)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| MonthwiseError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_month = self
            .by_month
            .write()
            .map_err(|e| MonthwiseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if data.contains_key(&txn.id) {
            return Err(MonthwiseError::Duplicate {
                entity_type: "Transaction",
                identifier: txn.id.to_string(),
            });
        }

        by_month
            .entry(MonthKey::from_date(txn.date))
            .or_default()
            .push(txn.id);
        data.insert(txn.id, txn);
        Ok(())
    }

    /// Count all transactions
    pub fn count(&self) -> Result<usize, MonthwiseError> {
        let data = self
            .data
            .read()
            .map_err(|e| MonthwiseError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.len())
    }

    fn in_month(&self, month: MonthKey) -> Result<Vec<Transaction>, MonthwiseError> {
        let data = self
            .data
            .read()
            .map_err(|e| MonthwiseError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        let by_month = self
            .by_month
            .read()
            .map_err(|e| MonthwiseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut rows: Vec<Transaction> = by_month
            .get(&month)
            .map(|ids| ids.iter().filter_map(|id| data.get(id).cloned()).collect())
            .unwrap_or_default();
        rows.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(rows)
    }
}

impl TransactionQuery for TransactionRepository {
    fn aggregate(&self, request: &AggregateRequest) -> Result<Vec<AggregateRow>, MonthwiseError> {
        let rows = self.in_month(request.month)?;
        Ok(evaluate_aggregate(&rows, request))
    }

    fn history(&self, request: &HistoryRequest) -> Result<Vec<MonthTotal>, MonthwiseError> {
        let data = self
            .data
            .read()
            .map_err(|e| MonthwiseError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(evaluate_history(data.values(), request))
    }

    fn account_names(&self) -> Result<Vec<String>, MonthwiseError> {
        let data = self
            .data
            .read()
            .map_err(|e| MonthwiseError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(distinct_accounts(data.values()))
    }

    fn transactions(
        &self,
        month: MonthKey,
        accounts: Option<&[String]>,
    ) -> Result<Vec<Transaction>, MonthwiseError> {
        Ok(self
            .in_month(month)?
            .into_iter()
            .filter(|t| account_allowed(accounts, &t.account))
            .collect())
    }
}
