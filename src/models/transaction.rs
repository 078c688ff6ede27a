//! Transaction read model
//!
//! Transactions are owned by the ingestion side; the budget ledger only
//! reads them. This is the shape kept in the local transaction store.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::normalize_tags;
use super::ids::TransactionId;
use super::money::Money;

/// A tagged transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,

    /// Account display name
    pub account: String,

    pub date: NaiveDate,

    /// Amount (positive for inflow, negative for outflow)
    pub amount: Money,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub tags: Vec<String>,

    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(account: impl Into<String>, date: NaiveDate, amount: Money) -> Self {
        Self {
            id: TransactionId::new(),
            account: account.into(),
            date,
            amount,
            description: String::new(),
            tags: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = normalize_tags(tags);
        self
    }

    pub fn is_inflow(&self) -> bool {
        self.amount.is_positive()
    }

    pub fn is_outflow(&self) -> bool {
        self.amount.is_negative()
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), String> {
        if self.account.trim().is_empty() {
            return Err("Transaction needs an account".into());
        }
        if self.amount.is_zero() {
            return Err("Transaction amount cannot be zero".into());
        }
        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} [{}]",
            self.date,
            self.amount,
            self.description,
            self.tags.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_transaction() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let txn = Transaction::new("Checking", date, Money::from_cents(-4250))
            .with_description("Taqueria")
            .with_tags(["Dining", "dining", "friday"]);

        assert!(txn.is_outflow());
        assert!(!txn.is_inflow());
        assert_eq!(txn.tags, vec!["dining", "friday"]);
        assert!(txn.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        assert!(Transaction::new("", date, Money::from_cents(100)).validate().is_err());
        assert!(Transaction::new("Checking", date, Money::zero()).validate().is_err());
    }
}
