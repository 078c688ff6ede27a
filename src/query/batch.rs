//! Batched aggregate requests
//!
//! All per-category predicates for a month travel in one request so the
//! store answers them in a single pass instead of one round trip each. The
//! request is plain data; it says nothing about how the store evaluates it.

use serde::{Deserialize, Serialize};

use crate::error::{MonthwiseError, MonthwiseResult};
use crate::models::{AmountSign, Money, MonthKey};

use super::predicate::{CategoryMatcher, TagPredicate};

/// One labelled predicate inside a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateItem {
    pub label: String,
    pub matcher: CategoryMatcher,
}

/// Sum of absolute matching amounts, per label, for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRequest {
    pub month: MonthKey,
    pub accounts: Option<Vec<String>>,
    pub items: Vec<AggregateItem>,
}

impl AggregateRequest {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// One answer row of an aggregate request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRow {
    pub label: String,
    pub total: Money,
}

/// Builder collecting `(predicate, sign, label)` tuples into one request
#[derive(Debug, Clone)]
pub struct AggregateBatch {
    month: MonthKey,
    accounts: Option<Vec<String>>,
    items: Vec<AggregateItem>,
}

impl AggregateBatch {
    pub fn new(month: MonthKey) -> Self {
        Self {
            month,
            accounts: None,
            items: Vec::new(),
        }
    }

    /// Restrict the batch to an account allow-list; `None` or empty means all
    pub fn accounts(mut self, accounts: Option<Vec<String>>) -> Self {
        self.accounts = accounts.filter(|a| !a.is_empty());
        self
    }

    pub fn push(
        &mut self,
        predicate: TagPredicate,
        sign: AmountSign,
        label: impl Into<String>,
    ) -> &mut Self {
        self.items.push(AggregateItem {
            label: label.into(),
            matcher: CategoryMatcher::new(predicate, sign),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Finish the batch. Labels must be unique so rows can be joined back.
    pub fn build(self) -> MonthwiseResult<AggregateRequest> {
        for (i, item) in self.items.iter().enumerate() {
            if item.label.is_empty() {
                return Err(MonthwiseError::Query("aggregate label cannot be empty".into()));
            }
            if self.items[..i].iter().any(|prev| prev.label == item.label) {
                return Err(MonthwiseError::Query(format!(
                    "duplicate aggregate label '{}'",
                    item.label
                )));
            }
        }

        Ok(AggregateRequest {
            month: self.month,
            accounts: self.accounts,
            items: self.items,
        })
    }
}

/// Per-month totals of one predicate over a window of months
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRequest {
    pub matcher: CategoryMatcher,
    /// Oldest month included
    pub from: MonthKey,
    /// Newest month included
    pub to: MonthKey,
    /// Maximum rows returned, newest first
    pub limit: usize,
    pub accounts: Option<Vec<String>>,
}

impl HistoryRequest {
    /// Window of `months` calendar months ending at `to`
    pub fn ending_at(matcher: CategoryMatcher, to: MonthKey, months: usize) -> Self {
        let span = months.max(1) as i64;
        Self {
            matcher,
            from: to.offset(1 - span),
            to,
            limit: months.max(1),
            accounts: None,
        }
    }

    pub fn accounts(mut self, accounts: Option<Vec<String>>) -> Self {
        self.accounts = accounts.filter(|a| !a.is_empty());
        self
    }
}

/// One month of a history answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthTotal {
    pub month: MonthKey,
    pub total: Money,
}
