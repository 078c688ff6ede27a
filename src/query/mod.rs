//! Read contract against the transaction store
//!
//! The budget ledger never owns transactions. It asks the store for summed
//! amounts through [`TransactionQuery`]; the JSON repository and the
//! in-memory store both answer with the evaluators in this module.

pub mod batch;
pub mod memory;
pub mod predicate;

use std::collections::BTreeMap;

pub use batch::{AggregateBatch, AggregateItem, AggregateRequest, AggregateRow, HistoryRequest, MonthTotal};
pub use memory::MemoryTransactions;
pub use predicate::{account_allowed, CategoryMatcher, SignFilter, TagPredicate};

use crate::error::MonthwiseResult;
use crate::models::{Money, MonthKey, Transaction};

/// Queries the budget ledger issues against the transaction store
pub trait TransactionQuery {
    /// Answer every item of a batch; one row per item, in request order
    fn aggregate(&self, request: &AggregateRequest) -> MonthwiseResult<Vec<AggregateRow>>;

    /// Monthly totals for one predicate, newest month first, at most `limit` rows
    fn history(&self, request: &HistoryRequest) -> MonthwiseResult<Vec<MonthTotal>>;

    /// Distinct account names, sorted
    fn account_names(&self) -> MonthwiseResult<Vec<String>>;

    /// Raw rows for a month, used by diagnostics
    fn transactions(
        &self,
        month: MonthKey,
        accounts: Option<&[String]>,
    ) -> MonthwiseResult<Vec<Transaction>>;
}

/// Evaluate a batch in one pass over `transactions`
pub fn evaluate_aggregate<'a, I>(transactions: I, request: &AggregateRequest) -> Vec<AggregateRow>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut sums = vec![Money::zero(); request.items.len()];
    let accounts = request.accounts.as_deref();

    for txn in transactions {
        if !request.month.contains(txn.date) || !account_allowed(accounts, &txn.account) {
            continue;
        }
        for (sum, item) in sums.iter_mut().zip(&request.items) {
            if item.matcher.matches(&txn.tags, txn.amount) {
                *sum += txn.amount.abs();
            }
        }
    }

    request
        .items
        .iter()
        .zip(sums)
        .map(|(item, total)| AggregateRow {
            label: item.label.clone(),
            total: total.round_cents(),
        })
        .collect()
}

/// Evaluate a history request: group by month, newest first, limited
pub fn evaluate_history<'a, I>(transactions: I, request: &HistoryRequest) -> Vec<MonthTotal>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let accounts = request.accounts.as_deref();
    let mut by_month: BTreeMap<MonthKey, Money> = BTreeMap::new();

    for txn in transactions {
        let month = MonthKey::from_date(txn.date);
        if month < request.from || month > request.to {
            continue;
        }
        if !account_allowed(accounts, &txn.account) {
            continue;
        }
        if request.matcher.matches(&txn.tags, txn.amount) {
            *by_month.entry(month).or_default() += txn.amount.abs();
        }
    }

    by_month
        .into_iter()
        .rev()
        .take(request.limit)
        .map(|(month, total)| MonthTotal {
            month,
            total: total.round_cents(),
        })
        .collect()
}

/// Distinct sorted account names
pub fn distinct_accounts<'a, I>(transactions: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut names: Vec<String> = transactions.into_iter().map(|t| t.account.clone()).collect();
    names.sort();
    names.dedup();
    names
}
