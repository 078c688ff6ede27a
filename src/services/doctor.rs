//! Budget health checks
//!
//! Flags expenses counted by more than one expense category, and expenses
//! no category picks up. Both read the month's categories and raw
//! transactions; nothing is written.

use serde::Serialize;
use tracing::debug;

use crate::error::MonthwiseResult;
use crate::models::{BudgetCategory, CategoryType, Money, MonthKey, Transaction};
use crate::query::{CategoryMatcher, TransactionQuery};
use crate::storage::Storage;

/// An expense matched by several expense categories
#[derive(Debug, Clone, Serialize)]
pub struct DoubleCount {
    pub transaction: Transaction,
    pub categories: Vec<String>,
}

/// Expenses no expense category matched
#[derive(Debug, Clone, Serialize)]
pub struct UncategorizedReport {
    pub transactions: Vec<Transaction>,
    pub uncategorized_count: usize,
    pub uncategorized_amount: Money,
    pub total_expense_count: usize,
    pub total_expense_amount: Money,
}

pub struct BudgetDoctor<'a, Q: TransactionQuery + ?Sized> {
    storage: &'a Storage,
    query: &'a Q,
}

impl<'a, Q: TransactionQuery + ?Sized> BudgetDoctor<'a, Q> {
    pub fn new(storage: &'a Storage, query: &'a Q) -> Self {
        Self { storage, query }
    }

    fn expense_matchers(&self, month: MonthKey) -> MonthwiseResult<Vec<(String, CategoryMatcher)>> {
        Ok(self
            .storage
            .categories
            .for_month(month)?
            .iter()
            .filter(|c| c.category_type == CategoryType::Expense)
            .map(|c: &BudgetCategory| (c.name.clone(), CategoryMatcher::for_category(c)))
            .collect())
    }

    /// Outflows in `month` matched by two or more expense categories
    pub fn double_counting(
        &self,
        month: MonthKey,
        accounts: Option<&[String]>,
    ) -> MonthwiseResult<Vec<DoubleCount>> {
        let matchers = self.expense_matchers(month)?;

        let findings: Vec<DoubleCount> = self
            .query
            .transactions(month, accounts)?
            .into_iter()
            .filter(Transaction::is_outflow)
            .filter_map(|txn| {
                let categories: Vec<String> = matchers
                    .iter()
                    .filter(|(_, m)| m.matches(&txn.tags, txn.amount))
                    .map(|(name, _)| name.clone())
                    .collect();
                (categories.len() > 1).then_some(DoubleCount {
                    transaction: txn,
                    categories,
                })
            })
            .collect();

        debug!(%month, findings = findings.len(), "checked double counting");
        Ok(findings)
    }

    /// Outflows in `month` no expense category matched, with totals
    pub fn uncategorized_expenses(
        &self,
        month: MonthKey,
        accounts: Option<&[String]>,
    ) -> MonthwiseResult<UncategorizedReport> {
        let matchers = self.expense_matchers(month)?;
        let expenses: Vec<Transaction> = self
            .query
            .transactions(month, accounts)?
            .into_iter()
            .filter(Transaction::is_outflow)
            .collect();

        let total_expense_count = expenses.len();
        let total_expense_amount = Money::sum_rounded(expenses.iter().map(|t| t.amount.abs()));

        let transactions: Vec<Transaction> = expenses
            .into_iter()
            .filter(|t| !matchers.iter().any(|(_, m)| m.matches(&t.tags, t.amount)))
            .collect();

        debug!(%month, uncategorized = transactions.len(), "checked uncategorized expenses");
        Ok(UncategorizedReport {
            uncategorized_count: transactions.len(),
            uncategorized_amount: Money::sum_rounded(transactions.iter().map(|t| t.amount.abs())),
            total_expense_count,
            total_expense_amount,
            transactions,
        })
    }
}
