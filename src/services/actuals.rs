//! Actuals computer
//!
//! Derives actual, variance and percent-used for a month's categories from
//! one batched aggregate request against the transaction store.

use std::collections::HashMap;

use tracing::debug;

use crate::error::MonthwiseResult;
use crate::models::{BudgetActual, BudgetCategory, BudgetTotals, Money, MonthKey};
use crate::query::{AggregateBatch, TagPredicate, TransactionQuery};

use super::session::BudgetSession;

/// Computes per-category actuals over any transaction store
pub struct ActualsComputer<'a, Q: TransactionQuery + ?Sized> {
    query: &'a Q,
}

impl<'a, Q: TransactionQuery + ?Sized> ActualsComputer<'a, Q> {
    pub fn new(query: &'a Q) -> Self {
        Self { query }
    }

    /// One row per category, in the order given.
    ///
    /// Every category becomes one `(predicate, sign, label)` item of a single
    /// batch; the label is the category id.
    pub fn compute_actuals(
        &self,
        month: MonthKey,
        categories: &[BudgetCategory],
        accounts: Option<&[String]>,
    ) -> MonthwiseResult<Vec<BudgetActual>> {
        if categories.is_empty() {
            return Ok(Vec::new());
        }

        let mut batch = AggregateBatch::new(month).accounts(accounts.map(|a| a.to_vec()));
        for category in categories {
            batch.push(
                TagPredicate {
                    tags: category.tags.clone(),
                    require_all: category.require_all,
                },
                category.effective_sign(),
                category.id.to_string(),
            );
        }
        debug!(%month, predicates = batch.len(), "computing actuals");

        let request = batch.build()?;
        let totals: HashMap<String, Money> = self
            .query
            .aggregate(&request)?
            .into_iter()
            .map(|row| (row.label, row.total))
            .collect();

        Ok(categories
            .iter()
            .map(|category| {
                let actual = totals
                    .get(&category.id.to_string())
                    .copied()
                    .unwrap_or_default()
                    .round_cents();
                BudgetActual::new(
                    category.id,
                    category.category_type,
                    category.name.clone(),
                    category.expected.round_cents(),
                    actual,
                )
            })
            .collect())
    }

    /// `compute_actuals` for the session's month and account filter
    pub fn compute_for_session(
        &self,
        session: &BudgetSession,
        categories: &[BudgetCategory],
    ) -> MonthwiseResult<Vec<BudgetActual>> {
        self.compute_actuals(session.month, categories, session.account_filter())
    }

    /// Per-type totals of computed rows
    pub fn totals(actuals: &[BudgetActual]) -> BudgetTotals {
        BudgetTotals::from_actuals(actuals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MonthwiseError;
    use crate::models::{AmountSign, CategoryType, Transaction};
    use crate::query::{
        AggregateRequest, AggregateRow, HistoryRequest, MemoryTransactions, MonthTotal,
    };
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::cell::Cell;

    fn month(s: &str) -> MonthKey {
        s.parse().unwrap()
    }

    fn txn(account: &str, day: u32, amount: rust_decimal::Decimal, tags: &[&str]) -> Transaction {
        Transaction::new(
            account,
            NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
            Money::new(amount),
        )
        .with_tags(tags.iter().copied())
    }

    fn dining(m: MonthKey) -> BudgetCategory {
        BudgetCategory::new(m, CategoryType::Expense, "Dining")
            .with_expected(Money::new(dec!(300)))
            .with_tags(["dining"])
    }

    #[test]
    fn test_dining_over_budget() {
        let jan = month("2025-01");
        let store = MemoryTransactions::new(vec![
            txn("Visa", 3, dec!(-120), &["dining"]),
            txn("Visa", 11, dec!(-200), &["dining", "date-night"]),
            // A refund is positive and ignored by the negative default sign
            txn("Visa", 12, dec!(15), &["dining"]),
        ]);

        let categories = vec![dining(jan)];
        let actuals = ActualsComputer::new(&store)
            .compute_actuals(jan, &categories, None)
            .unwrap();

        assert_eq!(actuals.len(), 1);
        let row = &actuals[0];
        assert_eq!(row.actual, Money::new(dec!(320)));
        assert_eq!(row.variance, Money::new(dec!(-20)));
        assert_eq!(row.percent_used, 106);
    }

    #[test]
    fn test_income_variance_sign_and_require_all() {
        let jan = month("2025-01");
        let store = MemoryTransactions::new(vec![
            txn("Checking", 1, dec!(2500), &["salary"]),
            txn("Checking", 15, dec!(2600), &["salary", "bonus"]),
            txn("Checking", 20, dec!(-40), &["travel"]),
            txn("Checking", 21, dec!(-60), &["travel", "vacation"]),
        ]);

        let salary = BudgetCategory::new(jan, CategoryType::Income, "Salary")
            .with_expected(Money::new(dec!(5000)))
            .with_tags(["salary"]);
        let vacation = BudgetCategory::new(jan, CategoryType::Expense, "Vacation")
            .with_expected(Money::new(dec!(100)))
            .with_tags(["travel", "vacation"])
            .with_require_all(true);

        let actuals = ActualsComputer::new(&store)
            .compute_actuals(jan, &[salary, vacation], None)
            .unwrap();

        assert_eq!(actuals[0].actual, Money::new(dec!(5100)));
        assert_eq!(actuals[0].variance, Money::new(dec!(100)));
        assert_eq!(actuals[0].percent_used, 102);

        assert_eq!(actuals[1].actual, Money::new(dec!(60)));
        assert_eq!(actuals[1].variance, Money::new(dec!(40)));
        assert_eq!(actuals[1].percent_used, 60);
    }

    #[test]
    fn test_account_filter_and_any_sign() {
        let jan = month("2025-01");
        let store = MemoryTransactions::new(vec![
            txn("Visa", 2, dec!(-30), &["shopping"]),
            txn("Amex", 3, dec!(-70), &["shopping"]),
            txn("Visa", 4, dec!(10), &["shopping"]),
        ]);
        let shopping = BudgetCategory::new(jan, CategoryType::Expense, "Shopping")
            .with_expected(Money::new(dec!(50)))
            .with_tags(["shopping"])
            .with_amount_sign(AmountSign::Any);

        let visa = vec!["Visa".to_string()];
        let actuals = ActualsComputer::new(&store)
            .compute_actuals(jan, &[shopping], Some(visa.as_slice()))
            .unwrap();

        assert_eq!(actuals[0].actual, Money::new(dec!(40)));
    }

    #[test]
    fn test_zero_expected_percent() {
        let jan = month("2025-01");
        let store = MemoryTransactions::new(vec![txn("Visa", 2, dec!(-5), &["fees"])]);
        let fees = BudgetCategory::new(jan, CategoryType::Expense, "Fees").with_tags(["fees"]);
        let idle = BudgetCategory::new(jan, CategoryType::Expense, "Idle").with_tags(["idle"]);

        let actuals = ActualsComputer::new(&store)
            .compute_actuals(jan, &[fees, idle], None)
            .unwrap();

        assert_eq!(actuals[0].percent_used, 100);
        assert_eq!(actuals[1].percent_used, 0);
        assert_eq!(actuals[1].actual, Money::zero());
    }

    #[test]
    fn test_totals_by_type() {
        let jan = month("2025-01");
        let store = MemoryTransactions::new(vec![
            txn("Checking", 1, dec!(1000), &["salary"]),
            txn("Checking", 2, dec!(-320), &["dining"]),
        ]);
        let salary = BudgetCategory::new(jan, CategoryType::Income, "Salary")
            .with_expected(Money::new(dec!(1200)))
            .with_tags(["salary"]);

        let actuals = ActualsComputer::new(&store)
            .compute_actuals(jan, &[salary, dining(jan)], None)
            .unwrap();
        let totals = ActualsComputer::<MemoryTransactions>::totals(&actuals);

        assert_eq!(totals.income.actual, Money::new(dec!(1000)));
        assert_eq!(totals.expense.actual, Money::new(dec!(320)));
        assert_eq!(totals.expense.variance, Money::new(dec!(-20)));
        assert_eq!(totals.net_actual(), Money::new(dec!(680)));
    }

    /// Counts aggregate calls to check batching
    struct CountingStore {
        inner: MemoryTransactions,
        calls: Cell<usize>,
    }

    impl TransactionQuery for CountingStore {
        fn aggregate(&self, request: &AggregateRequest) -> MonthwiseResult<Vec<AggregateRow>> {
            self.calls.set(self.calls.get() + 1);
            self.inner.aggregate(request)
        }

        fn history(&self, request: &HistoryRequest) -> MonthwiseResult<Vec<MonthTotal>> {
            self.inner.history(request)
        }

        fn account_names(&self) -> MonthwiseResult<Vec<String>> {
            self.inner.account_names()
        }

        fn transactions(
            &self,
            month: MonthKey,
            accounts: Option<&[String]>,
        ) -> MonthwiseResult<Vec<Transaction>> {
            self.inner.transactions(month, accounts)
        }
    }

    #[test]
    fn test_all_categories_in_one_request() {
        let jan = month("2025-01");
        let store = CountingStore {
            inner: MemoryTransactions::default(),
            calls: Cell::new(0),
        };
        let categories: Vec<_> = crate::models::default_template(jan);

        let actuals = ActualsComputer::new(&store)
            .compute_actuals(jan, &categories, None)
            .unwrap();

        assert_eq!(actuals.len(), categories.len());
        assert_eq!(store.calls.get(), 1);
    }

    struct FailingStore;

    impl TransactionQuery for FailingStore {
        fn aggregate(&self, _: &AggregateRequest) -> MonthwiseResult<Vec<AggregateRow>> {
            Err(MonthwiseError::Query("store unavailable".into()))
        }

        fn history(&self, _: &HistoryRequest) -> MonthwiseResult<Vec<MonthTotal>> {
            Err(MonthwiseError::Query("store unavailable".into()))
        }

        fn account_names(&self) -> MonthwiseResult<Vec<String>> {
            Ok(Vec::new())
        }

        fn transactions(
            &self,
            _: MonthKey,
            _: Option<&[String]>,
        ) -> MonthwiseResult<Vec<Transaction>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_store_errors_propagate() {
        let jan = month("2025-01");
        let err = ActualsComputer::new(&FailingStore)
            .compute_actuals(jan, &[dining(jan)], None)
            .unwrap_err();
        assert!(matches!(err, MonthwiseError::Query(_)));
    }
}
