//! Trend computer
//!
//! Recent monthly actuals per category, always anchored at the real current
//! month rather than the month being viewed.

use std::collections::HashMap;

use tracing::debug;

use crate::error::MonthwiseResult;
use crate::models::{BudgetCategory, CategoryId, MonthActual, MonthKey};
use crate::query::{CategoryMatcher, HistoryRequest, TransactionQuery};

/// Default number of months of history
pub const DEFAULT_TREND_MONTHS: usize = 6;

pub struct TrendComputer<'a, Q: TransactionQuery + ?Sized> {
    query: &'a Q,
}

impl<'a, Q: TransactionQuery + ?Sized> TrendComputer<'a, Q> {
    pub fn new(query: &'a Q) -> Self {
        Self { query }
    }

    /// Up to `months` recent months of actuals per category, oldest first.
    ///
    /// Months with no matching transactions are absent from a series.
    pub fn compute_trends(
        &self,
        categories: &[BudgetCategory],
        months: usize,
        accounts: Option<&[String]>,
    ) -> MonthwiseResult<HashMap<CategoryId, Vec<MonthActual>>> {
        self.compute_trends_as_of(MonthKey::current(), categories, months, accounts)
    }

    /// `compute_trends` with an explicit current month
    pub fn compute_trends_as_of(
        &self,
        current: MonthKey,
        categories: &[BudgetCategory],
        months: usize,
        accounts: Option<&[String]>,
    ) -> MonthwiseResult<HashMap<CategoryId, Vec<MonthActual>>> {
        debug!(%current, months, categories = categories.len(), "computing trends");

        let mut trends = HashMap::with_capacity(categories.len());
        for category in categories {
            let matcher = CategoryMatcher::for_category(category);
            let request = HistoryRequest::ending_at(matcher, current, months)
                .accounts(accounts.map(|a| a.to_vec()));

            // Store returns newest first
            let mut series: Vec<MonthActual> = self
                .query
                .history(&request)?
                .into_iter()
                .map(|row| MonthActual {
                    month: row.month,
                    actual: row.total.round_cents(),
                })
                .collect();
            series.sort_by_key(|point| point.month);

            trends.insert(category.id, series);
        }

        Ok(trends)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryType, Money, Transaction};
    use crate::query::MemoryTransactions;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn month(s: &str) -> MonthKey {
        s.parse().unwrap()
    }

    fn txn(y: i32, m: u32, amount: rust_decimal::Decimal) -> Transaction {
        Transaction::new(
            "Visa",
            NaiveDate::from_ymd_opt(y, m, 10).unwrap(),
            Money::new(amount),
        )
        .with_tags(["dining"])
    }

    fn dining(m: MonthKey) -> BudgetCategory {
        BudgetCategory::new(m, CategoryType::Expense, "Dining").with_tags(["dining"])
    }

    #[test]
    fn test_series_is_oldest_first_and_limited() {
        let store = MemoryTransactions::new(
            (1..=9)
                .map(|m| txn(2025, m, rust_decimal::Decimal::from(-10 * m as i64)))
                .collect(),
        );
        let category = dining(month("2025-09"));

        let trends = TrendComputer::new(&store)
            .compute_trends_as_of(month("2025-09"), &[category.clone()], 6, None)
            .unwrap();

        let series = &trends[&category.id];
        let months: Vec<String> = series.iter().map(|p| p.month.to_string()).collect();
        assert_eq!(
            months,
            vec!["2025-04", "2025-05", "2025-06", "2025-07", "2025-08", "2025-09"]
        );
        assert_eq!(series[0].actual, Money::new(dec!(40)));
        assert_eq!(series[5].actual, Money::new(dec!(90)));
    }

    #[test]
    fn test_anchored_at_current_not_category_month() {
        let store = MemoryTransactions::new(vec![txn(2024, 1, dec!(-5)), txn(2025, 3, dec!(-7))]);
        // Category belongs to an old month; history still ends at "now"
        let category = dining(month("2024-01"));

        let trends = TrendComputer::new(&store)
            .compute_trends_as_of(month("2025-03"), &[category.clone()], 6, None)
            .unwrap();

        let series = &trends[&category.id];
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].month, month("2025-03"));
    }

    #[test]
    fn test_category_without_history_has_empty_series() {
        let store = MemoryTransactions::default();
        let category = dining(month("2025-01"));

        let trends = TrendComputer::new(&store)
            .compute_trends(&[category.clone()], DEFAULT_TREND_MONTHS, None)
            .unwrap();
        assert!(trends[&category.id].is_empty());
    }
}
