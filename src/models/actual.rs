//! Derived actual-vs-expected figures
//!
//! Nothing here is persisted; actuals are recomputed from transactions
//! whenever a month is viewed.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::category::CategoryType;
use super::ids::CategoryId;
use super::money::Money;
use super::month::MonthKey;

/// Actual spend or income for one category in one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetActual {
    pub id: CategoryId,
    #[serde(rename = "type")]
    pub category_type: CategoryType,
    pub name: String,
    pub expected: Money,
    pub actual: Money,
    pub variance: Money,
    pub percent_used: i64,
}

impl BudgetActual {
    /// Build the derived row from an expected and an already-rounded actual
    pub fn new(
        id: CategoryId,
        category_type: CategoryType,
        name: impl Into<String>,
        expected: Money,
        actual: Money,
    ) -> Self {
        Self {
            id,
            category_type,
            name: name.into(),
            expected,
            actual,
            variance: variance(category_type, expected, actual),
            percent_used: percent_used(actual, expected),
        }
    }

    /// Spent more than expected (expense) or earned less (income)
    pub fn is_unfavorable(&self) -> bool {
        self.variance.is_negative()
    }
}

/// Income: actual - expected. Expense: expected - actual. Rounded to cents.
pub fn variance(category_type: CategoryType, expected: Money, actual: Money) -> Money {
    let raw = match category_type {
        CategoryType::Income => actual - expected,
        CategoryType::Expense => expected - actual,
    };
    raw.round_cents()
}

/// Percent of expected used, truncated toward zero.
///
/// With no expected amount, any activity counts as 100 and none as 0.
pub fn percent_used(actual: Money, expected: Money) -> i64 {
    if expected.is_positive() {
        let ratio = actual.amount() * Decimal::ONE_HUNDRED / expected.amount();
        ratio.trunc().to_i64().unwrap_or(i64::MAX)
    } else if actual.is_positive() {
        100
    } else {
        0
    }
}

/// One month of trend history for a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthActual {
    pub month: MonthKey,
    pub actual: Money,
}

/// Totals for one category type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeTotals {
    pub expected: Money,
    pub actual: Money,
    pub variance: Money,
}

/// Rolled-up totals for a month's actuals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetTotals {
    pub income: TypeTotals,
    pub expense: TypeTotals,
}

impl BudgetTotals {
    /// Sum the rows of each type, rounding each total once
    pub fn from_actuals(actuals: &[BudgetActual]) -> Self {
        let totals_for = |category_type: CategoryType| {
            let rows = || actuals.iter().filter(move |a| a.category_type == category_type);
            TypeTotals {
                expected: Money::sum_rounded(rows().map(|a| a.expected)),
                actual: Money::sum_rounded(rows().map(|a| a.actual)),
                variance: Money::sum_rounded(rows().map(|a| a.variance)),
            }
        };

        Self {
            income: totals_for(CategoryType::Income),
            expense: totals_for(CategoryType::Expense),
        }
    }

    /// Actual income minus actual expense
    pub fn net_actual(&self) -> Money {
        (self.income.actual - self.expense.actual).round_cents()
    }

    /// Expected income minus expected expense
    pub fn net_expected(&self) -> Money {
        (self.income.expected - self.expense.expected).round_cents()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_percent_used_truncates() {
        assert_eq!(
            percent_used(Money::new(dec!(299.999)), Money::new(dec!(300))),
            99
        );
        assert_eq!(percent_used(Money::new(dec!(320)), Money::new(dec!(300))), 106);
    }

    #[test]
    fn test_percent_used_without_expected() {
        assert_eq!(percent_used(Money::new(dec!(12)), Money::zero()), 100);
        assert_eq!(percent_used(Money::zero(), Money::zero()), 0);
    }

    #[test]
    fn test_variance_sign_convention() {
        let expected = Money::new(dec!(300));
        let actual = Money::new(dec!(320));
        assert_eq!(
            variance(CategoryType::Expense, expected, actual),
            Money::new(dec!(-20))
        );
        assert_eq!(
            variance(CategoryType::Income, expected, actual),
            Money::new(dec!(20))
        );
    }

    #[test]
    fn test_totals_round_after_summing() {
        let row = |t: CategoryType, expected: Decimal, actual: Decimal| {
            BudgetActual::new(CategoryId::new(), t, "x", Money::new(expected), Money::new(actual))
        };
        let actuals = vec![
            row(CategoryType::Income, dec!(5000), dec!(5100)),
            row(CategoryType::Expense, dec!(10.004), dec!(0)),
            row(CategoryType::Expense, dec!(10.004), dec!(0)),
        ];

        let totals = BudgetTotals::from_actuals(&actuals);
        assert_eq!(totals.income.actual, Money::new(dec!(5100)));
        assert_eq!(totals.expense.expected, Money::new(dec!(20.01)));
        assert_eq!(totals.net_actual(), Money::new(dec!(5100)));
    }
}
