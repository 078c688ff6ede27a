//! Tag-match predicates and sign filters
//!
//! A category counts a transaction when its tag predicate matches the
//! transaction's tags and the amount passes the category's sign filter.

use serde::{Deserialize, Serialize};

use crate::models::{AmountSign, BudgetCategory, Money};

/// All-of / any-of rule over a tag set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagPredicate {
    pub tags: Vec<String>,
    pub require_all: bool,
}

impl TagPredicate {
    pub fn any_of<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
            require_all: false,
        }
    }

    pub fn all_of<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
            require_all: true,
        }
    }

    /// Whether a transaction carrying `tx_tags` satisfies the predicate.
    ///
    /// Comparison ignores case. An empty predicate matches nothing.
    pub fn matches<S: AsRef<str>>(&self, tx_tags: &[S]) -> bool {
        if self.tags.is_empty() {
            return false;
        }

        let has = |tag: &String| {
            tx_tags
                .iter()
                .any(|t| t.as_ref().eq_ignore_ascii_case(tag))
        };

        if self.require_all {
            self.tags.iter().all(has)
        } else {
            self.tags.iter().any(has)
        }
    }
}

/// Filter on the sign of a transaction amount
pub trait SignFilter {
    fn admits(&self, amount: Money) -> bool;
}

impl SignFilter for AmountSign {
    fn admits(&self, amount: Money) -> bool {
        match self {
            AmountSign::Positive => amount.is_positive(),
            AmountSign::Negative => amount.is_negative(),
            AmountSign::Any => true,
        }
    }
}

/// A category's complete match rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMatcher {
    pub predicate: TagPredicate,
    pub sign: AmountSign,
}

impl CategoryMatcher {
    pub fn new(predicate: TagPredicate, sign: AmountSign) -> Self {
        Self { predicate, sign }
    }

    /// The rule a category applies, with its sign defaulted by type
    pub fn for_category(category: &BudgetCategory) -> Self {
        Self {
            predicate: TagPredicate {
                tags: category.tags.clone(),
                require_all: category.require_all,
            },
            sign: category.effective_sign(),
        }
    }

    pub fn matches<S: AsRef<str>>(&self, tags: &[S], amount: Money) -> bool {
        self.sign.admits(amount) && self.predicate.matches(tags)
    }
}

/// Whether `account` passes an optional allow-list
pub fn account_allowed(allow_list: Option<&[String]>, account: &str) -> bool {
    match allow_list {
        Some(list) if !list.is_empty() => list.iter().any(|a| a == account),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryType, MonthKey};

    #[test]
    fn test_any_of() {
        let predicate = TagPredicate::any_of(["dining", "coffee"]);
        assert!(predicate.matches(&["coffee"]));
        assert!(predicate.matches(&["DINING", "friday"]));
        assert!(!predicate.matches(&["groceries"]));
        assert!(!predicate.matches::<&str>(&[]));
    }

    #[test]
    fn test_all_of() {
        let predicate = TagPredicate::all_of(["travel", "dining"]);
        assert!(predicate.matches(&["dining", "travel", "italy"]));
        assert!(!predicate.matches(&["dining"]));
    }

    #[test]
    fn test_empty_predicate_matches_nothing() {
        let predicate = TagPredicate::all_of(Vec::<String>::new());
        assert!(!predicate.matches(&["anything"]));
    }

    #[test]
    fn test_sign_filter() {
        assert!(AmountSign::Negative.admits(Money::from_cents(-100)));
        assert!(!AmountSign::Negative.admits(Money::from_cents(100)));
        assert!(AmountSign::Positive.admits(Money::from_cents(100)));
        assert!(!AmountSign::Positive.admits(Money::zero()));
        assert!(AmountSign::Any.admits(Money::from_cents(-1)));
    }

    #[test]
    fn test_matcher_for_category_uses_type_default_sign() {
        let month: MonthKey = "2025-01".parse().unwrap();
        let category =
            BudgetCategory::new(month, CategoryType::Expense, "Dining").with_tags(["dining"]);
        let matcher = CategoryMatcher::for_category(&category);

        assert!(matcher.matches(&["dining"], Money::from_cents(-4200)));
        // Refund is positive; expense default sign excludes it
        assert!(!matcher.matches(&["dining"], Money::from_cents(4200)));
    }

    #[test]
    fn test_account_allowed() {
        let list = vec!["Checking".to_string()];
        assert!(account_allowed(Some(list.as_slice()), "Checking"));
        assert!(!account_allowed(Some(list.as_slice()), "Visa"));
        assert!(account_allowed(None, "Visa"));
        assert!(account_allowed(Some(&[][..]), "Visa"));
    }
}
