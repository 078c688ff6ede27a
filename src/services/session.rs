//! Explicit budget context
//!
//! Every month-scoped operation takes a `BudgetSession` instead of reading a
//! "selected month" from shared state.

use crate::models::MonthKey;

/// The month being viewed and the account allow-list applied to actuals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetSession {
    pub month: MonthKey,
    pub accounts: Option<Vec<String>>,
}

impl BudgetSession {
    pub fn new(month: MonthKey) -> Self {
        Self {
            month,
            accounts: None,
        }
    }

    /// Restrict actuals to these accounts; an empty list means all accounts
    pub fn with_accounts(mut self, accounts: Option<Vec<String>>) -> Self {
        self.accounts = accounts.filter(|a| !a.is_empty());
        self
    }

    pub fn account_filter(&self) -> Option<&[String]> {
        self.accounts.as_deref()
    }

    /// The same session moved to another month
    pub fn at(&self, month: MonthKey) -> Self {
        Self {
            month,
            accounts: self.accounts.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_account_list_is_unfiltered() {
        let session = BudgetSession::new("2025-01".parse().unwrap()).with_accounts(Some(vec![]));
        assert!(session.account_filter().is_none());
    }

    #[test]
    fn test_at_keeps_accounts() {
        let session = BudgetSession::new("2025-01".parse().unwrap())
            .with_accounts(Some(vec!["Checking".into()]));
        let next = session.at(session.month.next());
        assert_eq!(next.month.to_string(), "2025-02");
        assert_eq!(next.account_filter(), Some(&["Checking".to_string()][..]));
    }
}
