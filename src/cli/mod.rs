//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod budget;
pub mod category;
pub mod export;
pub mod rollover;
pub mod transaction;

pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use export::{handle_export_command, handle_doctor_command, ExportArgs};
pub use rollover::{handle_rollover_command, RolloverCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use crate::error::{MonthwiseError, MonthwiseResult};
use crate::models::{BudgetCategory, CategoryId, Money, MonthKey};
use crate::services::CategoryStore;

/// Find a category of `month` by name (case-insensitive), short id or full id
pub fn find_category(
    store: &CategoryStore<'_>,
    month: MonthKey,
    ident: &str,
) -> MonthwiseResult<BudgetCategory> {
    let ident = ident.trim();
    let parsed: Option<CategoryId> = ident.parse().ok();

    store
        .load_categories(month)?
        .into_iter()
        .find(|c| {
            Some(c.id) == parsed || c.id.short() == ident || c.name.eq_ignore_ascii_case(ident)
        })
        .ok_or_else(|| MonthwiseError::category_not_found(format!("{} in {}", ident, month)))
}

/// Parse a user-entered amount
pub fn parse_money(input: &str) -> MonthwiseResult<Money> {
    Money::parse(input).map_err(|e| MonthwiseError::Validation(e.to_string()))
}

/// Split repeated and comma-separated tag arguments into one list
pub fn collect_tags(raw: &[String]) -> Vec<String> {
    raw.iter()
        .flat_map(|t| t.split(','))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}
