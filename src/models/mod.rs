//! Core data models for Monthwise
//!
//! Month-scoped budget categories, rollover transfers between months, the
//! derived actuals, and the transaction read model they are computed from.

pub mod actual;
pub mod category;
pub mod ids;
pub mod money;
pub mod month;
pub mod transaction;
pub mod transfer;

pub use actual::{percent_used, variance, BudgetActual, BudgetTotals, MonthActual, TypeTotals};
pub use category::{default_template, AmountSign, BudgetCategory, CategoryType};
pub use ids::{CategoryId, TransactionId, TransferId};
pub use money::Money;
pub use month::MonthKey;
pub use transaction::Transaction;
pub use transfer::Transfer;
