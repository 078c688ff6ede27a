//! Service layer for Monthwise
//!
//! Business logic on top of the storage layer and the transaction query
//! contract: category and rollover persistence rules, derived actuals and
//! trends, month bootstrap and reset flows, and budget health checks.

pub mod actuals;
pub mod bootstrap;
pub mod category;
pub mod doctor;
pub mod journal;
pub mod rollover;
pub mod session;
pub mod trends;

pub use actuals::ActualsComputer;
pub use bootstrap::{
    nearest_month, BootstrapChoice, BootstrapState, MonthBootstrapper, ResetMode, ResetOutcome,
};
pub use category::{CategoryStore, RenameOutcome};
pub use doctor::{BudgetDoctor, DoubleCount, UncategorizedReport};
pub use journal::CompensationLog;
pub use rollover::{AllocationHint, RolloverLedger};
pub use session::BudgetSession;
pub use trends::{TrendComputer, DEFAULT_TREND_MONTHS};
