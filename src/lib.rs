//! Monthwise - month-by-month budgets over tagged transactions
//!
//! Each month owns its own set of budget categories. A category matches
//! transactions by tag and amount sign; matching amounts roll up into the
//! month's actuals. Surplus can be carried into the following month with
//! rollover transfers, and an empty month is bootstrapped from the nearest
//! month that has data.
//!
//! # Architecture
//!
//! - `config`: Path resolution and user settings
//! - `error`: The library error type
//! - `logging`: Tracing subscriber setup
//! - `models`: Months, money, categories, transfers, transactions
//! - `query`: The transaction store contract and its predicates
//! - `storage`: JSON file repositories
//! - `audit`: Append-only audit log of every mutation
//! - `services`: Category store, rollover ledger, actuals, trends, bootstrap
//! - `display` / `export`: Text tables and CSV/JSON/YAML exports
//! - `cli`: Command handlers for the `monthwise` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use monthwise::config::MonthwisePaths;
//! use monthwise::services::{ActualsComputer, BudgetSession, CategoryStore};
//! use monthwise::storage::Storage;
//!
//! let storage = Storage::new(MonthwisePaths::new()?)?;
//! storage.load_all()?;
//! let session = BudgetSession::new("2025-01".parse()?);
//! let categories = CategoryStore::new(&storage).load_categories(session.month)?;
//! let actuals = ActualsComputer::new(&storage.transactions)
//!     .compute_for_session(&session, &categories)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod query;
pub mod services;
pub mod storage;

pub use error::{MonthwiseError, MonthwiseResult};
