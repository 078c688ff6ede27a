//! JSON export of a month's budget
//!
//! The document carries a schema version so later readers can check
//! compatibility.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{MonthwiseError, MonthwiseResult};
use crate::models::{BudgetActual, BudgetTotals, MonthKey, Transfer};
use crate::query::TransactionQuery;
use crate::services::{ActualsComputer, BudgetSession, CategoryStore, RolloverLedger};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// One month's computed budget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    pub app_version: String,
    pub month: MonthKey,
    /// Account allow-list the actuals were computed with; absent means all
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accounts: Option<Vec<String>>,
    pub actuals: Vec<BudgetActual>,
    pub totals: BudgetTotals,
    pub rollovers_out: Vec<Transfer>,
    pub rollovers_in: Vec<Transfer>,
}

impl MonthExport {
    /// Compute the session month's actuals and gather its rollovers
    pub fn build<Q: TransactionQuery + ?Sized>(
        storage: &Storage,
        query: &Q,
        session: &BudgetSession,
    ) -> MonthwiseResult<Self> {
        let categories = CategoryStore::new(storage).load_categories(session.month)?;
        let actuals = ActualsComputer::new(query).compute_for_session(session, &categories)?;
        let ledger = RolloverLedger::new(storage);

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            month: session.month,
            accounts: session.accounts.clone(),
            totals: BudgetTotals::from_actuals(&actuals),
            actuals,
            rollovers_out: ledger.load_outgoing(session.month)?,
            rollovers_in: ledger.load_incoming(session.month)?,
        })
    }
}

/// Write the export as pretty JSON
pub fn export_month_json<W: Write>(export: &MonthExport, writer: &mut W) -> MonthwiseResult<()> {
    serde_json::to_writer_pretty(&mut *writer, export)
        .map_err(|e| MonthwiseError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| MonthwiseError::Export(e.to_string()))
}
