//! Rollover CLI commands
//!
//! Implements CLI commands for the transfers that carry a month's surplus
//! into the next month.

use std::collections::BTreeMap;

use clap::Subcommand;

use crate::display::rollover::{format_allocation, format_net_by_category, format_transfers};
use crate::error::{MonthwiseError, MonthwiseResult};
use crate::models::{MonthKey, Transfer};
use crate::services::{ActualsComputer, BudgetSession, CategoryStore, RolloverLedger};
use crate::storage::Storage;

use super::{find_category, parse_money};

/// Rollover subcommands
#[derive(Subcommand)]
pub enum RolloverCommands {
    /// Show transfers leaving and entering the month
    List,

    /// Replace the month's outgoing transfers
    Set {
        /// Transfer as FROM:TO:AMOUNT (repeat for several)
        #[arg(long = "transfer", required = true)]
        transfers: Vec<String>,
        /// Destination month (defaults to the following month)
        #[arg(long)]
        to: Option<MonthKey>,
    },

    /// Delete the month's outgoing transfers
    Clear,

    /// List incoming transfers whose category no longer exists
    Orphans,
}

/// Split a `FROM:TO:AMOUNT` argument
fn parse_transfer_arg(raw: &str) -> MonthwiseResult<(String, String, String)> {
    let invalid = || {
        MonthwiseError::Validation(format!(
            "Invalid transfer '{}': expected FROM:TO:AMOUNT",
            raw
        ))
    };

    let (names, amount) = raw.rsplit_once(':').ok_or_else(invalid)?;
    let (from, to) = names.split_once(':').ok_or_else(invalid)?;
    if from.trim().is_empty() || to.trim().is_empty() || amount.trim().is_empty() {
        return Err(invalid());
    }
    Ok((from.trim().to_string(), to.trim().to_string(), amount.trim().to_string()))
}

/// Handle a rollover command
pub fn handle_rollover_command(
    storage: &Storage,
    session: &BudgetSession,
    symbol: &str,
    cmd: RolloverCommands,
) -> MonthwiseResult<()> {
    let ledger = RolloverLedger::new(storage);
    let month = session.month;

    match cmd {
        RolloverCommands::List => {
            let outgoing = ledger.load_outgoing(month)?;
            let incoming = ledger.load_incoming(month)?;
            print!(
                "{}",
                format_transfers(&format!("Out of {}", month), &outgoing, symbol)
            );
            println!();
            print!("{}", format_transfers(&format!("Into {}", month), &incoming, symbol));
            println!();
            println!("Net by category");
            print!("{}", format_net_by_category(&ledger.net_by_category(month)?, symbol));
        }

        RolloverCommands::Set { transfers, to } => {
            let store = CategoryStore::new(storage);
            let mut drafts = Vec::with_capacity(transfers.len());
            for raw in &transfers {
                let (from, to_name, amount) = parse_transfer_arg(raw)?;
                let source = find_category(&store, month, &from)?;
                drafts.push(Transfer::new(month, source.name, to_name, parse_money(&amount)?));
            }

            let to_month = to.unwrap_or_else(|| month.next());
            let saved = ledger.save_month_rollovers(month, to_month, drafts)?;
            println!("Saved {} transfer(s) from {} to {}", saved.len(), month, to_month);

            let categories = store.load_categories(month)?;
            let actuals =
                ActualsComputer::new(&storage.transactions).compute_for_session(session, &categories)?;
            let mut by_source: BTreeMap<&str, Vec<Transfer>> = BTreeMap::new();
            for transfer in &saved {
                by_source
                    .entry(transfer.from_category.as_str())
                    .or_default()
                    .push(transfer.clone());
            }
            for (name, group) in by_source {
                if let Some(actual) = actuals.iter().find(|a| a.name == name) {
                    let hint = RolloverLedger::allocation(actual.variance, &group);
                    print!("{}", format_allocation(name, &hint, symbol));
                }
            }
        }

        RolloverCommands::Clear => {
            let removed = ledger.delete_month_rollovers(month)?;
            println!("Removed {} outgoing transfer(s) from {}", removed, month);
        }

        RolloverCommands::Orphans => {
            let orphans = ledger.orphaned_incoming(month)?;
            if orphans.is_empty() {
                println!("Every incoming transfer into {} has a matching category.", month);
            } else {
                print!(
                    "{}",
                    format_transfers(
                        &format!("Incoming transfers into {} with no matching category", month),
                        &orphans,
                        symbol
                    )
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_transfer_arg() {
        let (from, to, amount) = parse_transfer_arg("Dining : Entertainment:12.50").unwrap();
        assert_eq!(from, "Dining");
        assert_eq!(to, "Entertainment");
        assert_eq!(amount, "12.50");

        assert!(parse_transfer_arg("Dining:12.50").unwrap_err().is_validation());
        assert!(parse_transfer_arg("Dining::12.50").is_err());
    }
}
