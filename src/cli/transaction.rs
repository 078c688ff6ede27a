//! Transaction CLI commands
//!
//! Maintains the local tagged-transaction store the budget reads from.

use chrono::{Local, NaiveDate};
use clap::Subcommand;
use tracing::info;

use crate::display::transaction::format_transaction_register;
use crate::error::{MonthwiseError, MonthwiseResult};
use crate::models::Transaction;
use crate::query::TransactionQuery;
use crate::services::BudgetSession;
use crate::storage::Storage;

use super::{collect_tags, parse_money};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Add a tagged transaction
    Add {
        /// Account name
        account: String,
        /// Amount (e.g., "-50.00" for outflow, "100.00" for inflow)
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Description
        #[arg(short = 'D', long)]
        description: Option<String>,
        /// Tag (repeat or comma-separate for several)
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },

    /// List the month's transactions
    List,

    /// List distinct account names
    Accounts,
}

fn parse_date(input: &str) -> MonthwiseResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        MonthwiseError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD format.", input))
    })
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    session: &BudgetSession,
    symbol: &str,
    cmd: TransactionCommands,
) -> MonthwiseResult<()> {
    let repo = &storage.transactions;

    match cmd {
        TransactionCommands::Add {
            account,
            amount,
            date,
            description,
            tags,
        } => {
            let date = match date {
                Some(d) => parse_date(&d)?,
                None => Local::now().date_naive(),
            };
            let mut txn = Transaction::new(account, date, parse_money(&amount)?)
                .with_tags(collect_tags(&tags));
            if let Some(description) = description {
                txn = txn.with_description(description);
            }

            repo.insert(txn.clone())?;
            repo.save()?;
            info!(id = %txn.id, account = %txn.account, "added transaction");

            println!("Added transaction {}", txn.id);
            println!("  Date:    {}", txn.date);
            println!("  Account: {}", txn.account);
            println!("  Amount:  {}", txn.amount.format_with_symbol(symbol));
            if !txn.tags.is_empty() {
                println!("  Tags:    {}", txn.tags.join(", "));
            }
        }

        TransactionCommands::List => {
            let txns = repo.transactions(session.month, session.account_filter())?;
            println!("Transactions for {}", session.month.label());
            println!();
            print!("{}", format_transaction_register(&txns, symbol));
        }

        TransactionCommands::Accounts => {
            let names = repo.account_names()?;
            if names.is_empty() {
                println!("No accounts yet.");
            }
            for name in names {
                println!("  {}", name);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-01-31").unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
        );
        assert!(parse_date("01/31/2025").unwrap_err().is_validation());
    }
}
