//! Budget CLI commands
//!
//! Implements CLI commands for viewing a month's budget, its trends and
//! setting up or resetting a month.

use clap::{ArgGroup, Subcommand};

use crate::config::settings::Settings;
use crate::display::budget::{format_actuals, format_months, format_trends};
use crate::error::{MonthwiseError, MonthwiseResult};
use crate::models::{BudgetTotals, MonthKey};
use crate::services::{
    ActualsComputer, BootstrapChoice, BootstrapState, BudgetSession, CategoryStore,
    MonthBootstrapper, ResetMode, TrendComputer,
};
use crate::storage::Storage;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Show expected vs actual for every category of the month
    Show,

    /// Show actuals of the most recent calendar months for the month's categories
    Trends {
        /// Number of months to include (defaults to the configured value)
        #[arg(short = 'n', long)]
        months: Option<u32>,
    },

    /// List months that have categories
    Months,

    /// Set up an empty month, copying from the nearest month or starting fresh
    #[command(group(ArgGroup::new("choice").args(["copy", "fresh"])))]
    Bootstrap {
        /// Copy categories from the nearest month with data
        #[arg(long)]
        copy: bool,
        /// Leave the month empty
        #[arg(long)]
        fresh: bool,
    },

    /// Replace the month's categories and drop its outgoing rollovers
    #[command(group(ArgGroup::new("mode").required(true).args(["from", "clear"])))]
    Reset {
        /// Month to clone categories from (YYYY-MM)
        #[arg(long)]
        from: Option<MonthKey>,
        /// Remove every category instead
        #[arg(long)]
        clear: bool,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    session: &BudgetSession,
    cmd: BudgetCommands,
) -> MonthwiseResult<()> {
    let symbol = settings.currency_symbol.as_str();
    let bootstrapper =
        MonthBootstrapper::new(storage).with_auto_apply(settings.auto_apply_default_template);

    match cmd {
        BudgetCommands::Show => {
            let state = recover(&bootstrapper, bootstrapper.evaluate(session))?;
            print_state_notice(session.month, &state);

            let categories = state.categories();
            let actuals =
                ActualsComputer::new(&storage.transactions).compute_for_session(session, categories)?;
            let totals = BudgetTotals::from_actuals(&actuals);
            print!("{}", format_actuals(session.month, &actuals, &totals, symbol));
        }

        BudgetCommands::Trends { months } => {
            let months = months.unwrap_or(settings.trend_months) as usize;
            let categories = CategoryStore::new(storage).load_categories(session.month)?;
            let trends = TrendComputer::new(&storage.transactions).compute_trends(
                &categories,
                months,
                session.account_filter(),
            )?;
            println!("Trends for the last {} months", months);
            println!();
            print!("{}", format_trends(&categories, &trends, symbol));
        }

        BudgetCommands::Months => {
            let months = CategoryStore::new(storage).get_months_with_data()?;
            print!("{}", format_months(&months, session.month));
        }

        BudgetCommands::Bootstrap { copy, fresh } => {
            let result = if copy {
                bootstrapper.resolve(session, BootstrapChoice::Copy)
            } else if fresh {
                bootstrapper.resolve(session, BootstrapChoice::StartFresh)
            } else {
                bootstrapper.evaluate(session)
            };
            let state = recover(&bootstrapper, result)?;

            match &state {
                BootstrapState::Ready { categories } => {
                    println!("{} has {} categories.", session.month, categories.len());
                }
                BootstrapState::Fresh if fresh => {
                    println!("Starting {} with no categories.", session.month);
                }
                _ => print_state_notice(session.month, &state),
            }
        }

        BudgetCommands::Reset { from, clear } => {
            let mode = match from {
                Some(source) if !clear => ResetMode::CloneFrom(source),
                _ => ResetMode::Clear,
            };
            let outcome = recover(&bootstrapper, bootstrapper.reset_budget(session, mode))?;

            match mode {
                ResetMode::CloneFrom(source) => println!(
                    "Reset {} from {}: {} categories",
                    session.month,
                    source,
                    outcome.categories.len()
                ),
                ResetMode::Clear => println!("Cleared every category of {}", session.month),
            }
            if outcome.removed_transfers > 0 {
                println!("Removed {} outgoing rollover(s).", outcome.removed_transfers);
            }
        }
    }

    Ok(())
}

fn print_state_notice(month: MonthKey, state: &BootstrapState) {
    match state {
        BootstrapState::Ready { .. } => {}
        BootstrapState::NoData { applied } => {
            println!(
                "No budget data found; applied the default template ({} categories) to {}.",
                applied.len(),
                month
            );
            println!();
        }
        BootstrapState::CopyPending { source } => {
            println!("{} has no categories. The nearest month with data is {}.", month, source);
            println!("Run 'monthwise budget bootstrap --copy' to copy it, or '--fresh' to start empty.");
            println!();
        }
        BootstrapState::Fresh => {
            println!("{} has no categories.", month);
            println!();
        }
    }
}

/// On a partial write, restore the month before surfacing the error
fn recover<T>(
    bootstrapper: &MonthBootstrapper<'_>,
    result: MonthwiseResult<T>,
) -> MonthwiseResult<T> {
    let err = match result {
        Err(err @ MonthwiseError::PartialWrite { .. }) => err,
        other => return other,
    };

    match bootstrapper.repair() {
        Ok(true) => eprintln!("The month was restored to its state before the failed step."),
        Ok(false) => {}
        Err(repair_err) => eprintln!("Repair failed, the month may be incomplete: {}", repair_err),
    }
    Err(err)
}
