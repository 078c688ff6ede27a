//! Category CLI commands
//!
//! Implements CLI commands for the categories of a single month.

use clap::Subcommand;

use crate::display::category::format_category_list;
use crate::error::MonthwiseResult;
use crate::models::{AmountSign, BudgetCategory, CategoryType, MonthKey};
use crate::services::{BudgetSession, CategoryStore};
use crate::storage::Storage;

use super::{collect_tags, find_category, parse_money};

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List the month's categories
    List,

    /// Add a category at the end of its type group
    Add {
        /// Category name
        name: String,
        /// Category type: income or expense
        #[arg(short = 't', long = "type", default_value = "expense")]
        category_type: CategoryType,
        /// Expected amount for the month (e.g., "300" or "300.00")
        #[arg(short, long)]
        expected: Option<String>,
        /// Tag to match (repeat or comma-separate for several)
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Require every tag instead of any
        #[arg(long)]
        all: bool,
        /// Amount sign to match: positive, negative or any
        #[arg(long)]
        sign: Option<AmountSign>,
    },

    /// Delete a category
    Delete {
        /// Category name or ID
        category: String,
    },

    /// Rename a category
    Rename {
        /// Category name or ID
        category: String,
        /// New name
        new_name: String,
    },

    /// Replace the month's categories with a copy of another month's
    Copy {
        /// Month to copy from (YYYY-MM)
        #[arg(short, long)]
        from: MonthKey,
    },
}

/// Handle a category command
pub fn handle_category_command(
    storage: &Storage,
    session: &BudgetSession,
    symbol: &str,
    cmd: CategoryCommands,
) -> MonthwiseResult<()> {
    let store = CategoryStore::new(storage);
    let month = session.month;

    match cmd {
        CategoryCommands::List => {
            let categories = store.load_categories(month)?;
            println!("Categories for {}", month.label());
            println!();
            print!("{}", format_category_list(&categories, symbol));
        }

        CategoryCommands::Add {
            name,
            category_type,
            expected,
            tags,
            all,
            sign,
        } => {
            let mut draft = BudgetCategory::new(month, category_type, name)
                .with_tags(collect_tags(&tags))
                .with_require_all(all);
            if let Some(expected) = expected {
                draft = draft.with_expected(parse_money(&expected)?);
            }
            if let Some(sign) = sign {
                draft = draft.with_amount_sign(sign);
            }

            let category = store.add_category(month, draft)?;
            println!("Added {} category: {}", category.category_type, category.name);
            println!("  Month:    {}", category.month);
            println!("  Expected: {}", category.expected.format_with_symbol(symbol));
            println!("  Tags:     {}", category.tags.join(", "));
            println!("  ID:       {}", category.id);
        }

        CategoryCommands::Delete { category } => {
            let found = find_category(&store, month, &category)?;
            if store.delete_category(found.id)? {
                println!("Deleted category: {}", found.name);
            } else {
                println!("Category '{}' was already gone.", found.name);
            }
        }

        CategoryCommands::Rename { category, new_name } => {
            let found = find_category(&store, month, &category)?;
            let outcome = store.rename_category(found.id, &new_name)?;
            println!("Renamed '{}' to '{}'", found.name, outcome.category.name);
            if outcome.stale_transfers > 0 {
                println!(
                    "Note: {} rollover transfer(s) still refer to '{}'.",
                    outcome.stale_transfers, found.name
                );
            }
        }

        CategoryCommands::Copy { from } => {
            let copied = store.copy_from_month(from, month)?;
            println!("Copied {} categories from {} to {}", copied.len(), from, month);
        }
    }

    Ok(())
}
