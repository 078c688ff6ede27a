//! Display formatting for terminal output
//!
//! Plain-text tables for categories, actuals, trends, transfers and
//! diagnostics. Amounts are rendered with the configured currency symbol.

pub mod budget;
pub mod category;
pub mod rollover;
pub mod transaction;

pub use budget::{format_actuals, format_months, format_trends};
pub use category::format_category_list;
pub use rollover::{format_allocation, format_net_by_category, format_transfers};
pub use transaction::{format_double_counting, format_transaction_register, format_uncategorized};

use crate::models::Money;

/// Truncate to `max_len` characters, ending in "..." when cut
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

/// Simple horizontal bar; values above `max_value` fill the bar
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub(crate) fn money(amount: Money, symbol: &str) -> String {
    amount.format_with_symbol(symbol)
}
