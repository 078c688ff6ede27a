//! Rollover transfer formatting

use std::collections::BTreeMap;

use crate::models::{Money, Transfer};
use crate::services::AllocationHint;

use super::{money, truncate};

/// Format transfers as `from -> to` rows with a rounded total
pub fn format_transfers(title: &str, transfers: &[Transfer], symbol: &str) -> String {
    let mut output = format!("{}\n", title);

    if transfers.is_empty() {
        output.push_str("  (none)\n");
        return output;
    }

    for transfer in transfers {
        let gap = if transfer.is_continuous() { "" } else { "  (non-adjacent month)" };
        output.push_str(&format!(
            "  {} {:<18} -> {} {:<18} {:>12}{}\n",
            transfer.source_month,
            truncate(&transfer.from_category, 18),
            transfer.to_month,
            truncate(&transfer.to_category, 18),
            money(transfer.amount, symbol),
            gap
        ));
    }

    let total = Money::sum_rounded(transfers.iter().map(|t| t.amount));
    output.push_str(&format!("  {:>70}\n", format!("Total {}", money(total, symbol))));
    output
}

/// Format an allocation hint
pub fn format_allocation(category: &str, hint: &AllocationHint, symbol: &str) -> String {
    let status = if hint.is_balanced() {
        "fully allocated".to_string()
    } else if hint.remaining.is_positive() {
        format!("{} remaining to allocate", money(hint.remaining, symbol))
    } else {
        format!("over-allocated by {}", money(hint.remaining.abs(), symbol))
    };

    format!(
        "{}: variance {}, allocated {} ({})\n",
        category,
        money(hint.source_variance, symbol),
        money(hint.allocated, symbol),
        status
    )
}

/// Format net rollover per category
pub fn format_net_by_category(net: &BTreeMap<String, Money>, symbol: &str) -> String {
    if net.is_empty() {
        return "No rollovers touch this month.\n".to_string();
    }

    net.iter()
        .map(|(name, amount)| format!("  {:<24} {:>12}\n", truncate(name, 24), money(*amount, symbol)))
        .collect()
}
