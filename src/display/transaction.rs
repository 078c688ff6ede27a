//! Transaction and diagnostic formatting

use crate::models::Transaction;
use crate::services::{DoubleCount, UncategorizedReport};

use super::{money, truncate};

fn tag_summary(tags: &[String]) -> String {
    if tags.is_empty() {
        return "no tags".to_string();
    }
    let shown = tags.iter().take(3).cloned().collect::<Vec<_>>().join(", ");
    if tags.len() > 3 {
        format!("{}...", shown)
    } else {
        shown
    }
}

/// Format a single transaction row
pub fn format_transaction_row(txn: &Transaction, symbol: &str) -> String {
    format!(
        "{} {:<12} {:>12}  {:<28} {}",
        txn.date.format("%Y-%m-%d"),
        truncate(&txn.account, 12),
        money(txn.amount, symbol),
        truncate(&txn.description, 28),
        tag_summary(&txn.tags)
    )
}

/// Format a list of transactions as a register
pub fn format_transaction_register(transactions: &[Transaction], symbol: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = format!(
        "{:10} {:<12} {:>12}  {:<28} {}\n",
        "Date", "Account", "Amount", "Description", "Tags"
    );
    output.push_str(&"-".repeat(80));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn, symbol));
        output.push('\n');
    }

    output
}

/// Format double-counted expenses
pub fn format_double_counting(findings: &[DoubleCount], symbol: &str) -> String {
    if findings.is_empty() {
        return "✓ No expense is counted by more than one category\n".to_string();
    }

    let mut output = format!(
        "! {} expense(s) counted by more than one category\n",
        findings.len()
    );
    for finding in findings {
        let txn = &finding.transaction;
        output.push_str(&format!(
            "    {}  {}  {}  ({})\n",
            txn.date,
            money(txn.amount.abs(), symbol),
            truncate(&txn.description, 30),
            finding.categories.join(", ")
        ));
    }
    output
}

/// Format the uncategorized expense summary and rows
pub fn format_uncategorized(report: &UncategorizedReport, symbol: &str) -> String {
    if report.uncategorized_count == 0 {
        return "✓ Every expense matches a category\n".to_string();
    }

    let mut output = format!(
        "! {} of {} expenses uncategorized ({} of {})\n",
        report.uncategorized_count,
        report.total_expense_count,
        money(report.uncategorized_amount, symbol),
        money(report.total_expense_amount, symbol)
    );
    for txn in &report.transactions {
        output.push_str(&format!(
            "    {}  {}  {}  (tags: {})\n",
            txn.date,
            money(txn.amount.abs(), symbol),
            truncate(&txn.description, 30),
            tag_summary(&txn.tags)
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn sample() -> Transaction {
        Transaction::new(
            "Visa",
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            Money::new(dec!(-42.5)),
        )
        .with_description("Noodle bar")
        .with_tags(["dining", "lunch", "work", "team"])
    }

    #[test]
    fn test_register() {
        let output = format_transaction_register(&[sample()], "$");
        assert!(output.contains("2025-01-15"));
        assert!(output.contains("-$42.50"));
        assert!(output.contains("dining, lunch, work..."));
        assert!(format_transaction_register(&[], "$").contains("No transactions"));
    }

    #[test]
    fn test_uncategorized_summary() {
        let report = UncategorizedReport {
            transactions: vec![sample()],
            uncategorized_count: 1,
            uncategorized_amount: Money::new(dec!(42.5)),
            total_expense_count: 4,
            total_expense_amount: Money::new(dec!(100)),
        };
        let output = format_uncategorized(&report, "$");
        assert!(output.contains("1 of 4 expenses uncategorized ($42.50 of $100.00)"));
    }
}
