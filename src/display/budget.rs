//! Budget actuals and trend formatting

use std::collections::HashMap;

use crate::models::{BudgetActual, BudgetCategory, BudgetTotals, CategoryId, MonthActual, MonthKey};

use super::{format_bar, money, truncate};

const NAME_WIDTH: usize = 20;

/// Format actual-vs-expected rows with per-type totals
pub fn format_actuals(
    month: MonthKey,
    actuals: &[BudgetActual],
    totals: &BudgetTotals,
    symbol: &str,
) -> String {
    let mut output = format!("Budget for {}\n\n", month.label());

    if actuals.is_empty() {
        output.push_str("No categories for this month.\n");
        return output;
    }

    output.push_str(&format!(
        "{:<w$}  {:>12}  {:>12}  {:>12}  {:>6}\n",
        "Category",
        "Expected",
        "Actual",
        "Variance",
        "Used",
        w = NAME_WIDTH
    ));
    output.push_str(&"-".repeat(NAME_WIDTH + 50));
    output.push('\n');

    let mut current_type = None;
    for row in actuals {
        if current_type != Some(row.category_type) {
            current_type = Some(row.category_type);
            output.push_str(&format!("[{}]\n", row.category_type));
        }
        let flag = if row.is_unfavorable() { " !" } else { "" };
        output.push_str(&format!(
            "{:<w$}  {:>12}  {:>12}  {:>12}  {:>5}%{}\n",
            truncate(&row.name, NAME_WIDTH),
            money(row.expected, symbol),
            money(row.actual, symbol),
            money(row.variance, symbol),
            row.percent_used,
            flag,
            w = NAME_WIDTH
        ));
    }

    output.push_str(&"-".repeat(NAME_WIDTH + 50));
    output.push('\n');
    for (label, t) in [("Total income", &totals.income), ("Total expense", &totals.expense)] {
        output.push_str(&format!(
            "{:<w$}  {:>12}  {:>12}  {:>12}\n",
            label,
            money(t.expected, symbol),
            money(t.actual, symbol),
            money(t.variance, symbol),
            w = NAME_WIDTH
        ));
    }
    output.push_str(&format!(
        "{:<w$}  {:>12}  {:>12}\n",
        "Net",
        money(totals.net_expected(), symbol),
        money(totals.net_actual(), symbol),
        w = NAME_WIDTH
    ));

    output
}

/// Format per-category trend series with bars scaled to each category's peak
pub fn format_trends(
    categories: &[BudgetCategory],
    trends: &HashMap<CategoryId, Vec<MonthActual>>,
    symbol: &str,
) -> String {
    if categories.is_empty() {
        return "No categories to chart.\n".to_string();
    }

    let mut output = String::new();
    for category in categories {
        output.push_str(&format!("{} ({})\n", category.name, category.category_type));

        let series = trends.get(&category.id).map(Vec::as_slice).unwrap_or(&[]);
        if series.is_empty() {
            output.push_str("  no activity\n\n");
            continue;
        }

        let peak = series
            .iter()
            .map(|p| p.actual.to_f64())
            .fold(0.0_f64, f64::max);
        for point in series {
            output.push_str(&format!(
                "  {}  {:>12}  {}\n",
                point.month,
                money(point.actual, symbol),
                format_bar(point.actual.to_f64(), peak, 20)
            ));
        }
        output.push('\n');
    }

    output
}

/// Format the list of months that have categories
pub fn format_months(months: &[MonthKey], current: MonthKey) -> String {
    if months.is_empty() {
        return "No months have budget data yet.\n".to_string();
    }

    let mut output = String::new();
    for month in months {
        let marker = if *month == current { "  <- current" } else { "" };
        output.push_str(&format!("{}  {}{}\n", month, month.label(), marker));
    }
    output
}
