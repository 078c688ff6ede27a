//! Category display formatting

use crate::models::{AmountSign, BudgetCategory, CategoryType};

use super::{money, truncate};

fn sign_label(category: &BudgetCategory) -> String {
    let sign = match category.effective_sign() {
        AmountSign::Positive => "+",
        AmountSign::Negative => "-",
        AmountSign::Any => "±",
    };
    // Mark signs that differ from the type default
    if category.amount_sign.is_some()
        && category.amount_sign != Some(AmountSign::default_for(category.category_type))
    {
        format!("{}*", sign)
    } else {
        sign.to_string()
    }
}

fn tag_label(category: &BudgetCategory) -> String {
    if category.tags.is_empty() {
        return "(no tags)".to_string();
    }
    let joiner = if category.require_all { " & " } else { " | " };
    category.tags.join(joiner)
}

/// Format a month's categories grouped by type
pub fn format_category_list(categories: &[BudgetCategory], symbol: &str) -> String {
    if categories.is_empty() {
        return "No categories for this month.\n\nRun 'monthwise budget bootstrap' to set one up."
            .to_string();
    }

    let name_width = categories
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(8)
        .clamp(8, 24);

    let mut output = String::new();
    for category_type in [CategoryType::Income, CategoryType::Expense] {
        let rows: Vec<_> = categories
            .iter()
            .filter(|c| c.category_type == category_type)
            .collect();
        if rows.is_empty() {
            continue;
        }

        if !output.is_empty() {
            output.push('\n');
        }
        output.push_str(&format!(
            "{:<width$}  {:>12}  {:4}  {:<13}  {}\n",
            if category_type == CategoryType::Income { "Income" } else { "Expense" },
            "Expected",
            "Sign",
            "ID",
            "Tags",
            width = name_width
        ));
        output.push_str(&format!(
            "{:-<width$}  {:->12}  {:-<4}  {:-<13}  {:-<12}\n",
            "",
            "",
            "",
            "",
            "",
            width = name_width
        ));

        for category in rows {
            output.push_str(&format!(
                "{:<width$}  {:>12}  {:4}  {:<13}  {}\n",
                truncate(&category.name, name_width),
                money(category.expected, symbol),
                sign_label(category),
                category.id.short(),
                tag_label(category),
                width = name_width
            ));
        }
    }

    output
}
