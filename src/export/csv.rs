//! CSV export of actuals rows

use std::io::Write;

use crate::error::{MonthwiseError, MonthwiseResult};
use crate::models::{BudgetActual, MonthKey};

/// Write one row per category: month, type, name, expected, actual,
/// variance, percent used. Amounts are plain decimals with two places.
pub fn export_actuals_csv<W: Write>(
    month: MonthKey,
    actuals: &[BudgetActual],
    writer: W,
) -> MonthwiseResult<()> {
    let mut csv_writer = ::csv::Writer::from_writer(writer);

    csv_writer
        .write_record([
            "Month",
            "Type",
            "Category",
            "Expected",
            "Actual",
            "Variance",
            "Percent Used",
            "ID",
        ])
        .map_err(|e| MonthwiseError::Export(e.to_string()))?;

    for row in actuals {
        let record = vec![
            month.to_string(),
            row.category_type.label().to_string(),
            row.name.clone(),
            format!("{:.2}", row.expected.amount()),
            format!("{:.2}", row.actual.amount()),
            format!("{:.2}", row.variance.amount()),
            row.percent_used.to_string(),
            row.id.to_string(),
        ];
        csv_writer
            .write_record(&record)
            .map_err(|e| MonthwiseError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| MonthwiseError::Export(e.to_string()))
}
