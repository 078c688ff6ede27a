//! CLI commands for data export and diagnostics

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Args;

use crate::display::transaction::{format_double_counting, format_uncategorized};
use crate::error::{MonthwiseError, MonthwiseResult};
use crate::export::{
    export_actuals_csv, export_month_json, export_month_yaml, ExportFormat, MonthExport,
};
use crate::services::{BudgetDoctor, BudgetSession};
use crate::storage::Storage;

/// Arguments of `monthwise export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Export format: csv, json or yaml
    #[arg(short, long, default_value = "json")]
    pub format: ExportFormat,

    /// Output file path (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Export the session month's budget
pub fn handle_export_command(
    storage: &Storage,
    session: &BudgetSession,
    args: ExportArgs,
) -> MonthwiseResult<()> {
    let export = MonthExport::build(storage, &storage.transactions, session)?;

    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                MonthwiseError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };

    match args.format {
        ExportFormat::Csv => export_actuals_csv(export.month, &export.actuals, &mut writer)?,
        ExportFormat::Json => export_month_json(&export, &mut writer)?,
        ExportFormat::Yaml => export_month_yaml(&export, &mut writer)?,
    }
    writer
        .flush()
        .map_err(|e| MonthwiseError::Export(e.to_string()))?;

    if let Some(path) = &args.output {
        println!(
            "Exported {} categories for {} to: {}",
            export.actuals.len(),
            export.month,
            path.display()
        );
    }

    Ok(())
}

/// Run the budget health checks for the session month
pub fn handle_doctor_command(
    storage: &Storage,
    session: &BudgetSession,
    symbol: &str,
) -> MonthwiseResult<()> {
    let doctor = BudgetDoctor::new(storage, &storage.transactions);
    let accounts = session.account_filter();

    println!("Budget checks for {}", session.month.label());
    println!();
    let findings = doctor.double_counting(session.month, accounts)?;
    print!("{}", format_double_counting(&findings, symbol));
    let report = doctor.uncategorized_expenses(session.month, accounts)?;
    print!("{}", format_uncategorized(&report, symbol));

    Ok(())
}
