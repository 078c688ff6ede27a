//! Export module for Monthwise
//!
//! Exports one month's computed budget in three formats:
//! - CSV: actuals rows (spreadsheet-compatible)
//! - JSON: actuals, totals and rollovers with schema versioning
//! - YAML: the same document, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_actuals_csv;
pub use self::json::{export_month_json, MonthExport, EXPORT_SCHEMA_VERSION};
pub use self::yaml::export_month_yaml;

use std::str::FromStr;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    Yaml,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(format!("unknown export format '{}'", other)),
        }
    }
}
