//! YAML export of a month's budget

use std::io::Write;

use crate::error::{MonthwiseError, MonthwiseResult};

use super::json::MonthExport;

/// Write the export as YAML with a short comment header
pub fn export_month_yaml<W: Write>(export: &MonthExport, writer: &mut W) -> MonthwiseResult<()> {
    let header = format!(
        "# Monthwise budget export for {}\n# Generated: {}\n# App Version: {}\n\n",
        export.month, export.exported_at, export.app_version
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| MonthwiseError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, export).map_err(|e| MonthwiseError::Export(e.to_string()))
}
