mod apply;
mod csv_import;
mod detect;
mod export;

pub use apply::{stage_replace, ImportSummary, StagedReplace};
pub use csv_import::{parse_amount, parse_sheet, CsvImporter, ParsedSheet, RawSheet, RowError, Sheet};
pub use detect::{detect_columns, ColumnMap, SheetKind};
pub use export::{export_auxiliary, export_budget, export_cash, export_path};

use anyhow::Result;
use std::path::Path;

use crate::config::LedgerConfig;

/// Read and parse one CSV file as `kind`.
pub fn read_sheet(path: &Path, kind: SheetKind, config: &LedgerConfig) -> Result<Sheet> {
    let raw = CsvImporter::read_path(path)?;
    Ok(parse_sheet(kind, &raw, config)?)
}
