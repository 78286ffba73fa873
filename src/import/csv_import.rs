use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use rust_decimal::Decimal;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;
use tracing::debug;

use super::detect::{
    detect_columns, ColumnMap, SheetKind, AMOUNT, CATEGORY, CLASSIFICATION, CODE, CREDIT, DATE,
    DEBIT, DESCRIPTION, DISBURSEMENT, LABEL, RECEIPT, VOUCHER,
};
use crate::config::LedgerConfig;
use crate::format::MONTHS_SHORT;
use crate::models::{BudgetItem, Classification, NewAuxiliaryEntry, NewCashEntry};

/// Voucher number given to auxiliary rows imported without one.
pub(crate) const IMPORTED_VOUCHER: &str = "Imported";

/// A spreadsheet as read from disk: header row plus data rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub struct CsvImporter;

impl CsvImporter {
    pub fn read_path(path: &Path) -> Result<RawSheet> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;
        Self::read(file)
    }

    /// The first record is the header row. Rows may be ragged.
    pub fn read<R: Read>(reader: R) -> Result<RawSheet> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(false)
            .from_reader(reader);

        let mut all_rows: Vec<Vec<String>> = Vec::new();
        for result in rdr.records() {
            let record = result.context("Failed to read CSV record")?;
            all_rows.push(record.iter().map(|s| s.to_string()).collect());
        }

        if all_rows.is_empty() {
            anyhow::bail!("CSV file is empty");
        }
        let headers = all_rows.remove(0);
        Ok(RawSheet {
            headers,
            rows: all_rows,
        })
    }
}

/// A data row that could not become an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    /// 1-based line in the file, header included.
    pub line: usize,
    pub reason: String,
}

impl std::fmt::Display for RowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.reason)
    }
}

/// Rows of one book that parsed, plus what was left out.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSheet<T> {
    pub rows: Vec<T>,
    /// Rows without a date or description.
    pub blank: usize,
    pub errors: Vec<RowError>,
}

impl<T> ParsedSheet<T> {
    fn new() -> Self {
        Self {
            rows: Vec::new(),
            blank: 0,
            errors: Vec::new(),
        }
    }

    pub fn skipped(&self) -> usize {
        self.blank + self.errors.len()
    }
}

/// A parsed spreadsheet for one of the three books.
#[derive(Debug, Clone, PartialEq)]
pub enum Sheet {
    Cash(ParsedSheet<NewCashEntry>),
    Auxiliary(ParsedSheet<NewAuxiliaryEntry>),
    Budget(ParsedSheet<BudgetItem>),
}

impl Sheet {
    pub fn kind(&self) -> SheetKind {
        match self {
            Self::Cash(_) => SheetKind::Cash,
            Self::Auxiliary(_) => SheetKind::Auxiliary,
            Self::Budget(_) => SheetKind::Budget,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Cash(s) => s.rows.len(),
            Self::Auxiliary(s) => s.rows.len(),
            Self::Budget(s) => s.rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn blank(&self) -> usize {
        match self {
            Self::Cash(s) => s.blank,
            Self::Auxiliary(s) => s.blank,
            Self::Budget(s) => s.blank,
        }
    }

    pub fn errors(&self) -> &[RowError] {
        match self {
            Self::Cash(s) => &s.errors,
            Self::Auxiliary(s) => &s.errors,
            Self::Budget(s) => &s.errors,
        }
    }
}

/// Parse a raw sheet as `kind`. Only a missing required column fails the
/// call; bad rows are collected in the result.
pub fn parse_sheet(
    kind: SheetKind,
    raw: &RawSheet,
    config: &LedgerConfig,
) -> crate::error::Result<Sheet> {
    let map = detect_columns(kind, &raw.headers)?;
    let default_code = config.default_account_code.as_str();
    let sheet = match kind {
        SheetKind::Cash => Sheet::Cash(parse_rows(raw, |row| cash_row(&map, row, default_code))),
        SheetKind::Auxiliary => Sheet::Auxiliary(parse_rows(raw, |row| auxiliary_row(&map, row))),
        SheetKind::Budget => Sheet::Budget(parse_rows(raw, |row| budget_row(&map, row, default_code))),
    };
    debug!(
        kind = kind.as_str(),
        rows = sheet.len(),
        blank = sheet.blank(),
        malformed = sheet.errors().len(),
        "sheet parsed"
    );
    Ok(sheet)
}

/// `Ok(None)` marks a row without its identifying fields.
type RowResult<T> = std::result::Result<Option<T>, String>;

fn parse_rows<T>(raw: &RawSheet, mut parse: impl FnMut(&[String]) -> RowResult<T>) -> ParsedSheet<T> {
    let mut sheet = ParsedSheet::new();
    for (i, row) in raw.rows.iter().enumerate() {
        if row.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        match parse(row.as_slice()) {
            Ok(Some(entry)) => sheet.rows.push(entry),
            Ok(None) => sheet.blank += 1,
            Err(reason) => sheet.errors.push(RowError { line: i + 2, reason }),
        }
    }
    sheet
}

fn cash_row(map: &ColumnMap, row: &[String], default_code: &str) -> RowResult<NewCashEntry> {
    let date = map.cell(row, DATE);
    let description = map.cell(row, DESCRIPTION);
    if date.is_empty() || description.is_empty() {
        return Ok(None);
    }
    Ok(Some(NewCashEntry {
        date: parse_date(date)?,
        account_code: or_default(map.cell(row, CODE), default_code),
        category: map.cell(row, CATEGORY).to_string(),
        description: description.to_string(),
        receipt_amount: parse_amount(map.cell(row, RECEIPT))?,
        disbursement_amount: parse_amount(map.cell(row, DISBURSEMENT))?,
    }))
}

fn auxiliary_row(map: &ColumnMap, row: &[String]) -> RowResult<NewAuxiliaryEntry> {
    let date = map.cell(row, DATE);
    let description = map.cell(row, DESCRIPTION);
    if date.is_empty() || description.is_empty() {
        return Ok(None);
    }
    Ok(Some(NewAuxiliaryEntry {
        date: parse_date(date)?,
        voucher_number: or_default(map.cell(row, VOUCHER), IMPORTED_VOUCHER),
        category: map.cell(row, CATEGORY).to_string(),
        description: description.to_string(),
        debit_amount: parse_amount(map.cell(row, DEBIT))?,
        credit_amount: parse_amount(map.cell(row, CREDIT))?,
    }))
}

fn budget_row(map: &ColumnMap, row: &[String], default_code: &str) -> RowResult<BudgetItem> {
    let label = map.cell(row, LABEL);
    if label.is_empty() {
        return Ok(None);
    }
    let amount = parse_amount(map.cell(row, AMOUNT))?;
    let raw_class = map.cell(row, CLASSIFICATION);
    let classification = Classification::parse(raw_class)
        .ok_or_else(|| format!("unknown classification '{raw_class}'"))?;
    Ok(Some(BudgetItem::new(
        or_default(map.cell(row, CODE), default_code),
        label,
        amount,
        classification,
    )))
}

fn or_default(value: &str, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

// ── Field parsing ─────────────────────────────────────────────

static SPELLED_DATE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})\s+([A-Za-z]{3,})\.?\s+(\d{4})$").ok());

/// `1.250.000`, `1.250.000,50` or a decimal comma as in `1250,5`
static DOT_GROUPED: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\d{1,3}(\.\d{3})+(,\d+)?$|^\d+,\d+$").ok());

/// `1,250,000` or `1,250,000.50`
static COMMA_GROUPED: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\d{1,3}(,\d{3})+(\.\d+)?$").ok());

fn matches(re: &LazyLock<Option<Regex>>, s: &str) -> bool {
    re.as_ref().is_some_and(|re| re.is_match(s))
}

/// Accepts ISO dates and date-times, `05/01/2024` (day first),
/// `2024/01/05`, `05-01-2024` and `05 Jan 2024`.
pub(crate) fn parse_date(s: &str) -> std::result::Result<NaiveDate, String> {
    let s = s.trim();
    for fmt in &["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d", "%d-%m-%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    let no_zone = s.trim_end_matches('Z');
    for fmt in &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(no_zone, fmt) {
            return Ok(dt.date());
        }
    }
    if let Some(caps) = SPELLED_DATE.as_ref().and_then(|re| re.captures(s)) {
        let month = month_number(&caps[2]);
        let day = caps[1].parse::<u32>().ok();
        let year = caps[3].parse::<i32>().ok();
        if let (Some(m), Some(d), Some(y)) = (month, day, year) {
            if let Some(date) = NaiveDate::from_ymd_opt(y, m, d) {
                return Ok(date);
            }
        }
    }
    Err(format!("could not parse date '{s}'"))
}

/// Indonesian or English month name, matched on its first three letters.
fn month_number(name: &str) -> Option<u32> {
    let prefix: String = name.chars().take(3).collect::<String>().to_lowercase();
    MONTHS_SHORT
        .iter()
        .position(|m| m.to_lowercase() == prefix)
        .or(match prefix.as_str() {
            "may" => Some(4),
            "aug" => Some(7),
            "oct" => Some(9),
            "dec" => Some(11),
            _ => None,
        })
        .map(|i| i as u32 + 1)
}

/// Parse a non-negative rupiah amount. Strips `Rp`, whitespace and
/// thousands separators; blank (or the `-` placeholder) means zero.
/// A single separator followed by exactly three digits groups thousands
/// whether it is a dot or a comma, so `1,250` and `1.250` are both 1250.
pub fn parse_amount(raw: &str) -> std::result::Result<Decimal, String> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let (negative, rest) = match compact.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, compact.as_str()),
    };
    let rest = strip_currency(rest);
    if rest.is_empty() {
        return Ok(Decimal::ZERO);
    }

    let plain = if matches(&COMMA_GROUPED, rest) {
        rest.replace(',', "")
    } else if matches(&DOT_GROUPED, rest) {
        rest.replace('.', "").replace(',', ".")
    } else {
        rest.to_string()
    };
    let value = Decimal::from_str(&plain).map_err(|_| format!("'{}' is not an amount", raw.trim()))?;
    if negative && !value.is_zero() {
        return Err(format!("negative amount '{}'", raw.trim()));
    }
    Ok(value)
}

fn strip_currency(s: &str) -> &str {
    let without = match s.get(..2) {
        Some(p) if p.eq_ignore_ascii_case("rp") => &s[2..],
        _ => s,
    };
    without.trim_start_matches('.')
}

#[cfg(test)]
#[path = "csv_import_tests.rs"]
mod tests;
