use crate::error::{LedgerError, Result};

/// Which book a spreadsheet holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetKind {
    Cash,
    Auxiliary,
    Budget,
}

impl SheetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "BKU",
            Self::Auxiliary => "BKP",
            Self::Budget => "Anggaran",
        }
    }
}

/// A logical column and the header names it answers to, English first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Field {
    pub(crate) names: &'static [&'static str],
    pub(crate) required: bool,
}

pub(crate) const DATE: Field = Field { names: &["Date", "Tanggal"], required: true };
pub(crate) const DESCRIPTION: Field = Field { names: &["Description", "Uraian", "Keterangan"], required: true };
pub(crate) const CODE: Field = Field { names: &["AccountCode", "Kode", "Kode Rekening"], required: false };
pub(crate) const CATEGORY: Field = Field { names: &["Category", "Kategori"], required: false };
pub(crate) const RECEIPT: Field = Field { names: &["ReceiptAmount", "Penerimaan"], required: false };
pub(crate) const DISBURSEMENT: Field = Field { names: &["DisbursementAmount", "Pengeluaran"], required: false };
pub(crate) const VOUCHER: Field = Field { names: &["Voucher", "Bukti", "No. Bukti"], required: false };
pub(crate) const DEBIT: Field = Field { names: &["Debit", "Debet"], required: false };
pub(crate) const CREDIT: Field = Field { names: &["Credit", "Kredit"], required: false };
pub(crate) const BALANCE: Field = Field { names: &["Balance", "Saldo"], required: false };
pub(crate) const LABEL: Field = Field { names: &["Label", "Uraian", "Nama"], required: true };
pub(crate) const AMOUNT: Field = Field { names: &["Amount", "Jumlah", "Anggaran"], required: true };
pub(crate) const CLASSIFICATION: Field = Field { names: &["Classification", "Jenis", "Klasifikasi"], required: true };

/// Column order written on export and expected by default.
pub(crate) fn fields(kind: SheetKind) -> &'static [Field] {
    match kind {
        SheetKind::Cash => &[DATE, CODE, CATEGORY, DESCRIPTION, RECEIPT, DISBURSEMENT, BALANCE],
        SheetKind::Auxiliary => &[DATE, VOUCHER, CATEGORY, DESCRIPTION, DEBIT, CREDIT, BALANCE],
        SheetKind::Budget => &[CODE, LABEL, AMOUNT, CLASSIFICATION],
    }
}

/// Header row used when exporting.
pub(crate) fn export_headers(kind: SheetKind) -> Vec<&'static str> {
    fields(kind).iter().map(|f| f.names[0]).collect()
}

/// Resolved positions of each logical column within one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub kind: SheetKind,
    positions: Vec<Option<usize>>,
}

impl ColumnMap {
    fn position(&self, field: Field) -> Option<usize> {
        fields(self.kind)
            .iter()
            .position(|f| *f == field)
            .and_then(|i| self.positions.get(i).copied().flatten())
    }

    pub(crate) fn cell<'r>(&self, row: &'r [String], field: Field) -> &'r str {
        self.position(field)
            .and_then(|i| row.get(i))
            .map(|s| s.trim())
            .unwrap_or("")
    }
}

/// Locate every column of `kind` by header name, case-insensitively.
/// A missing required column rejects the whole file.
pub fn detect_columns(kind: SheetKind, headers: &[String]) -> Result<ColumnMap> {
    let h: Vec<String> = headers.iter().map(|s| normalize(s)).collect();

    let mut positions = Vec::new();
    let mut missing = Vec::new();
    for field in fields(kind) {
        let found = field.names.iter().find_map(|name| col_index(&h, name));
        if found.is_none() && field.required {
            missing.push(field.names[0]);
        }
        positions.push(found);
    }

    if !missing.is_empty() {
        return Err(LedgerError::ImportParse {
            imported: 0,
            skipped: 0,
            reason: format!(
                "{} sheet is missing column(s): {}",
                kind.as_str(),
                missing.join(", ")
            ),
        });
    }
    Ok(ColumnMap { kind, positions })
}

fn normalize(header: &str) -> String {
    header
        .trim()
        .trim_start_matches('\u{feff}')
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .collect()
}

fn col_index(headers: &[String], name: &str) -> Option<usize> {
    let name = normalize(name);
    headers.iter().position(|h| *h == name)
}

#[cfg(test)]
#[path = "detect_tests.rs"]
mod tests;
