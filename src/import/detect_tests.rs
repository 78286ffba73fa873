#![allow(clippy::unwrap_used)]

use super::*;

fn h(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn row(cells: &[&str]) -> Vec<String> {
    h(cells)
}

// ── Cash book ─────────────────────────────────────────────────

#[test]
fn test_detect_cash_english_headers() {
    let headers = h(&[
        "Date",
        "AccountCode",
        "Category",
        "Description",
        "ReceiptAmount",
        "DisbursementAmount",
    ]);
    let map = detect_columns(SheetKind::Cash, &headers).unwrap();
    let r = row(&["2024-01-05", "4.1.1.01", "Dana Desa", "Transfer", "1000000", ""]);
    assert_eq!(map.kind, SheetKind::Cash);
    assert_eq!(map.cell(&r, DATE), "2024-01-05");
    assert_eq!(map.cell(&r, CODE), "4.1.1.01");
    assert_eq!(map.cell(&r, RECEIPT), "1000000");
    assert_eq!(map.cell(&r, DISBURSEMENT), "");
    assert_eq!(map.cell(&r, BALANCE), "");
}

#[test]
fn test_detect_cash_indonesian_headers_any_order() {
    let headers = h(&["Uraian", "Tanggal", "Pengeluaran", "Penerimaan", "Kode"]);
    let map = detect_columns(SheetKind::Cash, &headers).unwrap();
    let r = row(&["Beli ATK", "05/01/2024", "250.000", "", "5.1.2.01"]);
    assert_eq!(map.cell(&r, DESCRIPTION), "Beli ATK");
    assert_eq!(map.cell(&r, DATE), "05/01/2024");
    assert_eq!(map.cell(&r, DISBURSEMENT), "250.000");
    assert_eq!(map.cell(&r, CODE), "5.1.2.01");
    assert_eq!(map.cell(&r, CATEGORY), "");
}

#[test]
fn test_detect_headers_case_and_spacing_insensitive() {
    let headers = h(&["\u{feff}DATE", "account_code", " description ", "Receipt Amount"]);
    let map = detect_columns(SheetKind::Cash, &headers).unwrap();
    let r = row(&["2024-01-05", "1.1", "x", "5"]);
    assert_eq!(map.cell(&r, DATE), "2024-01-05");
    assert_eq!(map.cell(&r, CODE), "1.1");
    assert_eq!(map.cell(&r, RECEIPT), "5");
}

#[test]
fn test_detect_cash_missing_required_column() {
    let headers = h(&["Date", "AccountCode", "ReceiptAmount"]);
    let err = detect_columns(SheetKind::Cash, &headers).unwrap_err();
    let LedgerError::ImportParse {
        imported,
        skipped,
        ref reason,
    } = err
    else {
        unreachable!("expected ImportParse, got {err:?}");
    };
    assert_eq!(imported, 0);
    assert_eq!(skipped, 0);
    assert!(reason.contains("BKU"));
    assert!(reason.contains("Description"));
}

#[test]
fn test_cell_short_row_is_empty() {
    let headers = h(&["Date", "Description", "ReceiptAmount"]);
    let map = detect_columns(SheetKind::Cash, &headers).unwrap();
    let r = row(&["2024-01-05", "  Sewa  "]);
    assert_eq!(map.cell(&r, DESCRIPTION), "Sewa");
    assert_eq!(map.cell(&r, RECEIPT), "");
}

// ── Auxiliary book ────────────────────────────────────────────

#[test]
fn test_detect_auxiliary_headers() {
    let headers = h(&["Tanggal", "No. Bukti", "Kategori", "Uraian", "Debet", "Kredit", "Saldo"]);
    let map = detect_columns(SheetKind::Auxiliary, &headers).unwrap();
    let r = row(&["2024-01-05", "KW-0001", "Dana", "Terima", "500", "", "500"]);
    assert_eq!(map.cell(&r, VOUCHER), "KW-0001");
    assert_eq!(map.cell(&r, DEBIT), "500");
    assert_eq!(map.cell(&r, BALANCE), "500");
}

// ── Budget ────────────────────────────────────────────────────

#[test]
fn test_detect_budget_headers() {
    let headers = h(&["Kode", "Uraian", "Jumlah", "Jenis"]);
    let map = detect_columns(SheetKind::Budget, &headers).unwrap();
    let r = row(&["5.1.2.01", "ATK", "500000", "operasional"]);
    assert_eq!(map.cell(&r, LABEL), "ATK");
    assert_eq!(map.cell(&r, AMOUNT), "500000");
    assert_eq!(map.cell(&r, CLASSIFICATION), "operasional");
}

#[test]
fn test_detect_budget_requires_classification() {
    let headers = h(&["Kode", "Label", "Amount"]);
    let err = detect_columns(SheetKind::Budget, &headers).unwrap_err();
    assert!(err.to_string().contains("Classification"));
}

// ── Export headers ────────────────────────────────────────────

#[test]
fn test_export_headers_round_trip_through_detection() {
    for kind in [SheetKind::Cash, SheetKind::Auxiliary, SheetKind::Budget] {
        let headers: Vec<String> = export_headers(kind).iter().map(|s| s.to_string()).collect();
        assert!(detect_columns(kind, &headers).is_ok(), "{}", kind.as_str());
    }
}

#[test]
fn test_export_headers_cash_order() {
    assert_eq!(
        export_headers(SheetKind::Cash),
        vec![
            "Date",
            "AccountCode",
            "Category",
            "Description",
            "ReceiptAmount",
            "DisbursementAmount",
            "Balance"
        ]
    );
}
