#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use kasdesa::commit::{Nota, NotaLine, ReceiptConfirmation, TransactionDraft};
use kasdesa::import::{self, stage_replace, CsvImporter, SheetKind};
use kasdesa::ledger::recalculate;
use kasdesa::models::{BudgetItem, CashEntry, Classification, Direction, NewCashEntry};
use kasdesa::{CommitFlow, CommitState, Ledger, LedgerConfig, LedgerError};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

fn draft(d: u32, category: &str, amount: Decimal, direction: Direction) -> TransactionDraft {
    TransactionDraft {
        date: day(d),
        account_code: match direction {
            Direction::Receipt => "4.1.1.01".into(),
            Direction::Disbursement => "5.1.2.01".into(),
        },
        category: category.into(),
        purpose: category.into(),
        amount,
        direction,
        counterparty: "Bendesa".into(),
    }
}

fn commit_receipt(ledger: &mut Ledger, d: u32, category: &str, amount: Decimal) {
    let mut flow = CommitFlow::new();
    flow.submit(draft(d, category, amount, Direction::Receipt)).unwrap();
    flow.confirm_receipt(ledger, ReceiptConfirmation::default())
        .unwrap();
}

fn commit_spend(ledger: &mut Ledger, d: u32, category: &str, lines: Vec<NotaLine>) {
    let amount = lines.iter().map(NotaLine::total).sum();
    let mut flow = CommitFlow::new();
    flow.submit(draft(d, category, amount, Direction::Disbursement))
        .unwrap();
    flow.confirm_nota(
        ledger,
        Nota {
            voucher_number: None,
            lines,
        },
    )
    .unwrap();
}

fn balances(entries: &[CashEntry]) -> Vec<Decimal> {
    entries.iter().map(CashEntry::balance).collect()
}

// ── Commit scenarios ──────────────────────────────────────────

#[test]
fn test_receipt_then_nota_keeps_books_consistent() {
    let mut ledger = Ledger::new();
    commit_receipt(&mut ledger, 1, "Hibah", dec!(1000000));
    commit_spend(
        &mut ledger,
        2,
        "ATK",
        vec![NotaLine::new("Kertas", dec!(1), dec!(250000))],
    );

    assert_eq!(
        balances(ledger.cash_entries()),
        vec![dec!(1000000), dec!(750000)]
    );

    let journal = ledger.journal();
    assert_eq!(journal.len(), 6);
    for triplet in journal.chunks(3) {
        let txn = &triplet[0].transaction_id;
        assert!(triplet.iter().all(|r| &r.transaction_id == txn));
        let debit: Decimal = triplet.iter().map(|r| r.debit_amount).sum();
        let credit: Decimal = triplet.iter().map(|r| r.credit_amount).sum();
        assert_eq!(debit, credit);
        assert_eq!(triplet[2].debit_amount, Decimal::ZERO);
        assert_eq!(triplet[2].credit_amount, Decimal::ZERO);
    }
    assert_ne!(journal[0].transaction_id, journal[3].transaction_id);

    let summary = ledger.reconcile(dec!(750000), Decimal::ZERO);
    assert_eq!(summary.discrepancy, Decimal::ZERO);
    assert_eq!(summary.book_balance, dec!(750000));
    assert!(summary.books_agree);
}

#[test]
fn test_nota_mismatch_rejected_without_writes() {
    let mut ledger = Ledger::new();
    commit_receipt(&mut ledger, 1, "Hibah", dec!(1000000));
    let before = (
        ledger.cash_entries().len(),
        ledger.auxiliary_entries().len(),
        ledger.journal().len(),
    );

    let mut flow = CommitFlow::new();
    flow.submit(draft(2, "ATK", dec!(250000), Direction::Disbursement))
        .unwrap();
    let err = flow
        .confirm_nota(
            &mut ledger,
            Nota {
                voucher_number: None,
                lines: vec![NotaLine::new("Tinta", dec!(2), dec!(100000))],
            },
        )
        .unwrap_err();

    assert_eq!(
        err,
        LedgerError::ReconciliationMismatch {
            expected: dec!(250000),
            actual: dec!(200000),
            difference: dec!(50000),
        }
    );
    assert!(matches!(flow.state(), CommitState::AwaitingNotaConfirmation(_)));
    assert_eq!(
        (
            ledger.cash_entries().len(),
            ledger.auxiliary_entries().len(),
            ledger.journal().len(),
        ),
        before
    );
}

#[test]
fn test_nota_within_tolerance_commits() {
    let mut ledger = Ledger::with_config(LedgerConfig::default());
    let mut flow = CommitFlow::new();
    flow.submit(draft(3, "Konsumsi", dec!(100001), Direction::Disbursement))
        .unwrap();
    let receipt = flow
        .confirm_nota(
            &mut ledger,
            Nota {
                voucher_number: Some("NOTA-77".into()),
                lines: vec![NotaLine::new("Nasi", dec!(20), dec!(5000))],
            },
        )
        .unwrap();
    assert_eq!(receipt.total, dec!(100000));
    assert_eq!(ledger.cash_entries()[0].disbursement_amount, dec!(100001));
    assert_eq!(ledger.auxiliary_entries()[0].voucher_number, "NOTA-77");
}

// ── Reports ───────────────────────────────────────────────────

#[test]
fn test_realization_half_spent() {
    let mut ledger = Ledger::new();
    ledger.add_budget_item(BudgetItem::new(
        "5.1.2.01",
        "ATK",
        dec!(500000),
        Classification::RoutineOperational,
    ));
    commit_receipt(&mut ledger, 1, "Hibah", dec!(1000000));
    commit_spend(
        &mut ledger,
        2,
        "ATK",
        vec![NotaLine::new("Kertas", dec!(2), dec!(50000))],
    );
    commit_spend(
        &mut ledger,
        5,
        "ATK",
        vec![NotaLine::new("Map", dec!(10), dec!(15000))],
    );

    let report = ledger.realization_report();
    let row = report.rows().find(|r| r.label == "ATK").unwrap();
    assert_eq!(row.totals.realized, dec!(250000));
    assert_eq!(row.totals.percentage, dec!(50.00));
    assert_eq!(report.routine.realized, dec!(250000));
}

#[test]
fn test_recalculate_is_a_fixed_point() {
    let mut ledger = Ledger::new();
    ledger
        .submit_cash_entry(NewCashEntry::disbursement(
            day(9),
            "5.1.2.01",
            "ATK",
            "Beli map",
            dec!(40000),
        ))
        .unwrap();
    ledger
        .submit_cash_entry(NewCashEntry::receipt(
            day(4),
            "4.1.1.01",
            "Hibah",
            "Dana masuk",
            dec!(300000),
        ))
        .unwrap();
    ledger
        .submit_cash_entry(NewCashEntry::receipt(
            day(9),
            "4.1.1.01",
            "Punia",
            "Punia krama",
            dec!(10000),
        ))
        .unwrap();

    let once = ledger.cash_entries().to_vec();
    let twice = recalculate(once.clone());
    assert_eq!(balances(&once), balances(&twice));
    assert_eq!(
        balances(&once),
        vec![dec!(300000), dec!(260000), dec!(270000)]
    );
    assert!(once.windows(2).all(|w| w[0].date <= w[1].date));
}

// ── Interchange ───────────────────────────────────────────────

#[test]
fn test_export_then_additive_import_round_trip() {
    let mut source = Ledger::new();
    commit_receipt(&mut source, 1, "Hibah", dec!(1000000));
    commit_spend(
        &mut source,
        2,
        "ATK",
        vec![NotaLine::new("Kertas", dec!(1), dec!(250000))],
    );

    let file = tempfile::NamedTempFile::new().unwrap();
    import::export_path(&source, SheetKind::Cash, file.path()).unwrap();

    let mut target = Ledger::new();
    let sheet = import::read_sheet(file.path(), SheetKind::Cash, target.config()).unwrap();
    let summary = target.import_additive(sheet);
    assert_eq!(summary.imported, 2);
    assert_eq!(summary.skipped, 0);

    let strip = |entries: &[CashEntry]| -> Vec<NewCashEntry> {
        entries.iter().map(CashEntry::to_new).collect()
    };
    assert_eq!(strip(source.cash_entries()), strip(target.cash_entries()));
    assert_eq!(
        balances(source.cash_entries()),
        balances(target.cash_entries())
    );
    assert_eq!(target.journal().len(), 6);
}

#[test]
fn test_replace_import_rejects_malformed_file_untouched() {
    let mut ledger = Ledger::new();
    commit_receipt(&mut ledger, 1, "Hibah", dec!(1000000));

    let raw = CsvImporter::read(
        "Date,Description,ReceiptAmount\n2024-03-02,Punia,5000\nbukan tanggal,Sewa,100\n"
            .as_bytes(),
    )
    .unwrap();
    let sheet = import::parse_sheet(SheetKind::Cash, &raw, ledger.config()).unwrap();
    let err = stage_replace(sheet).unwrap_err();

    assert!(matches!(err, LedgerError::ImportParse { imported: 0, .. }));
    assert_eq!(ledger.cash_entries().len(), 1);
    assert_eq!(ledger.journal().len(), 3);
}

#[test]
fn test_replace_import_rejects_file_without_usable_rows() {
    let mut ledger = Ledger::new();
    commit_receipt(&mut ledger, 1, "Hibah", dec!(1000000));

    for content in [
        "Date,Description,ReceiptAmount\n",
        "Date,Description,ReceiptAmount\n,,100\n,Tanpa tanggal,5000\n",
    ] {
        let raw = CsvImporter::read(content.as_bytes()).unwrap();
        let sheet = import::parse_sheet(SheetKind::Cash, &raw, ledger.config()).unwrap();
        let err = stage_replace(sheet).unwrap_err();
        assert!(matches!(err, LedgerError::ImportParse { imported: 0, .. }));
    }
    assert_eq!(ledger.cash_entries().len(), 1);
    assert_eq!(ledger.journal().len(), 3);
}

#[test]
fn test_replace_import_swaps_book_and_regenerates_journal() {
    let mut ledger = Ledger::new();
    commit_receipt(&mut ledger, 1, "Hibah", dec!(1000000));

    let raw = CsvImporter::read(
        "Tanggal,Kode,Kategori,Uraian,Penerimaan,Pengeluaran\n\
         02/03/2024,4.1.1.01,Punia,Punia krama,Rp 5.000,\n\
         03/03/2024,5.1.2.01,ATK,Beli pena,,2.000\n"
            .as_bytes(),
    )
    .unwrap();
    let sheet = import::parse_sheet(SheetKind::Cash, &raw, ledger.config()).unwrap();
    let staged = stage_replace(sheet).unwrap();
    assert_eq!(staged.len(), 2);
    assert_eq!(ledger.cash_entries().len(), 1);

    assert_eq!(staged.confirm(&mut ledger), 2);
    assert_eq!(balances(ledger.cash_entries()), vec![dec!(5000), dec!(3000)]);
    assert_eq!(ledger.journal().len(), 6);
}
