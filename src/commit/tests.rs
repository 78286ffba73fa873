#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::config::LedgerConfig;
use crate::models::RowKind;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
}

fn receipt_draft(amount: Decimal) -> TransactionDraft {
    TransactionDraft {
        date: day(1),
        account_code: "022.22.1 - Bantuan Keuangan dari APBD Provinsi".into(),
        category: "Hibah".into(),
        purpose: "Hibah Pura".into(),
        amount,
        direction: Direction::Receipt,
        counterparty: "Pemprov".into(),
    }
}

fn spend_draft(amount: Decimal) -> TransactionDraft {
    TransactionDraft {
        date: day(2),
        account_code: "5.1.2.01".into(),
        category: "ATK".into(),
        purpose: "ATK".into(),
        amount,
        direction: Direction::Disbursement,
        counterparty: "Toko Sari".into(),
    }
}

fn nota(lines: Vec<NotaLine>) -> Nota {
    Nota {
        voucher_number: None,
        lines,
    }
}

// ── Drafting ──────────────────────────────────────────────────

#[test]
fn test_submit_receipt_awaits_kwitansi() {
    let mut flow = CommitFlow::new();
    let pending = flow.submit(receipt_draft(dec!(1000000))).unwrap();
    assert_eq!(pending.account_code, "022.22.1");
    assert_eq!(pending.description, "Penerimaan Hibah Pura Dari Pemprov");
    assert!(matches!(
        flow.state(),
        CommitState::AwaitingReceiptConfirmation(_)
    ));
}

#[test]
fn test_submit_disbursement_awaits_nota() {
    let mut flow = CommitFlow::new();
    flow.submit(spend_draft(dec!(250000))).unwrap();
    assert!(matches!(flow.state(), CommitState::AwaitingNotaConfirmation(_)));
    assert_eq!(
        flow.pending().unwrap().description,
        "Belanja ATK Kepada Toko Sari"
    );
}

#[test]
fn test_submit_missing_fields() {
    let mut flow = CommitFlow::new();
    let mut draft = receipt_draft(dec!(10));
    draft.counterparty = " ".into();
    draft.category = String::new();
    let err = flow.submit(draft).unwrap_err();
    assert_eq!(
        err,
        LedgerError::Validation("missing category, counterparty".into())
    );
    assert_eq!(flow.state(), &CommitState::Drafting);
}

#[test]
fn test_submit_non_positive_amount() {
    let mut flow = CommitFlow::new();
    assert!(matches!(
        flow.submit(receipt_draft(Decimal::ZERO)),
        Err(LedgerError::Validation(_))
    ));
    assert!(flow.submit(receipt_draft(dec!(-1))).is_err());
    assert_eq!(flow.state(), &CommitState::Drafting);
}

#[test]
fn test_submit_twice_is_invalid() {
    let mut flow = CommitFlow::new();
    flow.submit(receipt_draft(dec!(10))).unwrap();
    assert!(matches!(
        flow.submit(receipt_draft(dec!(10))),
        Err(LedgerError::InvalidState(_))
    ));
}

// ── Receipt ───────────────────────────────────────────────────

#[test]
fn test_confirm_receipt_writes_three_books() {
    let mut ledger = Ledger::new();
    let mut flow = CommitFlow::new();
    flow.submit(receipt_draft(dec!(1000000))).unwrap();
    let kwitansi = flow
        .confirm_receipt(&mut ledger, ReceiptConfirmation::default())
        .unwrap();

    assert_eq!(flow.state(), &CommitState::Committed(kwitansi.cash_entry_id));
    assert_eq!(kwitansi.voucher_number, "KW-0001");
    assert_eq!(kwitansi.purpose, "Hibah Pura");
    assert_eq!(kwitansi.amount_in_words, "satu juta Rupiah");

    let cash = &ledger.cash_entries()[0];
    assert_eq!(cash.id, kwitansi.cash_entry_id);
    assert_eq!(cash.balance(), dec!(1000000));

    let aux = &ledger.auxiliary_entries()[0];
    assert_eq!(aux.voucher_number, "KW-0001");
    assert_eq!(aux.category, "Hibah");
    assert_eq!(aux.description, "Penerimaan dari Pemprov untuk Hibah Pura");
    assert_eq!(aux.debit_amount, dec!(1000000));

    let journal = ledger.journal();
    assert_eq!(journal.len(), 3);
    let debit: Decimal = journal.iter().map(|r| r.debit_amount).sum();
    let credit: Decimal = journal.iter().map(|r| r.credit_amount).sum();
    assert_eq!(debit, credit);
    assert_eq!(journal[2].kind, RowKind::Memo);
}

#[test]
fn test_confirm_receipt_with_custom_purpose_and_voucher() {
    let mut ledger = Ledger::new();
    let mut flow = CommitFlow::new();
    flow.submit(receipt_draft(dec!(500))).unwrap();
    let kwitansi = flow
        .confirm_receipt(
            &mut ledger,
            ReceiptConfirmation {
                purpose: Some("Piodalan".into()),
                voucher_number: Some("KW-77".into()),
            },
        )
        .unwrap();
    assert_eq!(kwitansi.voucher_number, "KW-77");
    assert_eq!(
        ledger.auxiliary_entries()[0].description,
        "Penerimaan dari Pemprov untuk Piodalan"
    );
}

#[test]
fn test_confirm_receipt_on_nota_flow_is_invalid() {
    let mut ledger = Ledger::new();
    let mut flow = CommitFlow::new();
    flow.submit(spend_draft(dec!(10))).unwrap();
    assert!(matches!(
        flow.confirm_receipt(&mut ledger, ReceiptConfirmation::default()),
        Err(LedgerError::InvalidState(_))
    ));
    assert!(ledger.cash_entries().is_empty());
}

// ── Nota ──────────────────────────────────────────────────────

#[test]
fn test_confirm_nota_exact() {
    let mut ledger = Ledger::new();
    let mut flow = CommitFlow::new();
    flow.submit(spend_draft(dec!(250000))).unwrap();
    let receipt = flow
        .confirm_nota(
            &mut ledger,
            nota(vec![
                NotaLine::new("Kertas HVS", dec!(2), dec!(50000)),
                NotaLine::new("Tinta", dec!(1), dec!(150000)),
                NotaLine::new("", dec!(1), dec!(0)),
            ]),
        )
        .unwrap();

    assert_eq!(receipt.lines_recorded, 2);
    assert_eq!(receipt.voucher_number, "NOTA-0001");
    assert_eq!(ledger.cash_entries().len(), 1);
    assert_eq!(ledger.auxiliary_entries().len(), 2);
    assert_eq!(
        ledger.auxiliary_entries()[0].description,
        "Kertas HVS (2 x 50000)"
    );
    assert_eq!(ledger.auxiliary_entries()[1].balance(), dec!(-250000));
    assert_eq!(ledger.journal().len(), 3);
}

#[test]
fn test_confirm_nota_within_tolerance() {
    let mut ledger = Ledger::new();
    let mut flow = CommitFlow::new();
    flow.submit(spend_draft(dec!(100002))).unwrap();
    let receipt = flow
        .confirm_nota(&mut ledger, nota(vec![NotaLine::new("Map", dec!(1), dec!(100000))]))
        .unwrap();
    assert_eq!(receipt.total, dec!(100000));
    assert_eq!(ledger.cash_entries()[0].disbursement_amount, dec!(100002));
}

#[test]
fn test_confirm_nota_mismatch_is_atomic() {
    let mut ledger = Ledger::new();
    let mut flow = CommitFlow::new();
    flow.submit(spend_draft(dec!(250000))).unwrap();
    let err = flow
        .confirm_nota(&mut ledger, nota(vec![NotaLine::new("Kertas", dec!(2), dec!(100000))]))
        .unwrap_err();
    assert_eq!(
        err,
        LedgerError::ReconciliationMismatch {
            expected: dec!(250000),
            actual: dec!(200000),
            difference: dec!(50000),
        }
    );
    assert!(ledger.cash_entries().is_empty());
    assert!(ledger.auxiliary_entries().is_empty());
    assert!(ledger.journal().is_empty());
    assert!(matches!(flow.state(), CommitState::AwaitingNotaConfirmation(_)));

    flow.confirm_nota(&mut ledger, nota(vec![NotaLine::new("Kertas", dec!(2), dec!(125000))]))
        .unwrap();
    assert_eq!(ledger.cash_entries().len(), 1);
}

#[test]
fn test_confirm_nota_just_past_tolerance() {
    let mut ledger = Ledger::new();
    let mut flow = CommitFlow::new();
    flow.submit(spend_draft(dec!(103))).unwrap();
    let err = flow
        .confirm_nota(&mut ledger, nota(vec![NotaLine::new("x", dec!(1), dec!(100))]))
        .unwrap_err();
    assert!(matches!(err, LedgerError::ReconciliationMismatch { .. }));
}

#[test]
fn test_confirm_nota_uses_configured_tolerance() {
    let config = LedgerConfig {
        nota_tolerance: Decimal::ZERO,
        ..LedgerConfig::default()
    };
    let mut ledger = Ledger::with_config(config);
    let mut flow = CommitFlow::new();
    flow.submit(spend_draft(dec!(101))).unwrap();
    assert!(flow
        .confirm_nota(&mut ledger, nota(vec![NotaLine::new("x", dec!(1), dec!(100))]))
        .is_err());
}

#[test]
fn test_confirm_nota_negative_line() {
    let mut ledger = Ledger::new();
    let mut flow = CommitFlow::new();
    flow.submit(spend_draft(dec!(100))).unwrap();
    let err = flow
        .confirm_nota(
            &mut ledger,
            nota(vec![
                NotaLine::new("a", dec!(1), dec!(200)),
                NotaLine::new("b", dec!(-1), dec!(100)),
            ]),
        )
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));
}

#[test]
fn test_confirm_nota_custom_voucher_on_every_line() {
    let mut ledger = Ledger::new();
    let mut flow = CommitFlow::new();
    flow.submit(spend_draft(dec!(30))).unwrap();
    flow.confirm_nota(
        &mut ledger,
        Nota {
            voucher_number: Some("NT/01".into()),
            lines: vec![
                NotaLine::new("a", dec!(1), dec!(10)),
                NotaLine::new("b", dec!(2), dec!(10)),
            ],
        },
    )
    .unwrap();
    assert!(ledger
        .auxiliary_entries()
        .iter()
        .all(|e| e.voucher_number == "NT/01"));
}

#[test]
fn test_confirm_nota_unnamed_lines_do_not_count() {
    let mut ledger = Ledger::new();
    let mut flow = CommitFlow::new();
    flow.submit(receipt_draft(dec!(1000000))).unwrap();
    flow.confirm_receipt(&mut ledger, ReceiptConfirmation::default())
        .unwrap();

    let mut flow = CommitFlow::new();
    flow.submit(spend_draft(dec!(250000))).unwrap();
    let err = flow
        .confirm_nota(&mut ledger, nota(vec![NotaLine::new("", dec!(1), dec!(250000))]))
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));
    assert!(matches!(flow.state(), CommitState::AwaitingNotaConfirmation(_)));
    assert_eq!(ledger.cash_entries().len(), 1);
    assert_eq!(ledger.auxiliary_entries().len(), 1);

    let err = flow
        .confirm_nota(
            &mut ledger,
            nota(vec![
                NotaLine::new("Kertas", dec!(1), dec!(150000)),
                NotaLine::new("  ", dec!(1), dec!(100000)),
            ]),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        LedgerError::ReconciliationMismatch { actual, .. } if actual == dec!(150000)
    ));
}

#[test]
fn test_confirm_nota_without_lines_rejected() {
    let mut ledger = Ledger::new();
    let mut flow = CommitFlow::new();
    flow.submit(spend_draft(dec!(2))).unwrap();
    let err = flow.confirm_nota(&mut ledger, Nota::default()).unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));
    assert!(ledger.cash_entries().is_empty());
    assert!(ledger.journal().is_empty());
}

// ── Cancel ────────────────────────────────────────────────────

#[test]
fn test_cancel_discards_pending() {
    let ledger = Ledger::new();
    let mut flow = CommitFlow::new();
    flow.submit(spend_draft(dec!(10))).unwrap();
    flow.cancel().unwrap();
    assert_eq!(flow.state(), &CommitState::Cancelled);
    assert!(flow.pending().is_none());
    assert!(ledger.cash_entries().is_empty());
}

#[test]
fn test_terminal_states_reject_everything() {
    let mut ledger = Ledger::new();
    let mut flow = CommitFlow::new();
    flow.submit(receipt_draft(dec!(10))).unwrap();
    flow.confirm_receipt(&mut ledger, ReceiptConfirmation::default())
        .unwrap();
    assert!(flow.cancel().is_err());
    assert!(flow.submit(receipt_draft(dec!(10))).is_err());
    assert!(flow
        .confirm_receipt(&mut ledger, ReceiptConfirmation::default())
        .is_err());
    assert_eq!(ledger.cash_entries().len(), 1);

    let mut cancelled = CommitFlow::new();
    cancelled.cancel().unwrap();
    assert!(cancelled.cancel().is_err());
}
