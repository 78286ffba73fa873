use anyhow::Result;
use chrono::Datelike;
use std::path::Path;

use kasdesa::format::{format_currency, format_date, terbilang_rupiah};
use kasdesa::import::{self, SheetKind};
use kasdesa::models::RowKind;
use kasdesa::report::{available_years, monthly_totals, year_summary, CategoryTotal, Totals};
use kasdesa::Ledger;

use super::{amount_flag, config_from, flag_value, has_flag, load_sheet, parse_money, positional};

pub(crate) fn as_cli(args: &[String]) -> Result<()> {
    let rest = &args[2..];
    match args[1].as_str() {
        "bku" => cli_bku(rest),
        "jurnal" | "ju" => cli_jurnal(rest),
        "lra" => cli_lra(rest),
        "rekon" => cli_rekon(rest),
        "saldo" => cli_saldo(rest),
        "ringkasan" => cli_ringkasan(rest),
        "terbilang" => cli_terbilang(rest),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("kasdesa {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

pub(crate) fn print_usage() {
    println!("KasDesa - cash bookkeeping for desa adat treasurers");
    println!();
    println!("Usage: kasdesa <command>");
    println!();
    println!("Commands:");
    println!("  bku <cash.csv>                Print the recalculated general cash book");
    println!("    --replace                   Load as one all-or-nothing replacement");
    println!("    --export <out.csv>          Write the book back out with balances");
    println!("  jurnal <cash.csv>             Print the automatically posted general journal");
    println!("    --account <code>            Print the ledger page of one account instead");
    println!("  lra <cash.csv> <budget.csv>   Print the budget realization report");
    println!("    --surface-unbudgeted        List categories no budget item covers");
    println!("  rekon <cash.csv> [aux.csv]    Print the reconciliation summary");
    println!("    --cash <n> --bank <n>       Physically counted cash and bank money");
    println!("  saldo <cash.csv>              Print the closing balance summary");
    println!("    --opening <n> --tax <n>     Opening balance and tax deposited");
    println!("  ringkasan <cash.csv>          Print yearly and monthly totals");
    println!("    --year <yyyy>               Year to show (default: latest)");
    println!("  terbilang <amount>            Spell an amount in Indonesian words");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Global options:");
    println!("  --tolerance <n>               Nota matching tolerance (default 2)");
    println!("  --cash-code <code>            Cash account used for automatic posting");
}

fn ledger_with_cash(args: &[String], usage: &str) -> Result<Ledger> {
    let Some(cash) = positional(args).first().copied() else {
        anyhow::bail!("Usage: {usage}");
    };
    let mut ledger = Ledger::with_config(config_from(args)?);
    load_sheet(&mut ledger, SheetKind::Cash, cash, has_flag(args, "--replace"))?;
    Ok(ledger)
}

fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

// ── Books ─────────────────────────────────────────────────────

fn cli_bku(args: &[String]) -> Result<()> {
    let ledger = ledger_with_cash(args, "kasdesa bku <cash.csv> [--replace] [--export <out.csv>]")?;
    let entries = ledger.cash_entries();

    println!("Buku Kas Umum");
    println!("{}", "─".repeat(112));
    println!(
        "{:<4} {:<12} {:<10} {:<32} {:>16} {:>16} {:>16}",
        "No", "Tanggal", "Kode", "Uraian", "Penerimaan", "Pengeluaran", "Saldo"
    );
    for (i, e) in entries.iter().enumerate() {
        println!(
            "{:<4} {:<12} {:<10} {:<32} {:>16} {:>16} {:>16}",
            i + 1,
            format_date(e.date),
            e.account_code,
            clip(&e.description, 32),
            format_currency(e.receipt_amount),
            format_currency(e.disbursement_amount),
            format_currency(e.balance()),
        );
    }
    println!("{}", "─".repeat(112));
    let receipts = entries.iter().map(|e| e.receipt_amount).sum();
    let disbursements = entries.iter().map(|e| e.disbursement_amount).sum();
    let closing = entries.last().map(|e| e.balance()).unwrap_or_default();
    println!(
        "{:<61} {:>16} {:>16} {:>16}",
        "Jumlah",
        format_currency(receipts),
        format_currency(disbursements),
        format_currency(closing),
    );

    if let Some(out) = flag_value(args, "--export") {
        import::export_path(&ledger, SheetKind::Cash, Path::new(out))?;
        eprintln!("Exported {} line(s) to {out}", entries.len());
    }
    Ok(())
}

fn cli_jurnal(args: &[String]) -> Result<()> {
    let ledger = ledger_with_cash(args, "kasdesa jurnal <cash.csv> [--account <code>]")?;

    if let Some(code) = flag_value(args, "--account") {
        let lines = ledger.account_ledger(code);
        println!("Buku Besar {code}");
        println!("{}", "─".repeat(104));
        println!(
            "{:<12} {:<14} {:<24} {:>16} {:>16} {:>16}",
            "Tanggal", "Transaksi", "Uraian", "Debet", "Kredit", "Saldo"
        );
        for line in &lines {
            println!(
                "{:<12} {:<14} {:<24} {:>16} {:>16} {:>16}",
                line.date.map(format_date).unwrap_or_default(),
                line.transaction_id,
                clip(&line.description, 24),
                format_currency(line.debit),
                format_currency(line.credit),
                format_currency(line.balance),
            );
        }
        return Ok(());
    }

    println!("Jurnal Umum");
    println!("{}", "─".repeat(100));
    println!(
        "{:<12} {:<14} {:<10} {:<28} {:>16} {:>16}",
        "Tanggal", "Transaksi", "Kode", "Uraian", "Debet", "Kredit"
    );
    for row in ledger.journal() {
        let description = match row.kind {
            RowKind::Credit => format!("  {}", row.description),
            _ => row.description.clone(),
        };
        println!(
            "{:<12} {:<14} {:<10} {:<28} {:>16} {:>16}",
            row.date.map(format_date).unwrap_or_default(),
            row.transaction_id,
            row.account_code.as_deref().unwrap_or(""),
            clip(&description, 28),
            format_currency(row.debit_amount),
            format_currency(row.credit_amount),
        );
    }
    Ok(())
}

// ── Reports ───────────────────────────────────────────────────

fn print_totals(label: &str, t: &Totals) {
    println!(
        "  {:<40} {:>16} {:>16} {:>8}%",
        label,
        format_currency(t.budgeted),
        format_currency(t.realized),
        t.percentage.to_string()
    );
}

fn cli_lra(args: &[String]) -> Result<()> {
    let pos = positional(args);
    let (Some(cash), Some(budget)) = (pos.first().copied(), pos.get(1).copied()) else {
        anyhow::bail!("Usage: kasdesa lra <cash.csv> <budget.csv> [--surface-unbudgeted]");
    };
    let mut ledger = Ledger::with_config(config_from(args)?);
    let replace = has_flag(args, "--replace");
    load_sheet(&mut ledger, SheetKind::Cash, cash, replace)?;
    load_sheet(&mut ledger, SheetKind::Budget, budget, replace)?;

    let report = ledger.realization_report();
    match report.year {
        Some(year) => println!("Laporan Realisasi Anggaran {year}"),
        None => println!("Laporan Realisasi Anggaran"),
    }
    println!("{}", "─".repeat(88));
    println!(
        "  {:<40} {:>16} {:>16} {:>9}",
        "Uraian", "Anggaran", "Realisasi", "%"
    );
    for section in &report.sections {
        println!();
        println!("{}", section.classification.label());
        for row in &section.rows {
            print_totals(&clip(&format!("{} {}", row.account_code, row.label), 40), &row.totals);
        }
        print_totals("Jumlah", &section.subtotal);
    }
    println!("{}", "─".repeat(88));
    print_totals("Total Pendapatan", &report.income);
    print_totals("Total Belanja Rutin", &report.routine);
    print_totals("Total Belanja Program", &report.program);
    print_totals("Total Belanja", &report.expenditure);
    println!(
        "  {:<40} {:>16} {:>16}",
        "Surplus / (Defisit)",
        format_currency(report.surplus.budgeted),
        format_currency(report.surplus.realized)
    );

    if !report.unbudgeted.is_empty() {
        println!();
        println!("Tidak dianggarkan:");
        for row in &report.unbudgeted {
            println!(
                "  {:<40} {:>16} {:>16}",
                clip(&row.category, 40),
                format_currency(row.receipts),
                format_currency(row.disbursements)
            );
        }
    }
    Ok(())
}

fn cli_rekon(args: &[String]) -> Result<()> {
    let pos = positional(args);
    let Some(cash) = pos.first().copied() else {
        anyhow::bail!("Usage: kasdesa rekon <cash.csv> [aux.csv] --cash <n> --bank <n>");
    };
    let mut ledger = Ledger::with_config(config_from(args)?);
    let replace = has_flag(args, "--replace");
    load_sheet(&mut ledger, SheetKind::Cash, cash, replace)?;
    if let Some(aux) = pos.get(1).copied() {
        load_sheet(&mut ledger, SheetKind::Auxiliary, aux, replace)?;
    }

    let s = ledger.reconcile(amount_flag(args, "--cash")?, amount_flag(args, "--bank")?);
    println!("Rekonsiliasi Kas");
    println!("{}", "─".repeat(48));
    println!("  Saldo awal:          {:>24}", format_currency(s.opening_balance));
    println!("  Total penerimaan:    {:>24}", format_currency(s.total_receipts));
    println!("  Total pengeluaran:   {:>24}", format_currency(s.total_disbursements));
    println!("  Dana dikelola:       {:>24}", format_currency(s.managed_funds));
    println!("  Saldo BKU:           {:>24}", format_currency(s.book_balance));
    println!("  Saldo BKP:           {:>24}", format_currency(s.auxiliary_balance));
    println!("  BKU = BKP:           {:>24}", if s.books_agree { "ya" } else { "tidak" });
    println!("  Kas tunai:           {:>24}", format_currency(s.physical_cash));
    println!("  Kas di bank:         {:>24}", format_currency(s.physical_bank));
    println!("  Jumlah fisik:        {:>24}", format_currency(s.physical_total));
    println!("  Selisih:             {:>24}", format_currency(s.discrepancy));
    Ok(())
}

fn print_categories(title: &str, totals: &[CategoryTotal]) {
    if totals.is_empty() {
        return;
    }
    println!();
    println!("{title}:");
    for t in totals {
        println!("  {:<30} {:>16}", clip(&t.category, 30), format_currency(t.total));
    }
}

fn cli_saldo(args: &[String]) -> Result<()> {
    let ledger = ledger_with_cash(args, "kasdesa saldo <cash.csv> [--opening <n>] [--tax <n>]")?;
    let s = ledger.closing_summary(amount_flag(args, "--opening")?, amount_flag(args, "--tax")?);

    println!("Saldo Akhir");
    println!("{}", "─".repeat(48));
    println!("  Saldo awal:          {:>24}", format_currency(s.opening_balance));
    println!("  Total penerimaan:    {:>24}", format_currency(s.total_receipts));
    println!("  Total pengeluaran:   {:>24}", format_currency(s.total_disbursements));
    println!("  Setoran pajak:       {:>24}", format_currency(s.tax_deposit));
    println!("  Jumlah debet:        {:>24}", format_currency(s.cumulative_debit));
    println!("  Jumlah kredit:       {:>24}", format_currency(s.cumulative_credit));
    println!("  Saldo kas:           {:>24}", format_currency(s.closing_cash));
    println!("  Terbilang: {}", terbilang_rupiah(s.closing_cash));
    print_categories("Penerimaan per kategori", &s.income_by_category);
    print_categories("Pengeluaran per kategori", &s.expense_by_category);
    Ok(())
}

fn cli_ringkasan(args: &[String]) -> Result<()> {
    let ledger = ledger_with_cash(args, "kasdesa ringkasan <cash.csv> [--year <yyyy>]")?;
    let entries = ledger.cash_entries();
    let years = available_years(entries, chrono::Local::now().year());

    let year = match flag_value(args, "--year") {
        Some(raw) => raw
            .parse::<i32>()
            .map_err(|_| anyhow::anyhow!("Invalid year: {raw}"))?,
        None => entries
            .iter()
            .map(|e| e.date.year())
            .max()
            .unwrap_or_else(|| chrono::Local::now().year()),
    };

    let summary = year_summary(entries, year);
    println!("Ringkasan {year}");
    println!("{}", "─".repeat(48));
    println!("  Penerimaan:          {:>24}", format_currency(summary.receipts));
    println!("  Pengeluaran:         {:>24}", format_currency(summary.disbursements));
    println!("  Saldo:               {:>24}", format_currency(summary.balance));
    println!();
    println!("{:<10} {:>18} {:>18}", "Bulan", "Penerimaan", "Pengeluaran");
    for month in monthly_totals(entries, year) {
        println!(
            "{:<10} {:>18} {:>18}",
            month.label,
            format_currency(month.receipts),
            format_currency(month.disbursements)
        );
    }
    print_categories("Penerimaan per kategori", &summary.income_by_category);
    print_categories("Pengeluaran per kategori", &summary.expense_by_category);

    let others: Vec<String> = years
        .iter()
        .filter(|y| **y != year)
        .map(|y| y.to_string())
        .collect();
    if !others.is_empty() {
        println!();
        println!("Tahun lain: {}", others.join(", "));
    }
    Ok(())
}

fn cli_terbilang(args: &[String]) -> Result<()> {
    let Some(raw) = positional(args).first().copied() else {
        anyhow::bail!("Usage: kasdesa terbilang <amount>");
    };
    let amount = parse_money(raw)?;
    println!("{}", format_currency(amount));
    println!("{}", terbilang_rupiah(amount));
    Ok(())
}
