mod terbilang;

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

pub use terbilang::{terbilang, terbilang_rupiah};

pub(crate) const MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

/// Format a whole-rupiah amount with dot thousands separators.
/// e.g. `1250000` → `"1.250.000"`, `-5000` → `"-5.000"`
pub fn format_amount(val: Decimal) -> String {
    let rounded = val.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().to_string();

    let grouped: String = digits
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(".");

    if rounded < Decimal::ZERO {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Rupiah display: `"Rp 1.250.000"`, `"-Rp 5.000"`. Zero shows as `"-"`,
/// the usual blank cell in a cash book.
pub fn format_currency(val: Decimal) -> String {
    if val.is_zero() {
        return "-".to_string();
    }
    let amount = format_amount(val.abs());
    if val < Decimal::ZERO {
        format!("-Rp {amount}")
    } else {
        format!("Rp {amount}")
    }
}

/// e.g. `2024-01-05` → `"05 Jan 2024"`
pub fn format_date(date: NaiveDate) -> String {
    format!(
        "{:02} {} {}",
        date.day(),
        MONTHS_SHORT[date.month0() as usize],
        date.year()
    )
}
