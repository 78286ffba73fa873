use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

const ONES: [&str; 10] = [
    "", "satu", "dua", "tiga", "empat", "lima", "enam", "tujuh", "delapan", "sembilan",
];

const SCALES: [&str; 7] = ["", "ribu", "juta", "miliar", "triliun", "kuadriliun", "kuintiliun"];

/// Spell an integer in Indonesian words.
/// e.g. `1250000` → `"satu juta dua ratus lima puluh ribu"`
pub fn terbilang(n: u64) -> String {
    if n == 0 {
        return "nol".to_string();
    }

    let mut groups = Vec::new();
    let mut rest = n;
    while rest > 0 {
        groups.push((rest % 1000) as usize);
        rest /= 1000;
    }

    let mut words: Vec<String> = Vec::new();
    for (scale, &chunk) in groups.iter().enumerate().rev() {
        if chunk == 0 {
            continue;
        }
        if scale == 1 && chunk == 1 {
            words.push("seribu".to_string());
            continue;
        }
        words.push(below_thousand(chunk));
        if !SCALES[scale].is_empty() {
            words.push(SCALES[scale].to_string());
        }
    }
    words.join(" ")
}

/// Amount in words followed by "Rupiah"; fractions are dropped.
/// Negative amounts read as "minus ...".
pub fn terbilang_rupiah(amount: Decimal) -> String {
    let whole = amount.trunc();
    let spelled = match whole.abs().to_u64() {
        Some(n) => terbilang(n),
        None => whole.abs().to_string(),
    };
    if whole < Decimal::ZERO {
        format!("minus {spelled} Rupiah")
    } else {
        format!("{spelled} Rupiah")
    }
}

fn below_thousand(n: usize) -> String {
    let hundreds = n / 100;
    let rest = n % 100;
    let mut parts = Vec::new();
    match hundreds {
        0 => {}
        1 => parts.push("seratus".to_string()),
        h => parts.push(format!("{} ratus", ONES[h])),
    }
    if rest > 0 {
        parts.push(below_hundred(rest));
    }
    parts.join(" ")
}

fn below_hundred(n: usize) -> String {
    match n {
        0..=9 => ONES[n].to_string(),
        10 => "sepuluh".to_string(),
        11 => "sebelas".to_string(),
        12..=19 => format!("{} belas", ONES[n - 10]),
        _ => {
            let tens = format!("{} puluh", ONES[n / 10]);
            match n % 10 {
                0 => tens,
                d => format!("{tens} {}", ONES[d]),
            }
        }
    }
}
