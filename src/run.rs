mod cli;

pub(crate) use cli::{as_cli, print_usage};

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::path::Path;

use kasdesa::import::{self, stage_replace, SheetKind};
use kasdesa::models::describe_code;
use kasdesa::{Ledger, LedgerConfig, UnbudgetedPolicy};

/// Flags that consume the following argument.
const VALUE_FLAGS: &[&str] = &[
    "--cash",
    "--bank",
    "--opening",
    "--tax",
    "--tolerance",
    "--cash-code",
    "--account",
    "--export",
    "--year",
];

pub(crate) fn flag_value<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == name)
        .map(|w| w[1].as_str())
}

pub(crate) fn has_flag(args: &[String], name: &str) -> bool {
    args.iter().any(|a| a == name)
}

/// Arguments that are neither flags nor flag values.
pub(crate) fn positional(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
        } else if VALUE_FLAGS.contains(&arg.as_str()) {
            skip_next = true;
        } else if !arg.starts_with("--") {
            out.push(arg.as_str());
        }
    }
    out
}

pub(crate) fn parse_money(raw: &str) -> Result<Decimal> {
    import::parse_amount(raw).map_err(|e| anyhow::anyhow!(e))
}

/// Amount given with `name`, zero when the flag is absent.
pub(crate) fn amount_flag(args: &[String], name: &str) -> Result<Decimal> {
    match flag_value(args, name) {
        Some(raw) => parse_money(raw).with_context(|| format!("Invalid value for {name}")),
        None => Ok(Decimal::ZERO),
    }
}

/// Ledger settings, with overrides from `--tolerance`, `--cash-code` and
/// `--surface-unbudgeted`.
pub(crate) fn config_from(args: &[String]) -> Result<LedgerConfig> {
    let mut config = LedgerConfig::default();
    if let Some(raw) = flag_value(args, "--tolerance") {
        config.nota_tolerance = parse_money(raw).context("Invalid value for --tolerance")?;
    }
    if let Some(code) = flag_value(args, "--cash-code") {
        config.cash_account.code = code.to_string();
        if let Some(label) = describe_code(code) {
            config.cash_account.label = label.to_string();
        }
    }
    if has_flag(args, "--surface-unbudgeted") {
        config.unbudgeted_policy = UnbudgetedPolicy::Surface;
    }
    Ok(config)
}

/// Read one CSV into `ledger`. With `replace` the whole book is swapped
/// out, and any malformed row aborts before anything changes.
pub(crate) fn load_sheet(ledger: &mut Ledger, kind: SheetKind, file: &str, replace: bool) -> Result<()> {
    let path = Path::new(file);
    if !path.exists() {
        anyhow::bail!("File not found: {file}");
    }
    let sheet = import::read_sheet(path, kind, ledger.config())
        .with_context(|| format!("Failed to read {} from {file}", kind.as_str()))?;

    if replace {
        let staged = stage_replace(sheet)
            .with_context(|| format!("{} left unchanged", kind.as_str()))?;
        let stored = staged.confirm(ledger);
        eprintln!("{}: replaced with {stored} line(s) from {file}", kind.as_str());
    } else {
        let summary = ledger.import_additive(sheet);
        eprintln!(
            "{}: imported {} line(s) from {file} ({} skipped)",
            kind.as_str(),
            summary.imported,
            summary.skipped
        );
        for err in &summary.errors {
            eprintln!("  {err}");
        }
    }
    Ok(())
}
