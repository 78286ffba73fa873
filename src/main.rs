mod run;

use anyhow::Result;
use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Log to stderr so report output on stdout stays clean.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("kasdesa=info"));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    });
}

fn main() -> Result<()> {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    match args.len() {
        2.. => run::as_cli(&args),
        _ => {
            run::print_usage();
            Ok(())
        }
    }
}
