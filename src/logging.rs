use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

const DEFAULT_FILTER: &str = "bank_ledger=warn";
const VERBOSE_FILTER: &str = "bank_ledger=debug";

/// Installs the global tracing subscriber, writing to stderr.
///
/// `RUST_LOG` is honoured unless `verbose` asks for debug output.
pub fn init(verbose: bool) {
    TRACING_INIT.call_once(|| {
        let filter = if verbose {
            EnvFilter::new(VERBOSE_FILTER)
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
        };

        // A subscriber installed elsewhere (e.g. by a test harness) wins.
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
