use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "rusty_sos=warn";
const VERBOSE_LOG_FILTER: &str = "rusty_sos=debug";

/// Loads `.env` (if any) so clap's `env` fallbacks can see it.
pub fn load_env_file() {
    dotenv::dotenv().ok();
}

/// Installs the stderr log subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose {
        VERBOSE_LOG_FILTER
    } else {
        DEFAULT_LOG_FILTER
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // A subscriber may already be installed (tests, embedding apps)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
