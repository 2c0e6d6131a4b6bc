//! Binary entry point: open the library database, run the menu, close the
//! database again whichever way the menu ended.
use library_manager::{run_shell, Config, Store};
use tracing_subscriber::{fmt, EnvFilter};

/// Log filter for the binary. Only problems are logged, and they go to stderr
/// so they never interleave with the menu on stdout.
const LOG_FILTER: &str = "warn";

fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::new(LOG_FILTER))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = Config::default();
    let mut store = Store::open(&config.db_path)?;

    let result = run_shell(&store);
    let closed = store.shutdown();

    result?;
    closed?;
    Ok(())
}
