//! Logging setup. Everything goes to stderr so stdout stays clean for JSON.

use tracing_subscriber::EnvFilter;

/// Base level for a given `-v` count. `RUST_LOG`, when set, wins.
fn default_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn build_env_filter(verbose: u8) -> anyhow::Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    let level = default_level(verbose);
    EnvFilter::try_new(level)
        .map_err(|e| anyhow::anyhow!("Invalid tracing filter '{}': {}", level, e))
}

pub fn init_logging(verbose: u8) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(build_env_filter(verbose)?)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {}", e))?;

    tracing::trace!("Logging initialized: verbose={}", verbose);
    Ok(())
}
