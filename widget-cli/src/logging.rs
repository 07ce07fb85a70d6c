use anyhow::anyhow;
use tracing_subscriber::EnvFilter;

/// Installs the stderr subscriber. Respects `RUST_LOG`, defaults to `warn`.
pub fn init() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow!("Failed to install tracing subscriber: {err}"))
}
