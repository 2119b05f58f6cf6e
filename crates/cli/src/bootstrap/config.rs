use ferrous_relay_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(config_path: Option<&str>, cli_overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;
    Ok(config)
}

/// Called once logging is up, so the summary actually reaches the subscriber.
pub fn log_config(config: &Config) {
    info!(
        listen = %config.server.listen_address(),
        upstream = %config.upstream.address,
        upstream_timeout_ms = config.upstream.timeout_ms,
        recv_buffer_size = config.server.recv_buffer_size,
        sweep_interval_secs = config.cache.sweep_interval_secs,
        snapshot = %config.cache.snapshot_path,
        "Configuration loaded"
    );
}
