use clap::Parser;
use ferrous_relay_domain::CliOverrides;
use ferrous_relay_infrastructure::dns::{CacheSnapshotFile, DnsCache, DnsCacheMaintenance};
use ferrous_relay_jobs::{CacheSweepJob, JobRunner};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "ferrous-relay")]
#[command(version = "0.1.0")]
#[command(about = "Ferrous Relay - caching DNS forwarder")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Upstream resolver (ip:port)
    #[arg(short = 'u', long)]
    upstream: Option<String>,

    /// Cache snapshot path
    #[arg(long, value_name = "FILE")]
    snapshot: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind.clone(),
        upstream: cli.upstream.clone(),
        snapshot_path: cli.snapshot.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting Ferrous Relay v{}", env!("CARGO_PKG_VERSION"));
    bootstrap::log_config(&config);

    let snapshot = CacheSnapshotFile::new(&config.cache.snapshot_path);
    let cache = Arc::new(DnsCache::new());
    bootstrap::restore_cache(&cache, &snapshot);

    let shutdown = CancellationToken::new();

    server::spawn_console(shutdown.clone());
    server::spawn_interrupt_watcher(shutdown.clone());

    let maintenance = Arc::new(DnsCacheMaintenance::new(Arc::clone(&cache)));
    let job_handles = JobRunner::new()
        .with_cache_sweep(
            CacheSweepJob::new(maintenance)
                .with_interval(Duration::from_secs(config.cache.sweep_interval_secs)),
        )
        .with_shutdown_token(shutdown.clone())
        .start();

    match di::DnsServices::new(&config, Arc::clone(&cache)).await {
        Ok(services) => {
            let served = server::start_dns_server(
                config.server.listen_address(),
                config.server.recv_buffer_size,
                services.handler,
                shutdown.clone(),
            )
            .await;

            if let Err(e) = served {
                error!(error = %e, "DNS server failed to start");
            }
        }
        Err(e) => error!(error = %e, "Failed to initialize DNS services"),
    }

    shutdown.cancel();
    JobRunner::join_all(job_handles).await;

    bootstrap::persist_cache(&cache, &snapshot);

    info!("Ferrous Relay stopped");
    Ok(())
}
