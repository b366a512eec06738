use clap::Parser;
use delve_dns_domain::CliOverrides;
use delve_dns_jobs::CacheMaintenanceJob;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "delve-dns")]
#[command(version)]
#[command(about = "Delve DNS - caching iterative DNS resolver")]
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

    /// Root server every resolution starts from (IP address)
    #[arg(short = 'r', long)]
    root_server: Option<String>,

    /// Cache snapshot path
    #[arg(long, value_name = "FILE")]
    cache_path: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind,
        root_server: cli.root_server,
        cache_path: cli.cache_path,
        log_level: cli.log_level,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config.logging);

    info!("Starting Delve DNS Server v{}", env!("CARGO_PKG_VERSION"));

    let dns_services = di::DnsServices::new(&config)?;
    let shutdown = CancellationToken::new();
    // Not a child of `shutdown`: the final flush has to wait for the server
    // to drain its in-flight queries.
    let maintenance_shutdown = CancellationToken::new();

    let maintenance_job = dns_services.cache_maintenance.clone().map(|maintenance| {
        Arc::new(
            CacheMaintenanceJob::new(maintenance)
                .with_interval(config.cache.sweep_interval_secs)
                .with_cancellation(maintenance_shutdown.clone()),
        )
    });
    if let Some(job) = &maintenance_job {
        Arc::clone(job).start().await;
    }

    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        bootstrap::wait_for_shutdown_signal().await;
        info!("Shutdown signal received");
        signal_token.cancel();
    });

    let dns_addr = bootstrap::listen_address(&config.server)?;
    let result = server::start_dns_server(
        dns_addr,
        dns_services.handler,
        config.server.max_datagram_size,
        shutdown.clone(),
    )
    .await;

    if let Err(e) = &result {
        error!(error = %e, "DNS server error");
        shutdown.cancel();
    }

    if let Some(job) = maintenance_job {
        job.close().await;
    }

    if let Some(cache) = &dns_services.cache {
        info!(
            entries = cache.len(),
            hit_rate = cache.metrics().hit_rate(),
            "Final cache statistics"
        );
    }

    info!("Server shutdown complete");
    result
}
