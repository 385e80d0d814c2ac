use clap::Parser;
use fabric_dns_application::ports::{RecordSource, SnapshotRefresh};
use fabric_dns_application::use_cases::ResolveQueryUseCase;
use fabric_dns_domain::CliOverrides;
use fabric_dns_infrastructure::dns::{DnsServerHandler, Refuse};
use fabric_dns_infrastructure::sources::{BootstrapFileSource, PgTopologySource};
use fabric_dns_jobs::{JobRunner, SnapshotRefreshJob};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

mod bootstrap;
mod server;

#[derive(Parser)]
#[command(name = "fabric-dns")]
#[command(version = "0.1.0")]
#[command(about = "Fabric DNS - Authoritative DNS for fabric topology zones")]
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

    /// Topology database connection string
    #[arg(long)]
    datasource: Option<String>,

    /// Path to the static bootstrap file
    #[arg(long)]
    bootstrap_path: Option<String>,

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
        datasource: cli.datasource.clone(),
        bootstrap_path: cli.bootstrap_path.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting Fabric DNS Server v{}", env!("CARGO_PKG_VERSION"));

    let bootstrap_source = Arc::new(BootstrapFileSource::new(
        &config.bootstrap.path,
        config.zones.bootstrap_apex(),
        config.bootstrap.ttl,
    ));

    let topology_source = Arc::new(PgTopologySource::new(
        config.topology.clone(),
        config.zones.dynamic_apex(),
    ));
    // A down store at startup is tolerated; lookups retry the connection.
    topology_source.connect().await;

    let use_case = Arc::new(ResolveQueryUseCase::new(
        config.zones.zone_set(),
        config.zones.fallthrough_set(),
        topology_source.clone() as Arc<dyn RecordSource>,
        bootstrap_source.clone() as Arc<dyn RecordSource>,
    ));

    let shutdown = CancellationToken::new();

    let snapshot_job = SnapshotRefreshJob::new(bootstrap_source.clone() as Arc<dyn SnapshotRefresh>)
        .with_interval(config.bootstrap.refresh_interval_secs);

    JobRunner::new()
        .with_snapshot_refresh(snapshot_job)
        .with_shutdown_token(shutdown.clone())
        .start()
        .await;

    let dns_addr = format!("{}:{}", config.server.bind_address, config.server.dns_port);
    let handler = DnsServerHandler::new(use_case, Refuse);

    let server_shutdown = shutdown.clone();
    let server_handle = tokio::spawn(async move {
        if let Err(e) = server::start_dns_server(dns_addr, handler, server_shutdown).await {
            error!(error = %e, "DNS server error");
        }
    });

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");

    shutdown.cancel();
    let _ = server_handle.await;
    topology_source.close().await;

    info!("Server shutdown complete");
    Ok(())
}
