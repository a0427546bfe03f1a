use clap::Parser;
use geomx_dns_domain::CliOverrides;
use geomx_dns_infrastructure::dns::server::{InterceptServerHandler, ZoneServerHandler};
use std::net::SocketAddr;
use tokio::task::JoinSet;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "geomx-dns")]
#[command(version)]
#[command(about = "Geo-aware DNS proxy: rewrites MX answers per mail-host location, serves geo-selected zones")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Intercept proxy port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Zone resolver port (enables the zone service)
    #[arg(short = 'z', long)]
    zone_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Upstream DNS server (host:port)
    #[arg(short = 'u', long)]
    upstream: Option<String>,

    /// Don't intercept matching query names (glob, repeatable)
    #[arg(short = 's', long = "skip", value_name = "PATTERN")]
    skip: Vec<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        intercept_port: cli.port,
        zone_port: cli.zone_port,
        bind_address: cli.bind.clone(),
        upstream: cli.upstream.clone(),
        skip: cli.skip.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting geomx-dns v{}", env!("CARGO_PKG_VERSION"));

    let services = di::Services::build(&config).await?;

    let mut join_set: JoinSet<()> = JoinSet::new();

    if let Some(router) = services.router {
        let addr: SocketAddr =
            format!("{}:{}", config.server.bind_address, config.intercept.port).parse()?;
        let tcp_enabled = config.server.tcp_enabled;
        info!(
            listen = %addr,
            upstream = %config.upstream.server,
            transports = if tcp_enabled { "UDP/TCP" } else { "UDP" },
            "Starting intercept proxy"
        );
        join_set.spawn(async move {
            let handler = InterceptServerHandler::new(router);
            if let Err(e) = server::serve_dns(addr, tcp_enabled, handler).await {
                error!(error = %e, "Intercept proxy server error");
            }
        });
    }

    if let Some(selector) = services.zone_selector {
        let addr: SocketAddr =
            format!("{}:{}", config.server.bind_address, config.zones.port).parse()?;
        let tcp_enabled = config.server.tcp_enabled;
        info!(
            listen = %addr,
            transports = if tcp_enabled { "UDP/TCP" } else { "UDP" },
            "Starting geo zone resolver"
        );
        join_set.spawn(async move {
            let handler = ZoneServerHandler::new(selector);
            if let Err(e) = server::serve_dns(addr, tcp_enabled, handler).await {
                error!(error = %e, "Zone resolver server error");
            }
        });
    }

    // runs until terminated externally
    while join_set.join_next().await.is_some() {}

    info!("Server shutdown complete");
    Ok(())
}
