use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;

use studentpulse_server::server::{ServerConfig, StudentPulseServer};
use studentpulse_server::create_app;

/// StudentPulse HTTP Server
#[derive(Parser, Debug)]
#[command(name = "studentpulse-server")]
#[command(about = "Student performance analytics HTTP API server")]
struct Args {
    /// Server bind address
    #[arg(long, env = "HOST")]
    host: Option<String>,

    /// Server port
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Apply pending migrations before serving
    #[arg(long)]
    migrate: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before reading any configuration
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(args.verbose);

    let mut config = ServerConfig::from_env();
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(database_url) = args.database_url {
        config.database_url = database_url;
    }
    if args.migrate {
        config.run_migrations = true;
    }

    info!("Starting StudentPulse server");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Bind address: {}:{}", config.host, config.port);

    let run_migrations = config.run_migrations;
    let host = config.host.clone();
    let port = config.port;

    let server = StudentPulseServer::new(config)
        .await
        .context("failed to initialize server")?;

    if run_migrations {
        server
            .db_pool
            .run_migrations()
            .await
            .context("failed to apply migrations")?;
    }

    let app = create_app(server);

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .with_context(|| format!("invalid bind address {host}:{port}"))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!("StudentPulse server running on http://{addr}");
    info!("Health check available at: http://{addr}/health");
    info!("API available at: http://{addr}/api");

    axum::serve(listener, app)
        .await
        .context("HTTP server error")?;

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
