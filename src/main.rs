//! Book registry -- standalone HTTP server.
//!
//! Loads configuration, builds the table and log-bucket clients, and serves
//! the router until SIGTERM/SIGINT, then drains in-flight requests.

use clap::Parser;
use tracing::info;

use book_registry::{config, server, startup};

/// Command-line arguments for the book registry server.
#[derive(Parser, Debug)]
#[command(name = "book-registry", version, about = "Book registry REST service")]
struct Cli {
    /// Path to a YAML configuration file. Environment variables
    /// (BOOKS_TABLE_NAME, LOG_BUCKET_NAME, PROJECT_MAJOR_VERSION) override it.
    #[arg(short, long)]
    config: Option<String>,

    /// Override the bind address (host:port).
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = config::load_config(cli.config.as_deref())?;
    startup::init_tracing(&config.logging)?;
    match &cli.config {
        Some(path) => info!("Configuration loaded from {}", path),
        None => info!("No configuration file given, using defaults and environment"),
    }

    startup::init_metrics(&config)?;

    let bind_addr = cli
        .bind
        .unwrap_or_else(|| format!("{}:{}", config.server.host, config.server.port));
    let mount = config.api.mount_path().unwrap_or_default();

    let state = startup::build_state(config).await?;
    info!("{} {} starting", state.project.name, state.project.version);

    let app = server::app(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Listening on {} (API mounted at '{}/')", bind_addr, mount);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");

    Ok(())
}

/// Wait for SIGTERM or SIGINT (Ctrl+C), then return to trigger graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT, shutting down");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down");
        },
    }
}
