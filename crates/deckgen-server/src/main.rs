//! deckgen-server - REST API server binary.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use deckgen_core::AppConfig;
use deckgen_llm::ProviderFactory;
use deckgen_server::{create_server, init_tracing, AppState};
use tokio::signal;
use tracing::{info, warn};

/// Extract job ads and resumes with LLMs and tailor resumes to job ads.
#[derive(Debug, Parser)]
#[command(name = "deckgen-server", version, about)]
struct Args {
    /// Path to a .toml, .yaml or .json config file.
    #[arg(short, long, env = "DECKGEN_CONFIG")]
    config: Option<PathBuf>,

    /// Print the default configuration as YAML and exit.
    #[arg(long)]
    dump_config: bool,
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.dump_config {
        print!("{}", AppConfig::default().to_yaml()?);
        return Ok(());
    }

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::load(args.config.as_deref()).context("failed to load config")?;
    config.validate()?;

    init_tracing(&config.log)?;

    let registry = ProviderFactory::registry(&config.providers)
        .context("failed to initialize providers")?;
    if registry.is_empty() {
        warn!("No provider enabled; extraction and adaptation requests will fail");
    } else {
        info!(providers = ?registry.names(), "Providers ready");
    }

    let app = create_server(AppState::new(registry, &config.server));

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("invalid listen address")?;
    info!("Starting deckgen-server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Serve with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            info!("Shutdown signal received, draining connections...");
        })
        .await?;

    info!("Server stopped cleanly");
    Ok(())
}
