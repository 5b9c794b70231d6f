use crate::http::{AppState, router};
use anyhow::{Context, Result};
use folio_relay_core::Config;
use folio_relay_deployer::{DeployOrchestrator, NetlifyClient};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};

/// Start the deploy relay.
///
/// Configuration comes from the optional TOML file, then environment
/// variables, then the `--port` flag.
pub async fn run(config_path: Option<PathBuf>, port: Option<u16>) -> Result<()> {
    let mut config = Config::load(config_path.as_deref()).context("Failed to load configuration")?;
    if let Some(port) = port {
        config.server.addr.set_port(port);
    }

    info!(
        addr = %config.server.addr,
        api_base = %config.netlify.api_base,
        environment = ?config.server.environment,
        "Configuration loaded"
    );
    if !config.has_token() {
        warn!("NETLIFY_TOKEN is not set; deploy requests will fail until it is configured");
    }

    let client = NetlifyClient::new(&config.netlify).context("Failed to build Netlify client")?;
    let orchestrator = Arc::new(DeployOrchestrator::new(
        Arc::new(client),
        config.deploy.clone(),
    ));
    let app = router(AppState::new(orchestrator, &config));

    let listener = tokio::net::TcpListener::bind(config.server.addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.server.addr))?;

    info!(addr = %config.server.addr, "Backend running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C"),
        () = terminate => info!("Received SIGTERM"),
    }
}
