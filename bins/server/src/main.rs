//! Ledgerline API Server
//!
//! Main entry point for the Ledgerline service.

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ledgerline_api::{AppState, create_router};
use ledgerline_backend::{BackendConnector, HttpLedgerBackend, LedgerGateway};
use ledgerline_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ledgerline=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load and check configuration
    let config = AppConfig::load()?;
    config.validate()?;

    // The budget is opened lazily on the first request
    let backend = HttpLedgerBackend::new(&config.actual.bridge_url)?;
    info!(
        bridge = %backend.endpoint(),
        server_url = %config.actual.server_url,
        "Ledger bridge configured"
    );
    let connector = Arc::new(BackendConnector::new(Arc::new(backend), &config.actual));
    let gateway = Arc::new(LedgerGateway::new(connector));

    let app = create_router(AppState::new(gateway.clone()));

    // Start server
    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped, closing ledger backend");
    if let Err(e) = gateway.shutdown().await {
        error!(error = %e, "Ledger backend did not shut down cleanly");
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
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
                error!(error = %e, "Failed to listen for SIGTERM");
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
