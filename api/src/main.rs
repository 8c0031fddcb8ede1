use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::{broadcast, watch};

mod handlers;
mod routes;
mod state;
mod templates;

use common::catalog::{JobSource, JsonFileCatalog, StaticCatalog};
use common::config::Settings;
use common::engine::JobQueryEngine;
use common::models::FilterState;
use common::telemetry;
use state::{AppState, BroadcastNotifier, SseEvent};

/// Forward filter state changes from the engine to SSE clients
#[tracing::instrument(skip_all)]
async fn forward_filter_changes(mut rx: watch::Receiver<FilterState>, state: AppState) {
    tracing::info!("Subscribed to filter state changes");

    while rx.changed().await.is_ok() {
        let filters = rx.borrow_and_update().clone();
        tracing::debug!(filters = ?filters, "Filter state changed");

        state.broadcast_event(SseEvent::FiltersChanged {
            active_filters: filters.active_filter_count(),
            filters,
        });
    }

    tracing::info!("Filter state channel closed");
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Settings::load()?;
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

    telemetry::init_logging(
        &config.observability.log_level,
        config.observability.tracing_endpoint.as_deref(),
    )?;
    tracing::info!(
        host = %config.server.host,
        port = %config.server.port,
        "Configuration loaded"
    );

    let metrics_handle = telemetry::init_metrics()?;

    // Build the query engine over the configured catalog
    let (sse_tx, _) = broadcast::channel(100);
    let notifier = Arc::new(BroadcastNotifier::new(sse_tx.clone()));
    let source: Box<dyn JobSource> = match &config.catalog.path {
        Some(path) => {
            tracing::info!(path = %path, "Using JSON file catalog");
            Box::new(JsonFileCatalog::new(path))
        }
        None => {
            tracing::info!("Using built-in sample catalog");
            Box::new(StaticCatalog)
        }
    };
    let engine = JobQueryEngine::new(source.as_ref(), notifier)?;
    let filter_rx = engine.subscribe();

    let state = AppState::new(engine, config.clone(), Some(metrics_handle), sse_tx);

    // Start background task pushing filter changes to SSE clients
    tokio::spawn(forward_filter_changes(filter_rx, state.clone()));

    let app = routes::create_router(state);

    // Start server
    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));
    tracing::info!(addr = %addr, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if config.observability.tracing_endpoint.is_some() {
        telemetry::shutdown_tracer();
    }

    tracing::info!("API server stopped");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal");
        },
    }

    tracing::info!("Initiating graceful shutdown");
}
