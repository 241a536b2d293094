mod config;
mod dto;
mod error;
mod handlers;
mod models;
mod repository;
mod service;

use std::sync::Arc;

use handlers::rest;
use repository::{MongoRepository, NoteStore};
use tracing_subscriber::EnvFilter;

use service::NoteService;

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load config
    let cfg = config::load_config().unwrap_or_else(|e| {
        tracing::error!("Failed to load configuration: {e}");
        panic!("failed to load configuration: {e}");
    });

    // Store connection
    let repo = MongoRepository::new(&cfg.store).await.unwrap_or_else(|e| {
        tracing::error!("Failed to set up the store client: {e}");
        panic!("failed to set up the store client: {e}");
    });

    repo.ping().await.unwrap_or_else(|e| {
        tracing::error!("Failed to reach the store: {e}");
        panic!("failed to reach the store: {e}");
    });
    tracing::info!("Connected to the store");

    let client = repo.client();

    // Service creation
    let service = Arc::new(NoteService::new(Arc::new(repo)));

    let router = rest::router(service);

    let listener = tokio::net::TcpListener::bind(cfg.socket_addr())
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind {}: {e}", cfg.socket_addr());
            panic!("failed to bind {}: {e}", cfg.socket_addr());
        });

    match listener.local_addr() {
        Ok(addr) => tracing::info!("Started listening on {}", addr),
        Err(e) => tracing::warn!("Listening, but local address is unknown: {e}"),
    }

    if let Err(e) = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("HTTP server error: {e}");
    }

    // Teardown
    client.shutdown().await;
    tracing::info!("Store connections closed, bye");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {e}");
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
                tracing::error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
