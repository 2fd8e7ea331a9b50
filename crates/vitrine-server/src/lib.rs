//! vitrine-server: HTTP API for managing media assets across remote stores.
//!
//! This crate ties the store accessors together into a running server:
//!
//! - Axum-based HTTP API behind a shared-secret gate
//! - The [`sync::SyncCoordinator`], which defines how an asset is created,
//!   replaced, and removed across the object store and the optional rows
//!   store
//! - Gallery and promotion domain services over the coordinator
//! - Graceful shutdown via signal handling

pub mod context;
pub mod error;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod services;
pub mod sync;

use std::net::SocketAddr;
use std::sync::Arc;

use vitrine_core::config::Config;
use vitrine_core::Error;
use vitrine_store::{BlobStore, HttpBlobStore, HttpRowStore, RowStore};

use crate::context::AppContext;
use crate::services::{GalleryService, PromotionService};

/// Start the vitrine server.
///
/// This is the main entry point. It constructs the store accessors once from
/// configuration, assembles the [`AppContext`], and serves the HTTP API until
/// a shutdown signal is received. All store handles are built here and passed
/// down; nothing reaches for ambient global state.
pub async fn start(config: Config) -> vitrine_core::Result<()> {
    for warning in config.validate() {
        tracing::warn!("Config warning: {warning}");
    }

    let client = reqwest::Client::new();
    let blobs: Arc<dyn BlobStore> = Arc::new(HttpBlobStore::new(client.clone(), &config.storage));

    let (gallery, promotions) = match &config.metadata {
        Some(meta) => {
            tracing::info!("Metadata store configured; running metadata-backed");
            let rows: Arc<dyn RowStore> = Arc::new(HttpRowStore::new(client, meta));
            let gallery = GalleryService::with_metadata(
                Arc::clone(&blobs),
                Arc::clone(&rows),
                meta.gallery_table.clone(),
            );
            let promotions =
                PromotionService::new(Arc::clone(&blobs), rows, meta.promotions_table.clone());
            (gallery, Some(Arc::new(promotions)))
        }
        None => {
            tracing::info!("No metadata store configured; running storage-only");
            (GalleryService::storage_only(Arc::clone(&blobs)), None)
        }
    };

    let ctx = AppContext {
        config: Arc::new(config.clone()),
        gallery: Arc::new(gallery),
        promotions,
    };

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| Error::Internal(format!("Invalid server address: {e}")))?;

    let app = router::build_router(ctx);

    tracing::info!("Starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::Internal(format!("Failed to bind to {addr}: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| Error::Internal(format!("Server error: {e}")))?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    tracing::info!("Shutdown signal received");
}
