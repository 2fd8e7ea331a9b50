//! Application context shared by all request handlers (via Axum state).

use std::sync::Arc;

use vitrine_core::config::Config;

use crate::services::{GalleryService, PromotionService};

/// Read-only state assembled once at startup.
///
/// This is cheaply cloneable because it only holds `Arc`s. There is no
/// shared mutable state: concurrent requests race on the remote stores
/// themselves, last write wins.
#[derive(Clone)]
pub struct AppContext {
    /// Immutable application configuration snapshot.
    pub config: Arc<Config>,
    /// Gallery image service (present in both configurations).
    pub gallery: Arc<GalleryService>,
    /// Promotion service; `None` in the storage-only configuration.
    pub promotions: Option<Arc<PromotionService>>,
}
