//! Shared test harness for API integration tests.
//!
//! Provides [`TestHarness`], which assembles an [`AppContext`] over in-memory
//! stores and can start the Axum router on a random port for HTTP-level
//! testing with `reqwest`.

use std::net::SocketAddr;
use std::sync::Arc;

use vitrine_core::config::{Config, MetadataConfig};
use vitrine_server::context::AppContext;
use vitrine_server::router::build_router;
use vitrine_server::services::{GalleryService, PromotionService};
use vitrine_store::{BlobStore, MemoryBlobStore, MemoryRowStore, RowStore};

/// Shared secret configured into every harness.
pub const TEST_SECRET: &str = "test-secret";

/// Gallery table name used by the metadata-backed harness.
pub const GALLERY_TABLE: &str = "gallery_images";

/// Promotions table name used by the metadata-backed harness.
pub const PROMOTIONS_TABLE: &str = "promotions";

/// Harness wrapping an [`AppContext`] backed by in-memory stores.
///
/// The concrete store handles stay accessible so tests can assert on what
/// actually reached storage.
pub struct TestHarness {
    pub ctx: AppContext,
    pub blobs: Arc<MemoryBlobStore>,
    pub rows: Option<Arc<MemoryRowStore>>,
}

impl TestHarness {
    /// Metadata-backed configuration: gallery rows + promotions.
    pub fn metadata_backed() -> Self {
        Self::metadata_backed_with_secret(TEST_SECRET)
    }

    /// Metadata-backed configuration with a custom shared secret.
    pub fn metadata_backed_with_secret(secret: &str) -> Self {
        let mut config = Config::default();
        config.auth.secret = secret.into();
        config.metadata = Some(MetadataConfig::default());

        let blobs = Arc::new(MemoryBlobStore::new());
        let rows = Arc::new(MemoryRowStore::new());

        let gallery = GalleryService::with_metadata(
            Arc::clone(&blobs) as Arc<dyn BlobStore>,
            Arc::clone(&rows) as Arc<dyn RowStore>,
            GALLERY_TABLE.into(),
        );
        let promotions = PromotionService::new(
            Arc::clone(&blobs) as Arc<dyn BlobStore>,
            Arc::clone(&rows) as Arc<dyn RowStore>,
            PROMOTIONS_TABLE.into(),
        );

        let ctx = AppContext {
            config: Arc::new(config),
            gallery: Arc::new(gallery),
            promotions: Some(Arc::new(promotions)),
        };

        Self {
            ctx,
            blobs,
            rows: Some(rows),
        }
    }

    /// Storage-only configuration: no rows store, no promotions.
    pub fn storage_only() -> Self {
        let mut config = Config::default();
        config.auth.secret = TEST_SECRET.into();

        let blobs = Arc::new(MemoryBlobStore::new());
        let gallery = GalleryService::storage_only(Arc::clone(&blobs) as Arc<dyn BlobStore>);

        let ctx = AppContext {
            config: Arc::new(config),
            gallery: Arc::new(gallery),
            promotions: None,
        };

        Self {
            ctx,
            blobs,
            rows: None,
        }
    }

    /// Start the router on a random port and return the harness with the
    /// bound socket address.
    pub async fn with_server(self) -> (Self, SocketAddr) {
        let app = build_router(self.ctx.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        (self, addr)
    }
}

/// A multipart form carrying a fake PNG under the `image` field.
pub fn image_form(filename: &str) -> reqwest::multipart::Form {
    let part = reqwest::multipart::Part::bytes(b"\x89PNG fake image data".to_vec())
        .file_name(filename.to_string())
        .mime_str("image/png")
        .unwrap();
    reqwest::multipart::Form::new().part("image", part)
}

/// GET `path` with the shared secret attached.
pub async fn get_authed(addr: SocketAddr, path: &str) -> reqwest::Response {
    reqwest::Client::new()
        .get(format!("http://{addr}{path}"))
        .header("x-app-password", TEST_SECRET)
        .send()
        .await
        .unwrap()
}

/// POST a multipart form to `path` with the shared secret attached.
pub async fn post_form(
    addr: SocketAddr,
    path: &str,
    form: reqwest::multipart::Form,
) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("http://{addr}{path}"))
        .header("x-app-password", TEST_SECRET)
        .multipart(form)
        .send()
        .await
        .unwrap()
}

/// DELETE `path` with the shared secret attached.
pub async fn delete_authed(addr: SocketAddr, path: &str) -> reqwest::Response {
    reqwest::Client::new()
        .delete(format!("http://{addr}{path}"))
        .header("x-app-password", TEST_SECRET)
        .send()
        .await
        .unwrap()
}
