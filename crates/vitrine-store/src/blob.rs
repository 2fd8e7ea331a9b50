//! Object-storage accessor trait.

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use vitrine_core::Result;

/// One entry in a bucket listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectEntry {
    /// Object key within the bucket.
    pub name: String,
}

/// Remote object storage keyed by a string path.
///
/// Implementations talk to an external service; any upstream failure is
/// surfaced as [`vitrine_core::Error::Remote`] with the raw failure message.
/// Nothing is retried.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store an object under `key`, replacing any existing object.
    async fn put(&self, key: &str, content_type: Option<&str>, bytes: Bytes) -> Result<()>;

    /// Delete the object under `key`.
    async fn remove(&self, key: &str) -> Result<()>;

    /// Enumerate the bucket in the store's native listing order.
    ///
    /// Storage-internal placeholder entries are NOT filtered here; callers
    /// that present listings decide what to skip.
    async fn list(&self) -> Result<Vec<ObjectEntry>>;

    /// Publicly reachable URL for the object under `key`.
    ///
    /// This is derived deterministically from the store's configuration, so
    /// every call site gets one canonical URL shape regardless of what the
    /// upstream API returns from its own endpoints.
    fn public_url(&self, key: &str) -> String;
}
