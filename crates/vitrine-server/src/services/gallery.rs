//! Gallery image service.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};
use vitrine_core::Result;
use vitrine_store::{BlobStore, RowStore};

use crate::sync::{StoredBlob, SyncCoordinator, Upload};

/// Key prefix for gallery uploads in the metadata-backed configuration.
const GALLERY_PREFIX: &str = "gal";

/// One gallery entry as presented by the API.
#[derive(Debug, Clone, Serialize)]
pub struct ImageSummary {
    /// Storage key of the image blob.
    pub name: String,
    /// Public URL of the image.
    pub url: String,
    /// Comma-separated labels; absent in the storage-only configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
}

/// Gallery images: tagged photos in the metadata-backed configuration, a
/// bare bucket listing in the storage-only one.
pub struct GalleryService {
    sync: SyncCoordinator,
}

impl GalleryService {
    /// Storage-only configuration: listings come straight from the bucket
    /// and uploads carry no prefix.
    pub fn storage_only(blobs: Arc<dyn BlobStore>) -> Self {
        Self {
            sync: SyncCoordinator::storage_only(blobs, ""),
        }
    }

    /// Metadata-backed configuration: `table` holds one row per image.
    pub fn with_metadata(
        blobs: Arc<dyn BlobStore>,
        rows: Arc<dyn RowStore>,
        table: String,
    ) -> Self {
        Self {
            sync: SyncCoordinator::with_rows(blobs, rows, table, GALLERY_PREFIX),
        }
    }

    fn fields(tags: String) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("tags".into(), Value::String(tags));
        fields
    }

    pub async fn list(&self) -> Result<Vec<ImageSummary>> {
        let rows = self.sync.list().await?;
        Ok(rows
            .into_iter()
            .map(|row| ImageSummary {
                name: row
                    .get("key")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                url: row
                    .get("url")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                tags: row
                    .get("tags")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            })
            .collect())
    }

    pub async fn create(&self, image: Upload, tags: String) -> Result<StoredBlob> {
        self.sync.create(image, Self::fields(tags)).await
    }

    pub async fn update(
        &self,
        old_name: &str,
        tags: String,
        image: Option<Upload>,
    ) -> Result<StoredBlob> {
        self.sync.update(old_name, Self::fields(tags), image).await
    }

    pub async fn delete(&self, name: &str) -> Result<()> {
        self.sync.delete(name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use vitrine_store::{MemoryBlobStore, MemoryRowStore};

    fn upload(name: &str) -> Upload {
        Upload {
            filename: name.to_string(),
            content_type: Some("image/png".into()),
            bytes: Bytes::from_static(b"\x89PNG"),
        }
    }

    #[tokio::test]
    async fn metadata_listing_carries_tags() {
        let blobs = Arc::new(MemoryBlobStore::new());
        let rows = Arc::new(MemoryRowStore::new());
        let svc = GalleryService::with_metadata(blobs, rows, "gallery_images".into());

        svc.create(upload("a.png"), "nails, brides".into())
            .await
            .unwrap();

        let listed = svc.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert!(listed[0].name.starts_with("gal_"));
        assert_eq!(listed[0].tags.as_deref(), Some("nails, brides"));
    }

    #[tokio::test]
    async fn storage_only_listing_has_no_tags() {
        let blobs = Arc::new(MemoryBlobStore::new());
        let svc = GalleryService::storage_only(blobs);

        svc.create(upload("a.png"), String::new()).await.unwrap();

        let listed = svc.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert!(listed[0].tags.is_none());
        // No prefix in the storage-only configuration.
        assert!(listed[0].name.starts_with('_'));
    }

    #[test]
    fn summary_serialization_omits_absent_tags() {
        let summary = ImageSummary {
            name: "k".into(),
            url: "u".into(),
            tags: None,
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("tags").is_none());
    }
}
