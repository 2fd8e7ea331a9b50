//! Promotion service (metadata-backed configuration only).

use std::sync::Arc;

use serde_json::{Map, Value};
use vitrine_core::Result;
use vitrine_store::{BlobStore, RowStore};

use crate::sync::{StoredBlob, SyncCoordinator, Upload};

/// Key prefix for promotion uploads.
const PROMO_PREFIX: &str = "promo";

/// Editable fields of a promotion.
#[derive(Debug, Clone)]
pub struct PromotionFields {
    pub title: String,
    pub body: String,
    pub tag: String,
}

impl PromotionFields {
    fn into_map(self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("title".into(), Value::String(self.title));
        fields.insert("body".into(), Value::String(self.body));
        fields.insert("tag".into(), Value::String(self.tag));
        fields
    }
}

/// Promotions: a campaign image plus title, body copy, and a campaign tag.
pub struct PromotionService {
    sync: SyncCoordinator,
}

impl PromotionService {
    pub fn new(blobs: Arc<dyn BlobStore>, rows: Arc<dyn RowStore>, table: String) -> Self {
        Self {
            sync: SyncCoordinator::with_rows(blobs, rows, table, PROMO_PREFIX),
        }
    }

    /// Full promotion rows, newest first.
    pub async fn list(&self) -> Result<Vec<Map<String, Value>>> {
        self.sync.list().await
    }

    pub async fn create(&self, image: Upload, fields: PromotionFields) -> Result<StoredBlob> {
        self.sync.create(image, fields.into_map()).await
    }

    pub async fn update(
        &self,
        old_name: &str,
        fields: PromotionFields,
        image: Option<Upload>,
    ) -> Result<StoredBlob> {
        self.sync.update(old_name, fields.into_map(), image).await
    }

    pub async fn delete(&self, name: &str) -> Result<()> {
        self.sync.delete(name).await
    }
}
