//! Resource synchronization across the object store and the rows store.
//!
//! A logical asset is an image blob plus, in the metadata-backed
//! configuration, one row describing it. The two stores fail independently
//! and nothing here is transactional: each verb has a fixed call order whose
//! partial-failure windows are part of the contract, not incidental. See the
//! per-method docs for where those windows are.

use std::sync::Arc;

use bytes::Bytes;
use serde_json::{Map, Value};
use vitrine_core::{storage_key_now, Result};
use vitrine_store::{BlobStore, RowStore};

/// Column identifying an asset's row; equals the blob key.
const KEY_COLUMN: &str = "key";

/// A file received from a client, ready for storage.
#[derive(Debug, Clone)]
pub struct Upload {
    /// Original client-side filename (sanitized during key derivation).
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Key and public URL of a blob after a create or replace.
#[derive(Debug, Clone)]
pub struct StoredBlob {
    pub key: String,
    pub url: String,
}

struct RowBinding {
    store: Arc<dyn RowStore>,
    table: String,
}

/// Orchestrates create/update/delete/list for one asset kind.
///
/// Holds the injected store handles plus the key prefix distinguishing the
/// asset kind. In the storage-only configuration there is no row binding and
/// the blob store is the sole source of truth.
pub struct SyncCoordinator {
    blobs: Arc<dyn BlobStore>,
    rows: Option<RowBinding>,
    prefix: String,
}

impl SyncCoordinator {
    /// Coordinator without a rows store (storage-only configuration).
    pub fn storage_only(blobs: Arc<dyn BlobStore>, prefix: impl Into<String>) -> Self {
        Self {
            blobs,
            rows: None,
            prefix: prefix.into(),
        }
    }

    /// Coordinator backed by a rows table (metadata-backed configuration).
    pub fn with_rows(
        blobs: Arc<dyn BlobStore>,
        rows: Arc<dyn RowStore>,
        table: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            blobs,
            rows: Some(RowBinding {
                store: rows,
                table: table.into(),
            }),
            prefix: prefix.into(),
        }
    }

    /// Upload a blob under a freshly derived key and resolve its public URL.
    async fn store_blob(&self, upload: &Upload) -> Result<StoredBlob> {
        let key = storage_key_now(&self.prefix, &upload.filename);
        self.blobs
            .put(&key, upload.content_type.as_deref(), upload.bytes.clone())
            .await?;
        let url = self.blobs.public_url(&key);
        Ok(StoredBlob { key, url })
    }

    /// Create an asset: blob upload first, then (if configured) the row.
    ///
    /// The row insert only runs after the blob upload succeeds. If the insert
    /// fails the fresh blob stays behind as an orphan; there is no rollback
    /// and the caller simply sees the rows-service error.
    pub async fn create(
        &self,
        upload: Upload,
        fields: Map<String, Value>,
    ) -> Result<StoredBlob> {
        let stored = self.store_blob(&upload).await?;

        if let Some(rows) = &self.rows {
            let mut row = fields;
            row.insert(KEY_COLUMN.into(), Value::String(stored.key.clone()));
            row.insert("url".into(), Value::String(stored.url.clone()));
            rows.store.insert(&rows.table, Value::Object(row)).await?;
        }

        Ok(stored)
    }

    /// Update an asset's fields, optionally replacing its blob.
    ///
    /// When a replacement is supplied, the old blob is removed BEFORE the new
    /// upload starts; a failure between the two leaves the row pointing at a
    /// vanished blob until a later update succeeds. The row update (matched
    /// on the old key) runs last and carries the new key/url when the blob
    /// was replaced. Without a replacement the key is stable and only the
    /// other fields change.
    pub async fn update(
        &self,
        old_key: &str,
        fields: Map<String, Value>,
        replacement: Option<Upload>,
    ) -> Result<StoredBlob> {
        let mut changes = fields;
        let mut current = StoredBlob {
            key: old_key.to_string(),
            url: self.blobs.public_url(old_key),
        };

        if let Some(upload) = replacement {
            self.blobs.remove(old_key).await?;
            let stored = self.store_blob(&upload).await?;
            changes.insert(KEY_COLUMN.into(), Value::String(stored.key.clone()));
            changes.insert("url".into(), Value::String(stored.url.clone()));
            current = stored;
        }

        if let Some(rows) = &self.rows {
            rows.store
                .update(&rows.table, KEY_COLUMN, old_key, Value::Object(changes))
                .await?;
        }

        Ok(current)
    }

    /// Delete an asset: row delete and blob removal are issued independently.
    ///
    /// Neither leg waits on nor rolls back from the other; both always run.
    /// A partial failure can strand a blob that no longer appears in any
    /// listing. The row-side error wins when both legs fail.
    pub async fn delete(&self, key: &str) -> Result<()> {
        match &self.rows {
            Some(rows) => {
                let (row_res, blob_res) = tokio::join!(
                    rows.store.delete(&rows.table, KEY_COLUMN, key),
                    self.blobs.remove(key),
                );
                row_res?;
                blob_res
            }
            None => self.blobs.remove(key).await,
        }
    }

    /// List assets.
    ///
    /// Metadata-backed: the rows store is authoritative, newest first. Each
    /// row already carries `key` and `url` alongside its domain fields.
    ///
    /// Storage-only: a live bucket listing in the store's native order,
    /// skipping dot-prefixed storage-internal placeholder entries, each
    /// entry resolved to `{key, url}`.
    pub async fn list(&self) -> Result<Vec<Map<String, Value>>> {
        match &self.rows {
            Some(rows) => {
                let listed = rows.store.select_all(&rows.table).await?;
                Ok(listed
                    .into_iter()
                    .filter_map(|row| match row {
                        Value::Object(map) => Some(map),
                        _ => None,
                    })
                    .collect())
            }
            None => {
                let entries = self.blobs.list().await?;
                Ok(entries
                    .into_iter()
                    .filter(|e| !e.name.starts_with('.'))
                    .map(|e| {
                        let mut map = Map::new();
                        map.insert("url".into(), Value::String(self.blobs.public_url(&e.name)));
                        map.insert(KEY_COLUMN.into(), Value::String(e.name));
                        map
                    })
                    .collect())
            }
        }
    }
}
