//! HTTP implementation of [`BlobStore`].
//!
//! Speaks a Supabase-storage-style object API: uploads and deletes address
//! `{endpoint}/object/{bucket}/{key}`, listings go through
//! `{endpoint}/object/list/{bucket}`, and public URLs follow the
//! `{endpoint}/object/public/{bucket}/{key}` convention.

use async_trait::async_trait;
use bytes::Bytes;
use serde::Deserialize;
use serde_json::json;
use vitrine_core::config::StorageConfig;
use vitrine_core::Result;

use crate::blob::{BlobStore, ObjectEntry};
use crate::http::{ensure_success, normalize_endpoint, transport};

const STORE: &str = "storage";

/// Object storage reached over HTTP with bearer-token auth.
pub struct HttpBlobStore {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    bucket: String,
}

impl HttpBlobStore {
    /// Build a store handle from configuration and a shared client.
    pub fn new(client: reqwest::Client, config: &StorageConfig) -> Self {
        Self {
            client,
            endpoint: normalize_endpoint(&config.endpoint),
            api_key: config.api_key.clone(),
            bucket: config.bucket.clone(),
        }
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/object/{}/{}", self.endpoint, self.bucket, key)
    }
}

/// Listing entry as returned by the storage API.
#[derive(Debug, Deserialize)]
struct ListedObject {
    name: String,
}

#[async_trait]
impl BlobStore for HttpBlobStore {
    async fn put(&self, key: &str, content_type: Option<&str>, bytes: Bytes) -> Result<()> {
        let mut req = self
            .client
            .post(self.object_url(key))
            .bearer_auth(&self.api_key)
            .body(bytes);
        if let Some(ct) = content_type {
            req = req.header(reqwest::header::CONTENT_TYPE, ct);
        }

        let resp = req.send().await.map_err(transport(STORE))?;
        ensure_success(STORE, resp).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let resp = self
            .client
            .delete(self.object_url(key))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(transport(STORE))?;
        ensure_success(STORE, resp).await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<ObjectEntry>> {
        let resp = self
            .client
            .post(format!("{}/object/list/{}", self.endpoint, self.bucket))
            .bearer_auth(&self.api_key)
            .json(&json!({ "prefix": "" }))
            .send()
            .await
            .map_err(transport(STORE))?;
        let resp = ensure_success(STORE, resp).await?;

        let objects: Vec<ListedObject> = resp.json().await.map_err(transport(STORE))?;
        Ok(objects
            .into_iter()
            .map(|o| ObjectEntry { name: o.name })
            .collect())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/object/public/{}/{}", self.endpoint, self.bucket, key)
    }
}
