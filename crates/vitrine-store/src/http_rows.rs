//! HTTP implementation of [`RowStore`].
//!
//! Speaks a PostgREST-style rows API: tables are addressed as
//! `{endpoint}/{table}`, equality filters use `?{column}=eq.{value}` query
//! parameters, and listings order with `?order=created_at.desc`.

use async_trait::async_trait;
use serde_json::Value;
use vitrine_core::config::MetadataConfig;
use vitrine_core::Result;

use crate::http::{ensure_success, normalize_endpoint, transport};
use crate::rows::RowStore;

const STORE: &str = "rows";

/// Rows service reached over HTTP with apikey + bearer auth.
pub struct HttpRowStore {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl HttpRowStore {
    /// Build a store handle from configuration and a shared client.
    pub fn new(client: reqwest::Client, config: &MetadataConfig) -> Self {
        Self {
            client,
            endpoint: normalize_endpoint(&config.endpoint),
            api_key: config.api_key.clone(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.endpoint, table)
    }

    fn authed(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }
}

#[async_trait]
impl RowStore for HttpRowStore {
    async fn insert(&self, table: &str, row: Value) -> Result<()> {
        let resp = self
            .authed(self.client.post(self.table_url(table)))
            .header("Prefer", "return=minimal")
            .json(&row)
            .send()
            .await
            .map_err(transport(STORE))?;
        ensure_success(STORE, resp).await?;
        Ok(())
    }

    async fn select_all(&self, table: &str) -> Result<Vec<Value>> {
        let resp = self
            .authed(self.client.get(self.table_url(table)))
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .send()
            .await
            .map_err(transport(STORE))?;
        let resp = ensure_success(STORE, resp).await?;

        resp.json().await.map_err(transport(STORE))
    }

    async fn update(&self, table: &str, key_column: &str, key: &str, changes: Value) -> Result<()> {
        let resp = self
            .authed(self.client.patch(self.table_url(table)))
            .query(&[(key_column, format!("eq.{key}"))])
            .json(&changes)
            .send()
            .await
            .map_err(transport(STORE))?;
        ensure_success(STORE, resp).await?;
        Ok(())
    }

    async fn delete(&self, table: &str, key_column: &str, key: &str) -> Result<()> {
        let resp = self
            .authed(self.client.delete(self.table_url(table)))
            .query(&[(key_column, format!("eq.{key}"))])
            .send()
            .await
            .map_err(transport(STORE))?;
        ensure_success(STORE, resp).await?;
        Ok(())
    }
}
