//! Structured rows-service accessor trait.

use async_trait::async_trait;
use serde_json::Value;
use vitrine_core::Result;

/// Remote structured-row store supporting insert/query/update/delete.
///
/// Rows are JSON objects; table names are passed per call so one handle can
/// serve multiple tables. Any upstream failure is surfaced as
/// [`vitrine_core::Error::Remote`] with the raw failure message. Nothing is
/// retried, and no operation is transactional with respect to the blob store.
#[async_trait]
pub trait RowStore: Send + Sync {
    /// Insert one row. The service stamps `created_at` when absent.
    async fn insert(&self, table: &str, row: Value) -> Result<()>;

    /// All rows of `table`, ordered by `created_at` descending (newest first).
    async fn select_all(&self, table: &str) -> Result<Vec<Value>>;

    /// Merge `changes` into every row where `key_column` equals `key`.
    async fn update(&self, table: &str, key_column: &str, key: &str, changes: Value) -> Result<()>;

    /// Delete every row where `key_column` equals `key`.
    async fn delete(&self, table: &str, key_column: &str, key: &str) -> Result<()>;
}
