//! In-memory store implementations.
//!
//! Trait-compatible substitutes for the HTTP stores, used by tests and
//! handy for local development without remote credentials. They reproduce
//! the contracts the coordination layer relies on: key-ordered bucket
//! listings, `created_at` stamping on insert, and newest-first row listings.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;
use vitrine_core::Result;

use crate::blob::{BlobStore, ObjectEntry};
use crate::rows::RowStore;

// ---------------------------------------------------------------------------
// MemoryBlobStore
// ---------------------------------------------------------------------------

/// One stored object.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// In-memory [`BlobStore`] backed by a `BTreeMap` (listing order = key order).
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    objects: Mutex<BTreeMap<String, StoredObject>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an object exists under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.objects.lock().unwrap().contains_key(key)
    }

    /// Number of stored objects.
    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    /// Fetch a stored object (for assertions on bytes/content type).
    pub fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects.lock().unwrap().get(key).cloned()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, key: &str, content_type: Option<&str>, bytes: Bytes) -> Result<()> {
        self.objects.lock().unwrap().insert(
            key.to_string(),
            StoredObject {
                content_type: content_type.map(str::to_string),
                bytes,
            },
        );
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        // Removing an absent key is a no-op, matching the remote store.
        self.objects.lock().unwrap().remove(key);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<ObjectEntry>> {
        Ok(self
            .objects
            .lock()
            .unwrap()
            .keys()
            .map(|name| ObjectEntry { name: name.clone() })
            .collect())
    }

    fn public_url(&self, key: &str) -> String {
        format!("memory://assets/{key}")
    }
}

// ---------------------------------------------------------------------------
// MemoryRowStore
// ---------------------------------------------------------------------------

/// In-memory [`RowStore`] holding JSON rows per table.
#[derive(Debug, Default)]
pub struct MemoryRowStore {
    tables: Mutex<HashMap<String, Vec<Value>>>,
}

impl MemoryRowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows in `table`.
    pub fn row_count(&self, table: &str) -> usize {
        self.tables
            .lock()
            .unwrap()
            .get(table)
            .map_or(0, |rows| rows.len())
    }

    /// Snapshot of `table` in insertion order (for assertions).
    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.tables
            .lock()
            .unwrap()
            .get(table)
            .cloned()
            .unwrap_or_default()
    }
}

fn created_at_of(row: &Value) -> String {
    row.get("created_at")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[async_trait]
impl RowStore for MemoryRowStore {
    async fn insert(&self, table: &str, mut row: Value) -> Result<()> {
        if let Some(obj) = row.as_object_mut() {
            obj.entry("created_at")
                .or_insert_with(|| Value::String(chrono::Utc::now().to_rfc3339()));
        }
        self.tables
            .lock()
            .unwrap()
            .entry(table.to_string())
            .or_default()
            .push(row);
        Ok(())
    }

    async fn select_all(&self, table: &str) -> Result<Vec<Value>> {
        // Reverse before the stable sort so rows sharing a timestamp still
        // come back newest first.
        let mut rows: Vec<Value> = self
            .tables
            .lock()
            .unwrap()
            .get(table)
            .map(|rows| rows.iter().rev().cloned().collect())
            .unwrap_or_default();
        rows.sort_by_key(|row| std::cmp::Reverse(created_at_of(row)));
        Ok(rows)
    }

    async fn update(&self, table: &str, key_column: &str, key: &str, changes: Value) -> Result<()> {
        let mut tables = self.tables.lock().unwrap();
        let Some(rows) = tables.get_mut(table) else {
            return Ok(());
        };
        let Some(changes) = changes.as_object() else {
            return Ok(());
        };

        for row in rows.iter_mut() {
            if row.get(key_column).and_then(Value::as_str) == Some(key) {
                if let Some(obj) = row.as_object_mut() {
                    for (k, v) in changes {
                        obj.insert(k.clone(), v.clone());
                    }
                }
            }
        }
        Ok(())
    }

    async fn delete(&self, table: &str, key_column: &str, key: &str) -> Result<()> {
        let mut tables = self.tables.lock().unwrap();
        if let Some(rows) = tables.get_mut(table) {
            rows.retain(|row| row.get(key_column).and_then(Value::as_str) != Some(key));
        }
        Ok(())
    }
}
