//! Application configuration types.
//!
//! The top-level [`Config`] struct is deserialized from JSON and carries the
//! server, auth, storage, and optional metadata sections. Every section
//! defaults sensibly so a completely empty `{}` file parses; [`Config::validate`]
//! reports what still needs to be filled in before the server is usable.
//!
//! The presence of the `metadata` section selects the metadata-backed
//! configuration (rows store + promotions); without it the server runs
//! storage-only, listing assets straight from the object store.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::Error;

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
    /// Rows-service settings. `Some` selects the metadata-backed
    /// configuration; `None` runs storage-only.
    pub metadata: Option<MetadataConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
            storage: StorageConfig::default(),
            metadata: None,
        }
    }
}

impl Config {
    /// Deserialize a `Config` from a JSON string.
    ///
    /// This is intentionally string-based so the caller can read the file
    /// however it sees fit (async, embedded, etc.).
    pub fn from_json(json_str: &str) -> Result<Self> {
        serde_json::from_str(json_str)
            .map_err(|e| Error::Validation(format!("config parse error: {e}")))
    }

    /// Load configuration from a file path, falling back to defaults if the
    /// path is `None` or the file does not exist.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_json(&contents).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse config file {}: {e}", path.display());
                Self::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No config file at {}; using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                tracing::warn!("Failed to read config file {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Return a list of validation warnings (non-fatal issues).
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.server.port == 0 {
            warnings.push("server.port is 0; a random port will be assigned".into());
        }

        if self.auth.secret.is_empty() {
            warnings.push("auth.secret is empty; every /api request will be rejected".into());
        }

        if self.storage.endpoint.is_empty() {
            warnings.push("storage.endpoint is empty".into());
        }
        if self.storage.api_key.is_empty() {
            warnings.push("storage.api_key is empty".into());
        }
        if self.storage.bucket.is_empty() {
            warnings.push("storage.bucket is empty".into());
        }

        if let Some(ref meta) = self.metadata {
            if meta.endpoint.is_empty() {
                warnings.push("metadata.endpoint is empty".into());
            }
            if meta.api_key.is_empty() {
                warnings.push("metadata.api_key is empty".into());
            }
            if meta.gallery_table.is_empty() {
                warnings.push("metadata.gallery_table is empty".into());
            }
            if meta.promotions_table.is_empty() {
                warnings.push("metadata.promotions_table is empty".into());
            }
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
        }
    }
}

/// Shared-secret authentication settings.
///
/// The secret is compared verbatim against the `x-app-password` header on
/// every `/api` request. An empty secret matches nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub secret: String,
}

/// Object-storage service settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Base URL of the storage API (e.g. `https://acme.example.co/storage/v1`).
    pub endpoint: String,
    /// Bearer token / service key for the storage API.
    pub api_key: String,
    /// Bucket holding all managed assets.
    pub bucket: String,
}

/// Rows-service settings (metadata-backed configuration only).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataConfig {
    /// Base URL of the rows API (e.g. `https://acme.example.co/rest/v1`).
    pub endpoint: String,
    /// API key for the rows service.
    pub api_key: String,
    #[serde(default = "default_gallery_table")]
    pub gallery_table: String,
    #[serde(default = "default_promotions_table")]
    pub promotions_table: String,
}

fn default_gallery_table() -> String {
    "gallery_images".into()
}

fn default_promotions_table() -> String {
    "promotions".into()
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: String::new(),
            gallery_table: default_gallery_table(),
            promotions_table: default_promotions_table(),
        }
    }
}
