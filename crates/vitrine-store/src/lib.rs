//! vitrine-store: accessors for the two remote stores.
//!
//! The backend mediates between an object-storage service (image bytes) and,
//! in the metadata-backed configuration, a structured rows service. Both are
//! reached over HTTP and both can fail independently; this crate exposes each
//! behind a trait seam ([`BlobStore`], [`RowStore`]) so the coordination
//! layer and its tests can substitute in-memory implementations.

pub mod blob;
mod http;
pub mod http_blob;
pub mod http_rows;
pub mod memory;
pub mod rows;

pub use blob::{BlobStore, ObjectEntry};
pub use http_blob::HttpBlobStore;
pub use http_rows::HttpRowStore;
pub use memory::{MemoryBlobStore, MemoryRowStore};
pub use rows::RowStore;
