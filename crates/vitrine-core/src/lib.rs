//! vitrine-core: shared errors, configuration, and filename handling.
//!
//! This crate is the foundational dependency for the other vitrine crates,
//! providing the unified error type, application configuration, and the
//! filename sanitization / storage-key derivation used by every upload path.

pub mod config;
pub mod error;
pub mod sanitize;

// Re-export the most commonly used items at the crate root.
pub use error::{Error, Result};
pub use sanitize::{sanitize, storage_key, storage_key_now};
