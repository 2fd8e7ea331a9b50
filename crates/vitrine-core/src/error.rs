//! Unified error type for the vitrine application.
//!
//! All crates funnel their failures into [`Error`], which carries enough
//! context for API handlers to derive an HTTP status code via
//! [`Error::http_status`].

/// Unified error type covering all failure modes in vitrine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The caller did not present the expected shared secret.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Request data failed validation (missing file or field).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A remote store (object storage or rows service) failed.
    ///
    /// The message is the raw upstream failure text, passed through
    /// unsanitized so callers see exactly what the store reported.
    #[error("{store} error: {message}")]
    Remote {
        /// Which store failed (e.g. "storage", "rows").
        store: String,
        /// Raw upstream failure message.
        message: String,
    },

    /// Catch-all for unexpected internal errors.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Map this error to an appropriate HTTP status code.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::Unauthorized(_) => 401,
            Error::Validation(_) => 400,
            Error::Remote { .. } => 502,
            Error::Internal(_) => 500,
        }
    }

    /// Convenience constructor for [`Error::Remote`].
    pub fn remote(store: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Remote {
            store: store.into(),
            message: message.into(),
        }
    }

    /// Convenience constructor for [`Error::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
