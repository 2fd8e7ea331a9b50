//! Shared helpers for the HTTP store implementations.

use vitrine_core::{Error, Result};

/// Convert a transport-level failure into a `Remote` error for `store`.
pub(crate) fn transport(store: &'static str) -> impl FnOnce(reqwest::Error) -> Error {
    move |e| Error::remote(store, e.to_string())
}

/// Pass a successful response through; otherwise read the body and surface
/// the raw upstream message as a `Remote` error.
pub(crate) async fn ensure_success(
    store: &'static str,
    resp: reqwest::Response,
) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(Error::remote(store, format!("{status}: {body}")))
}

/// Trim a trailing slash so endpoint joins are unambiguous.
pub(crate) fn normalize_endpoint(endpoint: &str) -> String {
    endpoint.trim_end_matches('/').to_string()
}
