//! Shared-secret authentication middleware.
//!
//! Every `/api` route sits behind this gate. The caller-supplied
//! `x-app-password` header is compared verbatim against the configured
//! secret; a mismatch short-circuits with 401 before any store accessor is
//! invoked. There is no rate limiting, no per-user identity, and no retry.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::context::AppContext;
use crate::error::AppError;

/// Header carrying the shared secret.
pub const SECRET_HEADER: &str = "x-app-password";

/// Exact-equality shared-secret check. Applied to the `/api` subtree.
pub async fn auth_middleware(
    State(ctx): State<AppContext>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let presented = request
        .headers()
        .get(SECRET_HEADER)
        .and_then(|v| v.to_str().ok());

    let secret = ctx.config.auth.secret.as_str();

    // An empty configured secret matches nothing; config validation already
    // warned about it at startup.
    if secret.is_empty() || presented != Some(secret) {
        return Err(AppError(vitrine_core::Error::Unauthorized(
            "invalid or missing application secret".into(),
        )));
    }

    Ok(next.run(request).await)
}
