//! Axum router construction.
//!
//! Builds the application router: the `/api` subtree behind the
//! shared-secret gate, the ungated health check, and the tracing/CORS
//! layers. The storage-only configuration mounts just the image
//! list/upload/delete routes; everything touching metadata rows exists only
//! when a promotions service is present.

use axum::middleware;
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::context::AppContext;
use crate::middleware::auth::auth_middleware;
use crate::routes;

/// Build the complete Axum router.
pub fn build_router(ctx: AppContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Routes available in both configurations.
    let mut api = Router::new()
        .route("/images", get(routes::images::list_images))
        .route("/upload", post(routes::images::upload_image))
        .route("/images/{name}", delete(routes::images::delete_image));

    // Metadata-backed configuration only.
    if ctx.promotions.is_some() {
        api = api
            .route("/images/update", post(routes::images::update_image))
            .route(
                "/promotions",
                get(routes::promotions::list_promotions)
                    .post(routes::promotions::create_promotion),
            )
            .route(
                "/promotions/update",
                post(routes::promotions::update_promotion),
            )
            .route(
                "/promotions/{name}",
                delete(routes::promotions::delete_promotion),
            );
    }

    let api = api.layer(middleware::from_fn_with_state(ctx.clone(), auth_middleware));

    Router::new()
        .route("/health", get(routes::health::health_check))
        .nest("/api", api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}
