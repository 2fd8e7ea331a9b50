//! Promotion route handlers (metadata-backed configuration only).

use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::Json;
use serde_json::{json, Map, Value};
use vitrine_core::Error;

use crate::context::AppContext;
use crate::error::AppError;
use crate::routes::read_form;
use crate::services::{PromotionFields, PromotionService};

/// These routes are only mounted when the service exists, so a missing
/// service here means the router and context disagree.
fn service(ctx: &AppContext) -> Result<&Arc<PromotionService>, AppError> {
    ctx.promotions
        .as_ref()
        .ok_or_else(|| AppError(Error::Internal("promotions service not configured".into())))
}

/// GET /api/promotions — full promotion rows, newest first.
pub async fn list_promotions(
    State(ctx): State<AppContext>,
) -> Result<Json<Vec<Map<String, Value>>>, AppError> {
    Ok(Json(service(&ctx)?.list().await?))
}

/// POST /api/promotions — multipart `image`, `titulo`, `texto`, `tag`.
pub async fn create_promotion(
    State(ctx): State<AppContext>,
    multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let form = read_form(multipart).await?;
    let fields = PromotionFields {
        title: form.text("titulo"),
        body: form.text("texto"),
        tag: form.text("tag"),
    };
    let (image, _) = form.require_image()?;

    service(&ctx)?.create(image, fields).await?;
    Ok(Json(json!({ "status": "ok" })))
}

/// POST /api/promotions/update — multipart `old_name`, `titulo`, `texto`,
/// `tag`, optional `image`.
pub async fn update_promotion(
    State(ctx): State<AppContext>,
    multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let form = read_form(multipart).await?;
    let old_name = form.require("old_name")?;
    let fields = PromotionFields {
        title: form.text("titulo"),
        body: form.text("texto"),
        tag: form.text("tag"),
    };

    service(&ctx)?
        .update(&old_name, fields, form.image)
        .await?;
    Ok(Json(json!({ "status": "updated" })))
}

/// DELETE /api/promotions/{name}
pub async fn delete_promotion(
    State(ctx): State<AppContext>,
    Path(name): Path<String>,
) -> Result<Json<Value>, AppError> {
    service(&ctx)?.delete(&name).await?;
    Ok(Json(json!({ "status": "deleted" })))
}
