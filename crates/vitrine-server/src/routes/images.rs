//! Gallery image route handlers.

use axum::extract::{Multipart, Path, State};
use axum::Json;
use serde_json::{json, Value};

use crate::context::AppContext;
use crate::error::AppError;
use crate::routes::read_form;
use crate::services::ImageSummary;

/// GET /api/images
pub async fn list_images(
    State(ctx): State<AppContext>,
) -> Result<Json<Vec<ImageSummary>>, AppError> {
    Ok(Json(ctx.gallery.list().await?))
}

/// POST /api/upload — multipart `image` plus optional `tags`.
pub async fn upload_image(
    State(ctx): State<AppContext>,
    multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let form = read_form(multipart).await?;
    let (image, fields) = form.require_image()?;
    let tags = fields.get("tags").cloned().unwrap_or_default();

    ctx.gallery.create(image, tags).await?;
    Ok(Json(json!({ "status": "ok" })))
}

/// POST /api/images/update — multipart `old_name`, `tags`, optional `image`.
///
/// Mounted only in the metadata-backed configuration.
pub async fn update_image(
    State(ctx): State<AppContext>,
    multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let form = read_form(multipart).await?;
    let old_name = form.require("old_name")?;
    let tags = form.text("tags");

    ctx.gallery.update(&old_name, tags, form.image).await?;
    Ok(Json(json!({ "status": "updated" })))
}

/// DELETE /api/images/{name}
pub async fn delete_image(
    State(ctx): State<AppContext>,
    Path(name): Path<String>,
) -> Result<Json<Value>, AppError> {
    ctx.gallery.delete(&name).await?;
    Ok(Json(json!({ "status": "deleted" })))
}
