//! API route handlers.

pub mod health;
pub mod images;
pub mod promotions;

use std::collections::HashMap;

use axum::extract::Multipart;
use vitrine_core::{Error, Result};

use crate::sync::Upload;

/// Parsed multipart form: text fields plus the optional `image` file part.
pub(crate) struct FormData {
    pub fields: HashMap<String, String>,
    pub image: Option<Upload>,
}

impl FormData {
    /// Text field value, or a validation error naming the missing field.
    pub fn require(&self, name: &str) -> Result<String> {
        self.fields
            .get(name)
            .cloned()
            .ok_or_else(|| Error::validation(format!("{name} field is required")))
    }

    /// Text field value, empty when absent.
    pub fn text(&self, name: &str) -> String {
        self.fields.get(name).cloned().unwrap_or_default()
    }

    /// The uploaded file, or a validation error when it is missing.
    pub fn require_image(self) -> Result<(Upload, HashMap<String, String>)> {
        let Some(image) = self.image else {
            return Err(Error::validation("image file is required"));
        };
        Ok((image, self.fields))
    }
}

/// Drain a multipart body into [`FormData`].
///
/// The part named `image` is treated as the file; every other part is read
/// as text. Files are buffered in full, matching the single-shot upload
/// model of the stores.
pub(crate) async fn read_form(mut multipart: Multipart) -> Result<FormData> {
    let mut fields = HashMap::new();
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::validation(format!("malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "image" {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let content_type = field.content_type().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| Error::validation(format!("failed to read image part: {e}")))?;
            image = Some(Upload {
                filename,
                content_type,
                bytes,
            });
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| Error::validation(format!("failed to read {name} field: {e}")))?;
            fields.insert(name, value);
        }
    }

    Ok(FormData { fields, image })
}
