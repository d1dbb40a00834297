//! Handler for image uploads.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Multipart field carrying the file.
const IMAGE_FIELD: &str = "image";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Reference to store in an article's `image` field.
    pub image_url: String,
    pub filename: String,
}

/// POST /api/news/upload
///
/// Accepts a multipart form with a required `image` file field. Other
/// fields are ignored. The file is validated and stored before any article
/// references it.
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<UploadResponse>)> {
    let mut upload: Option<(String, String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or("image").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        upload = Some((filename, content_type, data.to_vec()));
    }

    let (filename, content_type, data) =
        upload.ok_or_else(|| AppError::BadRequest("No image file uploaded".into()))?;

    let stored = state.images.save(&data, &filename, &content_type).await?;

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            image_url: stored.url,
            filename: stored.filename,
        }),
    ))
}
