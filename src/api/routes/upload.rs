//! Upload Routes
//!
//! - POST /api/upload - Store an image sent as multipart field `file`

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::UploadResponse;
use crate::api::error::{ApiError, ApiResult};
use crate::api::extract::AuthSession;
use crate::api::state::AppState;
use crate::uploads::UploadError;

/// Multipart field carrying the image
const FILE_FIELD: &str = "file";

/// POST /api/upload
///
/// Accepts a multipart form with a `file` field and returns the public URL of
/// the stored image.
pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    session: AuthSession,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadResponse>> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let content_type = field.content_type().map(str::to_string);
        let file_name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await.map_err(multipart_error)?;

        let stored = state
            .uploads
            .save(content_type.as_deref(), file_name.as_deref(), &bytes)
            .await?;

        tracing::info!(url = %stored.url, uploaded_by = %session.email, "Image uploaded");

        return Ok(Json(UploadResponse { url: stored.url }));
    }

    Err(UploadError::Missing.into())
}

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(err.body_text())
    } else {
        ApiError::Validation(format!("Invalid multipart body: {}", err.body_text()))
    }
}
