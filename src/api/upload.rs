//! File upload route

use crate::api::{ApiError, AppState};
use axum::extract::{Multipart, State};
use axum::http::HeaderMap;
use axum::Json;
use serde_json::{json, Value};
use tracing::debug;

/// `POST /upload` — multipart form with a single `file` field
///
/// Size and MIME checks happen in the store before any write; the response
/// carries the public URL of the stored file.
pub async fn upload(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    if !state.auth.allow_write(&headers) {
        return Err(ApiError::Unauthorized);
    }

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field
            .file_name()
            .map(|s| s.to_string())
            .ok_or_else(|| ApiError::BadRequest("File name not provided".to_string()))?;
        let content_type = field
            .content_type()
            .map(|s| s.to_string())
            .ok_or_else(|| ApiError::BadRequest("File content type not provided".to_string()))?;
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?;

        debug!(
            "Upload request: {} ({}, {} bytes)",
            file_name,
            content_type,
            data.len()
        );

        let url = state
            .store
            .upload_file(&file_name, &content_type, data)
            .await?;
        return Ok(Json(json!({ "success": true, "url": url })));
    }

    Err(ApiError::BadRequest("File not provided".to_string()))
}
