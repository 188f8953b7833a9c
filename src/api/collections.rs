//! Collection schema routes

use crate::api::{ApiError, AppState};
use crate::schema::Collection;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde_json::{json, Value};

/// `GET /collections`
pub async fn list(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    if !state.auth.allow_read(&headers) {
        return Err(ApiError::Unauthorized);
    }
    let collections = state.store.list_collections().await?;
    Ok(Json(json!({ "collections": collections })))
}

/// `GET /collections/:name`
pub async fn read(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(name): Path<String>,
) -> Result<Json<Collection>, ApiError> {
    if !state.auth.allow_read(&headers) {
        return Err(ApiError::Unauthorized);
    }
    let collection = state.store.read_collection(&name).await?;
    Ok(Json(collection))
}

/// `POST /collections` — saves (creates or overwrites) a schema
pub async fn save(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(collection): Json<Collection>,
) -> Result<Json<Value>, ApiError> {
    if !state.auth.allow_write(&headers) {
        return Err(ApiError::Unauthorized);
    }
    state.store.save_collection(&collection).await?;
    Ok(Json(json!({ "success": true })))
}

/// `DELETE /collections/:name`
pub async fn delete(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(name): Path<String>,
) -> Result<Json<Value>, ApiError> {
    if !state.auth.allow_write(&headers) {
        return Err(ApiError::Unauthorized);
    }
    state.store.delete_collection(&name).await?;
    Ok(Json(json!({ "success": true })))
}
