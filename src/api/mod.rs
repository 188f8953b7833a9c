//! HTTP API layer
//!
//! Thin axum handlers that marshal JSON between HTTP and the
//! [`BucketStore`]. Every error response uses the `{ "error": message }`
//! envelope: 400 for model/bad-input errors, 401 unauthenticated, 404
//! missing, 500 storage failure.

mod collections;
mod items;
mod upload;

use crate::auth::AuthPolicy;
use crate::error::{SchemaError, StoreError};
use crate::store::{BucketStore, MAX_UPLOAD_SIZE};
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tracing::error;

/// Shared state for all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: BucketStore,
    pub auth: AuthPolicy,
}

/// API error with an HTTP status
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized,
    NotFound(String),
    Internal(String),
}

impl From<SchemaError> for ApiError {
    fn from(err: SchemaError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(key) => ApiError::NotFound(key),
            StoreError::UploadRejected(msg) => ApiError::BadRequest(msg),
            StoreError::Schema(e) => ApiError::BadRequest(e.to_string()),
            // Backend/corrupt messages carry no credentials; safe to surface
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Not Authorized".to_string()),
            ApiError::NotFound(what) => (StatusCode::NOT_FOUND, format!("Not found: {}", what)),
            ApiError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Build the API router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/collections",
            get(collections::list).post(collections::save),
        )
        .route(
            "/collections/:name",
            get(collections::read).delete(collections::delete),
        )
        .route("/items", get(items::list).post(items::save))
        .route(
            "/items/:collection/:id",
            get(items::read).delete(items::delete),
        )
        .route("/upload", post(upload::upload))
        // Multipart bodies need headroom above the 20 MB file cap; the
        // store still enforces the cap itself before any write
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_SIZE + 4 * 1024 * 1024))
        .with_state(state)
}
