//! Item routes

use crate::api::{ApiError, AppState};
use crate::item::CollectionItem;
use crate::store::ItemPage;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    collection_name: Option<String>,
    token: Option<String>,
    limit: Option<usize>,
}

/// `GET /items?collectionName=&token=&limit=`
pub async fn list(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Result<Json<ItemPage>, ApiError> {
    if !state.auth.allow_read(&headers) {
        return Err(ApiError::Unauthorized);
    }
    let collection_name = query.collection_name.ok_or_else(|| {
        ApiError::BadRequest("Collection name is required as a query parameter".to_string())
    })?;

    let page = state
        .store
        .list_items(&collection_name, query.token.as_deref(), query.limit)
        .await?;
    Ok(Json(page))
}

/// `GET /items/:collection/:id`
pub async fn read(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((collection, id)): Path<(String, String)>,
) -> Result<Json<CollectionItem>, ApiError> {
    if !state.auth.allow_read(&headers) {
        return Err(ApiError::Unauthorized);
    }
    let item = state.store.read_item(&collection, &id).await?;
    Ok(Json(item))
}

/// `POST /items` — validates values against the current schema, then saves
pub async fn save(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(mut item): Json<CollectionItem>,
) -> Result<Json<Value>, ApiError> {
    if !state.auth.allow_write(&headers) {
        return Err(ApiError::Unauthorized);
    }

    let schema = state
        .store
        .read_collection(item.collection_name.as_str())
        .await?;
    item.validate_against(&schema)?;

    if item.item_id.is_empty() {
        item.item_id = Uuid::new_v4().to_string();
    }
    state.store.save_item(&item).await?;
    Ok(Json(json!({ "success": true, "itemId": item.item_id })))
}

/// `DELETE /items/:collection/:id`
pub async fn delete(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((collection, id)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    if !state.auth.allow_write(&headers) {
        return Err(ApiError::Unauthorized);
    }
    state.store.delete_item(&collection, &id).await?;
    Ok(Json(json!({ "success": true })))
}
