//! Storage access layer
//!
//! Collections and items are persisted as one JSON object each in a flat
//! object store: collections under `collections/<name>`, items under
//! `items/<collectionName>/<itemId>`, uploaded files under `files/`. Every
//! save overwrites the whole object — there is no partial patch, no
//! compare-and-swap, and concurrent writers are last-writer-wins. That is an
//! accepted limitation inherited from the backing store.

pub mod memory;
pub mod s3;

pub use memory::MemoryStorage;
pub use s3::{S3Config, S3Storage};

use crate::error::{StoreError, StoreResult};
use crate::item::CollectionItem;
use crate::schema::Collection;
use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Key prefix for collection schema objects
pub const COLLECTIONS_PREFIX: &str = "collections/";

/// Key prefix for item objects (followed by `<collectionName>/`)
pub const ITEMS_PREFIX: &str = "items/";

/// Key prefix for uploaded files
pub const FILES_PREFIX: &str = "files/";

/// Maximum accepted upload size in bytes (20 MB)
pub const MAX_UPLOAD_SIZE: usize = 20 * 1024 * 1024;

/// Default page size for item listings
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// MIME types accepted by the upload endpoint
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "image/svg+xml",
    "application/pdf",
    "text/plain",
    "text/csv",
    "video/mp4",
    "video/webm",
    "audio/mpeg",
    "audio/wav",
];

/// Minimal object-store contract the CMS needs
///
/// Keys are flat strings; listing is ordered lexicographically so that
/// token-based pagination works the same on every backend.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// List all keys under a prefix, in lexicographic order
    async fn list_keys(&self, prefix: &str) -> StoreResult<Vec<String>>;

    /// Fetch an object; `StoreError::NotFound` if the key is absent
    async fn get_object(&self, key: &str) -> StoreResult<Bytes>;

    /// Write an object, replacing any existing one atomically
    async fn put_object(&self, key: &str, data: Bytes, content_type: &str) -> StoreResult<()>;

    /// Delete an object; `StoreError::NotFound` if the key is absent
    async fn delete_object(&self, key: &str) -> StoreResult<()>;
}

/// One page of an item listing
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPage {
    pub items: Vec<CollectionItem>,
    /// Pass back as `token` to fetch the next page; `None` on the last page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

/// High-level store for collections, items, and uploaded files
#[derive(Clone)]
pub struct BucketStore {
    backend: Arc<dyn ObjectStorage>,
    /// Base URL uploaded files are publicly reachable under
    public_base_url: String,
}

impl BucketStore {
    pub fn new(backend: Arc<dyn ObjectStorage>, public_base_url: impl Into<String>) -> Self {
        BucketStore {
            backend,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn collection_key(name: &str) -> String {
        format!("{}{}", COLLECTIONS_PREFIX, name)
    }

    fn item_key(collection: &str, item_id: &str) -> String {
        format!("{}{}/{}", ITEMS_PREFIX, collection, item_id)
    }

    // Collections

    /// Load every collection schema
    ///
    /// Objects that fail to parse are skipped with a warning rather than
    /// failing the whole listing; one corrupt schema should not take the
    /// admin UI down.
    pub async fn list_collections(&self) -> StoreResult<Vec<Collection>> {
        let keys = self.backend.list_keys(COLLECTIONS_PREFIX).await?;
        debug!("Listing {} collection objects", keys.len());

        let mut collections = Vec::with_capacity(keys.len());
        for key in keys {
            let data = self.backend.get_object(&key).await?;
            match serde_json::from_slice::<Collection>(&data) {
                Ok(collection) => collections.push(collection),
                Err(e) => warn!("Skipping corrupt collection object {}: {}", key, e),
            }
        }
        Ok(collections)
    }

    /// Read one collection schema by name
    pub async fn read_collection(&self, name: &str) -> StoreResult<Collection> {
        let key = Self::collection_key(name);
        let data = self.backend.get_object(&key).await?;
        serde_json::from_slice(&data).map_err(|e| StoreError::Corrupt {
            key,
            message: e.to_string(),
        })
    }

    /// Save a collection schema, overwriting the whole object
    ///
    /// The schema is validated first; invalid schemas never reach storage.
    pub async fn save_collection(&self, collection: &Collection) -> StoreResult<()> {
        collection.validate()?;
        let key = Self::collection_key(collection.collection_name.as_str());
        let data = serde_json::to_vec(collection).map_err(|e| StoreError::Backend(e.to_string()))?;
        self.backend
            .put_object(&key, Bytes::from(data), mime::APPLICATION_JSON.as_ref())
            .await?;
        info!("Saved collection schema: {}", collection.collection_name);
        Ok(())
    }

    /// Delete a collection schema
    ///
    /// Items of the collection are left in place; the original behaves the
    /// same way (stale-data tolerance, no cascade).
    pub async fn delete_collection(&self, name: &str) -> StoreResult<()> {
        self.backend.delete_object(&Self::collection_key(name)).await?;
        info!("Deleted collection schema: {}", name);
        Ok(())
    }

    // Items

    /// List items of a collection, one page at a time
    ///
    /// `token` is the last key of the previous page (opaque to callers);
    /// keys are lexicographically ordered, so pages are disjoint and
    /// exhaustive as long as the caller threads the token through.
    pub async fn list_items(
        &self,
        collection: &str,
        token: Option<&str>,
        limit: Option<usize>,
    ) -> StoreResult<ItemPage> {
        let prefix = format!("{}{}/", ITEMS_PREFIX, collection);
        let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).max(1);

        let mut keys = self.backend.list_keys(&prefix).await?;
        if let Some(token) = token {
            keys.retain(|k| k.as_str() > token);
        }
        let truncated = keys.len() > limit;
        keys.truncate(limit);

        let mut items = Vec::with_capacity(keys.len());
        for key in &keys {
            let data = self.backend.get_object(key).await?;
            match serde_json::from_slice::<CollectionItem>(&data) {
                Ok(item) => items.push(item),
                Err(e) => warn!("Skipping corrupt item object {}: {}", key, e),
            }
        }

        let next_token = if truncated { keys.last().cloned() } else { None };
        Ok(ItemPage { items, next_token })
    }

    /// Read one item
    pub async fn read_item(&self, collection: &str, item_id: &str) -> StoreResult<CollectionItem> {
        let key = Self::item_key(collection, item_id);
        let data = self.backend.get_object(&key).await?;
        serde_json::from_slice(&data).map_err(|e| StoreError::Corrupt {
            key,
            message: e.to_string(),
        })
    }

    /// Save an item, overwriting the whole object
    pub async fn save_item(&self, item: &CollectionItem) -> StoreResult<()> {
        let key = Self::item_key(item.collection_name.as_str(), &item.item_id);
        let data = serde_json::to_vec(item).map_err(|e| StoreError::Backend(e.to_string()))?;
        self.backend
            .put_object(&key, Bytes::from(data), mime::APPLICATION_JSON.as_ref())
            .await?;
        debug!("Saved item {}/{}", item.collection_name, item.item_id);
        Ok(())
    }

    /// Delete one item
    pub async fn delete_item(&self, collection: &str, item_id: &str) -> StoreResult<()> {
        self.backend
            .delete_object(&Self::item_key(collection, item_id))
            .await?;
        debug!("Deleted item {}/{}", collection, item_id);
        Ok(())
    }

    // File uploads

    /// Store an uploaded file and return its public URL
    ///
    /// Size and MIME type are checked before anything touches the backend;
    /// a rejected upload performs zero storage writes.
    pub async fn upload_file(
        &self,
        file_name: &str,
        content_type: &str,
        data: Bytes,
    ) -> StoreResult<String> {
        if data.len() > MAX_UPLOAD_SIZE {
            return Err(StoreError::UploadRejected(format!(
                "file size {} exceeds the {} byte limit",
                data.len(),
                MAX_UPLOAD_SIZE
            )));
        }
        if !ALLOWED_MIME_TYPES.contains(&content_type) {
            return Err(StoreError::UploadRejected(format!(
                "unsupported file type: {}",
                content_type
            )));
        }

        // Timestamp prefix keeps keys unique across same-named uploads
        let key = format!(
            "{}{}-{}",
            FILES_PREFIX,
            chrono::Utc::now().timestamp_millis(),
            sanitize_file_name(file_name)
        );

        self.backend
            .put_object(&key, data, content_type)
            .await?;
        info!("Uploaded file: {}", key);

        Ok(format!("{}/{}", self.public_base_url, key))
    }
}

/// Strip path components and characters that have no business in a key
fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned
    }
}
