//! In-memory object storage
//!
//! Backend for sandbox mode and tests. A `BTreeMap` keeps keys ordered so
//! listing behaves exactly like the S3 backend.

use crate::error::{StoreError, StoreResult};
use crate::store::ObjectStorage;
use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// Object store held entirely in process memory
#[derive(Debug, Default)]
pub struct MemoryStorage {
    objects: RwLock<BTreeMap<String, Bytes>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored objects, all prefixes
    pub fn len(&self) -> usize {
        self.objects.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.read().is_empty()
    }
}

#[async_trait]
impl ObjectStorage for MemoryStorage {
    async fn list_keys(&self, prefix: &str) -> StoreResult<Vec<String>> {
        let objects = self.objects.read();
        Ok(objects
            .range(prefix.to_string()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, _)| k.clone())
            .collect())
    }

    async fn get_object(&self, key: &str) -> StoreResult<Bytes> {
        let objects = self.objects.read();
        objects
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    async fn put_object(&self, key: &str, data: Bytes, _content_type: &str) -> StoreResult<()> {
        let mut objects = self.objects.write();
        objects.insert(key.to_string(), data);
        Ok(())
    }

    async fn delete_object(&self, key: &str) -> StoreResult<()> {
        let mut objects = self.objects.write();
        objects
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_get_delete_lifecycle() {
        let store = MemoryStorage::new();
        store
            .put_object("collections/Posts", Bytes::from_static(b"{}"), "application/json")
            .await
            .unwrap();

        let data = store.get_object("collections/Posts").await.unwrap();
        assert_eq!(&data[..], b"{}");

        store.delete_object("collections/Posts").await.unwrap();
        assert!(matches!(
            store.get_object("collections/Posts").await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.delete_object("collections/Posts").await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn listing_is_prefix_scoped_and_ordered() {
        let store = MemoryStorage::new();
        for key in ["items/Posts/b", "items/Posts/a", "items/Pages/x", "collections/Posts"] {
            store
                .put_object(key, Bytes::new(), "application/json")
                .await
                .unwrap();
        }

        let keys = store.list_keys("items/Posts/").await.unwrap();
        assert_eq!(keys, vec!["items/Posts/a", "items/Posts/b"]);
    }
}
