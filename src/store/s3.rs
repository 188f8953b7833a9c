//! S3 object storage backend
//!
//! Thin adapter over the `object_store` crate's S3 client. Any
//! S3-compatible endpoint works (AWS, MinIO, R2); the endpoint and
//! credentials come from [`S3Config`].

use crate::error::StoreResult;
use crate::store::ObjectStorage;
use async_trait::async_trait;
use bytes::Bytes;
use futures::TryStreamExt;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::{Attribute, AttributeValue, Attributes, ObjectStore, PutOptions, PutPayload};
use tracing::info;

/// Configuration for the S3 backend
#[derive(Debug, Clone)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    /// Custom endpoint for S3-compatible stores (MinIO, R2, ...)
    pub endpoint: Option<String>,
    /// Permit plain-http endpoints (local development only)
    pub allow_http: bool,
}

/// Object storage backed by an S3-compatible bucket
pub struct S3Storage {
    store: AmazonS3,
}

impl S3Storage {
    /// Build a client from configuration
    pub fn connect(config: &S3Config) -> StoreResult<Self> {
        let mut builder = AmazonS3Builder::new()
            .with_bucket_name(&config.bucket)
            .with_region(&config.region)
            .with_allow_http(config.allow_http);

        if let Some(access_key) = &config.access_key {
            builder = builder.with_access_key_id(access_key);
        }
        if let Some(secret_key) = &config.secret_key {
            builder = builder.with_secret_access_key(secret_key);
        }
        if let Some(endpoint) = &config.endpoint {
            builder = builder.with_endpoint(endpoint);
        }

        let store = builder.build()?;
        info!(
            "S3 backend ready: bucket={} region={}",
            config.bucket, config.region
        );
        Ok(S3Storage { store })
    }
}

#[async_trait]
impl ObjectStorage for S3Storage {
    async fn list_keys(&self, prefix: &str) -> StoreResult<Vec<String>> {
        let prefix_path = Path::from(prefix);
        let metas: Vec<_> = self
            .store
            .list(Some(&prefix_path))
            .try_collect()
            .await?;

        let mut keys: Vec<String> = metas
            .into_iter()
            .map(|meta| meta.location.to_string())
            .collect();
        // S3 lists lexicographically already; local emulators may not
        keys.sort();
        Ok(keys)
    }

    async fn get_object(&self, key: &str) -> StoreResult<Bytes> {
        let result = self.store.get(&Path::from(key)).await?;
        Ok(result.bytes().await?)
    }

    async fn put_object(&self, key: &str, data: Bytes, content_type: &str) -> StoreResult<()> {
        let mut attributes = Attributes::new();
        attributes.insert(
            Attribute::ContentType,
            AttributeValue::from(content_type.to_string()),
        );
        let opts = PutOptions {
            attributes,
            ..Default::default()
        };

        self.store
            .put_opts(&Path::from(key), PutPayload::from(data), opts)
            .await?;
        Ok(())
    }

    async fn delete_object(&self, key: &str) -> StoreResult<()> {
        self.store.delete(&Path::from(key)).await?;
        Ok(())
    }
}
