//! # Bucket CMS - Headless Content Management over Object Storage
//!
//! `bucket-cms` is a headless CMS admin backend layered on top of
//! S3-compatible object storage. It manages:
//!
//! - **Collections**: named schemas, each an ordered list of typed fields
//! - **Items**: records conforming to a collection's schema
//! - **Files**: uploaded assets served from the bucket's public URL
//!
//! Everything is stored as whole JSON objects under key prefixes
//! (`collections/`, `items/<collection>/`, `files/`); each save replaces
//! one object atomically and concurrent writers are last-writer-wins.
//!
//! ## Quick Start
//!
//! ```rust
//! use bucket_cms::schema::Collection;
//!
//! # fn main() -> Result<(), bucket_cms::error::SchemaError> {
//! // Every collection starts with the protected item-name field (Text)
//! let posts = Collection::new("Posts", "Title")?
//!     .add_field("Category", "SelectField")?
//!     .add_option(1, "News")?
//!     .add_option(1, "Tech")?;
//!
//! assert_eq!(posts.fields[0].type_name, "Text");
//! # Ok(())
//! # }
//! ```
//!
//! ## Serving the API
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use bucket_cms::api::{self, AppState};
//! use bucket_cms::auth::AuthPolicy;
//! use bucket_cms::store::{BucketStore, MemoryStorage};
//!
//! let store = BucketStore::new(Arc::new(MemoryStorage::new()), "http://localhost:8080");
//! let app = api::router(AppState { store, auth: AuthPolicy::open() });
//! // axum::serve(listener, app) ...
//! ```

pub mod api;
pub mod auth;
pub mod error;
pub mod fields;
pub mod item;
pub mod schema;
pub mod store;
pub mod validation;

pub use crate::error::{SchemaError, StoreError};
pub use crate::fields::{describe, field_types, ConfigKind, FieldTypeDescriptor, ValueShape};
pub use crate::item::{CollectionItem, Value};
pub use crate::schema::{Collection, Field};
pub use crate::store::{BucketStore, ItemPage, MemoryStorage, ObjectStorage, S3Config, S3Storage};
pub use crate::validation::CollectionName;
