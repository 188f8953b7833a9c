//! Error types for schema, storage, and API operations

use thiserror::Error;

/// Schema model result type
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors produced by the collection schema and item models
///
/// All of these are caller-correctable validation failures. They are
/// surfaced to API clients as 400 responses and must never take the
/// process down.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Field type name is not in the registry
    #[error("Unknown field type: {0}")]
    UnknownFieldType(String),

    /// Field name does not exist in the collection's schema
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// Field name already present (exact case match)
    #[error("Duplicate field name: {0}")]
    DuplicateFieldName(String),

    /// Operation targets the protected item-name field
    #[error("Field at index {0} is protected: {1}")]
    ProtectedField(usize, &'static str),

    /// Value shape does not match the field's declared type shape
    #[error("Shape mismatch for field '{field}': expected {expected}, got {actual}")]
    ShapeMismatch {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// Field index past the end of the field list
    #[error("Field index {0} out of range (collection has {1} fields)")]
    FieldIndexOutOfRange(usize, usize),

    /// Field name is empty or whitespace-only
    #[error("Field name cannot be empty")]
    EmptyFieldName,

    /// Collection name failed validation
    #[error("Invalid collection name: {0}")]
    InvalidCollectionName(String),
}

/// Storage access result type
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from the storage access layer
#[derive(Error, Debug)]
pub enum StoreError {
    /// Key does not exist in the object store
    #[error("Not found: {0}")]
    NotFound(String),

    /// Backing store failed; message is safe to surface (no credentials)
    #[error("Storage failure: {0}")]
    Backend(String),

    /// Stored object is not valid JSON for the expected type
    #[error("Corrupt object at {key}: {message}")]
    Corrupt { key: String, message: String },

    /// Upload rejected before any storage write
    #[error("Upload rejected: {0}")]
    UploadRejected(String),

    /// Schema-level validation failed inside a store operation
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl From<object_store::Error> for StoreError {
    fn from(err: object_store::Error) -> Self {
        match err {
            object_store::Error::NotFound { path, .. } => StoreError::NotFound(path),
            other => StoreError::Backend(other.to_string()),
        }
    }
}
