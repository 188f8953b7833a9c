//! Validation for collection names
//!
//! Collection names double as storage-key components (`collections/<name>`,
//! `items/<name>/...`), so they are validated up front: bounded length and a
//! restricted character set with no path separators.

use crate::error::{SchemaError, SchemaResult};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A validated collection name
///
/// # Rules
/// - Letters, numbers, spaces, hyphens and underscores only
/// - Must start with a letter or number
/// - Length: 1-128 characters
/// - No leading/trailing whitespace
///
/// # Examples
///
/// ```
/// use bucket_cms::validation::CollectionName;
///
/// let name = CollectionName::new("Blog Posts").unwrap();
/// assert_eq!(name.as_str(), "Blog Posts");
///
/// assert!(CollectionName::new("posts/2024").is_err()); // path separator
/// assert!(CollectionName::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CollectionName(String);

impl CollectionName {
    /// Pattern for valid collection names
    const PATTERN: &'static str = r"^[A-Za-z0-9][A-Za-z0-9 _-]*$";

    /// Maximum length in characters
    const MAX_LENGTH: usize = 128;

    /// Create a new validated collection name
    ///
    /// # Errors
    ///
    /// Returns `InvalidCollectionName` if the name doesn't meet the rules.
    pub fn new(name: impl Into<String>) -> SchemaResult<Self> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(CollectionName(name))
    }

    fn validate(name: &str) -> SchemaResult<()> {
        if name.is_empty() {
            return Err(SchemaError::InvalidCollectionName(
                "name cannot be empty".to_string(),
            ));
        }

        if name.len() > Self::MAX_LENGTH {
            return Err(SchemaError::InvalidCollectionName(format!(
                "name too long (max {} characters)",
                Self::MAX_LENGTH
            )));
        }

        if name != name.trim() {
            return Err(SchemaError::InvalidCollectionName(
                "name cannot have leading or trailing whitespace".to_string(),
            ));
        }

        let re = Regex::new(Self::PATTERN).unwrap();
        if !re.is_match(name) {
            return Err(SchemaError::InvalidCollectionName(format!(
                "name '{}' may only contain letters, numbers, spaces, hyphens and underscores",
                name
            )));
        }

        Ok(())
    }

    /// Get the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to String
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for CollectionName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CollectionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for CollectionName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CollectionName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        CollectionName::new(s).map_err(serde::de::Error::custom)
    }
}
