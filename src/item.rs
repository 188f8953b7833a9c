//! Item data model
//!
//! A [`CollectionItem`] holds one record's values keyed by field name.
//! Validation is loose: a value may be absent, but if present its shape must
//! match the field's declared type shape. Reference-type values are opaque
//! strings — no existence check against the referenced collection.

use crate::error::{SchemaError, SchemaResult};
use crate::fields;
use crate::schema::Collection;
use crate::validation::CollectionName;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// A field value: a single string or an ordered list of strings
///
/// Serializes untagged so documents read naturally:
/// `{"Title": "Hello", "Tags": ["a", "b"]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    List(Vec<String>),
}

impl Value {
    /// Shape name used in error messages
    pub fn shape_str(&self) -> &'static str {
        match self {
            Value::Text(_) => "scalar",
            Value::List(_) => "list",
        }
    }

    fn matches(&self, shape: fields::ValueShape) -> bool {
        matches!(
            (self, shape),
            (Value::Text(_), fields::ValueShape::Scalar) | (Value::List(_), fields::ValueShape::List)
        )
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Vec<String>> for Value {
    fn from(v: Vec<String>) -> Self {
        Value::List(v)
    }
}

/// One record of data conforming to a collection's schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionItem {
    /// Owning collection
    pub collection_name: CollectionName,
    /// Storage identity, assigned at creation
    pub item_id: String,
    /// Field name → value; absent entries are unset fields
    #[serde(default)]
    pub values: BTreeMap<String, Value>,
}

impl CollectionItem {
    /// Create an empty item for a collection with a fresh id
    pub fn new(collection_name: CollectionName) -> Self {
        CollectionItem {
            collection_name,
            item_id: Uuid::new_v4().to_string(),
            values: BTreeMap::new(),
        }
    }

    /// Set a value, checking name and shape against the schema snapshot
    ///
    /// Pure: returns a new item.
    ///
    /// # Errors
    ///
    /// `UnknownField` if the field is not in the schema, `ShapeMismatch` if
    /// the value's shape differs from the field type's declared shape.
    pub fn set_value(
        &self,
        schema: &Collection,
        field_name: &str,
        value: impl Into<Value>,
    ) -> SchemaResult<CollectionItem> {
        let value = value.into();
        let field = schema
            .field(field_name)
            .ok_or_else(|| SchemaError::UnknownField(field_name.to_string()))?;
        let descriptor = fields::describe(&field.type_name)?;

        if !value.matches(descriptor.shape) {
            return Err(SchemaError::ShapeMismatch {
                field: field_name.to_string(),
                expected: descriptor.shape.as_str(),
                actual: value.shape_str(),
            });
        }

        let mut next = self.clone();
        next.values.insert(field_name.to_string(), value);
        Ok(next)
    }

    /// Get a value; `None` for unset fields, never an error
    pub fn get_value(&self, field_name: &str) -> Option<&Value> {
        self.values.get(field_name)
    }

    /// Validate every present value against the schema snapshot
    ///
    /// Used on the write path for items arriving over the wire. Stale values
    /// for fields since deleted from the schema are tolerated on read, but a
    /// fresh write must conform.
    pub fn validate_against(&self, schema: &Collection) -> SchemaResult<()> {
        for (name, value) in &self.values {
            let field = schema
                .field(name)
                .ok_or_else(|| SchemaError::UnknownField(name.clone()))?;
            let descriptor = fields::describe(&field.type_name)?;
            if !value.matches(descriptor.shape) {
                return Err(SchemaError::ShapeMismatch {
                    field: name.clone(),
                    expected: descriptor.shape.as_str(),
                    actual: value.shape_str(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> Collection {
        Collection::new("Posts", "Title")
            .unwrap()
            .add_field("Tags", "Labels")
            .unwrap()
            .add_field("Link", "URL")
            .unwrap()
    }

    fn item() -> CollectionItem {
        CollectionItem::new(CollectionName::new("Posts").unwrap())
    }

    #[test]
    fn set_and_get_round_trip() {
        let s = schema();
        let i = item().set_value(&s, "Title", "Hello").unwrap();
        assert_eq!(i.get_value("Title"), Some(&Value::Text("Hello".to_string())));
        assert_eq!(i.get_value("Link"), None);
    }

    #[test]
    fn unknown_field_rejected() {
        let s = schema();
        assert!(matches!(
            item().set_value(&s, "Missing", "x"),
            Err(SchemaError::UnknownField(_))
        ));
    }

    #[test]
    fn shape_mismatch_rejected_both_ways() {
        let s = schema();
        let err = item()
            .set_value(&s, "Title", vec!["a".to_string()])
            .unwrap_err();
        assert!(matches!(err, SchemaError::ShapeMismatch { .. }));

        let err = item().set_value(&s, "Tags", "not-a-list").unwrap_err();
        assert!(matches!(err, SchemaError::ShapeMismatch { .. }));

        assert!(item()
            .set_value(&s, "Tags", vec!["a".to_string(), "b".to_string()])
            .is_ok());
    }

    #[test]
    fn untagged_value_serialization() {
        let s = schema();
        let i = item()
            .set_value(&s, "Title", "Hello")
            .unwrap()
            .set_value(&s, "Tags", vec!["a".to_string()])
            .unwrap();
        let json = serde_json::to_value(&i).unwrap();
        assert_eq!(json["values"]["Title"], "Hello");
        assert_eq!(json["values"]["Tags"][0], "a");
    }

    #[test]
    fn validate_against_catches_stale_shape() {
        let s = schema();
        let i = item().set_value(&s, "Tags", vec!["a".to_string()]).unwrap();
        i.validate_against(&s).unwrap();

        // Retype Tags to a scalar; the old list value no longer conforms
        let retyped = s.change_field_type(1, "Text").unwrap();
        assert!(matches!(
            i.validate_against(&retyped),
            Err(SchemaError::ShapeMismatch { .. })
        ));
    }
}
