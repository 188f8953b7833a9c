//! Collection schema model
//!
//! A [`Collection`] is a named, ordered list of [`Field`]s. The first field
//! is the item-name field: always type `Text`, never deleted, retyped, or
//! moved. Every editing operation is pure — it returns a new `Collection`
//! value — so a caller can keep an undo-friendly sequence of snapshots.

use crate::error::{SchemaError, SchemaResult};
use crate::fields::{self, ITEM_NAME_TYPE};
use crate::validation::CollectionName;
use serde::{Deserialize, Serialize};

/// One named, typed slot within a collection's schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Field name, unique within the collection (case-sensitive)
    pub name: String,
    /// Registered field-type name
    pub type_name: String,
    /// Type-specific configuration: selectable choices for `SelectField`,
    /// a single-element list naming the target for `CollectionReference`
    #[serde(default)]
    pub options: Vec<String>,
}

/// A named schema describing the ordered fields of every item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    /// Collection name; unique across the store, used as the storage key
    pub collection_name: CollectionName,
    /// Ordered field list; `fields[0]` is the protected item-name field
    pub fields: Vec<Field>,
}

/// Reason strings for `ProtectedField` errors
const CANNOT_DELETE: &str = "the item-name field cannot be deleted";
const CANNOT_RETYPE: &str = "the item-name field cannot change type";
const CANNOT_MOVE: &str = "the item-name field cannot be moved";

impl Collection {
    /// Create a collection with the single protected item-name field
    pub fn new(name: impl Into<String>, item_name_field: impl Into<String>) -> SchemaResult<Self> {
        let collection_name = CollectionName::new(name)?;
        let field_name = normalize_field_name(item_name_field)?;
        Ok(Collection {
            collection_name,
            fields: vec![Field {
                name: field_name,
                type_name: ITEM_NAME_TYPE.to_string(),
                options: Vec::new(),
            }],
        })
    }

    /// Find a field by exact-case name
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Append a new field with the type's default options
    ///
    /// # Errors
    ///
    /// `DuplicateFieldName` if the name exists (exact case match),
    /// `UnknownFieldType` if the type is not registered.
    pub fn add_field(
        &self,
        name: impl Into<String>,
        type_name: &str,
    ) -> SchemaResult<Collection> {
        let name = normalize_field_name(name)?;
        self.ensure_name_free(&name)?;
        let descriptor = fields::describe(type_name)?;

        let mut next = self.clone();
        next.fields.push(Field {
            name,
            type_name: descriptor.name.to_string(),
            options: descriptor.default_options(),
        });
        Ok(next)
    }

    /// Rename the field at `index`
    ///
    /// The item-name field may be renamed; only its type is pinned.
    pub fn rename_field(&self, index: usize, new_name: impl Into<String>) -> SchemaResult<Collection> {
        self.check_index(index)?;
        let new_name = normalize_field_name(new_name)?;
        if self.fields[index].name != new_name {
            self.ensure_name_free(&new_name)?;
        }

        let mut next = self.clone();
        next.fields[index].name = new_name;
        Ok(next)
    }

    /// Change the type of the field at `index`
    ///
    /// Options are reset to the new type's default, discarding prior values.
    /// The old options are unlikely to make sense for the new type, so there
    /// is deliberately no migration.
    ///
    /// # Errors
    ///
    /// `ProtectedField` if `index == 0`.
    pub fn change_field_type(&self, index: usize, new_type_name: &str) -> SchemaResult<Collection> {
        self.check_index(index)?;
        if index == 0 {
            return Err(SchemaError::ProtectedField(0, CANNOT_RETYPE));
        }
        let descriptor = fields::describe(new_type_name)?;

        let mut next = self.clone();
        next.fields[index].type_name = descriptor.name.to_string();
        next.fields[index].options = descriptor.default_options();
        Ok(next)
    }

    /// Append an option to the field at `index`
    pub fn add_option(&self, index: usize, value: impl Into<String>) -> SchemaResult<Collection> {
        self.check_index(index)?;
        let mut next = self.clone();
        next.fields[index].options.push(value.into());
        Ok(next)
    }

    /// Remove the option at `option_index` from the field at `index`
    ///
    /// Removing the last remaining option is permitted; "must have at least
    /// one option" is a UI concern, not enforced here.
    pub fn remove_option(&self, index: usize, option_index: usize) -> SchemaResult<Collection> {
        self.check_index(index)?;
        let options = &self.fields[index].options;
        if option_index >= options.len() {
            return Err(SchemaError::FieldIndexOutOfRange(option_index, options.len()));
        }

        let mut next = self.clone();
        next.fields[index].options.remove(option_index);
        Ok(next)
    }

    /// Delete the field at `index`
    ///
    /// # Errors
    ///
    /// `ProtectedField` if `index == 0`.
    pub fn delete_field(&self, index: usize) -> SchemaResult<Collection> {
        self.check_index(index)?;
        if index == 0 {
            return Err(SchemaError::ProtectedField(0, CANNOT_DELETE));
        }

        let mut next = self.clone();
        next.fields.remove(index);
        Ok(next)
    }

    /// Move the field at `from` to position `to`
    ///
    /// # Errors
    ///
    /// `ProtectedField` if either index is 0 (nothing may displace the
    /// item-name field).
    pub fn reorder(&self, from: usize, to: usize) -> SchemaResult<Collection> {
        self.check_index(from)?;
        self.check_index(to)?;
        if from == 0 || to == 0 {
            return Err(SchemaError::ProtectedField(0, CANNOT_MOVE));
        }

        let mut next = self.clone();
        let field = next.fields.remove(from);
        next.fields.insert(to, field);
        Ok(next)
    }

    fn ensure_name_free(&self, name: &str) -> SchemaResult<()> {
        if self.fields.iter().any(|f| f.name == name) {
            return Err(SchemaError::DuplicateFieldName(name.to_string()));
        }
        Ok(())
    }

    fn check_index(&self, index: usize) -> SchemaResult<()> {
        if index >= self.fields.len() {
            return Err(SchemaError::FieldIndexOutOfRange(index, self.fields.len()));
        }
        Ok(())
    }

    /// Validate a collection deserialized from the wire or from storage
    ///
    /// Checks the invariants construction normally guarantees: at least one
    /// field, `fields[0]` of type `Text`, all types registered, all names
    /// non-empty and unique.
    pub fn validate(&self) -> SchemaResult<()> {
        let first = self
            .fields
            .first()
            .ok_or(SchemaError::ProtectedField(0, CANNOT_DELETE))?;
        if first.type_name != ITEM_NAME_TYPE {
            return Err(SchemaError::ProtectedField(0, CANNOT_RETYPE));
        }
        for (i, field) in self.fields.iter().enumerate() {
            if field.name.trim().is_empty() {
                return Err(SchemaError::EmptyFieldName);
            }
            fields::describe(&field.type_name)?;
            if self.fields[..i].iter().any(|f| f.name == field.name) {
                return Err(SchemaError::DuplicateFieldName(field.name.clone()));
            }
        }
        Ok(())
    }
}

/// Trim and reject empty field names
fn normalize_field_name(name: impl Into<String>) -> SchemaResult<String> {
    let name = name.into();
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(SchemaError::EmptyFieldName);
    }
    Ok(trimmed.to_string())
}
