//! Field-type registry
//!
//! A closed, enumerable set of field-type descriptors. Each descriptor pairs
//! a canonical name with the shape of the value it stores and the kind of
//! per-field configuration it needs at schema-definition time. Adding a new
//! field type means adding a row to [`FIELD_TYPES`]; there is no runtime
//! registration.

use crate::error::{SchemaError, SchemaResult};
use serde::{Deserialize, Serialize};

/// Shape of the value a field type stores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueShape {
    /// A single string (text, URL, date, asset URL, reference id, ...)
    Scalar,
    /// An ordered list of strings (labels, gallery URLs, ...)
    List,
}

impl ValueShape {
    /// Human-readable shape name used in error messages
    pub fn as_str(self) -> &'static str {
        match self {
            ValueShape::Scalar => "scalar",
            ValueShape::List => "list",
        }
    }
}

/// Kind of auxiliary configuration a field type carries in `Field::options`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConfigKind {
    /// No configuration; options list stays empty
    None,
    /// A fixed list of selectable choices
    Options,
    /// A single-element list naming the referenced collection
    TargetCollection,
}

/// One registered field type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldTypeDescriptor {
    /// Canonical type name, unique within the registry
    pub name: &'static str,
    /// Shape of stored values
    pub shape: ValueShape,
    /// Configuration the field carries in its options list
    pub config: ConfigKind,
}

impl FieldTypeDescriptor {
    /// Default options for a freshly created or retyped field
    ///
    /// Always empty: choice lists and reference targets are filled in by
    /// the editor afterwards. Retyping a field resets to this default and
    /// discards the prior options (no migration).
    pub fn default_options(&self) -> Vec<String> {
        Vec::new()
    }
}

/// The canonical name of the item-name field type
pub const ITEM_NAME_TYPE: &str = "Text";

/// All registered field types, in display order
pub const FIELD_TYPES: &[FieldTypeDescriptor] = &[
    FieldTypeDescriptor {
        name: "Text",
        shape: ValueShape::Scalar,
        config: ConfigKind::None,
    },
    FieldTypeDescriptor {
        name: "RichText",
        shape: ValueShape::Scalar,
        config: ConfigKind::None,
    },
    FieldTypeDescriptor {
        name: "URL",
        shape: ValueShape::Scalar,
        config: ConfigKind::None,
    },
    FieldTypeDescriptor {
        name: "Date",
        shape: ValueShape::Scalar,
        config: ConfigKind::None,
    },
    FieldTypeDescriptor {
        name: "Statistic",
        shape: ValueShape::Scalar,
        config: ConfigKind::None,
    },
    FieldTypeDescriptor {
        name: "Labels",
        shape: ValueShape::List,
        config: ConfigKind::None,
    },
    FieldTypeDescriptor {
        name: "SelectField",
        shape: ValueShape::Scalar,
        config: ConfigKind::Options,
    },
    FieldTypeDescriptor {
        name: "ImageUpload",
        shape: ValueShape::Scalar,
        config: ConfigKind::None,
    },
    FieldTypeDescriptor {
        name: "ImageGallery",
        shape: ValueShape::List,
        config: ConfigKind::None,
    },
    FieldTypeDescriptor {
        name: "FileUpload",
        shape: ValueShape::Scalar,
        config: ConfigKind::None,
    },
    FieldTypeDescriptor {
        name: "FileLibrary",
        shape: ValueShape::List,
        config: ConfigKind::None,
    },
    FieldTypeDescriptor {
        name: "VideoEmbed",
        shape: ValueShape::Scalar,
        config: ConfigKind::None,
    },
    FieldTypeDescriptor {
        name: "CollectionReference",
        shape: ValueShape::Scalar,
        config: ConfigKind::TargetCollection,
    },
];

/// All registered field types, in display order
pub fn field_types() -> &'static [FieldTypeDescriptor] {
    FIELD_TYPES
}

/// Look up a field type by canonical name
///
/// # Errors
///
/// Returns `UnknownFieldType` if the name is not registered.
pub fn describe(type_name: &str) -> SchemaResult<&'static FieldTypeDescriptor> {
    FIELD_TYPES
        .iter()
        .find(|d| d.name == type_name)
        .ok_or_else(|| SchemaError::UnknownFieldType(type_name.to_string()))
}
