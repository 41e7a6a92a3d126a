//! Schema and field types.
//!
//! [`FieldType`] is tagged by `kind` and each variant holds exactly the
//! attributes legal for that kind, so an illegal combination cannot be
//! represented. On the wire the tag and attributes are flattened into the
//! field object:
//!
//! ```json
//! {"name": "title", "kind": "TEXT", "translatable": true, "minLength": null, "maxLength": 120}
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::kind::{AssetFileType, FieldKind};

/// A selectable option of an OPTION or OPTIONS field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectOption {
    pub name: String,
    pub value: String,
}

impl SelectOption {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// TEXT, TEXTAREA and MARKDOWN.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TextAttributes {
    pub translatable: Option<bool>,
    pub min_length: Option<u32>,
    pub max_length: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NumberAttributes {
    pub translatable: Option<bool>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
}

/// COLOR, DATE, BOOLEAN and LINK.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TranslatableAttributes {
    pub translatable: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OptionAttributes {
    pub translatable: Option<bool>,
    #[serde(default)]
    pub options: Vec<SelectOption>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MultiOptionAttributes {
    pub translatable: Option<bool>,
    #[serde(default)]
    pub options: Vec<SelectOption>,
    pub min_values: Option<u32>,
    pub max_values: Option<u32>,
}

/// ASSET and ASSETS.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssetAttributes {
    pub translatable: Option<bool>,
    #[serde(default = "default_file_types")]
    pub file_types: Vec<AssetFileType>,
}

fn default_file_types() -> Vec<AssetFileType> {
    vec![AssetFileType::Any]
}

impl Default for AssetAttributes {
    fn default() -> Self {
        Self {
            translatable: None,
            file_types: default_file_types(),
        }
    }
}

/// REFERENCE and REFERENCES.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceAttributes {
    pub path: Option<String>,
}

/// SCHEMA and SCHEMAS: names of the schemas a nested block may use.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NestedSchemaAttributes {
    #[serde(default)]
    pub schemas: Vec<String>,
}

/// The kind of a field together with its kind-specific attributes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldType {
    Text(TextAttributes),
    Textarea(TextAttributes),
    Markdown(TextAttributes),
    Number(NumberAttributes),
    Color(TranslatableAttributes),
    Date(TranslatableAttributes),
    Boolean(TranslatableAttributes),
    Option(OptionAttributes),
    Options(MultiOptionAttributes),
    Link(TranslatableAttributes),
    Reference(ReferenceAttributes),
    References(ReferenceAttributes),
    Asset(AssetAttributes),
    Assets(AssetAttributes),
    Schema(NestedSchemaAttributes),
    Schemas(NestedSchemaAttributes),
}

impl FieldType {
    /// Default attribute set for `kind`.
    pub fn new(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Text => FieldType::Text(TextAttributes::default()),
            FieldKind::Textarea => FieldType::Textarea(TextAttributes::default()),
            FieldKind::Markdown => FieldType::Markdown(TextAttributes::default()),
            FieldKind::Number => FieldType::Number(NumberAttributes::default()),
            FieldKind::Color => FieldType::Color(TranslatableAttributes::default()),
            FieldKind::Date => FieldType::Date(TranslatableAttributes::default()),
            FieldKind::Boolean => FieldType::Boolean(TranslatableAttributes::default()),
            FieldKind::Option => FieldType::Option(OptionAttributes::default()),
            FieldKind::Options => FieldType::Options(MultiOptionAttributes::default()),
            FieldKind::Link => FieldType::Link(TranslatableAttributes::default()),
            FieldKind::Reference => FieldType::Reference(ReferenceAttributes::default()),
            FieldKind::References => FieldType::References(ReferenceAttributes::default()),
            FieldKind::Asset => FieldType::Asset(AssetAttributes::default()),
            FieldKind::Assets => FieldType::Assets(AssetAttributes::default()),
            FieldKind::Schema => FieldType::Schema(NestedSchemaAttributes::default()),
            FieldKind::Schemas => FieldType::Schemas(NestedSchemaAttributes::default()),
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            FieldType::Text(_) => FieldKind::Text,
            FieldType::Textarea(_) => FieldKind::Textarea,
            FieldType::Markdown(_) => FieldKind::Markdown,
            FieldType::Number(_) => FieldKind::Number,
            FieldType::Color(_) => FieldKind::Color,
            FieldType::Date(_) => FieldKind::Date,
            FieldType::Boolean(_) => FieldKind::Boolean,
            FieldType::Option(_) => FieldKind::Option,
            FieldType::Options(_) => FieldKind::Options,
            FieldType::Link(_) => FieldKind::Link,
            FieldType::Reference(_) => FieldKind::Reference,
            FieldType::References(_) => FieldKind::References,
            FieldType::Asset(_) => FieldKind::Asset,
            FieldType::Assets(_) => FieldKind::Assets,
            FieldType::Schema(_) => FieldKind::Schema,
            FieldType::Schemas(_) => FieldKind::Schemas,
        }
    }

    /// True when values of this field differ per locale.
    pub fn is_translatable(&self) -> bool {
        let flag = match self {
            FieldType::Text(a) | FieldType::Textarea(a) | FieldType::Markdown(a) => a.translatable,
            FieldType::Number(a) => a.translatable,
            FieldType::Color(a) | FieldType::Date(a) | FieldType::Boolean(a) | FieldType::Link(a) => {
                a.translatable
            }
            FieldType::Option(a) => a.translatable,
            FieldType::Options(a) => a.translatable,
            FieldType::Asset(a) | FieldType::Assets(a) => a.translatable,
            FieldType::Reference(_)
            | FieldType::References(_)
            | FieldType::Schema(_)
            | FieldType::Schemas(_) => None,
        };
        flag.unwrap_or(false)
    }
}

impl Default for FieldType {
    fn default() -> Self {
        FieldType::new(FieldKind::Text)
    }
}

/// One field definition inside a schema.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SchemaField {
    pub name: String,
    #[serde(flatten)]
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl SchemaField {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            display_name: None,
            required: None,
            description: None,
            default_value: None,
        }
    }

    pub fn kind(&self) -> FieldKind {
        self.field_type.kind()
    }

    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }

    pub fn base(&self) -> FieldBase {
        FieldBase {
            display_name: self.display_name.clone(),
            required: self.required,
            description: self.description.clone(),
            default_value: self.default_value.clone(),
        }
    }

    pub(crate) fn apply_base(&mut self, base: FieldBase) {
        self.display_name = base.display_name;
        self.required = base.required;
        self.description = base.description;
        self.default_value = base.default_value;
    }
}

/// The kind-independent attributes every field carries besides its name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldBase {
    pub display_name: Option<String>,
    pub required: Option<bool>,
    pub description: Option<String>,
    pub default_value: Option<String>,
}

/// A named, ordered set of field definitions belonging to a space.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_image: Option<String>,
    #[serde(default)]
    pub fields: Vec<SchemaField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Schema {
    /// A new, empty schema.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            display_name: None,
            preview_field: None,
            preview_image: None,
            fields: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }

    pub fn field(&self, name: &str) -> Option<&SchemaField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Overwrite every editable attribute with `update`.
    pub fn apply(&mut self, update: SchemaUpdate) {
        self.name = update.name;
        self.display_name = update.display_name;
        self.preview_field = update.preview_field;
        self.preview_image = update.preview_image;
        self.fields = update.fields;
    }
}

/// The whole-document patch produced by submitting a schema edit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SchemaUpdate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_image: Option<String>,
    #[serde(default)]
    pub fields: Vec<SchemaField>,
}
