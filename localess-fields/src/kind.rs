//! Field kind registry.
//!
//! A [`FieldKind`] determines which optional attributes a schema field may
//! carry. The registry is a pure lookup table: given a kind it returns the
//! attribute set and a human-readable description. Unknown kinds never reach
//! it; they are rejected when a schema is deserialized or parsed from text.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FieldsError;

/// The closed set of content field kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldKind {
    Text,
    Textarea,
    Markdown,
    Number,
    Color,
    Date,
    Boolean,
    Option,
    Options,
    Link,
    Reference,
    References,
    Asset,
    Assets,
    Schema,
    Schemas,
}

/// The value shape of a kind-specific attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    Boolean,
    Integer,
    Number,
    String,
    OptionList,
    FileTypes,
    StringList,
}

/// One kind-specific attribute as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeSpec {
    pub name: &'static str,
    pub value_type: AttributeType,
}

const fn attr(name: &'static str, value_type: AttributeType) -> AttributeSpec {
    AttributeSpec { name, value_type }
}

const TRANSLATABLE: AttributeSpec = attr("translatable", AttributeType::Boolean);

const TEXT_ATTRIBUTES: &[AttributeSpec] = &[
    TRANSLATABLE,
    attr("minLength", AttributeType::Integer),
    attr("maxLength", AttributeType::Integer),
];
const NUMBER_ATTRIBUTES: &[AttributeSpec] = &[
    TRANSLATABLE,
    attr("minValue", AttributeType::Number),
    attr("maxValue", AttributeType::Number),
];
const TRANSLATABLE_ATTRIBUTES: &[AttributeSpec] = &[TRANSLATABLE];
const OPTION_ATTRIBUTES: &[AttributeSpec] =
    &[TRANSLATABLE, attr("options", AttributeType::OptionList)];
const OPTIONS_ATTRIBUTES: &[AttributeSpec] = &[
    TRANSLATABLE,
    attr("options", AttributeType::OptionList),
    attr("minValues", AttributeType::Integer),
    attr("maxValues", AttributeType::Integer),
];
const ASSET_ATTRIBUTES: &[AttributeSpec] =
    &[TRANSLATABLE, attr("fileTypes", AttributeType::FileTypes)];
const REFERENCE_ATTRIBUTES: &[AttributeSpec] = &[attr("path", AttributeType::String)];
const SCHEMA_ATTRIBUTES: &[AttributeSpec] = &[attr("schemas", AttributeType::StringList)];

impl FieldKind {
    /// Every kind, in declaration order.
    pub const ALL: [FieldKind; 16] = [
        FieldKind::Text,
        FieldKind::Textarea,
        FieldKind::Markdown,
        FieldKind::Number,
        FieldKind::Color,
        FieldKind::Date,
        FieldKind::Boolean,
        FieldKind::Option,
        FieldKind::Options,
        FieldKind::Link,
        FieldKind::Reference,
        FieldKind::References,
        FieldKind::Asset,
        FieldKind::Assets,
        FieldKind::Schema,
        FieldKind::Schemas,
    ];

    /// Wire name, e.g. `TEXTAREA`.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Text => "TEXT",
            FieldKind::Textarea => "TEXTAREA",
            FieldKind::Markdown => "MARKDOWN",
            FieldKind::Number => "NUMBER",
            FieldKind::Color => "COLOR",
            FieldKind::Date => "DATE",
            FieldKind::Boolean => "BOOLEAN",
            FieldKind::Option => "OPTION",
            FieldKind::Options => "OPTIONS",
            FieldKind::Link => "LINK",
            FieldKind::Reference => "REFERENCE",
            FieldKind::References => "REFERENCES",
            FieldKind::Asset => "ASSET",
            FieldKind::Assets => "ASSETS",
            FieldKind::Schema => "SCHEMA",
            FieldKind::Schemas => "SCHEMAS",
        }
    }

    /// Human-readable description shown next to the kind picker.
    pub fn description(self) -> &'static str {
        match self {
            FieldKind::Text => "Text: a single line of text",
            FieldKind::Textarea => "TextArea: multiple lines of plain text",
            FieldKind::Markdown => "Markdown: rich text written in Markdown",
            FieldKind::Number => "Number: an integer or decimal value",
            FieldKind::Color => "Color: a hex color such as #1A2B3C",
            FieldKind::Date => "Date: a calendar date",
            FieldKind::Boolean => "Boolean: a yes/no toggle",
            FieldKind::Option => "Option: one value from a fixed list",
            FieldKind::Options => "Options: several values from a fixed list",
            FieldKind::Link => "Link: a URL or a link to another content",
            FieldKind::Reference => "Reference: one content under a path",
            FieldKind::References => "References: several contents under a path",
            FieldKind::Asset => "Asset: one file from the asset library",
            FieldKind::Assets => "Assets: several files from the asset library",
            FieldKind::Schema => "Schema: one nested block of an allowed schema",
            FieldKind::Schemas => "Schemas: a list of nested blocks of allowed schemas",
        }
    }

    /// The kind-specific attributes a field of this kind carries.
    pub fn attributes(self) -> &'static [AttributeSpec] {
        match self {
            FieldKind::Text | FieldKind::Textarea | FieldKind::Markdown => TEXT_ATTRIBUTES,
            FieldKind::Number => NUMBER_ATTRIBUTES,
            FieldKind::Color | FieldKind::Date | FieldKind::Boolean | FieldKind::Link => {
                TRANSLATABLE_ATTRIBUTES
            }
            FieldKind::Option => OPTION_ATTRIBUTES,
            FieldKind::Options => OPTIONS_ATTRIBUTES,
            FieldKind::Asset | FieldKind::Assets => ASSET_ATTRIBUTES,
            FieldKind::Reference | FieldKind::References => REFERENCE_ATTRIBUTES,
            FieldKind::Schema | FieldKind::Schemas => SCHEMA_ATTRIBUTES,
        }
    }

    /// Whether this kind allows the `translatable` flag.
    pub fn supports_translation(self) -> bool {
        self.attributes().contains(&TRANSLATABLE)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = FieldsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| FieldsError::UnknownKind(s.to_string()))
    }
}

/// File types an asset field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetFileType {
    Any,
    Image,
    Video,
    Audio,
    Text,
    Application,
}
