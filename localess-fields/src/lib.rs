//! Field kind registry and schema edit sessions
//!
//! `localess-fields` owns everything that describes the *shape* of content:
//!
//! - **Kind registry**: the closed set of [`FieldKind`]s and the attributes each allows
//! - **Schema model**: [`Schema`] and [`SchemaField`], where [`FieldType`] carries
//!   exactly the attributes legal for its kind
//! - **Edit sessions**: [`SchemaEditor`] adds, removes, reorders and selects fields
//!   while tracking reserved names in a [`NameRegistry`]
//! - **Validation**: advisory checks for schemas and for authored content values
//!
//! Persistence lives in `localess-store`; this crate never touches disk.

pub mod content;
pub mod editor;
pub mod error;
pub mod kind;
pub mod names;
pub mod types;
pub mod validation;

pub use content::validate_content;
pub use editor::{FieldForm, SchemaEditor};
pub use error::{FieldsError, Result};
pub use kind::{AssetFileType, AttributeSpec, AttributeType, FieldKind};
pub use names::NameRegistry;
pub use types::{
    AssetAttributes, FieldBase, FieldType, MultiOptionAttributes, NestedSchemaAttributes,
    NumberAttributes, OptionAttributes, ReferenceAttributes, Schema, SchemaField, SchemaUpdate,
    SelectOption, TextAttributes, TranslatableAttributes,
};
pub use validation::ValidationIssue;
