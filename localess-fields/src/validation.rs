//! Advisory validators for schemas and their fields.
//!
//! Validators collect [`ValidationIssue`]s instead of failing fast. An edit
//! session keeps working with issues present; only submitting is blocked.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::names::NameRegistry;
use crate::types::{FieldType, SchemaField, SelectOption};

pub const SCHEMA_NAME_MIN: usize = 3;
pub const SCHEMA_NAME_MAX: usize = 30;
pub const FIELD_NAME_MIN: usize = 2;
pub const FIELD_NAME_MAX: usize = 30;
pub const DISPLAY_NAME_MAX: usize = 30;
pub const DESCRIPTION_MAX: usize = 250;
pub const DEFAULT_VALUE_MAX: usize = 250;
pub const OPTION_MAX: usize = 50;

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9_]*$").expect("identifier pattern"));

/// A single problem found by validation, keyed by the path of the offending control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

fn check_identifier(path: &str, value: &str, min: usize, max: usize) -> Vec<ValidationIssue> {
    if value.is_empty() {
        return vec![ValidationIssue::new(path, "is required")];
    }
    let mut issues = Vec::new();
    if value.chars().any(char::is_whitespace) {
        issues.push(ValidationIssue::new(path, "must not contain spaces"));
    } else if !IDENTIFIER.is_match(value) {
        issues.push(ValidationIssue::new(
            path,
            "must start with a letter and contain only letters, digits and '_'",
        ));
    }
    let len = value.chars().count();
    if len < min {
        issues.push(ValidationIssue::new(path, format!("must be at least {min} characters")));
    }
    if len > max {
        issues.push(ValidationIssue::new(path, format!("must be at most {max} characters")));
    }
    issues
}

fn check_max_len(path: &str, value: Option<&str>, max: usize) -> Option<ValidationIssue> {
    value
        .filter(|v| v.chars().count() > max)
        .map(|_| ValidationIssue::new(path, format!("must be at most {max} characters")))
}

/// Format rules for a schema name plus uniqueness among the space's schemas.
///
/// `own` is the persisted name of the schema being edited; keeping it is
/// never a collision.
pub fn check_schema_name(
    name: &str,
    reserved: &NameRegistry,
    own: Option<&str>,
) -> Vec<ValidationIssue> {
    let mut issues = check_identifier("name", name, SCHEMA_NAME_MIN, SCHEMA_NAME_MAX);
    if !name.is_empty() && reserved.is_reserved(name, own) {
        issues.push(ValidationIssue::new("name", "is already in use"));
    }
    issues
}

pub fn check_display_name(path: &str, value: Option<&str>) -> Vec<ValidationIssue> {
    check_max_len(path, value, DISPLAY_NAME_MAX).into_iter().collect()
}

/// The preview field must name one of `fields` when set.
pub fn check_preview_field(preview: Option<&str>, fields: &[SchemaField]) -> Vec<ValidationIssue> {
    match preview {
        Some(p) if !p.is_empty() && !fields.iter().any(|f| f.name == p) => vec![
            ValidationIssue::new("previewField", format!("'{p}' is not a field of this schema")),
        ],
        _ => Vec::new(),
    }
}

/// Format rules for a field name. Uniqueness depends on the edit session and
/// is checked by the editor.
pub fn check_field_name(path: &str, name: &str) -> Vec<ValidationIssue> {
    check_identifier(path, name, FIELD_NAME_MIN, FIELD_NAME_MAX)
}

/// Everything about a field except its name.
pub fn check_field_attributes(prefix: &str, field: &SchemaField) -> Vec<ValidationIssue> {
    let at = |attr: &str| format!("{prefix}.{attr}");
    let mut issues = Vec::new();
    issues.extend(check_max_len(&at("displayName"), field.display_name.as_deref(), DISPLAY_NAME_MAX));
    issues.extend(check_max_len(&at("description"), field.description.as_deref(), DESCRIPTION_MAX));
    issues.extend(check_max_len(
        &at("defaultValue"),
        field.default_value.as_deref(),
        DEFAULT_VALUE_MAX,
    ));

    match &field.field_type {
        FieldType::Text(a) | FieldType::Textarea(a) | FieldType::Markdown(a) => {
            issues.extend(check_bounds(&at("maxLength"), a.min_length, a.max_length));
        }
        FieldType::Number(a) => {
            if let (Some(min), Some(max)) = (a.min_value, a.max_value) {
                if min > max {
                    issues.push(ValidationIssue::new(at("maxValue"), "must not be less than minValue"));
                }
            }
        }
        FieldType::Option(a) => {
            issues.extend(check_options(&at("options"), &a.options));
        }
        FieldType::Options(a) => {
            issues.extend(check_options(&at("options"), &a.options));
            issues.extend(check_bounds(&at("maxValues"), a.min_values, a.max_values));
        }
        FieldType::Asset(a) | FieldType::Assets(a) => {
            if a.file_types.is_empty() {
                issues.push(ValidationIssue::new(at("fileTypes"), "select at least one file type"));
            }
        }
        FieldType::Schema(a) | FieldType::Schemas(a) => {
            if a.schemas.is_empty() {
                issues.push(ValidationIssue::new(at("schemas"), "select at least one schema"));
            }
        }
        FieldType::Color(_)
        | FieldType::Date(_)
        | FieldType::Boolean(_)
        | FieldType::Link(_)
        | FieldType::Reference(_)
        | FieldType::References(_) => {}
    }
    issues
}

fn check_bounds(path: &str, min: Option<u32>, max: Option<u32>) -> Option<ValidationIssue> {
    match (min, max) {
        (Some(min), Some(max)) if min > max => {
            Some(ValidationIssue::new(path, "must not be less than the minimum"))
        }
        _ => None,
    }
}

fn check_options(path: &str, options: &[SelectOption]) -> Vec<ValidationIssue> {
    if options.is_empty() {
        return vec![ValidationIssue::new(path, "add at least one option")];
    }
    let mut issues = Vec::new();
    for (i, option) in options.iter().enumerate() {
        for (attr, value) in [("name", &option.name), ("value", &option.value)] {
            let p = format!("{path}[{i}].{attr}");
            if value.is_empty() {
                issues.push(ValidationIssue::new(p, "is required"));
            } else if value.chars().count() > OPTION_MAX {
                issues.push(ValidationIssue::new(p, format!("must be at most {OPTION_MAX} characters")));
            }
        }
    }
    issues
}
