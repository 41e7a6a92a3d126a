//! Validation of authored content values against a schema.
//!
//! Content data is a JSON object keyed by field name. Nested SCHEMA/SCHEMAS
//! values are objects carrying a `schema` key naming the schema they follow,
//! and are validated recursively against it.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::types::{FieldType, Schema, SchemaField, SelectOption};
use crate::validation::ValidationIssue;

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("color pattern"));

/// Validate `data` against `schema`. `schemas` resolves nested blocks by name.
pub fn validate_content(schema: &Schema, data: &Value, schemas: &[Schema]) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    match data.as_object() {
        Some(object) => validate_object(schema, object, schemas, "", &mut issues),
        None => issues.push(ValidationIssue::new("data", "must be an object")),
    }
    issues
}

fn validate_object(
    schema: &Schema,
    object: &Map<String, Value>,
    schemas: &[Schema],
    prefix: &str,
    issues: &mut Vec<ValidationIssue>,
) {
    for field in &schema.fields {
        let path = if prefix.is_empty() {
            field.name.clone()
        } else {
            format!("{prefix}.{}", field.name)
        };
        match object.get(&field.name).filter(|v| !is_blank(v)) {
            Some(value) => validate_value(field, value, schemas, &path, issues),
            None if field.is_required() => issues.push(ValidationIssue::new(path, "is required")),
            None => {}
        }
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        _ => false,
    }
}

fn validate_value(
    field: &SchemaField,
    value: &Value,
    schemas: &[Schema],
    path: &str,
    issues: &mut Vec<ValidationIssue>,
) {
    let mut fail = |message: String| issues.push(ValidationIssue::new(path, message));
    match &field.field_type {
        FieldType::Text(a) | FieldType::Textarea(a) | FieldType::Markdown(a) => {
            let Some(text) = value.as_str() else {
                return fail("must be text".into());
            };
            let len = text.chars().count() as u64;
            if let Some(min) = a.min_length.filter(|&min| len < u64::from(min)) {
                fail(format!("must be at least {min} characters"));
            }
            if let Some(max) = a.max_length.filter(|&max| len > u64::from(max)) {
                fail(format!("must be at most {max} characters"));
            }
        }
        FieldType::Number(a) => {
            let Some(number) = value.as_f64() else {
                return fail("must be a number".into());
            };
            if let Some(min) = a.min_value.filter(|&min| number < min) {
                fail(format!("must be at least {min}"));
            }
            if let Some(max) = a.max_value.filter(|&max| number > max) {
                fail(format!("must be at most {max}"));
            }
        }
        FieldType::Color(_) => {
            if !value.as_str().is_some_and(|s| HEX_COLOR.is_match(s)) {
                fail("must be a color like #1A2B3C".into());
            }
        }
        FieldType::Date(_) => {
            let parsed = value
                .as_str()
                .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"));
            if !matches!(parsed, Some(Ok(_))) {
                fail("must be a date like 2024-01-31".into());
            }
        }
        FieldType::Boolean(_) => {
            if !value.is_boolean() {
                fail("must be true or false".into());
            }
        }
        FieldType::Option(a) => {
            if !value.as_str().is_some_and(|s| is_option(&a.options, s)) {
                fail("must be one of the options".into());
            }
        }
        FieldType::Options(a) => {
            let Some(items) = value.as_array() else {
                return fail("must be a list of options".into());
            };
            if !items
                .iter()
                .all(|v| v.as_str().is_some_and(|s| is_option(&a.options, s)))
            {
                fail("must only contain the options".into());
            }
            let count = items.len() as u64;
            if let Some(min) = a.min_values.filter(|&min| count < u64::from(min)) {
                fail(format!("select at least {min} options"));
            }
            if let Some(max) = a.max_values.filter(|&max| count > u64::from(max)) {
                fail(format!("select at most {max} options"));
            }
        }
        FieldType::Link(_) | FieldType::Asset(_) => {
            if !is_pointer(value) {
                fail("must be a link or an object with a 'uri'".into());
            }
        }
        FieldType::Reference(_) => {
            if !value.is_string() {
                fail("must be a content id".into());
            }
        }
        FieldType::References(_) => {
            if !value.as_array().is_some_and(|a| a.iter().all(Value::is_string)) {
                fail("must be a list of content ids".into());
            }
        }
        FieldType::Assets(_) => {
            if !value.as_array().is_some_and(|a| a.iter().all(is_pointer)) {
                fail("must be a list of assets".into());
            }
        }
        FieldType::Schema(a) => {
            validate_nested(&a.schemas, value, schemas, path, issues);
        }
        FieldType::Schemas(a) => {
            let Some(items) = value.as_array() else {
                return fail("must be a list of blocks".into());
            };
            for (i, item) in items.iter().enumerate() {
                validate_nested(&a.schemas, item, schemas, &format!("{path}[{i}]"), issues);
            }
        }
    }
}

fn is_option(options: &[SelectOption], value: &str) -> bool {
    options.iter().any(|o| o.value == value)
}

fn is_pointer(value: &Value) -> bool {
    match value {
        Value::String(s) => !s.is_empty(),
        Value::Object(o) => o.get("uri").is_some_and(Value::is_string),
        _ => false,
    }
}

fn validate_nested(
    allowed: &[String],
    value: &Value,
    schemas: &[Schema],
    path: &str,
    issues: &mut Vec<ValidationIssue>,
) {
    let Some(object) = value.as_object() else {
        issues.push(ValidationIssue::new(path, "must be a block object"));
        return;
    };
    let Some(name) = object.get("schema").and_then(Value::as_str) else {
        issues.push(ValidationIssue::new(path, "block is missing its 'schema'"));
        return;
    };
    if !allowed.iter().any(|a| a == name) {
        issues.push(ValidationIssue::new(path, format!("schema '{name}' is not allowed here")));
        return;
    }
    match schemas.iter().find(|s| s.name == name) {
        Some(nested) => validate_object(nested, object, schemas, path, issues),
        None => issues.push(ValidationIssue::new(path, format!("unknown schema '{name}'"))),
    }
}
