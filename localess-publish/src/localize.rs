//! Per-locale projection of authored content data.

use localess_fields::{FieldType, Schema};
use serde_json::{Map, Value};

/// Keys carried through to published blocks even though no field declares them.
const BLOCK_KEYS: [&str; 2] = ["_id", "schema"];

/// Project `data` onto `locale`.
///
/// The output holds one key per schema field. A translatable field reads
/// `{name}_{locale}` and falls back to `{name}` when that is missing or
/// blank; the fallback locale always reads `{name}`. Nested SCHEMA and
/// SCHEMAS values are projected with the schema named by their `schema` key.
pub fn localize_data(
    data: &Value,
    schema: &Schema,
    schemas: &[Schema],
    locale: &str,
    fallback: &str,
) -> Value {
    match data.as_object() {
        Some(object) => Value::Object(localize_object(object, schema, schemas, locale, fallback)),
        None => data.clone(),
    }
}

fn localize_object(
    object: &Map<String, Value>,
    schema: &Schema,
    schemas: &[Schema],
    locale: &str,
    fallback: &str,
) -> Map<String, Value> {
    let mut out = Map::new();
    for key in BLOCK_KEYS {
        if let Some(value) = object.get(key) {
            out.insert(key.to_string(), value.clone());
        }
    }
    for field in &schema.fields {
        let localized = (field.field_type.is_translatable() && locale != fallback)
            .then(|| object.get(&format!("{}_{locale}", field.name)))
            .flatten()
            .filter(|v| !is_blank(v));
        let Some(value) = localized.or_else(|| object.get(&field.name)) else {
            continue;
        };
        let value = match &field.field_type {
            FieldType::Schema(_) => localize_block(value, schemas, locale, fallback),
            FieldType::Schemas(_) => match value.as_array() {
                Some(items) => Value::Array(
                    items
                        .iter()
                        .map(|item| localize_block(item, schemas, locale, fallback))
                        .collect(),
                ),
                None => value.clone(),
            },
            _ => value.clone(),
        };
        out.insert(field.name.clone(), value);
    }
    out
}

fn localize_block(value: &Value, schemas: &[Schema], locale: &str, fallback: &str) -> Value {
    let nested = value
        .get("schema")
        .and_then(Value::as_str)
        .and_then(|name| schemas.iter().find(|s| s.name == name));
    match (value.as_object(), nested) {
        (Some(object), Some(schema)) => {
            Value::Object(localize_object(object, schema, schemas, locale, fallback))
        }
        _ => value.clone(),
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}
