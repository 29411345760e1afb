//! Property extraction from raw JSON.
//!
//! `extract` turns one field of a card node into the canonical string value
//! for its declared kind. It never fails: a field that is missing or shaped
//! differently than declared yields an empty string, and the rest of the card
//! is unaffected.

use serde_json::Value;

use crate::schema::{PropertyDef, PropertyKind, DELIMITER};

/// Subfield holding the value id of object-shaped enum entries.
const OBJECT_ID_FIELD: &str = "id";

/// Extract the value of `def` from a card node.
#[must_use]
pub fn extract(node: &Value, def: &PropertyDef) -> String {
    let Some(field) = node.get(&def.name) else {
        return String::new();
    };

    match extract_field(field, def.kind) {
        Some(value) => value,
        None => {
            tracing::debug!(
                property = %def.name,
                kind = %def.kind,
                "property shape does not match its kind; using empty value"
            );
            String::new()
        }
    }
}

fn extract_field(field: &Value, kind: PropertyKind) -> Option<String> {
    match kind {
        PropertyKind::String
        | PropertyKind::StringEnum
        | PropertyKind::Integer
        | PropertyKind::Number
        | PropertyKind::Boolean => scalar(field),
        PropertyKind::EscapedString => scalar(field).map(|s| s.replace('\\', "")),
        PropertyKind::StringList | PropertyKind::StringEnumList => {
            let Value::Array(items) = field else {
                return Some(String::new());
            };
            let parts = items.iter().map(scalar).collect::<Option<Vec<_>>>()?;
            Some(join(parts))
        }
        PropertyKind::Object => Some(object_text(field)),
        PropertyKind::ObjectEnum => Some(object_id(field)),
        PropertyKind::ObjectList => Some(join_items(field, object_text)),
        PropertyKind::ObjectEnumList => Some(join_items(field, object_id)),
    }
}

/// String form of a scalar. `None` for arrays and objects.
pub(crate) fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// String form of a named scalar field; empty when missing or structured.
pub(crate) fn scalar_field(node: &Value, name: &str) -> String {
    node.get(name).and_then(scalar).unwrap_or_default()
}

fn object_text(value: &Value) -> String {
    match value {
        Value::Object(_) => value.to_string(),
        _ => String::new(),
    }
}

fn object_id(value: &Value) -> String {
    match value {
        Value::Object(_) => scalar_field(value, OBJECT_ID_FIELD),
        _ => String::new(),
    }
}

fn join_items(field: &Value, item: fn(&Value) -> String) -> String {
    match field {
        Value::Array(items) => join(items.iter().map(item)),
        _ => String::new(),
    }
}

/// Join list items with the delimiter. A delimiter is only written once the
/// value is non-empty, so leading empty items vanish while later ones keep
/// their position.
fn join(parts: impl IntoIterator<Item = String>) -> String {
    parts.into_iter().fold(String::new(), |mut joined, part| {
        if !joined.is_empty() {
            joined.push_str(DELIMITER);
        }
        joined.push_str(&part);
        joined
    })
}
