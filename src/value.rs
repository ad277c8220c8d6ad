use serde_json::Value;
use std::collections::HashMap;

use crate::property::{PropSpec, PropType};

/// A prop-name to value mapping, as submitted by a form or live-update
/// channel (raw) or after cleaning (coerced). Rebuilt on every update cycle.
pub type ValueMap = HashMap<String, Value>;

/// Truthiness of a raw value.
///
/// `Null`, `false`, numeric zero, the empty string, the string `"0"`, and
/// empty collections are false; everything else is true.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !(s.is_empty() || s == "0"),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Emptiness test used by required-field validation. The complement of
/// [`is_truthy`].
pub fn is_empty_value(value: &Value) -> bool {
    !is_truthy(value)
}

/// Normalize a raw submitted value against the prop's declared semantic type.
///
/// - Boolean props: `Null`, `""` and `"0"` become `false` (checkboxes submit
///   nothing when unchecked); anything else collapses to its truthiness.
/// - Nullable string-like props: the empty string becomes `Null`. This is a
///   deliberate lossy normalization — a cleared field and an explicit empty
///   string are not distinguished.
/// - Everything else passes through unchanged.
///
/// Applying this twice yields the same result as applying it once.
pub fn coerce_value(spec: &PropSpec, raw: Value) -> Value {
    match spec.prop_type {
        PropType::Boolean => match raw {
            Value::Null => Value::Bool(false),
            Value::String(ref s) if s.is_empty() || s == "0" => Value::Bool(false),
            other => Value::Bool(is_truthy(&other)),
        },
        _ if spec.prop_type.is_string_like() && spec.nullable => match raw {
            Value::String(ref s) if s.is_empty() => Value::Null,
            other => other,
        },
        _ => raw,
    }
}
