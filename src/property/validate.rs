//! Total value converters shared by all property validators.
//!
//! Every function here accepts any JSON value (including `Null` for "absent")
//! and returns a value of the requested type. None of them fail: a value of
//! the wrong shape falls back to the supplied default. Each converter is
//! idempotent, so `f(f(x)) == f(x)` once the result is turned back into a
//! [`Value`].

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::named::Named;

/// Convert to a string. Empty strings and non-scalar values yield `default`.
///
/// Booleans and numbers are formatted; `Null`, arrays and objects are not.
pub fn to_string(raw: &Value, default: &str) -> String {
    match raw {
        Value::String(s) if !s.is_empty() => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        _ => default.to_owned(),
    }
}

/// Convert to a boolean.
///
/// Accepts booleans, the number `1`, and the strings `1 t T TRUE true True`
/// (true) or `0 f F FALSE false False` (false). Anything else yields `default`.
pub fn to_bool(raw: &Value, default: bool) -> bool {
    match raw {
        Value::Bool(b) => *b,
        Value::Number(n) => {
            if n.as_f64() == Some(1.0) {
                true
            } else {
                default
            }
        }
        Value::String(s) => match s.as_str() {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => true,
            "0" | "f" | "F" | "FALSE" | "false" | "False" => false,
            _ => default,
        },
        _ => default,
    }
}

/// Convert to a signed integer. Floats are truncated toward zero, `true` is 1.
pub fn to_integer(raw: &Value, default: i64) -> i64 {
    match raw {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
            .unwrap_or(default),
        Value::Bool(true) => 1,
        Value::String(s) => s.trim().parse::<i64>().unwrap_or(default),
        _ => default,
    }
}

/// Convert to a finite float. `true` is 1.0; NaN and infinities yield `default`.
pub fn to_float(raw: &Value, default: f64) -> f64 {
    let value = match raw {
        Value::Number(n) => n.as_f64(),
        Value::Bool(true) => Some(1.0),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    value.filter(|f| f.is_finite()).unwrap_or(default)
}

/// Convert to a member of a closed enum; anything outside the set is the default.
pub fn to_enum<T: Named + Default>(raw: &Value) -> T {
    raw.as_str().and_then(T::parse).unwrap_or_default()
}

/// Convert to a list of strings. Non-string array items are dropped.
pub fn to_string_list(raw: &Value) -> Vec<String> {
    match raw {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_owned))
            .collect(),
        _ => Vec::new(),
    }
}

/// Merge a string map into `current`. Non-string values are dropped.
pub fn merge_string_map(
    current: &BTreeMap<String, String>,
    raw: &Value,
) -> BTreeMap<String, String> {
    let mut value = current.clone();
    if let Value::Object(map) = raw {
        for (key, item) in map {
            if let Some(text) = item.as_str() {
                value.insert(key.clone(), text.to_owned());
            }
        }
    }
    value
}

/// Merge an object into `current`, key by key.
pub fn merge_object(current: &Map<String, Value>, raw: &Value) -> Map<String, Value> {
    let mut value = current.clone();
    if let Value::Object(map) = raw {
        for (key, item) in map {
            value.insert(key.clone(), item.clone());
        }
    }
    value
}

/// Normalize a swap target: `"this"` by default, otherwise an `#id` selector.
pub fn to_target(raw: &Value) -> String {
    let value = to_string(raw, "this");
    if value == "this" || value.starts_with('#') {
        value
    } else {
        format!("#{value}")
    }
}

/// Clamp a float between optional bounds, flooring it when `integer` is set.
pub fn clamp_number(value: f64, min: Option<f64>, max: Option<f64>, integer: bool) -> f64 {
    let mut value = value;
    if let Some(max) = max {
        if value > max {
            value = max;
        }
    }
    if let Some(min) = min {
        if value < min {
            value = min;
        }
    }
    if integer {
        value = value.floor();
    }
    value
}

// ===========================================================================
// Tests
// ===========================================================================
