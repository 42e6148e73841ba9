//! JSON comparison helpers used by assertions

use serde_json::{Number, Value};

use crate::common::{Error, Result};

/// Deep equality where numbers compare by value (`1 == 1.0`)
pub fn json_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => numbers_eq(x, y),
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| json_eq(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(key, x)| ys.get(key).is_some_and(|y| json_eq(x, y)))
        }
        _ => a == b,
    }
}

fn numbers_eq(x: &Number, y: &Number) -> bool {
    if let (Some(a), Some(b)) = (x.as_i64(), y.as_i64()) {
        return a == b;
    }
    if let (Some(a), Some(b)) = (x.as_u64(), y.as_u64()) {
        return a == b;
    }
    match (x.as_f64(), y.as_f64()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Follow a dot-separated path through objects (and arrays, by index)
///
/// Every segment must be defined; the first missing one fails with the path
/// walked so far.
pub fn lookup_path<'a>(root: Option<&'a Value>, path: &str) -> Result<&'a Value> {
    let mut current = root.ok_or_else(|| Error::MissingField(path.to_string()))?;
    let mut walked = String::new();

    for segment in path.split('.') {
        if !walked.is_empty() {
            walked.push('.');
        }
        walked.push_str(segment);

        let next = match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        };
        current = next.ok_or_else(|| Error::MissingField(walked.clone()))?;
    }

    Ok(current)
}

/// Interpret a table cell as a typed expectation
///
/// `"true"`/`"false"` become booleans, finite numbers become numbers, and
/// anything else stays a string.
pub fn coerce_expected(text: &str) -> Value {
    match text {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }

    let trimmed = text.trim();
    if !trimmed.is_empty() {
        if let Ok(int) = trimmed.parse::<i64>() {
            return Value::from(int);
        }
        if let Some(number) = trimmed
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .and_then(Number::from_f64)
        {
            return Value::Number(number);
        }
    }

    Value::String(text.to_string())
}

/// Strict comparison of a coerced expectation with an actual value
///
/// Types must match: the string `"42"` does not equal the number `42`.
pub fn strict_eq(expected: &Value, actual: &Value) -> bool {
    match (expected, actual) {
        (Value::Number(x), Value::Number(y)) => numbers_eq(x, y),
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        _ => false,
    }
}
