//! Predicates and coercions over raw JSON values.
//!
//! Scalars are judged by their string form, so `300` and `"300"` are both
//! numeric and `true`, `"true"` and `"1"` are all booleans. An absent field or
//! `null` behaves like an empty string.

use serde_json::Value;

/// Non-empty once rendered as a string
pub fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(_) => true,
    }
}

/// Decimal number, optionally signed, as a JSON number or numeric string
pub fn is_numeric(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Number(_)) => true,
        Some(Value::String(s)) => is_numeric_str(s),
        _ => false,
    }
}

/// Whole number in `i32` range
pub fn is_int(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Number(n)) => n.as_i64().is_some_and(|n| i32::try_from(n).is_ok()),
        Some(Value::String(s)) => parse_i32(s).is_some(),
        _ => false,
    }
}

/// `true`, `false`, `1`, `0` or their string forms
pub fn is_boolean(value: Option<&Value>) -> bool {
    value.and_then(as_bool).is_some()
}

/// Absent, `null`, or a boolean
pub fn is_optional_boolean(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null)) || is_boolean(value)
}

/// Strictly greater than zero; `true` counts as 1 and `false` as 0
pub fn is_positive(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        _ => value.and_then(as_number).is_some_and(|n| n > 0.0),
    }
}

/// Finite numeric value of a number or numeric string
pub fn as_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if is_numeric_str(s) => s.parse().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

/// Boolean value under the loose rules of [`is_boolean`]
pub fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        Value::String(s) => match s.as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// String form of a scalar; `None` for null, arrays and objects
pub fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Parse a path segment as an `i32`, accepting an optional sign
pub fn parse_i32(raw: &str) -> Option<i32> {
    let digits = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

fn is_numeric_str(s: &str) -> bool {
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };

    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());

    match frac_part {
        Some(frac) => !frac.is_empty() && all_digits(frac) && all_digits(int_part),
        None => !int_part.is_empty() && all_digits(int_part),
    }
}
