//! Shared helpers for absence checks and type coercion of raw input values.

use serde::Serialize;
use serde_json::Value;

/// A single value or a sequence of values.
///
/// String validators in array mode and file validators given a sequence
/// produce [`OneOrMany::Many`]; scalar input produces [`OneOrMany::One`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// The single value, if this is [`OneOrMany::One`].
    pub fn one(&self) -> Option<&T> {
        match self {
            OneOrMany::One(value) => Some(value),
            OneOrMany::Many(_) => None,
        }
    }

    /// The values, if this is [`OneOrMany::Many`].
    pub fn many(&self) -> Option<&[T]> {
        match self {
            OneOrMany::One(_) => None,
            OneOrMany::Many(values) => Some(values),
        }
    }
}

impl<T: Into<Value>> From<OneOrMany<T>> for Value {
    fn from(value: OneOrMany<T>) -> Self {
        match value {
            OneOrMany::One(v) => v.into(),
            OneOrMany::Many(vs) => Value::Array(vs.into_iter().map(Into::into).collect()),
        }
    }
}

/// `null`, or a string that is empty after trimming.
pub(crate) fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// `null`, or the empty string.
pub(crate) fn is_null_or_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// `null`, or an empty sequence.
pub(crate) fn is_null_or_empty_seq(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Coerce a raw value to a whole number.
///
/// Strings are parsed base-10 after trimming; numbers must have no
/// fractional part and fit in an `i64`.
pub(crate) fn to_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// A whole number, as a JSON number or a base-10 string, regardless of
/// whether it fits in an `i64`.
pub(crate) fn is_whole_number(value: &Value) -> bool {
    match value {
        Value::Number(n) => {
            n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.is_finite() && f.fract() == 0.0)
        }
        Value::String(s) => {
            let digits = s.trim();
            let digits = digits.strip_prefix(['+', '-']).unwrap_or(digits);
            !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
        }
        _ => false,
    }
}

/// Coerce a raw value to a boolean.
///
/// `"true"`/`"1"` and `"false"`/`"0"` are accepted case-insensitively.
pub(crate) fn to_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Short name of a JSON value's type, for diagnostics.
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
