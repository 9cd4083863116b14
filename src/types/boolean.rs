use crate::{error::CastError, value::Value};

use super::invalid_cast;

pub const TRUE_VALUES: &[&str] = &["t", "yes", "true"];
pub const FALSE_VALUES: &[&str] = &["f", "no", "false"];

/// Exact membership only: strings match case-sensitively and numbers match
/// just `1` and `0`.
pub(super) fn cast(field: &str, value: Value) -> Result<Value, CastError> {
    let parsed = match &value {
        Value::Boolean(b) => Some(*b),
        Value::Integer(1) => Some(true),
        Value::Integer(0) => Some(false),
        Value::Number(f) if *f == 1.0 => Some(true),
        Value::Number(f) if *f == 0.0 => Some(false),
        Value::String(raw) if TRUE_VALUES.contains(&raw.as_str()) => Some(true),
        Value::String(raw) if FALSE_VALUES.contains(&raw.as_str()) => Some(false),
        _ => None,
    };
    parsed
        .map(Value::Boolean)
        .ok_or_else(|| invalid_cast(field, &value, "boolean"))
}
