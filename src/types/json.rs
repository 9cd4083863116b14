use serde_json::Value as JsonValue;

use crate::{error::CastError, value::Value};

use super::invalid_cast;

/// Null tokens are screened out as absence before casting, so any value that
/// gets here is not null.
pub(super) fn cast_null(field: &str, value: Value) -> Result<Value, CastError> {
    Err(invalid_cast(field, &value, "null"))
}

pub(super) fn cast_object(field: &str, value: Value) -> Result<Value, CastError> {
    let invalid = |value: &Value| CastError::InvalidObject {
        field: field.to_string(),
        value: value.as_display(),
    };
    match value {
        Value::Object(map) => Ok(Value::Object(map)),
        Value::String(ref raw) => match serde_json::from_str::<JsonValue>(raw) {
            Ok(JsonValue::Object(map)) => Ok(Value::Object(map)),
            _ => Err(invalid(&value)),
        },
        other => Err(invalid(&other)),
    }
}

/// JSON arrays only; comma-separated text is not split.
pub(super) fn cast_array(field: &str, value: Value) -> Result<Value, CastError> {
    let invalid = |value: &Value| CastError::InvalidArray {
        field: field.to_string(),
        value: value.as_display(),
    };
    match value {
        Value::Array(items) => Ok(Value::Array(items)),
        Value::String(ref raw) => match serde_json::from_str::<JsonValue>(raw) {
            Ok(JsonValue::Array(items)) => Ok(Value::Array(items)),
            _ => Err(invalid(&value)),
        },
        other => Err(invalid(&other)),
    }
}
