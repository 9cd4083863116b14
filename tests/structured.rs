mod common;

use chrono::NaiveTime;
use common::{field, required};
use schema_cast::{CastError, FieldType, Value};
use serde_json::json;

#[test]
fn object_passes_maps_through() {
    let field = required(FieldType::Object);
    let map = json!({"key": "value"}).as_object().cloned().unwrap();
    assert_eq!(field.cast(map.clone()).unwrap(), Some(Value::Object(map)));
}

#[test]
fn object_parses_json_text() {
    let field = required(FieldType::Object);
    let expected = json!({"key": "value"}).as_object().cloned().unwrap();
    assert_eq!(
        field.cast(r#"{"key": "value"}"#).unwrap(),
        Some(Value::Object(expected))
    );
}

#[test]
fn object_rejects_arrays_and_bad_json() {
    let field = required(FieldType::Object);
    let list = Value::Array(vec![json!("boo"), json!("ya")]);
    assert!(matches!(
        field.cast(list).unwrap_err(),
        CastError::InvalidObject { .. }
    ));
    assert!(matches!(
        field.cast(r#"["boo", "ya"]"#).unwrap_err(),
        CastError::InvalidObject { .. }
    ));
    assert!(matches!(
        field.cast("{key: value}").unwrap_err(),
        CastError::InvalidObject { .. }
    ));
}

#[test]
fn array_passes_sequences_through() {
    let field = required(FieldType::Array);
    let items = vec![json!("1"), json!("2")];
    assert_eq!(field.cast(items.clone()).unwrap(), Some(Value::Array(items)));
}

#[test]
fn array_parses_json_text_strictly() {
    let field = required(FieldType::Array);
    assert_eq!(
        field.cast(r#"["1", "2"]"#).unwrap(),
        Some(Value::Array(vec![json!("1"), json!("2")]))
    );
    assert!(matches!(
        field.cast("string, string").unwrap_err(),
        CastError::InvalidArray { .. }
    ));
    assert!(matches!(
        field.cast(r#"{"a": 1}"#).unwrap_err(),
        CastError::InvalidArray { .. }
    ));
}

#[test]
fn any_returns_input_unchanged() {
    let field = required(FieldType::Any);
    let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
    for value in [Value::from("1"), Value::from(2), Value::from(noon)] {
        assert_eq!(field.cast(value.clone()).unwrap(), Some(value));
    }
}

#[test]
fn any_accepts_unusual_formats() {
    let field = field(FieldType::Any, "whatever", false);
    assert_eq!(field.cast("x").unwrap(), Some(Value::from("x")));
}
