use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

pub const DATE_DISPLAY_FORMAT: &str = "%Y-%m-%d";
pub const TIME_DISPLAY_FORMAT: &str = "%H:%M:%S";
pub const DATETIME_DISPLAY_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Longitude/latitude pair, kept in input order.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct GeoPoint {
    pub longitude: Decimal,
    pub latitude: Decimal,
}

impl GeoPoint {
    pub fn new(longitude: Decimal, latitude: Decimal) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    pub fn as_pair(&self) -> [Decimal; 2] {
        [self.longitude, self.latitude]
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.longitude, self.latitude)
    }
}

/// Raw input and cast output share one representation: a reader hands over
/// `Value::String` cells, and already-typed values pass through casting.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub enum Value {
    Null,
    String(String),
    Integer(i64),
    Number(f64),
    Boolean(bool),
    Object(Map<String, JsonValue>),
    Array(Vec<JsonValue>),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    GeoPoint(GeoPoint),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::String(_) => "string",
            Value::Integer(_) => "integer",
            Value::Number(_) => "number",
            Value::Boolean(_) => "boolean",
            Value::Object(_) => "object",
            Value::Array(_) => "array",
            Value::Date(_) => "date",
            Value::Time(_) => "time",
            Value::DateTime(_) => "datetime",
            Value::GeoPoint(_) => "geopoint",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_display(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            Value::Integer(i) => i.to_string(),
            Value::Number(f) => {
                if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
                    format!("{f:.1}")
                } else {
                    f.to_string()
                }
            }
            Value::Boolean(b) => b.to_string(),
            Value::Object(_) | Value::Array(_) => self.to_json().to_string(),
            Value::Date(d) => d.format(DATE_DISPLAY_FORMAT).to_string(),
            Value::Time(t) => t.format(TIME_DISPLAY_FORMAT).to_string(),
            Value::DateTime(dt) => dt.format(DATETIME_DISPLAY_FORMAT).to_string(),
            Value::GeoPoint(point) => point.to_string(),
        }
    }

    /// Renders the value as JSON for downstream serialization.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Null => JsonValue::Null,
            Value::String(s) => JsonValue::String(s.clone()),
            Value::Integer(i) => JsonValue::from(*i),
            Value::Number(f) => serde_json::Number::from_f64(*f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Value::Boolean(b) => JsonValue::Bool(*b),
            Value::Object(map) => JsonValue::Object(map.clone()),
            Value::Array(items) => JsonValue::Array(items.clone()),
            Value::Date(_) | Value::Time(_) | Value::DateTime(_) => {
                JsonValue::String(self.as_display())
            }
            Value::GeoPoint(point) => JsonValue::Array(
                point
                    .as_pair()
                    .iter()
                    .map(|component| {
                        serde_json::from_str::<JsonValue>(&component.normalize().to_string())
                            .unwrap_or(JsonValue::Null)
                    })
                    .collect(),
            ),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_display())
    }
}

impl From<JsonValue> for Value {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Boolean(b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            },
            JsonValue::String(s) => Value::String(s),
            JsonValue::Array(items) => Value::Array(items),
            JsonValue::Object(map) => Value::Object(map),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Value::Date(value)
    }
}

impl From<NaiveTime> for Value {
    fn from(value: NaiveTime) -> Self {
        Value::Time(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Value::DateTime(value)
    }
}

impl From<GeoPoint> for Value {
    fn from(value: GeoPoint) -> Self {
        Value::GeoPoint(value)
    }
}

impl From<Map<String, JsonValue>> for Value {
    fn from(value: Map<String, JsonValue>) -> Self {
        Value::Object(value)
    }
}

impl From<Vec<JsonValue>> for Value {
    fn from(value: Vec<JsonValue>) -> Self {
        Value::Array(value)
    }
}
