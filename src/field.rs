//! Field descriptors: the declared `{name, type, format, constraints}` record for
//! one column of tabular data.
//!
//! A [`FieldDescriptor`] is plain data, deserialized from an already-parsed
//! table-schema document. Binding it to a casting strategy happens in
//! [`crate::types::Field::new`], which parses the format string once.

use std::{collections::BTreeMap, fmt, str::FromStr};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use serde_json::Value as JsonValue;

pub const DEFAULT_FORMAT: &str = "default";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FieldType {
    #[default]
    String,
    Number,
    Integer,
    Boolean,
    Null,
    Object,
    Array,
    Date,
    Time,
    DateTime,
    GeoPoint,
    GeoJson,
    Any,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Integer => "integer",
            FieldType::Boolean => "boolean",
            FieldType::Null => "null",
            FieldType::Object => "object",
            FieldType::Array => "array",
            FieldType::Date => "date",
            FieldType::Time => "time",
            FieldType::DateTime => "datetime",
            FieldType::GeoPoint => "geopoint",
            FieldType::GeoJson => "geojson",
            FieldType::Any => "any",
        }
    }

    pub fn variants() -> &'static [&'static str] {
        &[
            "string", "number", "integer", "boolean", "null", "object", "array", "date", "time",
            "datetime", "geopoint", "geojson", "any",
        ]
    }

    /// Only `string` keeps the empty literal as a value rather than absence.
    pub fn is_textual(&self) -> bool {
        matches!(self, FieldType::String)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "string" => Ok(FieldType::String),
            "number" => Ok(FieldType::Number),
            "integer" => Ok(FieldType::Integer),
            "boolean" => Ok(FieldType::Boolean),
            "null" => Ok(FieldType::Null),
            "object" => Ok(FieldType::Object),
            "array" => Ok(FieldType::Array),
            "date" => Ok(FieldType::Date),
            "time" => Ok(FieldType::Time),
            "datetime" => Ok(FieldType::DateTime),
            "geopoint" => Ok(FieldType::GeoPoint),
            "geojson" => Ok(FieldType::GeoJson),
            "any" => Ok(FieldType::Any),
            _ => Err(anyhow!(
                "Unknown field type '{value}'. Supported types: {}",
                FieldType::variants().join(", ")
            )),
        }
    }
}

impl Serialize for FieldType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FieldType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let token = String::deserialize(deserializer)?;
        FieldType::from_str(&token).map_err(|err| de::Error::custom(err.to_string()))
    }
}

/// Schema constraints. Only `required` drives casting; other keys (`pattern`,
/// `minimum`, `enum`, ...) are kept for the schema layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Constraints(BTreeMap<String, JsonValue>);

impl Constraints {
    pub fn required(&self) -> bool {
        self.0
            .get("required")
            .and_then(JsonValue::as_bool)
            .unwrap_or(false)
    }

    pub fn set_required(&mut self, required: bool) {
        self.0
            .insert("required".to_string(), JsonValue::Bool(required));
    }

    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    #[serde(default = "FieldDescriptor::default_format")]
    pub format: String,
    #[serde(default, skip_serializing_if = "Constraints::is_empty")]
    pub constraints: Constraints,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_char: Option<char>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimal_char: Option<char>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            format: Self::default_format(),
            constraints: Constraints::default(),
            group_char: None,
            decimal_char: None,
        }
    }

    fn default_format() -> String {
        DEFAULT_FORMAT.to_string()
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.constraints.set_required(required);
        self
    }

    pub fn with_group_char(mut self, group_char: char) -> Self {
        self.group_char = Some(group_char);
        self
    }

    pub fn with_decimal_char(mut self, decimal_char: char) -> Self {
        self.decimal_char = Some(decimal_char);
        self
    }

    pub fn required(&self) -> bool {
        self.constraints.required()
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("Parsing field descriptor from JSON")
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        serde_yaml::from_str(raw).context("Parsing field descriptor from YAML")
    }
}
