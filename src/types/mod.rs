//! Casting variants and the dispatch that binds a [`FieldDescriptor`] to one
//! of them.
//!
//! [`Field::new`] validates and parses the descriptor's format once into a
//! [`Caster`]. [`Field::cast`] then runs the null-token policy followed by
//! the caster's own logic, with no state carried between calls.

mod boolean;
mod geo;
mod json;
mod number;
mod string;
mod temporal;

use anyhow::{Context, Result, bail};
use log::debug;

use crate::{
    error::CastError,
    field::{DEFAULT_FORMAT, FieldDescriptor, FieldType},
    null::{self, NullCategory, Presence},
    numeric::Separators,
    temporal::TemporalFormat,
    value::Value,
};

pub use geo::{GeoPointFormat, validate_geojson};
pub use number::NumberFormat;
pub use string::StringFormat;

/// Per-type casting strategy with its parsed format configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum Caster {
    String(StringFormat),
    Number {
        format: NumberFormat,
        separators: Separators,
    },
    Integer,
    Boolean,
    Null,
    Object,
    Array,
    Date(TemporalFormat),
    Time(TemporalFormat),
    DateTime(TemporalFormat),
    GeoPoint(GeoPointFormat),
    GeoJson,
    Any,
}

impl Caster {
    pub fn from_descriptor(descriptor: &FieldDescriptor) -> Result<Self> {
        let format = descriptor.format.as_str();
        let caster = match descriptor.field_type {
            FieldType::String => Caster::String(format.parse()?),
            FieldType::Number => Caster::Number {
                format: format.parse()?,
                separators: Separators::new(descriptor.group_char, descriptor.decimal_char)?,
            },
            FieldType::Integer => default_only(descriptor, Caster::Integer)?,
            FieldType::Boolean => default_only(descriptor, Caster::Boolean)?,
            FieldType::Null => default_only(descriptor, Caster::Null)?,
            FieldType::Object => default_only(descriptor, Caster::Object)?,
            FieldType::Array => default_only(descriptor, Caster::Array)?,
            FieldType::Date => Caster::Date(TemporalFormat::parse(format)?),
            FieldType::Time => Caster::Time(TemporalFormat::parse(format)?),
            FieldType::DateTime => Caster::DateTime(TemporalFormat::parse(format)?),
            FieldType::GeoPoint => Caster::GeoPoint(format.parse()?),
            FieldType::GeoJson => default_only(descriptor, Caster::GeoJson)?,
            FieldType::Any => Caster::Any,
        };
        Ok(caster)
    }

    fn cast_present(&self, field: &str, value: Value) -> Result<Value, CastError> {
        match self {
            Caster::String(format) => string::cast(field, *format, value),
            Caster::Number { format, separators } => {
                number::cast_number(field, *format, *separators, value)
            }
            Caster::Integer => number::cast_integer(field, value),
            Caster::Boolean => boolean::cast(field, value),
            Caster::Null => json::cast_null(field, value),
            Caster::Object => json::cast_object(field, value),
            Caster::Array => json::cast_array(field, value),
            Caster::Date(format) => temporal::cast_date(field, format, value),
            Caster::Time(format) => temporal::cast_time(field, format, value),
            Caster::DateTime(format) => temporal::cast_datetime(field, format, value),
            Caster::GeoPoint(format) => geo::cast_geopoint(field, *format, value),
            Caster::GeoJson => geo::cast_geojson(field, value),
            Caster::Any => Ok(value),
        }
    }
}

fn default_only(descriptor: &FieldDescriptor, caster: Caster) -> Result<Caster> {
    if descriptor.format.trim() != DEFAULT_FORMAT {
        bail!(
            "Field '{}' of type {} only supports the '{}' format, got '{}'",
            descriptor.name,
            descriptor.field_type,
            DEFAULT_FORMAT,
            descriptor.format
        );
    }
    Ok(caster)
}

/// A field descriptor bound to its casting strategy.
#[derive(Debug, Clone)]
pub struct Field {
    descriptor: FieldDescriptor,
    caster: Caster,
    required: bool,
}

impl Field {
    pub fn new(descriptor: FieldDescriptor) -> Result<Self> {
        let caster = Caster::from_descriptor(&descriptor).with_context(|| {
            format!(
                "Binding field '{}' of type {} with format '{}'",
                descriptor.name, descriptor.field_type, descriptor.format
            )
        })?;
        let required = descriptor.required();
        debug!(
            "Field '{}' bound as {} ({caster:?}, required={required})",
            descriptor.name, descriptor.field_type
        );
        Ok(Self {
            descriptor,
            caster,
            required,
        })
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn field_type(&self) -> FieldType {
        self.descriptor.field_type
    }

    pub fn required(&self) -> bool {
        self.required
    }

    pub fn descriptor(&self) -> &FieldDescriptor {
        &self.descriptor
    }

    pub fn caster(&self) -> &Caster {
        &self.caster
    }

    fn null_category(&self) -> NullCategory {
        if self.field_type().is_textual() {
            NullCategory::Textual
        } else {
            NullCategory::NonTextual
        }
    }

    /// Casts one raw value. `Ok(None)` means the value is absent.
    pub fn cast(&self, value: impl Into<Value>) -> Result<Option<Value>, CastError> {
        let value = value.into();
        let field = self.name();
        match null::screen(field, &value, self.null_category(), self.required)? {
            Presence::Absent => Ok(None),
            Presence::Present => match self.caster.cast_present(field, value) {
                Ok(cast) => Ok(Some(cast)),
                Err(err) => {
                    debug!("{} cast failed: {err}", err.kind());
                    Err(err)
                }
            },
        }
    }

    pub fn cast_str(&self, raw: &str) -> Result<Option<Value>, CastError> {
        self.cast(Value::from(raw))
    }
}

fn invalid_cast(field: &str, value: &Value, expected: &'static str) -> CastError {
    CastError::InvalidCast {
        field: field.to_string(),
        value: value.as_display(),
        expected,
    }
}
