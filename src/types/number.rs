use std::str::FromStr;

use anyhow::anyhow;
use log::debug;

use crate::{
    error::CastError,
    numeric::{self, Separators},
    value::Value,
};

use super::invalid_cast;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberFormat {
    Default,
    Currency,
}

impl FromStr for NumberFormat {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "default" => Ok(NumberFormat::Default),
            "currency" => Ok(NumberFormat::Currency),
            other => Err(anyhow!(
                "Unsupported number format '{other}'. Expected 'default' or 'currency'"
            )),
        }
    }
}

pub(super) fn cast_number(
    field: &str,
    format: NumberFormat,
    separators: Separators,
    value: Value,
) -> Result<Value, CastError> {
    match value {
        Value::Number(f) => Ok(Value::Number(f)),
        Value::Integer(i) => Ok(Value::Number(i as f64)),
        Value::String(ref raw) => {
            numeric::parse_number(raw, separators, format == NumberFormat::Currency)
                .map(Value::Number)
                .map_err(|err| {
                    debug!("Field '{field}': {err:#}");
                    invalid_cast(field, &value, "number")
                })
        }
        other => Err(invalid_cast(field, &other, "number")),
    }
}

pub(super) fn cast_integer(field: &str, value: Value) -> Result<Value, CastError> {
    match value {
        Value::Integer(i) => Ok(Value::Integer(i)),
        Value::Number(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
            Ok(Value::Integer(f as i64))
        }
        Value::String(ref raw) => numeric::parse_integer_literal(raw)
            .map(Value::Integer)
            .map_err(|err| {
                debug!("Field '{field}': {err:#}");
                invalid_cast(field, &value, "integer")
            }),
        other => Err(invalid_cast(field, &other, "integer")),
    }
}
