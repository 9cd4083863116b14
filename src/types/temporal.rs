use anyhow::{Result, anyhow};
use log::debug;

use crate::{
    error::CastError,
    temporal::{self, TemporalFormat},
    value::Value,
};

fn resolve<T>(
    field: &str,
    value: &Value,
    parsed: Result<T>,
    error: fn(String, String) -> CastError,
) -> Result<T, CastError> {
    parsed.map_err(|err| {
        debug!("Field '{field}': {err:#}");
        error(field.to_string(), value.as_display())
    })
}

fn date_error(field: String, value: String) -> CastError {
    CastError::InvalidDate { field, value }
}

fn time_error(field: String, value: String) -> CastError {
    CastError::InvalidTime { field, value }
}

fn datetime_error(field: String, value: String) -> CastError {
    CastError::InvalidDateTime { field, value }
}

pub(super) fn cast_date(
    field: &str,
    format: &TemporalFormat,
    value: Value,
) -> Result<Value, CastError> {
    let raw = match &value {
        Value::Date(date) => return Ok(Value::Date(*date)),
        Value::String(raw) => raw.as_str(),
        other => return Err(date_error(field.to_string(), other.as_display())),
    };
    let parsed = match format {
        TemporalFormat::Default => temporal::parse_iso_date(raw),
        TemporalFormat::Pattern(pattern) => temporal::parse_date_pattern(raw, pattern),
        TemporalFormat::Any => temporal::parse_loose(raw).and_then(|loose| {
            loose
                .date
                .ok_or_else(|| anyhow!("'{raw}' has a time but no date"))
        }),
    };
    resolve(field, &value, parsed, date_error).map(Value::Date)
}

pub(super) fn cast_time(
    field: &str,
    format: &TemporalFormat,
    value: Value,
) -> Result<Value, CastError> {
    let raw = match &value {
        Value::Time(time) => return Ok(Value::Time(*time)),
        Value::String(raw) => raw.as_str(),
        other => return Err(time_error(field.to_string(), other.as_display())),
    };
    let parsed = match format {
        TemporalFormat::Default => temporal::parse_iso_time(raw),
        TemporalFormat::Pattern(pattern) => temporal::parse_time_pattern(raw, pattern),
        TemporalFormat::Any => temporal::parse_loose(raw).and_then(|loose| {
            loose
                .time
                .ok_or_else(|| anyhow!("'{raw}' has a date but no time"))
        }),
    };
    resolve(field, &value, parsed, time_error).map(Value::Time)
}

/// Loose values without a clock time resolve to midnight.
pub(super) fn cast_datetime(
    field: &str,
    format: &TemporalFormat,
    value: Value,
) -> Result<Value, CastError> {
    let raw = match &value {
        Value::DateTime(dt) => return Ok(Value::DateTime(*dt)),
        Value::String(raw) => raw.as_str(),
        other => return Err(datetime_error(field.to_string(), other.as_display())),
    };
    let parsed = match format {
        TemporalFormat::Default => temporal::parse_iso_datetime(raw),
        TemporalFormat::Pattern(pattern) => temporal::parse_datetime_pattern(raw, pattern),
        TemporalFormat::Any => temporal::parse_loose(raw).and_then(|loose| {
            let date = loose
                .date
                .ok_or_else(|| anyhow!("'{raw}' has a time but no date"))?;
            Ok(date.and_time(loose.time.unwrap_or_default()))
        }),
    };
    resolve(field, &value, parsed, datetime_error).map(Value::DateTime)
}
