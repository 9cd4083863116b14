use std::{str::FromStr, sync::OnceLock};

use anyhow::anyhow;
use regex::Regex;
use url::Url;
use uuid::Uuid;

use crate::{error::CastError, value::Value};

use super::invalid_cast;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringFormat {
    Default,
    Email,
    Uri,
    Uuid,
}

impl FromStr for StringFormat {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "default" => Ok(StringFormat::Default),
            "email" => Ok(StringFormat::Email),
            "uri" => Ok(StringFormat::Uri),
            "uuid" => Ok(StringFormat::Uuid),
            other => Err(anyhow!(
                "Unsupported string format '{other}'. Expected one of: default, email, uri, uuid"
            )),
        }
    }
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"))
}

fn uuid_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)^(urn:uuid:[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}|[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}|[0-9a-f]{32})$",
        )
        .expect("valid uuid regex")
    })
}

pub fn is_email(value: &str) -> bool {
    email_regex().is_match(value)
}

pub fn is_absolute_uri(value: &str) -> bool {
    match Url::parse(value) {
        Ok(url) => !url.scheme().is_empty() && url.has_host(),
        Err(_) => false,
    }
}

/// Bare hex, dashed and `urn:uuid:` forms only; braces are rejected.
pub fn parse_uuid(value: &str) -> Option<Uuid> {
    if !uuid_regex().is_match(value) {
        return None;
    }
    Uuid::parse_str(value).ok()
}

/// The empty literal is a valid string for every format; sub-formats only
/// validate non-empty text.
pub(super) fn cast(field: &str, format: StringFormat, value: Value) -> Result<Value, CastError> {
    let raw = match value {
        Value::String(raw) => raw,
        other => return Err(invalid_cast(field, &other, "string")),
    };
    let field = field.to_string();
    match format {
        _ if raw.is_empty() => Ok(Value::String(raw)),
        StringFormat::Default => Ok(Value::String(raw)),
        StringFormat::Email if is_email(&raw) => Ok(Value::String(raw)),
        StringFormat::Email => Err(CastError::InvalidEmail { field, value: raw }),
        StringFormat::Uri if is_absolute_uri(&raw) => Ok(Value::String(raw)),
        StringFormat::Uri => Err(CastError::InvalidUri { field, value: raw }),
        StringFormat::Uuid if parse_uuid(&raw).is_some() => Ok(Value::String(raw)),
        StringFormat::Uuid => Err(CastError::InvalidUuid { field, value: raw }),
    }
}
