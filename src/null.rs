use log::trace;

use crate::{error::CastError, value::Value};

/// Literals that conventionally mean "no value" in tabular data, lower-cased.
pub const NULL_TOKENS: &[&str] = &["null", "none", "nil", "nan", "-", ""];

/// Whether the empty literal is a value in its own right for the target type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullCategory {
    Textual,
    NonTextual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Absent,
    Present,
}

pub fn is_null_token(raw: &str) -> bool {
    let lowered = raw.to_lowercase();
    NULL_TOKENS.contains(&lowered.as_str())
}

/// Native nulls count as null tokens; non-string natives never do.
pub fn is_null_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(raw) => is_null_token(raw),
        _ => false,
    }
}

/// Decides whether `value` stands for absence before type-specific casting.
///
/// Returns `Presence::Present` when the type's own casting should run,
/// `Presence::Absent` when the value casts to nothing, and a
/// [`CastError::Constraint`] when absence is not allowed.
pub fn screen(
    field: &str,
    value: &Value,
    category: NullCategory,
    required: bool,
) -> Result<Presence, CastError> {
    if !is_null_value(value) {
        return Ok(Presence::Present);
    }
    if category == NullCategory::Textual && value.as_str() == Some("") {
        return Ok(Presence::Present);
    }
    if required {
        return Err(CastError::Constraint {
            field: field.to_string(),
            value: value.as_display(),
        });
    }
    trace!("Field '{field}': '{value}' treated as null");
    Ok(Presence::Absent)
}
