use thiserror::Error;

/// Value-level failure raised while casting a single raw value.
///
/// Every variant names the field it was raised for and a rendering of the
/// offending input so callers aggregating row errors can report them without
/// holding on to the original value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CastError {
    #[error("Field '{field}': cannot cast '{value}' as {expected}")]
    InvalidCast {
        field: String,
        value: String,
        expected: &'static str,
    },
    #[error("Field '{field}': '{value}' is not a valid email address")]
    InvalidEmail { field: String, value: String },
    #[error("Field '{field}': '{value}' is not a valid absolute URI")]
    InvalidUri { field: String, value: String },
    #[error("Field '{field}': '{value}' is not a valid UUID")]
    InvalidUuid { field: String, value: String },
    #[error("Field '{field}': '{value}' is not a JSON object")]
    InvalidObject { field: String, value: String },
    #[error("Field '{field}': '{value}' is not a JSON array")]
    InvalidArray { field: String, value: String },
    #[error("Field '{field}': '{value}' is not a valid date")]
    InvalidDate { field: String, value: String },
    #[error("Field '{field}': '{value}' is not a valid time")]
    InvalidTime { field: String, value: String },
    #[error("Field '{field}': '{value}' is not a valid datetime")]
    InvalidDateTime { field: String, value: String },
    #[error("Field '{field}': '{value}' is not a valid geopoint ({reason})")]
    InvalidGeoPoint {
        field: String,
        value: String,
        reason: String,
    },
    #[error("Field '{field}': '{value}' is not valid GeoJSON ({reason})")]
    InvalidGeoJson {
        field: String,
        value: String,
        reason: String,
    },
    #[error("Field '{field}' is required but '{value}' is a null value")]
    Constraint { field: String, value: String },
}

impl CastError {
    pub fn field(&self) -> &str {
        match self {
            CastError::InvalidCast { field, .. }
            | CastError::InvalidEmail { field, .. }
            | CastError::InvalidUri { field, .. }
            | CastError::InvalidUuid { field, .. }
            | CastError::InvalidObject { field, .. }
            | CastError::InvalidArray { field, .. }
            | CastError::InvalidDate { field, .. }
            | CastError::InvalidTime { field, .. }
            | CastError::InvalidDateTime { field, .. }
            | CastError::InvalidGeoPoint { field, .. }
            | CastError::InvalidGeoJson { field, .. }
            | CastError::Constraint { field, .. } => field,
        }
    }

    /// Stable kind name, as used by table-schema error reports.
    pub fn kind(&self) -> &'static str {
        match self {
            CastError::InvalidCast { .. } => "InvalidCast",
            CastError::InvalidEmail { .. } => "InvalidEmail",
            CastError::InvalidUri { .. } => "InvalidURI",
            CastError::InvalidUuid { .. } => "InvalidUUID",
            CastError::InvalidObject { .. } => "InvalidObjectType",
            CastError::InvalidArray { .. } => "InvalidArrayType",
            CastError::InvalidDate { .. } => "InvalidDateType",
            CastError::InvalidTime { .. } => "InvalidTimeType",
            CastError::InvalidDateTime { .. } => "InvalidDateTimeType",
            CastError::InvalidGeoPoint { .. } => "InvalidGeoPointType",
            CastError::InvalidGeoJson { .. } => "InvalidGeoJSONType",
            CastError::Constraint { .. } => "ConstraintError",
        }
    }

    pub fn is_constraint(&self) -> bool {
        matches!(self, CastError::Constraint { .. })
    }
}
