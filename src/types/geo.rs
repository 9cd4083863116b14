use std::str::FromStr;

use anyhow::{Result, anyhow, bail, ensure};
use log::debug;
use rust_decimal::Decimal;
use serde_json::{Map, Value as JsonValue};

use crate::{
    error::CastError,
    numeric,
    value::{GeoPoint, Value},
};

const LONGITUDE_LIMIT: i64 = 180;
const LATITUDE_LIMIT: i64 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoPointFormat {
    Default,
    Array,
    Object,
}

impl FromStr for GeoPointFormat {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "default" => Ok(GeoPointFormat::Default),
            "array" => Ok(GeoPointFormat::Array),
            "object" => Ok(GeoPointFormat::Object),
            other => Err(anyhow!(
                "Unsupported geopoint format '{other}'. Expected 'default', 'array' or 'object'"
            )),
        }
    }
}

pub fn parse_coordinate(raw: &str) -> Result<Decimal> {
    let trimmed = raw.trim();
    ensure!(!trimmed.is_empty(), "Empty coordinate");
    ensure!(
        numeric::is_float_literal(trimmed),
        "'{trimmed}' is not a decimal coordinate"
    );
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| anyhow!("'{trimmed}' is not a decimal coordinate"))
}

fn coordinate_from_json(value: &JsonValue) -> Result<Decimal> {
    match value {
        JsonValue::Number(n) => parse_coordinate(&n.to_string()),
        JsonValue::String(s) => parse_coordinate(s),
        other => bail!("{other} is not a coordinate"),
    }
}

fn checked_point(longitude: Decimal, latitude: Decimal) -> Result<GeoPoint> {
    ensure!(
        longitude.abs() <= Decimal::from(LONGITUDE_LIMIT),
        "longitude {longitude} is outside [-180, 180]"
    );
    ensure!(
        latitude.abs() <= Decimal::from(LATITUDE_LIMIT),
        "latitude {latitude} is outside [-90, 90]"
    );
    Ok(GeoPoint::new(longitude, latitude))
}

fn point_from_text(raw: &str) -> Result<GeoPoint> {
    let components: Vec<&str> = raw.split(',').collect();
    ensure!(
        components.len() == 2,
        "expected 'longitude, latitude', found {} component(s)",
        components.len()
    );
    checked_point(
        parse_coordinate(components[0])?,
        parse_coordinate(components[1])?,
    )
}

fn point_from_array(items: &[JsonValue]) -> Result<GeoPoint> {
    ensure!(
        items.len() == 2,
        "expected 2 elements, found {}",
        items.len()
    );
    checked_point(
        coordinate_from_json(&items[0])?,
        coordinate_from_json(&items[1])?,
    )
}

fn point_from_object(map: &Map<String, JsonValue>) -> Result<GeoPoint> {
    ensure!(
        map.len() == 2,
        "expected exactly 'longitude' and 'latitude' keys"
    );
    let longitude = map
        .get("longitude")
        .ok_or_else(|| anyhow!("missing 'longitude'"))?;
    let latitude = map
        .get("latitude")
        .ok_or_else(|| anyhow!("missing 'latitude'"))?;
    checked_point(
        coordinate_from_json(longitude)?,
        coordinate_from_json(latitude)?,
    )
}

fn parse_json_text(raw: &str) -> Result<JsonValue> {
    serde_json::from_str(raw).map_err(|err| anyhow!("invalid JSON: {err}"))
}

fn resolve_point(format: GeoPointFormat, value: &Value) -> Result<GeoPoint> {
    match (format, value) {
        (_, Value::GeoPoint(point)) => Ok(*point),
        (GeoPointFormat::Default, Value::String(raw)) => point_from_text(raw),
        (GeoPointFormat::Array, Value::Array(items)) => point_from_array(items),
        (GeoPointFormat::Array, Value::String(raw)) => match parse_json_text(raw)? {
            JsonValue::Array(items) => point_from_array(&items),
            _ => bail!("expected a JSON array"),
        },
        (GeoPointFormat::Object, Value::Object(map)) => point_from_object(map),
        (GeoPointFormat::Object, Value::String(raw)) => match parse_json_text(raw)? {
            JsonValue::Object(map) => point_from_object(&map),
            _ => bail!("expected a JSON object"),
        },
        (_, other) => bail!("{} input is not supported", other.type_name()),
    }
}

/// The first component is checked as longitude, the second as latitude.
pub(super) fn cast_geopoint(
    field: &str,
    format: GeoPointFormat,
    value: Value,
) -> Result<Value, CastError> {
    resolve_point(format, &value)
        .map(Value::GeoPoint)
        .map_err(|err| {
            debug!("Field '{field}': {err:#}");
            CastError::InvalidGeoPoint {
                field: field.to_string(),
                value: value.as_display(),
                reason: err.to_string(),
            }
        })
}

const GEOMETRY_TYPES: &[&str] = &[
    "Point",
    "MultiPoint",
    "LineString",
    "MultiLineString",
    "Polygon",
    "MultiPolygon",
    "GeometryCollection",
];

fn as_array<'a>(value: &'a JsonValue, what: &str) -> Result<&'a Vec<JsonValue>> {
    value
        .as_array()
        .ok_or_else(|| anyhow!("{what} must be an array"))
}

fn check_position(value: &JsonValue) -> Result<()> {
    let items = as_array(value, "position")?;
    ensure!(
        items.len() == 2 && items.iter().all(JsonValue::is_number),
        "position must be exactly two numbers"
    );
    Ok(())
}

fn check_positions(value: &JsonValue, minimum: usize, what: &str) -> Result<()> {
    let items = as_array(value, what)?;
    ensure!(
        items.len() >= minimum,
        "{what} needs at least {minimum} positions"
    );
    items.iter().try_for_each(check_position)
}

fn check_polygon(value: &JsonValue) -> Result<()> {
    as_array(value, "polygon")?
        .iter()
        .try_for_each(|ring| check_positions(ring, 4, "linear ring"))
}

fn check_bbox(object: &Map<String, JsonValue>) -> Result<()> {
    if let Some(bbox) = object.get("bbox") {
        let items = as_array(bbox, "bbox")?;
        ensure!(
            items.len() >= 4 && items.len() % 2 == 0 && items.iter().all(JsonValue::is_number),
            "bbox must hold an even number (>= 4) of numbers"
        );
    }
    Ok(())
}

fn member<'a>(object: &'a Map<String, JsonValue>, key: &str, kind: &str) -> Result<&'a JsonValue> {
    object
        .get(key)
        .ok_or_else(|| anyhow!("{kind} requires '{key}'"))
}

fn check_geometry(object: &Map<String, JsonValue>) -> Result<()> {
    let kind = object
        .get("type")
        .and_then(JsonValue::as_str)
        .ok_or_else(|| anyhow!("geometry requires a string 'type'"))?;
    check_bbox(object)?;
    match kind {
        "Point" => check_position(member(object, "coordinates", kind)?),
        "MultiPoint" => check_positions(member(object, "coordinates", kind)?, 0, kind),
        "LineString" => check_positions(member(object, "coordinates", kind)?, 2, kind),
        "MultiLineString" => as_array(member(object, "coordinates", kind)?, kind)?
            .iter()
            .try_for_each(|line| check_positions(line, 2, "LineString")),
        "Polygon" => check_polygon(member(object, "coordinates", kind)?),
        "MultiPolygon" => as_array(member(object, "coordinates", kind)?, kind)?
            .iter()
            .try_for_each(check_polygon),
        "GeometryCollection" => as_array(member(object, "geometries", kind)?, kind)?
            .iter()
            .try_for_each(|geometry| {
                geometry
                    .as_object()
                    .ok_or_else(|| anyhow!("geometries must hold objects"))
                    .and_then(check_geometry)
            }),
        other => bail!("'{other}' is not a geometry type"),
    }
}

fn check_feature(object: &Map<String, JsonValue>) -> Result<()> {
    check_bbox(object)?;
    match member(object, "geometry", "Feature")? {
        JsonValue::Null => {}
        JsonValue::Object(geometry) => check_geometry(geometry)?,
        _ => bail!("Feature 'geometry' must be an object or null"),
    }
    ensure!(
        matches!(
            member(object, "properties", "Feature")?,
            JsonValue::Null | JsonValue::Object(_)
        ),
        "Feature 'properties' must be an object or null"
    );
    if let Some(id) = object.get("id") {
        ensure!(
            id.is_string() || id.is_number(),
            "Feature 'id' must be a string or number"
        );
    }
    Ok(())
}

/// Structural GeoJSON check: a known `type` plus the members it requires.
pub fn validate_geojson(object: &Map<String, JsonValue>) -> Result<()> {
    let kind = object
        .get("type")
        .and_then(JsonValue::as_str)
        .ok_or_else(|| anyhow!("missing string 'type'"))?;
    match kind {
        "Feature" => check_feature(object),
        "FeatureCollection" => {
            check_bbox(object)?;
            as_array(member(object, "features", kind)?, "features")?
                .iter()
                .try_for_each(|feature| {
                    feature
                        .as_object()
                        .filter(|f| f.get("type").and_then(JsonValue::as_str) == Some("Feature"))
                        .ok_or_else(|| anyhow!("features must hold Feature objects"))
                        .and_then(check_feature)
                })
        }
        geometry if GEOMETRY_TYPES.contains(&geometry) => check_geometry(object),
        other => bail!("'{other}' is not a GeoJSON type"),
    }
}

pub(super) fn cast_geojson(field: &str, value: Value) -> Result<Value, CastError> {
    let checked = match &value {
        Value::Object(map) => validate_geojson(map).map(|_| map.clone()),
        Value::String(raw) => parse_json_text(raw).and_then(|parsed| match parsed {
            JsonValue::Object(map) => validate_geojson(&map).map(|_| map),
            _ => bail!("expected a JSON object"),
        }),
        other => Err(anyhow!("{} input is not supported", other.type_name())),
    };
    checked.map(Value::Object).map_err(|err| {
        debug!("Field '{field}': {err:#}");
        CastError::InvalidGeoJson {
            field: field.to_string(),
            value: value.as_display(),
            reason: err.to_string(),
        }
    })
}
