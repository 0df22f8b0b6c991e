//! GeoJSON decoding for feature collections served by the backend.
//!
//! Each feature is decoded independently: a feature with an unsupported
//! geometry, a missing identifier or malformed properties is skipped with a
//! warning instead of failing the whole collection.
//!
//! The backend reports `frequency` as edits per year; it is converted into
//! the average number of days between edits on the way in.

use std::io::Read;

use chrono::{DateTime, Utc};
use geo::{Coord, LineString};
use log::warn;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;
use uptodate_core::{Feature, FeatureGeometry, FeatureMetadata};

/// Errors raised while decoding a feature collection.
#[derive(Debug, Error)]
pub enum GeoJsonError {
    /// The document was not valid JSON or not a feature collection.
    #[error("invalid GeoJSON document: {source}")]
    Json {
        /// Underlying parser error.
        #[from]
        source: serde_json::Error,
    },
    /// The top-level object had an unexpected `type`.
    #[error("expected a FeatureCollection, found '{found}'")]
    NotAFeatureCollection {
        /// Value of the `type` member.
        found: String,
    },
}

#[derive(Debug, Deserialize)]
struct CollectionDto {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    features: Vec<Value>,
}

/// Days used to turn a yearly edit rate into days between edits.
const DAYS_PER_YEAR: f64 = 365.0;

#[derive(Debug, Deserialize)]
struct FeatureDto {
    #[serde(default)]
    id: Option<Value>,
    geometry: Option<GeometryDto>,
    #[serde(default)]
    properties: PropertiesDto,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum GeometryDto {
    Point { coordinates: Vec<f64> },
    LineString { coordinates: Vec<Vec<f64>> },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Default, Deserialize)]
struct PropertiesDto {
    #[serde(default)]
    id: Option<u64>,
    #[serde(default, deserialize_with = "timestamp")]
    lastedit: Option<DateTime<Utc>>,
    #[serde(default, alias = "creation", deserialize_with = "timestamp")]
    created: Option<DateTime<Utc>>,
    #[serde(default, alias = "revisions")]
    version: Option<u32>,
    #[serde(default)]
    average_update_days: Option<f64>,
    #[serde(default)]
    frequency: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TimestampDto {
    Seconds(f64),
    Text(String),
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    reason = "fractional Unix seconds are split into whole seconds and nanoseconds"
)]
fn seconds_to_datetime(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    let whole = seconds.floor();
    let fraction = ((seconds - whole) * 1e9).round();
    let nanos = u32::try_from(fraction as i64).ok()?;
    DateTime::<Utc>::from_timestamp(whole as i64, nanos.min(999_999_999))
}

fn timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<TimestampDto>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match value {
        TimestampDto::Seconds(seconds) => seconds_to_datetime(seconds),
        TimestampDto::Text(text) => DateTime::parse_from_rfc3339(&text)
            .map(|parsed| parsed.with_timezone(&Utc))
            .inspect_err(|err| warn!("ignoring timestamp '{text}': {err}"))
            .ok(),
    }))
}

fn coordinate(position: &[f64]) -> Option<Coord<f64>> {
    match position {
        [x, y, ..] => Some(Coord { x: *x, y: *y }),
        _ => None,
    }
}

impl GeometryDto {
    fn into_geometry(self) -> Option<FeatureGeometry> {
        match self {
            Self::Point { coordinates } => coordinate(&coordinates).map(FeatureGeometry::Point),
            Self::LineString { coordinates } => coordinates
                .iter()
                .map(|position| coordinate(position))
                .collect::<Option<Vec<_>>>()
                .map(|coords| FeatureGeometry::Line(LineString::new(coords))),
            Self::Unsupported => None,
        }
    }
}

/// Read a top-level feature id, either numeric or an `"node/7"` style string.
fn top_level_id(value: &Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_str()
            .and_then(|text| text.rsplit('/').next())
            .and_then(|digits| digits.parse().ok())
    })
}

/// Convert the backend's edits per year into average days between edits.
///
/// Returns `None` unless the rate is finite and positive.
#[expect(
    clippy::float_arithmetic,
    reason = "a yearly edit rate is inverted into days between edits"
)]
pub(crate) fn days_between_edits(edits_per_year: f64) -> Option<f64> {
    (edits_per_year.is_finite() && edits_per_year > 0.0).then(|| DAYS_PER_YEAR / edits_per_year)
}

fn decode_feature(index: usize, raw: Value) -> Option<Feature> {
    let dto: FeatureDto = serde_json::from_value(raw)
        .inspect_err(|err| warn!("skipping feature #{index}: {err}"))
        .ok()?;
    let id = dto
        .properties
        .id
        .or_else(|| dto.id.as_ref().and_then(top_level_id));
    let Some(id) = id else {
        warn!("skipping feature #{index}: no identifier");
        return None;
    };
    let Some(geometry) = dto.geometry.and_then(GeometryDto::into_geometry) else {
        warn!("skipping feature {id}: unsupported or invalid geometry");
        return None;
    };
    let PropertiesDto {
        lastedit,
        created,
        version,
        average_update_days,
        frequency,
        ..
    } = dto.properties;
    let average_update_days = average_update_days.or_else(|| {
        let edits_per_year = frequency?;
        let days = days_between_edits(edits_per_year);
        if days.is_none() {
            warn!("ignoring frequency {edits_per_year} of feature {id}: not a positive rate");
        }
        days
    });
    Some(Feature::new(
        id,
        geometry,
        FeatureMetadata {
            lastedit,
            created,
            version,
            average_update_days,
        },
    ))
}

fn decode_collection(collection: CollectionDto) -> Result<Vec<Feature>, GeoJsonError> {
    if collection.kind != "FeatureCollection" {
        return Err(GeoJsonError::NotAFeatureCollection {
            found: collection.kind,
        });
    }
    Ok(collection
        .features
        .into_iter()
        .enumerate()
        .filter_map(|(index, raw)| decode_feature(index, raw))
        .collect())
}

/// Decode a GeoJSON `FeatureCollection` from a string.
///
/// Supported geometries are `Point` and `LineString`. Properties may use the
/// backend names (`creation`, `revisions`) or the field names of
/// [`FeatureMetadata`]; timestamps may be RFC 3339 strings or Unix seconds.
/// A backend `frequency` in edits per year becomes `average_update_days`
/// unless that field is present too.
///
/// # Errors
/// Returns [`GeoJsonError`] when the document is not a feature collection.
///
/// # Examples
/// ```
/// use uptodate_data::geojson::parse_feature_collection;
///
/// let json = r#"{
///   "type": "FeatureCollection",
///   "features": [{
///     "type": "Feature",
///     "geometry": {"type": "Point", "coordinates": [9.19, 45.46]},
///     "properties": {"id": 42, "lastedit": 1600000000, "revisions": 3, "frequency": 120.5}
///   }]
/// }"#;
/// let features = parse_feature_collection(json)?;
/// assert_eq!(features.len(), 1);
/// assert_eq!(features[0].metadata.version, Some(3));
/// assert_eq!(features[0].metadata.average_update_days, Some(365.0 / 120.5));
/// # Ok::<(), uptodate_data::geojson::GeoJsonError>(())
/// ```
pub fn parse_feature_collection(input: &str) -> Result<Vec<Feature>, GeoJsonError> {
    decode_collection(serde_json::from_str(input)?)
}

/// Decode a GeoJSON `FeatureCollection` from a reader.
///
/// # Errors
/// Returns [`GeoJsonError`] when reading fails or the document is not a
/// feature collection.
pub fn read_feature_collection<R: Read>(reader: R) -> Result<Vec<Feature>, GeoJsonError> {
    decode_collection(serde_json::from_reader(reader)?)
}
