//! `GeoJSON` feature collection import.
//!
//! Each feature becomes one [`ProjectRecord`]: its properties supply the
//! record fields (`id`, `name`, `type`, `phase`, ...) and its geometry the
//! coordinates. Supported geometries:
//!
//! * `Point` becomes a point project,
//! * `LineString` becomes an alignment,
//! * `MultiLineString` uses its first line,
//! * `Polygon` uses its exterior ring as a closed alignment.
//!
//! Anything else is logged and yields a record without coordinates, which
//! the catalog then leaves out.

use geo::Coord;
use geojson::{Feature, GeoJson, feature::Id};
use serde_json::Value;

use crate::{CatalogError, record::ProjectRecord};

/// Parses a `GeoJSON` `FeatureCollection` into project records.
///
/// # Errors
///
/// Returns [`CatalogError`] if the input is not a feature collection, a
/// geometry cannot be converted, or a feature lacks required properties.
pub fn parse_records(input: &str) -> Result<Vec<ProjectRecord>, CatalogError> {
    let GeoJson::FeatureCollection(collection) = input.parse::<GeoJson>()? else {
        return Err(CatalogError::Format {
            message: "expected a GeoJSON FeatureCollection".to_string(),
        });
    };

    collection
        .features
        .into_iter()
        .enumerate()
        .map(|(index, feature)| record_from_feature(index, feature))
        .collect()
}

fn record_from_feature(index: usize, feature: Feature) -> Result<ProjectRecord, CatalogError> {
    let coordinates = match feature.geometry {
        Some(geometry) => geometry_coordinates(index, geometry)?,
        None => Vec::new(),
    };

    let mut properties = feature.properties.unwrap_or_default();
    if !properties.contains_key("id")
        && let Some(id) = feature.id
    {
        let id = match id {
            Id::String(s) => s,
            Id::Number(n) => n.to_string(),
        };
        properties.insert("id".to_string(), Value::String(id));
    }
    // Coordinates come from the geometry, never from properties.
    properties.remove("coordinates");

    let mut record: ProjectRecord = serde_json::from_value(Value::Object(properties))
        .map_err(|source| CatalogError::Feature { index, source })?;
    record.coordinates = coordinates;

    Ok(record)
}

/// Flattens a geometry into `[latitude, longitude]` pairs.
fn geometry_coordinates(
    index: usize,
    geometry: geojson::Geometry,
) -> Result<Vec<[f64; 2]>, CatalogError> {
    let geometry: geo::Geometry<f64> = geometry.try_into()?;

    let coords: Vec<Coord<f64>> = match geometry {
        geo::Geometry::Point(point) => vec![point.0],
        geo::Geometry::LineString(line) => line.0,
        geo::Geometry::MultiLineString(lines) => lines
            .0
            .into_iter()
            .next()
            .map(|line| line.0)
            .unwrap_or_default(),
        geo::Geometry::Polygon(polygon) => {
            let (exterior, _holes) = polygon.into_inner();
            exterior.0
        }
        _ => {
            log::warn!("Feature {index}: unsupported geometry type, ignoring geometry");
            Vec::new()
        }
    };

    Ok(coords.into_iter().map(|c| [c.y, c.x]).collect())
}
