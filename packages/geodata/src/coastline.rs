//! Coastline geometry loading.
//!
//! The coastline ships as a GeoJSON line collection in WGS84. Distance
//! queries need meters, so every coordinate is reprojected into Florida
//! Albers exactly once at load.

use std::fs;
use std::path::Path;

use geo::{LineString, MultiLineString};
use geojson::GeoJson;
use storm_map_spatial::{FloridaAlbers, GeoPoint};

use crate::DataError;

/// Loads the coastline and reprojects it into projected meters.
///
/// Accepts a `FeatureCollection` of lines, a bare geometry, or a single
/// feature; every `LineString`/`MultiLineString` found contributes
/// segments.
///
/// # Errors
///
/// Returns [`DataError`] if the file is missing, malformed, or contains
/// no line geometry.
pub fn load_coastline(path: &Path) -> Result<MultiLineString<f64>, DataError> {
    parse_coastline(&fs::read_to_string(path)?)
}

fn parse_coastline(geojson_text: &str) -> Result<MultiLineString<f64>, DataError> {
    let geojson: GeoJson = geojson_text.parse()?;

    let mut lines: Vec<LineString<f64>> = Vec::new();
    match geojson {
        GeoJson::FeatureCollection(collection) => {
            for feature in collection.features {
                if let Some(geometry) = feature.geometry {
                    collect_lines(geometry, &mut lines);
                }
            }
        }
        GeoJson::Feature(feature) => {
            if let Some(geometry) = feature.geometry {
                collect_lines(geometry, &mut lines);
            }
        }
        GeoJson::Geometry(geometry) => collect_lines(geometry, &mut lines),
    }

    if lines.is_empty() {
        return Err(DataError::Conversion {
            message: "Coastline file contains no line geometry".to_string(),
        });
    }

    let albers = FloridaAlbers::new();
    let projected = lines.into_iter().map(|line| project_line(&albers, &line));
    Ok(MultiLineString(projected.collect()))
}

/// Pulls every line string out of a geometry.
fn collect_lines(geometry: geojson::Geometry, lines: &mut Vec<LineString<f64>>) {
    let Ok(geo_geom) = TryInto::<geo::Geometry<f64>>::try_into(geometry) else {
        return;
    };
    match geo_geom {
        geo::Geometry::LineString(line) => lines.push(line),
        geo::Geometry::MultiLineString(multi) => lines.extend(multi.0),
        _ => {}
    }
}

/// Reprojects one line's coordinates from WGS84 degrees to meters.
fn project_line(albers: &FloridaAlbers, line: &LineString<f64>) -> LineString<f64> {
    line.coords()
        .map(|coord| {
            let projected = albers.project(GeoPoint::new(coord.x, coord.y));
            (projected.x, projected.y)
        })
        .collect()
}
