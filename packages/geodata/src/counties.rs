//! County boundary + SVI loading.
//!
//! The boundary source is a generalized USA counties GeoJSON; features
//! are filtered down to one state by attribute match, then joined with
//! the tabular SVI export on county name. SVI county names carry a
//! trailing `" County"` suffix that is stripped before matching.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use geo::MultiPolygon;
use geojson::GeoJson;
use regex::Regex;
use storm_map_geodata_models::{CountyPolygon, SviRecord};

use crate::DataError;

/// State the boundary dataset is filtered to.
pub const STATE_NAME: &str = "Florida";

/// Regex for the `" County"` suffix in SVI county names.
static COUNTY_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*County\s*$").expect("valid regex"));

/// Strips the `" County"` suffix so tabular names match the boundary
/// dataset's `NAME` attribute.
#[must_use]
pub fn normalize_county_name(name: &str) -> String {
    COUNTY_SUFFIX_RE.replace(name.trim(), "").into_owned()
}

/// Loads the county polygons for [`STATE_NAME`], joined with SVI ranks.
///
/// Counties without an SVI row are dropped with a warning; a county that
/// appears in the SVI table but not the boundary file is silently unused.
///
/// # Errors
///
/// Returns [`DataError`] if either file is missing or malformed.
pub fn load_county_boundaries(
    geojson_path: &Path,
    svi_csv_path: &Path,
) -> Result<Vec<CountyPolygon>, DataError> {
    let svi = parse_svi_table(&fs::read_to_string(svi_csv_path)?)?;
    parse_county_boundaries(&fs::read_to_string(geojson_path)?, &svi)
}

/// Parses the SVI CSV into a map keyed by normalized county name.
fn parse_svi_table(csv_text: &str) -> Result<BTreeMap<String, SviRecord>, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(csv_text.as_bytes());

    let mut table = BTreeMap::new();
    for result in reader.deserialize::<SviRecord>() {
        let mut record = result?;
        record.county = normalize_county_name(&record.county);
        table.insert(record.county.clone(), record);
    }
    Ok(table)
}

/// Filters the boundary collection to [`STATE_NAME`] and joins SVI ranks.
fn parse_county_boundaries(
    geojson_text: &str,
    svi: &BTreeMap<String, SviRecord>,
) -> Result<Vec<CountyPolygon>, DataError> {
    let geojson: GeoJson = geojson_text.parse()?;
    let GeoJson::FeatureCollection(collection) = geojson else {
        return Err(DataError::Conversion {
            message: "County boundary file is not a FeatureCollection".to_string(),
        });
    };

    let mut counties = Vec::new();
    for feature in collection.features {
        let Some(props) = feature.properties else {
            continue;
        };
        if props.get("STATE_NAME").and_then(serde_json::Value::as_str) != Some(STATE_NAME) {
            continue;
        }
        let Some(name) = props.get("NAME").and_then(serde_json::Value::as_str) else {
            continue;
        };

        let Some(multi_polygon) = feature.geometry.and_then(to_multipolygon) else {
            log::warn!("Failed to parse boundary geometry for county {name}");
            continue;
        };

        match svi.get(name) {
            Some(record) => counties.push(CountyPolygon {
                name: name.to_string(),
                state: STATE_NAME.to_string(),
                svi: record.clone(),
                geometry: multi_polygon,
            }),
            None => log::warn!("No SVI row for county {name}, dropping"),
        }
    }

    Ok(counties)
}

/// Converts a `GeoJSON` geometry into a [`MultiPolygon`].
/// Handles both `Polygon` and `MultiPolygon` geometry types.
fn to_multipolygon(geometry: geojson::Geometry) -> Option<MultiPolygon<f64>> {
    let geo_geom: geo::Geometry<f64> = geometry.try_into().ok()?;
    match geo_geom {
        geo::Geometry::MultiPolygon(mp) => Some(mp),
        geo::Geometry::Polygon(p) => Some(MultiPolygon(vec![p])),
        _ => None,
    }
}
