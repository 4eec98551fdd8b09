//! Hurricane track loading and footprint construction.
//!
//! Track points arrive as a flat CSV ordered chronologically within each
//! storm. Each point is reprojected and buffered into a 50 km disk; a
//! storm's exposure footprint is the collection of its disks in the
//! projected CRS.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use geo::MultiPolygon;
use serde::Deserialize;
use storm_map_geodata_models::{HurricaneTrackPoint, StormTrack};
use storm_map_spatial::{EXPOSURE_RADIUS_M, FloridaAlbers, GeoPoint, disk};

use crate::DataError;

/// One row of the hurricane track CSV.
#[derive(Debug, Deserialize)]
struct TrackRow {
    storm_name: String,
    latitude: f64,
    longitude: f64,
    max_wind: Option<f64>,
    min_pressure: Option<f64>,
    event_label: Option<String>,
}

/// Loads the track CSV into per-storm tracks with exposure footprints.
///
/// Row order within a storm is preserved as chronological order (the
/// source has no timestamp column).
///
/// # Errors
///
/// Returns [`DataError`] if the file is missing or any row is malformed —
/// track data is a startup precondition, not a skippable row.
pub fn load_hurricane_tracks(path: &Path) -> Result<BTreeMap<String, StormTrack>, DataError> {
    parse_hurricane_tracks(&fs::read_to_string(path)?)
}

fn parse_hurricane_tracks(csv_text: &str) -> Result<BTreeMap<String, StormTrack>, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(csv_text.as_bytes());

    let mut points_by_storm: BTreeMap<String, Vec<HurricaneTrackPoint>> = BTreeMap::new();
    for result in reader.deserialize::<TrackRow>() {
        let row = result?;
        points_by_storm
            .entry(row.storm_name.clone())
            .or_default()
            .push(HurricaneTrackPoint {
                storm_name: row.storm_name,
                latitude: row.latitude,
                longitude: row.longitude,
                max_wind: row.max_wind,
                min_pressure: row.min_pressure,
                event_label: row.event_label,
            });
    }

    let albers = FloridaAlbers::new();
    let storms = points_by_storm
        .into_iter()
        .map(|(name, points)| {
            let footprint = build_footprint(&albers, &points);
            (
                name.clone(),
                StormTrack {
                    name,
                    points,
                    footprint,
                },
            )
        })
        .collect();

    Ok(storms)
}

/// Buffers each track point into a 50 km disk in projected meters.
fn build_footprint(albers: &FloridaAlbers, points: &[HurricaneTrackPoint]) -> MultiPolygon<f64> {
    let disks = points
        .iter()
        .map(|point| {
            let projected = albers.project(GeoPoint::new(point.longitude, point.latitude));
            disk(projected, EXPOSURE_RADIUS_M)
        })
        .collect();
    MultiPolygon(disks)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRACKS_CSV: &str = "\
storm_name,latitude,longitude,max_wind,min_pressure,event_label
IAN,24.5,-82.0,125,947,
IAN,25.3,-82.3,130,940,landfall
NICOLE,27.8,-80.1,60,980,
";

    #[test]
    fn groups_points_by_storm_preserving_order() {
        let storms = parse_hurricane_tracks(TRACKS_CSV).unwrap();
        assert_eq!(storms.len(), 2);

        let ian = storms.get("IAN").unwrap();
        assert_eq!(ian.points.len(), 2);
        assert!((ian.points[0].latitude - 24.5).abs() < f64::EPSILON);
        assert_eq!(ian.points[1].event_label.as_deref(), Some("landfall"));

        let nicole = storms.get("NICOLE").unwrap();
        assert_eq!(nicole.points.len(), 1);
        assert_eq!(nicole.points[0].event_label, None);
    }

    #[test]
    fn builds_one_disk_per_point() {
        let storms = parse_hurricane_tracks(TRACKS_CSV).unwrap();
        assert_eq!(storms.get("IAN").unwrap().footprint.0.len(), 2);
        assert_eq!(storms.get("NICOLE").unwrap().footprint.0.len(), 1);
    }

    #[test]
    fn malformed_row_is_fatal() {
        let csv_text = "\
storm_name,latitude,longitude,max_wind,min_pressure,event_label
IAN,not-a-number,-82.0,125,947,
";
        assert!(matches!(
            parse_hurricane_tracks(csv_text),
            Err(DataError::Csv(_))
        ));
    }
}
