//! Critical facility loading.
//!
//! Facility rows come from a hand-maintained CSV; coordinates are not
//! guaranteed numeric, so rows with missing or unparsable coordinates
//! are dropped rather than failing the load.

use std::fs;
use std::path::Path;
use std::str::FromStr as _;

use serde::Deserialize;
use storm_map_geodata_models::{FacilityCategory, FacilityPoint};

use crate::DataError;

/// One raw row of the facilities CSV; coordinates parsed leniently.
#[derive(Debug, Deserialize)]
struct FacilityRow {
    name: String,
    #[serde(rename = "type")]
    category: String,
    latitude: String,
    longitude: String,
    risk_score: String,
}

/// Loads facilities, dropping rows with invalid coordinates.
///
/// Unknown category strings map to [`FacilityCategory::Other`]; a
/// non-numeric risk score becomes `None`.
///
/// # Errors
///
/// Returns [`DataError`] if the file is missing or structurally
/// malformed (bad header, wrong column count).
pub fn load_facilities(path: &Path) -> Result<Vec<FacilityPoint>, DataError> {
    parse_facilities(&fs::read_to_string(path)?)
}

fn parse_facilities(csv_text: &str) -> Result<Vec<FacilityPoint>, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(csv_text.as_bytes());

    let mut facilities = Vec::new();
    let mut dropped = 0_usize;
    for result in reader.deserialize::<FacilityRow>() {
        let row = result?;

        let (Ok(latitude), Ok(longitude)) =
            (row.latitude.parse::<f64>(), row.longitude.parse::<f64>())
        else {
            log::debug!("Dropping facility {:?}: invalid coordinates", row.name);
            dropped += 1;
            continue;
        };

        facilities.push(FacilityPoint {
            name: row.name,
            category: FacilityCategory::from_str(&row.category)
                .unwrap_or(FacilityCategory::Other),
            latitude,
            longitude,
            risk_score: row.risk_score.parse().ok(),
        });
    }

    if dropped > 0 {
        log::warn!("Dropped {dropped} facility rows with invalid coordinates");
    }
    Ok(facilities)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FACILITIES_CSV: &str = "\
name,type,latitude,longitude,risk_score
Jackson Memorial,hospital,25.79,-80.21,0.7
Key West High,school,24.56,-81.78,
Ghost Site,shelter,,-81.0,0.4
Mystery Plant,power_plant,abc,-80.5,0.2
Quiet Depot,warehouse,26.1,-80.3,0.1
";

    #[test]
    fn drops_rows_with_invalid_coordinates() {
        let facilities = parse_facilities(FACILITIES_CSV).unwrap();
        let names: Vec<&str> = facilities.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Jackson Memorial", "Key West High", "Quiet Depot"]);
    }

    #[test]
    fn parses_categories_and_optional_scores() {
        let facilities = parse_facilities(FACILITIES_CSV).unwrap();
        assert_eq!(facilities[0].category, FacilityCategory::Hospital);
        assert!((facilities[0].risk_score.unwrap() - 0.7).abs() < f64::EPSILON);
        assert_eq!(facilities[1].risk_score, None);
        // Unknown category string falls back to Other.
        assert_eq!(facilities[2].category, FacilityCategory::Other);
    }
}
