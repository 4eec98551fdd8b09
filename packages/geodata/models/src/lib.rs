#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Core domain types for the storm map system.
//!
//! These types describe the static geospatial datasets (county boundaries
//! with social-vulnerability scores, hurricane tracks, critical facilities)
//! and the per-query risk prediction values derived from them. Geometry is
//! carried as `geo` types; everything geometric is loaded once at startup
//! and immutable afterwards.

use geo::MultiPolygon;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Social Vulnerability Index ranks for one county.
///
/// Field names mirror the CDC/ATSDR SVI export columns. All ranks are
/// normalized percentiles in `[0, 1]`; `rpl_themes` is the composite rank
/// used as the model input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SviRecord {
    /// County name as it appears in the SVI table (suffix already stripped).
    #[serde(rename = "COUNTY")]
    pub county: String,
    /// Socioeconomic status theme rank.
    #[serde(rename = "RPL_THEME1")]
    pub rpl_theme1: f64,
    /// Household characteristics theme rank.
    #[serde(rename = "RPL_THEME2")]
    pub rpl_theme2: f64,
    /// Racial & ethnic minority status theme rank.
    #[serde(rename = "RPL_THEME3")]
    pub rpl_theme3: f64,
    /// Housing type & transportation theme rank.
    #[serde(rename = "RPL_THEME4")]
    pub rpl_theme4: f64,
    /// Overall composite rank.
    #[serde(rename = "RPL_THEMES")]
    pub rpl_themes: f64,
}

/// A county boundary polygon joined with its SVI ranks.
///
/// Geometry is in the geographic CRS (WGS84 lon/lat degrees); containment
/// tests against query points happen in that CRS.
#[derive(Debug, Clone)]
pub struct CountyPolygon {
    /// County name (e.g. "Miami-Dade").
    pub name: String,
    /// State name the boundary dataset was filtered to.
    pub state: String,
    /// Joined SVI ranks for this county.
    pub svi: SviRecord,
    /// Boundary geometry in WGS84.
    pub geometry: MultiPolygon<f64>,
}

/// One observation along a named storm's track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HurricaneTrackPoint {
    /// Name of the storm this observation belongs to.
    pub storm_name: String,
    /// Observation latitude (WGS84).
    pub latitude: f64,
    /// Observation longitude (WGS84).
    pub longitude: f64,
    /// Maximum sustained wind in knots, if reported.
    pub max_wind: Option<f64>,
    /// Minimum central pressure in millibars, if reported.
    pub min_pressure: Option<f64>,
    /// Event label for notable observations (e.g. "landfall").
    pub event_label: Option<String>,
}

/// A named storm: its ordered track points plus the exposure footprint.
///
/// The footprint is the collection of 50 km disks around each track point,
/// in the projected (meter) CRS. Intersection against it answers "did this
/// storm pass within 50 km".
#[derive(Debug, Clone)]
pub struct StormTrack {
    /// Storm name (e.g. "IAN").
    pub name: String,
    /// Track observations in chronological order.
    pub points: Vec<HurricaneTrackPoint>,
    /// Buffered track disks in projected meters.
    pub footprint: MultiPolygon<f64>,
}

/// Category of a critical facility.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum FacilityCategory {
    /// Hospitals and medical centers.
    Hospital,
    /// Public schools (often double as evacuation sites).
    School,
    /// Designated emergency shelters.
    Shelter,
    /// Power generation plants.
    PowerPlant,
    /// Fire stations.
    FireStation,
    /// Police stations.
    PoliceStation,
    /// Anything that doesn't fit the known categories.
    Other,
}

impl FacilityCategory {
    /// Returns all known facility categories.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Hospital,
            Self::School,
            Self::Shelter,
            Self::PowerPlant,
            Self::FireStation,
            Self::PoliceStation,
            Self::Other,
        ]
    }
}

/// A critical facility point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityPoint {
    /// Facility name.
    pub name: String,
    /// Facility category.
    pub category: FacilityCategory,
    /// Latitude (WGS84). Rows with invalid coordinates are dropped at load.
    pub latitude: f64,
    /// Longitude (WGS84).
    pub longitude: f64,
    /// Precomputed risk score, if the source provides one.
    pub risk_score: Option<f64>,
}

/// The three model input features for one query point.
///
/// Built fresh per query by the feature extractor; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskFeatureVector {
    /// Minimum distance from the query point to the coastline, kilometers.
    pub distance_to_coast_km: f64,
    /// Number of distinct storms whose track passed within 50 km.
    pub hurricane_exposure_count: u32,
    /// Composite SVI rank of the containing county.
    pub svi_score: f64,
}

/// Outcome of one risk query, success or failure.
///
/// Failures are carried in `error` rather than raised past the query
/// boundary; a result with `error: Some(_)` has no predicted score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskQueryResult {
    /// Resolved latitude, if geocoding succeeded.
    pub latitude: Option<f64>,
    /// Resolved longitude, if geocoding succeeded.
    pub longitude: Option<f64>,
    /// Calibrated model output, if the whole pipeline succeeded.
    pub predicted_score: Option<f64>,
    /// Name of the county containing the resolved point.
    pub matched_county: Option<String>,
    /// Human-readable failure description, if any stage failed.
    pub error: Option<String>,
}

impl RiskQueryResult {
    /// A successful result with a predicted score.
    #[must_use]
    pub fn success(latitude: f64, longitude: f64, score: f64, county: String) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
            predicted_score: Some(score),
            matched_county: Some(county),
            error: None,
        }
    }

    /// A failure before any coordinate was resolved.
    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            latitude: None,
            longitude: None,
            predicted_score: None,
            matched_county: None,
            error: Some(error.into()),
        }
    }

    /// A failure after geocoding resolved a coordinate.
    #[must_use]
    pub fn failure_at(latitude: f64, longitude: f64, error: impl Into<String>) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
            predicted_score: None,
            matched_county: None,
            error: Some(error.into()),
        }
    }

    /// Whether this result carries a failure.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr as _;

    #[test]
    fn facility_category_parses_case_insensitively() {
        assert_eq!(
            FacilityCategory::from_str("hospital").unwrap(),
            FacilityCategory::Hospital
        );
        assert_eq!(
            FacilityCategory::from_str("POWER_PLANT").unwrap(),
            FacilityCategory::PowerPlant
        );
    }

    #[test]
    fn facility_category_rejects_unknown() {
        assert!(FacilityCategory::from_str("casino").is_err());
    }

    #[test]
    fn failure_result_has_no_score() {
        let result = RiskQueryResult::failure("address not found");
        assert!(result.is_failure());
        assert_eq!(result.predicted_score, None);
        assert_eq!(result.matched_county, None);
    }

    #[test]
    fn success_result_has_no_error() {
        let result = RiskQueryResult::success(25.77, -80.19, 1.32, "Miami-Dade".to_string());
        assert!(!result.is_failure());
        assert_eq!(result.matched_county.as_deref(), Some("Miami-Dade"));
    }
}
