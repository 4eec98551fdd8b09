//! Feature extraction: the spatial joins behind one risk query.
//!
//! Turns a resolved coordinate into the three model inputs. Distance and
//! exposure run in the projected CRS (meters); the SVI lookup runs in the
//! geographic CRS the county boundaries are stored in.

use geo::Intersects;
use storm_map_geodata::GeoContext;
use storm_map_geodata_models::RiskFeatureVector;
use storm_map_spatial::{EXPOSURE_RADIUS_M, FloridaAlbers, GeoPoint, disk, distance_to_coast_m};
use thiserror::Error;

/// Errors from feature extraction.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The point is not contained by any known county polygon.
    ///
    /// Surfaced as an explicit per-query error; there is no fallback
    /// score for uncovered points.
    #[error("Location ({latitude:.4}, {longitude:.4}) is outside every known county")]
    OutsideCoverage {
        /// Query point latitude.
        latitude: f64,
        /// Query point longitude.
        longitude: f64,
    },
}

/// A successful extraction: the feature vector plus the matched county.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// Model input features.
    pub vector: RiskFeatureVector,
    /// Name of the county containing the query point.
    pub county: String,
}

/// Computes the model features for a resolved coordinate.
///
/// - Distance to coast: minimum Euclidean distance in projected meters,
///   reported in kilometers.
/// - Hurricane exposure: the number of *distinct storms* whose buffered
///   footprint intersects a 50 km buffer around the point — a storm with
///   many in-range track points still counts once. Zero is a valid count.
/// - SVI: composite rank of the containing county.
///
/// # Errors
///
/// Returns [`ExtractError::OutsideCoverage`] if no county contains the
/// point.
pub fn extract(point: GeoPoint, ctx: &GeoContext) -> Result<Extraction, ExtractError> {
    let albers = FloridaAlbers::new();
    let projected = albers.project(point);

    let distance_to_coast_km = distance_to_coast_m(projected, ctx.coastline()) / 1000.0;

    let buffer = disk(projected, EXPOSURE_RADIUS_M);
    #[allow(clippy::cast_possible_truncation)]
    let hurricane_exposure_count = ctx
        .storms()
        .values()
        .filter(|storm| storm.footprint.intersects(&buffer))
        .count() as u32;

    let county = ctx
        .county_index()
        .lookup(point.longitude, point.latitude)
        .ok_or(ExtractError::OutsideCoverage {
            latitude: point.latitude,
            longitude: point.longitude,
        })?;

    Ok(Extraction {
        vector: RiskFeatureVector {
            distance_to_coast_km,
            hurricane_exposure_count,
            svi_score: county.svi.rpl_themes,
        },
        county: county.name.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{florida_context, square_county, storm_at};
    use std::collections::BTreeMap;
    use storm_map_geodata::GeoContext;

    #[test]
    fn returns_exact_svi_for_containing_county() {
        let ctx = florida_context();
        let extraction = extract(GeoPoint::new(-80.19, 25.77), &ctx).unwrap();

        assert_eq!(extraction.county, "Miami-Dade");
        assert!((extraction.vector.svi_score - 0.82).abs() < f64::EPSILON);
    }

    #[test]
    fn outside_every_county_is_an_error_not_a_default() {
        let ctx = florida_context();
        // Atlanta is far outside the fixture counties.
        let result = extract(GeoPoint::new(-84.39, 33.75), &ctx);
        assert!(matches!(result, Err(ExtractError::OutsideCoverage { .. })));
    }

    #[test]
    fn zero_exposure_is_valid() {
        let ctx = GeoContext::new(
            vec![square_county("Miami-Dade", -81.0, 25.0, 2.0, 0.82)],
            crate::test_support::coast_along_meridian(-80.1),
            BTreeMap::new(),
            Vec::new(),
        );
        let extraction = extract(GeoPoint::new(-80.19, 25.77), &ctx).unwrap();
        assert_eq!(extraction.vector.hurricane_exposure_count, 0);
    }

    #[test]
    fn storm_with_many_points_in_range_counts_once() {
        let mut storms = BTreeMap::new();
        let dense = storm_at(
            "DENSE",
            &[
                (-80.25, 25.70),
                (-80.22, 25.75),
                (-80.20, 25.80),
                (-80.18, 25.85),
                (-80.15, 25.90),
            ],
        );
        storms.insert(dense.name.clone(), dense);

        let ctx = GeoContext::new(
            vec![square_county("Miami-Dade", -81.0, 25.0, 2.0, 0.82)],
            crate::test_support::coast_along_meridian(-80.1),
            storms,
            Vec::new(),
        );

        let extraction = extract(GeoPoint::new(-80.19, 25.77), &ctx).unwrap();
        assert_eq!(extraction.vector.hurricane_exposure_count, 1);
    }

    #[test]
    fn counts_distinct_storms_within_range() {
        let ctx = florida_context();
        let extraction = extract(GeoPoint::new(-80.19, 25.77), &ctx).unwrap();
        // Three fixture storms pass near Miami; the panhandle one does not.
        assert_eq!(extraction.vector.hurricane_exposure_count, 3);
    }

    #[test]
    fn distance_to_coast_grows_moving_inland() {
        let ctx = florida_context();
        let mut previous = -1.0;
        // The fixture coastline runs along -80.1; step west, away from it.
        for step in 0..4 {
            let lon = -80.2 - 0.2 * f64::from(step);
            let extraction = extract(GeoPoint::new(lon, 25.77), &ctx).unwrap();
            let distance = extraction.vector.distance_to_coast_km;
            assert!(distance >= 0.0);
            assert!(distance > previous);
            previous = distance;
        }
    }
}
