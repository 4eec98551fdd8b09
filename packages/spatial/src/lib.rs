#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Shared spatial primitives for the storm map.
//!
//! Provides the projected coordinate system used for metric operations
//! (see [`projection`]), disk buffering for exposure footprints, the
//! R-tree county index for point-in-polygon lookups, and
//! distance-to-coastline computation.
//!
//! The CRS discipline is structural: geographic coordinates travel as
//! [`GeoPoint`], metric coordinates as [`ProjectedPoint`], and the only
//! way between them is [`FloridaAlbers`]. Distance and intersection
//! operations accept projected inputs only.

pub mod projection;

pub use projection::{FloridaAlbers, GeoPoint, ProjectedPoint};

use geo::{Contains, Distance, Euclidean, MultiLineString, MultiPolygon, Point, Polygon};
use rstar::{AABB, RTree, RTreeObject};
use storm_map_geodata_models::CountyPolygon;

/// Radius of a storm's zone of effect around each track point, meters.
///
/// The same radius buffers the query point during feature extraction, so
/// "exposed" means the storm center passed within twice this distance.
pub const EXPOSURE_RADIUS_M: f64 = 50_000.0;

/// Number of segments used to approximate a buffered disk.
const DISK_SEGMENTS: usize = 64;

/// A county polygon stored in the R-tree with its bounding box.
struct CountyEntry {
    envelope: AABB<[f64; 2]>,
    county: CountyPolygon,
}

impl RTreeObject for CountyEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// Pre-built spatial index over county boundary polygons.
///
/// Constructed once at startup and shared read-only. Lookups run in the
/// geographic CRS, matching the boundary dataset.
pub struct CountyIndex {
    counties: RTree<CountyEntry>,
}

impl CountyIndex {
    /// Builds the R-tree index from loaded county polygons.
    #[must_use]
    pub fn build(counties: Vec<CountyPolygon>) -> Self {
        let entries = counties
            .into_iter()
            .map(|county| CountyEntry {
                envelope: compute_envelope(&county.geometry),
                county,
            })
            .collect();
        let index = Self {
            counties: RTree::bulk_load(entries),
        };
        log::debug!("Built county index with {} polygons", index.len());
        index
    }

    /// Finds the county containing a point.
    ///
    /// Counties tile the state without overlap, so first match wins.
    #[must_use]
    pub fn lookup(&self, lng: f64, lat: f64) -> Option<&CountyPolygon> {
        let point = Point::new(lng, lat);
        let query_env = AABB::from_point([lng, lat]);

        for entry in self.counties.locate_in_envelope_intersecting(&query_env) {
            if entry.county.geometry.contains(&point) {
                return Some(&entry.county);
            }
        }
        None
    }

    /// Number of indexed counties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counties.size()
    }

    /// Whether the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counties.size() == 0
    }
}

/// Approximates a disk of `radius_m` meters around a projected point.
///
/// Used both for storm footprints and for buffering the query point
/// during exposure counting. The polygon ring is closed.
#[must_use]
pub fn disk(center: ProjectedPoint, radius_m: f64) -> Polygon<f64> {
    let mut ring = Vec::with_capacity(DISK_SEGMENTS + 1);
    #[allow(clippy::cast_precision_loss)]
    for i in 0..=DISK_SEGMENTS {
        let angle = std::f64::consts::TAU * (i as f64) / (DISK_SEGMENTS as f64);
        ring.push((
            radius_m.mul_add(angle.cos(), center.x),
            radius_m.mul_add(angle.sin(), center.y),
        ));
    }
    Polygon::new(ring.into(), vec![])
}

/// Minimum Euclidean distance from a projected point to the coastline,
/// in meters.
#[must_use]
pub fn distance_to_coast_m(point: ProjectedPoint, coastline: &MultiLineString<f64>) -> f64 {
    let p = Point::new(point.x, point.y);
    Euclidean.distance(&p, coastline)
}

/// Compute the bounding box envelope for a [`MultiPolygon`].
fn compute_envelope(mp: &MultiPolygon<f64>) -> AABB<[f64; 2]> {
    use geo::BoundingRect;

    mp.bounding_rect().map_or_else(
        || AABB::from_point([0.0, 0.0]),
        |rect| AABB::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Intersects, LineString};
    use storm_map_geodata_models::SviRecord;

    fn svi(county: &str, composite: f64) -> SviRecord {
        SviRecord {
            county: county.to_string(),
            rpl_theme1: composite,
            rpl_theme2: composite,
            rpl_theme3: composite,
            rpl_theme4: composite,
            rpl_themes: composite,
        }
    }

    fn square_county(name: &str, min_x: f64, min_y: f64, size: f64, composite: f64) -> CountyPolygon {
        let ring = LineString::from(vec![
            (min_x, min_y),
            (min_x + size, min_y),
            (min_x + size, min_y + size),
            (min_x, min_y + size),
            (min_x, min_y),
        ]);
        CountyPolygon {
            name: name.to_string(),
            state: "Florida".to_string(),
            svi: svi(name, composite),
            geometry: MultiPolygon(vec![Polygon::new(ring, vec![])]),
        }
    }

    #[test]
    fn lookup_finds_containing_county() {
        let index = CountyIndex::build(vec![
            square_county("Alpha", 0.0, 0.0, 1.0, 0.25),
            square_county("Beta", 1.0, 0.0, 1.0, 0.75),
        ]);

        assert_eq!(index.lookup(0.5, 0.5).map(|c| c.name.as_str()), Some("Alpha"));
        assert_eq!(index.lookup(1.5, 0.5).map(|c| c.name.as_str()), Some("Beta"));
    }

    #[test]
    fn lookup_misses_outside_all_counties() {
        let index = CountyIndex::build(vec![square_county("Alpha", 0.0, 0.0, 1.0, 0.25)]);
        assert!(index.lookup(5.0, 5.0).is_none());
    }

    #[test]
    fn disk_vertices_sit_on_radius() {
        let center = ProjectedPoint { x: 1000.0, y: -2000.0 };
        let buffered = disk(center, 50_000.0);
        for coord in buffered.exterior().coords() {
            let distance = ((coord.x - center.x).powi(2) + (coord.y - center.y).powi(2)).sqrt();
            assert!((distance - 50_000.0).abs() < 1.0);
        }
    }

    #[test]
    fn disks_intersect_when_closer_than_combined_radius() {
        let a = disk(ProjectedPoint { x: 0.0, y: 0.0 }, 50_000.0);
        let b = disk(ProjectedPoint { x: 80_000.0, y: 0.0 }, 50_000.0);
        let c = disk(ProjectedPoint { x: 120_000.0, y: 0.0 }, 50_000.0);

        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn distance_to_vertical_coastline() {
        let coastline = MultiLineString(vec![LineString::from(vec![
            (0.0, -100_000.0),
            (0.0, 100_000.0),
        ])]);
        let d = distance_to_coast_m(ProjectedPoint { x: 30_000.0, y: 0.0 }, &coastline);
        assert!((d - 30_000.0).abs() < 1e-6);
    }

    #[test]
    fn distance_increases_moving_inland() {
        let coastline = MultiLineString(vec![LineString::from(vec![
            (0.0, -100_000.0),
            (0.0, 100_000.0),
        ])]);
        let mut previous = -1.0;
        for step in 0..5 {
            let x = f64::from(step) * 10_000.0;
            let d = distance_to_coast_m(ProjectedPoint { x, y: 0.0 }, &coastline);
            assert!(d >= 0.0);
            assert!(d > previous);
            previous = d;
        }
    }
}
