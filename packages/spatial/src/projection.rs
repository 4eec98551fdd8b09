//! Albers Equal Area Conic projection for Florida.
//!
//! Maps WGS84 geographic coordinates onto a plane measured in meters so
//! that distance and buffering operations are meaningful. Parameters
//! follow the Florida GDL Albers convention:
//! - Central meridian (lon0): 84°W
//! - Latitude of origin (lat0): 24°N
//! - Standard parallels: 24°N and 31.5°N
//!
//! The formulas are the spherical Albers equations (Snyder, "Map
//! Projections — A Working Manual", ch. 14).

use std::f64::consts::PI;

/// Earth radius in meters (spherical approximation).
const EARTH_RADIUS_M: f64 = 6_371_229.0;

const TO_RAD: f64 = PI / 180.0;

/// A geographic coordinate: WGS84 longitude/latitude in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Longitude in degrees, positive east.
    pub longitude: f64,
    /// Latitude in degrees, positive north.
    pub latitude: f64,
}

impl GeoPoint {
    /// Creates a geographic point from degrees.
    #[must_use]
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

/// A projected coordinate: Florida Albers x/y in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    /// Easting in meters from the central meridian.
    pub x: f64,
    /// Northing in meters from the latitude of origin.
    pub y: f64,
}

/// Albers Equal Area Conic projection fixed to the Florida parameters.
///
/// The cone constants are precomputed at construction; projecting a point
/// is then a handful of trig operations.
#[derive(Debug, Clone)]
pub struct FloridaAlbers {
    /// Central meridian in radians.
    lon0: f64,
    /// Cone constant.
    n: f64,
    /// C constant.
    c: f64,
    /// Radial distance of the latitude of origin.
    rho0: f64,
}

impl FloridaAlbers {
    /// Creates the projection with the Florida parameters.
    #[must_use]
    pub fn new() -> Self {
        let lat0 = 24.0 * TO_RAD;
        let lon0 = -84.0 * TO_RAD;
        let sp1 = 24.0 * TO_RAD;
        let sp2 = 31.5 * TO_RAD;

        let n = (sp1.sin() + sp2.sin()) / 2.0;
        let c = sp1.cos().powi(2) + 2.0 * n * sp1.sin();
        let rho0 = EARTH_RADIUS_M / n * (c - 2.0 * n * lat0.sin()).sqrt();

        Self { lon0, n, c, rho0 }
    }

    /// Projects a geographic point into Albers meters.
    #[must_use]
    pub fn project(&self, point: GeoPoint) -> ProjectedPoint {
        let lat = point.latitude * TO_RAD;
        let lon = point.longitude * TO_RAD;

        let rho = EARTH_RADIUS_M / self.n * (self.c - 2.0 * self.n * lat.sin()).sqrt();
        let theta = self.n * (lon - self.lon0);

        ProjectedPoint {
            x: rho * theta.sin(),
            y: self.rho0 - rho * theta.cos(),
        }
    }

    /// Inverse projection back to geographic degrees.
    #[must_use]
    pub fn invert(&self, point: ProjectedPoint) -> GeoPoint {
        let rho = (point.x.powi(2) + (self.rho0 - point.y).powi(2)).sqrt();
        let theta = point.x.atan2(self.rho0 - point.y);

        let lat = ((self.c - (rho * self.n / EARTH_RADIUS_M).powi(2)) / (2.0 * self.n)).asin();
        let lon = self.lon0 + theta / self.n;

        GeoPoint {
            longitude: lon / TO_RAD,
            latitude: lat / TO_RAD,
        }
    }
}

impl Default for FloridaAlbers {
    fn default() -> Self {
        Self::new()
    }
}
