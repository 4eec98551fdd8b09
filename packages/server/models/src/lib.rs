#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the storm map server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the loaded dataset types to allow independent evolution of the
//! API contract.

use serde::{Deserialize, Serialize};
use storm_map_geodata_models::{CountyPolygon, HurricaneTrackPoint, StormTrack};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the server is healthy.
    pub healthy: bool,
    /// Server version.
    pub version: String,
}

/// Body of a risk query request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskRequest {
    /// Free-text address to score.
    pub address: String,
}

/// A county with its SVI ranks and boundary, as served to the choropleth.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCounty {
    /// County name.
    pub name: String,
    /// State name.
    pub state: String,
    /// Socioeconomic status theme rank.
    pub rpl_theme1: f64,
    /// Household characteristics theme rank.
    pub rpl_theme2: f64,
    /// Racial & ethnic minority status theme rank.
    pub rpl_theme3: f64,
    /// Housing type & transportation theme rank.
    pub rpl_theme4: f64,
    /// Overall composite rank.
    pub rpl_themes: f64,
    /// Boundary geometry as GeoJSON.
    pub geometry: geojson::Geometry,
}

impl From<&CountyPolygon> for ApiCounty {
    fn from(county: &CountyPolygon) -> Self {
        Self {
            name: county.name.clone(),
            state: county.state.clone(),
            rpl_theme1: county.svi.rpl_theme1,
            rpl_theme2: county.svi.rpl_theme2,
            rpl_theme3: county.svi.rpl_theme3,
            rpl_theme4: county.svi.rpl_theme4,
            rpl_themes: county.svi.rpl_themes,
            geometry: geojson::Geometry::new(geojson::Value::from(&county.geometry)),
        }
    }
}

/// A storm track as returned by the API (footprint stays server-side).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiStorm {
    /// Storm name.
    pub name: String,
    /// Track observations in chronological order.
    pub points: Vec<HurricaneTrackPoint>,
}

impl From<&StormTrack> for ApiStorm {
    fn from(storm: &StormTrack) -> Self {
        Self {
            name: storm.name.clone(),
            points: storm.points.clone(),
        }
    }
}

/// Query parameters for the storms endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StormQueryParams {
    /// Restrict the response to one storm by name (case-insensitive).
    pub name: Option<String>,
}

/// Query parameters for the facilities endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityQueryParams {
    /// Restrict the response to one facility category.
    pub category: Option<String>,
}
