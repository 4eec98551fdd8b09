#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Spatial dataset loading for the storm map.
//!
//! Loads the four static datasets (county boundaries joined with SVI
//! ranks, coastline geometry, hurricane tracks, critical facilities) into
//! an immutable [`GeoContext`] shared for the lifetime of the process.
//! Loading happens once at startup; any missing or malformed file is a
//! fatal [`DataError`], never a per-query condition.

pub mod coastline;
pub mod counties;
pub mod facilities;
pub mod hurricanes;
pub mod paths;

use std::collections::BTreeMap;

use geo::MultiLineString;
use storm_map_geodata_models::{CountyPolygon, FacilityPoint, StormTrack};
use storm_map_spatial::CountyIndex;
use thiserror::Error;

pub use paths::DataPaths;

/// Errors that can occur while loading the static datasets.
#[derive(Debug, Error)]
pub enum DataError {
    /// File read failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// GeoJSON parsing failed.
    #[error("GeoJSON error: {0}")]
    Geojson(#[from] geojson::Error),

    /// Data conversion error.
    #[error("Conversion error: {message}")]
    Conversion {
        /// Description of what went wrong.
        message: String,
    },
}

/// The loaded, immutable spatial datasets plus the county lookup index.
///
/// Constructed once in `main` and passed by reference (or `Arc`) into the
/// query pipeline — the datasets never change after load, so readers need
/// no locking.
pub struct GeoContext {
    counties: Vec<CountyPolygon>,
    county_index: CountyIndex,
    coastline: MultiLineString<f64>,
    storms: BTreeMap<String, StormTrack>,
    facilities: Vec<FacilityPoint>,
}

impl GeoContext {
    /// Assembles a context from already-loaded datasets.
    ///
    /// The coastline must already be in projected meters and storm
    /// footprints built; [`GeoContext::load`] does both from raw files.
    #[must_use]
    pub fn new(
        counties: Vec<CountyPolygon>,
        coastline: MultiLineString<f64>,
        storms: BTreeMap<String, StormTrack>,
        facilities: Vec<FacilityPoint>,
    ) -> Self {
        let county_index = CountyIndex::build(counties.clone());
        Self {
            counties,
            county_index,
            coastline,
            storms,
            facilities,
        }
    }

    /// Loads all four datasets from disk and builds the county index.
    ///
    /// # Errors
    ///
    /// Returns [`DataError`] if any required file is missing or
    /// malformed. Callers treat this as fatal — the process cannot serve
    /// queries without its datasets.
    pub fn load(data_paths: &DataPaths) -> Result<Self, DataError> {
        let counties =
            counties::load_county_boundaries(&data_paths.county_boundaries, &data_paths.svi_table)?;
        log::info!("Loaded {} county boundaries with SVI ranks", counties.len());

        let coastline = coastline::load_coastline(&data_paths.coastline)?;
        log::info!("Loaded coastline with {} segments", coastline.0.len());

        let storms = hurricanes::load_hurricane_tracks(&data_paths.hurricane_tracks)?;
        log::info!("Loaded {} storm tracks", storms.len());

        let facilities = facilities::load_facilities(&data_paths.facilities)?;
        log::info!("Loaded {} facilities", facilities.len());

        Ok(Self::new(counties, coastline, storms, facilities))
    }

    /// County polygons in load order.
    #[must_use]
    pub fn counties(&self) -> &[CountyPolygon] {
        &self.counties
    }

    /// Point-in-polygon index over the counties.
    #[must_use]
    pub const fn county_index(&self) -> &CountyIndex {
        &self.county_index
    }

    /// Coastline geometry in projected meters.
    #[must_use]
    pub const fn coastline(&self) -> &MultiLineString<f64> {
        &self.coastline
    }

    /// Storm tracks keyed by storm name.
    #[must_use]
    pub const fn storms(&self) -> &BTreeMap<String, StormTrack> {
        &self.storms
    }

    /// Facility points that survived coordinate filtering.
    #[must_use]
    pub fn facilities(&self) -> &[FacilityPoint] {
        &self.facilities
    }
}
