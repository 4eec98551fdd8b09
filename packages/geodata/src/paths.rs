//! Canonical file paths for the static data directory.
//!
//! All datasets live under one `data/` directory, resolved from the
//! `STORM_MAP_DATA_DIR` environment variable or the workspace root.

use std::path::{Path, PathBuf};

/// Returns the workspace root directory.
///
/// Resolved at compile time from `CARGO_MANIFEST_DIR`.
///
/// # Panics
///
/// Panics if the project root cannot be resolved.
#[must_use]
pub fn project_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .expect("Failed to find project root from CARGO_MANIFEST_DIR")
        .to_path_buf()
}

/// Returns the data directory, honoring `STORM_MAP_DATA_DIR`.
#[must_use]
pub fn data_dir() -> PathBuf {
    std::env::var("STORM_MAP_DATA_DIR")
        .map_or_else(|_| project_root().join("data"), PathBuf::from)
}

/// The generalized USA county boundary GeoJSON.
#[must_use]
pub fn county_boundaries_path() -> PathBuf {
    data_dir().join("usa_counties.geojson")
}

/// The Florida SVI table CSV.
#[must_use]
pub fn svi_table_path() -> PathBuf {
    data_dir().join("florida_svi.csv")
}

/// The Florida coastline GeoJSON.
#[must_use]
pub fn coastline_path() -> PathBuf {
    data_dir().join("florida_coastline.geojson")
}

/// The hurricane track points CSV.
#[must_use]
pub fn hurricane_tracks_path() -> PathBuf {
    data_dir().join("hurricane_tracks.csv")
}

/// The critical facilities CSV.
#[must_use]
pub fn facilities_path() -> PathBuf {
    data_dir().join("facilities.csv")
}

/// The serialized pre-trained regression artifact.
#[must_use]
pub fn risk_model_path() -> PathBuf {
    data_dir().join("risk_model.json")
}

/// Resolved locations of every input dataset.
///
/// Built once at startup (see [`DataPaths::from_env`]) and passed into
/// [`crate::GeoContext::load`]; tests point the fields at fixtures.
#[derive(Debug, Clone)]
pub struct DataPaths {
    /// County boundary GeoJSON.
    pub county_boundaries: PathBuf,
    /// SVI table CSV.
    pub svi_table: PathBuf,
    /// Coastline GeoJSON.
    pub coastline: PathBuf,
    /// Hurricane tracks CSV.
    pub hurricane_tracks: PathBuf,
    /// Facilities CSV.
    pub facilities: PathBuf,
}

impl DataPaths {
    /// Resolves every dataset path from the data directory.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            county_boundaries: county_boundaries_path(),
            svi_table: svi_table_path(),
            coastline: coastline_path(),
            hurricane_tracks: hurricane_tracks_path(),
            facilities: facilities_path(),
        }
    }
}
