#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geocoding adapter for the storm map.
//!
//! Converts a free-text address into WGS84 coordinates using Nominatim /
//! OpenStreetMap. The external service is treated as an unreliable
//! collaborator: transport errors, rate limiting, and "no match" are all
//! surfaced to the caller, which makes exactly one attempt per user
//! action — no automatic retry.

pub mod nominatim;

use thiserror::Error;

/// Default public Nominatim search endpoint.
pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org/search";

/// A geocoding result with coordinates and metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedAddress {
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Longitude (WGS84).
    pub longitude: f64,
    /// The matched/canonical address returned by the geocoder.
    pub matched_address: Option<String>,
}

/// Errors from geocoding operations.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response parsing failed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },

    /// Rate limit exceeded.
    #[error("Rate limit exceeded")]
    RateLimited,
}

/// Returns the Nominatim base URL, honoring the `NOMINATIM_URL` env var.
#[must_use]
pub fn base_url_from_env() -> String {
    std::env::var("NOMINATIM_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
}

/// Builds the HTTP client used for geocoding requests.
///
/// Nominatim's usage policy requires an identifying user agent.
///
/// # Errors
///
/// Returns [`GeocodeError::Http`] if the client cannot be constructed.
pub fn client() -> Result<reqwest::Client, GeocodeError> {
    let client = reqwest::Client::builder()
        .user_agent(concat!("storm-map/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}
