#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Risk query orchestration.
//!
//! Runs one user-submitted address through the pipeline:
//! geocode → feature extraction → prediction. Every stage failure is
//! converted into a [`RiskQueryResult`] carrying the error — nothing
//! propagates past [`run_query`], and a failed query leaves no state
//! behind for the next one.

pub mod features;

pub use features::{ExtractError, Extraction, extract};

use async_trait::async_trait;
use storm_map_geocoder::{GeocodeError, GeocodedAddress, nominatim};
use storm_map_geodata::GeoContext;
use storm_map_geodata_models::RiskQueryResult;
use storm_map_model::RiskModel;
use storm_map_spatial::GeoPoint;
use thiserror::Error;

/// Per-query failures, unified for display to the user.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The submitted address was empty or whitespace.
    #[error("No address provided")]
    EmptyAddress,

    /// The geocoder responded but matched nothing.
    #[error("Address could not be resolved to a location")]
    AddressNotFound,

    /// The geocoding service failed.
    #[error(transparent)]
    Geocode(#[from] GeocodeError),

    /// Feature extraction failed.
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// Stages of one risk query.
///
/// `Done` and `Failed` are terminal per query; the orchestrator holds no
/// state across queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryState {
    /// Waiting for a non-empty address.
    Idle,
    /// Resolving the address to a coordinate.
    Geocoding,
    /// Computing the feature vector.
    FeatureExtracting,
    /// Scoring the feature vector.
    Predicting,
    /// Finished with a prediction.
    Done,
    /// Finished with an error.
    Failed,
}

/// Address resolution collaborator.
///
/// `Ok(None)` means the service answered but matched nothing; the
/// orchestrator treats that as a failure distinct from transport errors.
#[async_trait]
pub trait Geocode: Send + Sync {
    /// Resolves a free-text address to coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError`] if the geocoding service fails.
    async fn geocode(&self, address: &str) -> Result<Option<GeocodedAddress>, GeocodeError>;
}

/// Production geocoder backed by Nominatim.
pub struct NominatimGeocoder {
    client: reqwest::Client,
    base_url: String,
}

impl NominatimGeocoder {
    /// Builds the geocoder from environment configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError`] if the HTTP client cannot be constructed.
    pub fn from_env() -> Result<Self, GeocodeError> {
        Ok(Self {
            client: storm_map_geocoder::client()?,
            base_url: storm_map_geocoder::base_url_from_env(),
        })
    }
}

#[async_trait]
impl Geocode for NominatimGeocoder {
    async fn geocode(&self, address: &str) -> Result<Option<GeocodedAddress>, GeocodeError> {
        nominatim::geocode_freeform(&self.client, &self.base_url, address).await
    }
}

/// Runs one address through the full pipeline.
///
/// Always returns a result; failures are carried in
/// [`RiskQueryResult::error`] rather than raised. An empty address fails
/// without invoking any collaborator, and a geocode failure
/// short-circuits extraction and prediction.
pub async fn run_query(
    address: &str,
    geocoder: &dyn Geocode,
    ctx: &GeoContext,
    model: &RiskModel,
) -> RiskQueryResult {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        log::debug!("Query state: {:?} (no address submitted)", QueryState::Idle);
        return fail(&QueryError::EmptyAddress);
    }

    log::debug!("Query state: {:?}", QueryState::Geocoding);
    let located = match geocoder.geocode(trimmed).await {
        Ok(Some(located)) => located,
        Ok(None) => return fail(&QueryError::AddressNotFound),
        Err(err) => return fail(&QueryError::from(err)),
    };

    log::debug!(
        "Query state: {:?} at ({}, {})",
        QueryState::FeatureExtracting,
        located.latitude,
        located.longitude
    );
    let point = GeoPoint::new(located.longitude, located.latitude);
    let extraction = match features::extract(point, ctx) {
        Ok(extraction) => extraction,
        Err(err) => {
            return fail_at(located.latitude, located.longitude, &QueryError::from(err));
        }
    };

    log::debug!("Query state: {:?}", QueryState::Predicting);
    let score = model.predict(&extraction.vector);

    log::debug!(
        "Query state: {:?} (score {score}, county {})",
        QueryState::Done,
        extraction.county
    );
    RiskQueryResult::success(located.latitude, located.longitude, score, extraction.county)
}

/// Converts a failure before any coordinate was resolved.
fn fail(error: &QueryError) -> RiskQueryResult {
    log::debug!("Query state: {:?} ({error})", QueryState::Failed);
    RiskQueryResult::failure(error.to_string())
}

/// Converts a failure after geocoding resolved a coordinate.
fn fail_at(latitude: f64, longitude: f64, error: &QueryError) -> RiskQueryResult {
    log::debug!("Query state: {:?} ({error})", QueryState::Failed);
    RiskQueryResult::failure_at(latitude, longitude, error.to_string())
}


#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::test_support::florida_context;

    /// Scripted geocoder that counts invocations.
    struct StubGeocoder {
        response: StubResponse,
        calls: AtomicUsize,
    }

    enum StubResponse {
        Found(f64, f64),
        NoMatch,
        RateLimited,
    }

    impl StubGeocoder {
        fn new(response: StubResponse) -> Self {
            Self {
                response,
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Geocode for StubGeocoder {
        async fn geocode(&self, _address: &str) -> Result<Option<GeocodedAddress>, GeocodeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.response {
                StubResponse::Found(latitude, longitude) => Ok(Some(GeocodedAddress {
                    latitude,
                    longitude,
                    matched_address: None,
                })),
                StubResponse::NoMatch => Ok(None),
                StubResponse::RateLimited => Err(GeocodeError::RateLimited),
            }
        }
    }

    fn model() -> RiskModel {
        RiskModel::from_parts([-0.05, 0.3, 1.2], 0.8)
    }

    #[tokio::test]
    async fn empty_address_never_reaches_the_geocoder() {
        let geocoder = StubGeocoder::new(StubResponse::Found(25.77, -80.19));
        let ctx = florida_context();

        let result = run_query("   ", &geocoder, &ctx, &model()).await;

        assert!(result.is_failure());
        assert_eq!(geocoder.call_count(), 0);
    }

    #[tokio::test]
    async fn geocode_error_short_circuits_the_pipeline() {
        let geocoder = StubGeocoder::new(StubResponse::RateLimited);
        let ctx = florida_context();

        let result = run_query("100 Biscayne Blvd, Miami, FL", &geocoder, &ctx, &model()).await;

        assert_eq!(geocoder.call_count(), 1);
        // Extraction never ran: no coordinate, no county, no score.
        assert_eq!(result.latitude, None);
        assert_eq!(result.longitude, None);
        assert_eq!(result.matched_county, None);
        assert_eq!(result.predicted_score, None);
        assert_eq!(result.error.as_deref(), Some("Rate limit exceeded"));
    }

    #[tokio::test]
    async fn unresolved_address_is_a_failure_not_an_empty_success() {
        let geocoder = StubGeocoder::new(StubResponse::NoMatch);
        let ctx = florida_context();

        let result = run_query("nowhere at all", &geocoder, &ctx, &model()).await;

        assert!(result.is_failure());
        assert_eq!(
            result.error.as_deref(),
            Some("Address could not be resolved to a location")
        );
        assert_eq!(result.predicted_score, None);
    }

    #[tokio::test]
    async fn miami_address_scores_with_the_calibrated_model() {
        let geocoder = StubGeocoder::new(StubResponse::Found(25.77, -80.19));
        let ctx = florida_context();
        let model = model();

        let result = run_query("100 Biscayne Blvd, Miami, FL", &geocoder, &ctx, &model).await;

        assert!(!result.is_failure());
        assert_eq!(result.matched_county.as_deref(), Some("Miami-Dade"));

        // The score must equal scoring the extractor's own output.
        let extraction =
            extract(storm_map_spatial::GeoPoint::new(-80.19, 25.77), &ctx).unwrap();
        assert_eq!(extraction.vector.hurricane_exposure_count, 3);
        assert!((extraction.vector.svi_score - 0.82).abs() < f64::EPSILON);
        let expected = model.predict(&extraction.vector);
        assert!((result.predicted_score.unwrap() - expected).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn address_outside_florida_fails_without_prediction() {
        // Atlanta: resolvable, but outside every county polygon.
        let geocoder = StubGeocoder::new(StubResponse::Found(33.75, -84.39));
        let ctx = florida_context();

        let result = run_query("Atlanta, GA", &geocoder, &ctx, &model()).await;

        assert!(result.is_failure());
        assert_eq!(result.predicted_score, None);
        assert_eq!(result.matched_county, None);
        // The coordinate itself did resolve and is reported back.
        assert!((result.latitude.unwrap() - 33.75).abs() < f64::EPSILON);
        assert!(result.error.unwrap().contains("outside every known county"));
    }
}
