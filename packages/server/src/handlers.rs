//! HTTP handler functions for the storm map API.

use std::str::FromStr as _;

use actix_web::{HttpResponse, web};
use storm_map_geodata_models::{FacilityCategory, FacilityPoint};
use storm_map_query::run_query;
use storm_map_server_models::{
    ApiCounty, ApiHealth, ApiStorm, FacilityQueryParams, RiskRequest, StormQueryParams,
};

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/counties`
///
/// Returns every county with its SVI theme ranks and boundary geometry.
/// The frontend picks which rank drives the choropleth.
pub async fn counties(state: web::Data<AppState>) -> HttpResponse {
    let counties: Vec<ApiCounty> = state.ctx.counties().iter().map(ApiCounty::from).collect();
    HttpResponse::Ok().json(counties)
}

/// `GET /api/storms`
///
/// Returns storm tracks, optionally filtered to one storm by name.
pub async fn storms(
    state: web::Data<AppState>,
    params: web::Query<StormQueryParams>,
) -> HttpResponse {
    let storms: Vec<ApiStorm> = state
        .ctx
        .storms()
        .values()
        .filter(|storm| {
            params
                .name
                .as_deref()
                .is_none_or(|name| storm.name.eq_ignore_ascii_case(name))
        })
        .map(ApiStorm::from)
        .collect();
    HttpResponse::Ok().json(storms)
}

/// `GET /api/facilities`
///
/// Returns facilities, optionally filtered by category. An unknown
/// category string matches nothing rather than erroring.
pub async fn facilities(
    state: web::Data<AppState>,
    params: web::Query<FacilityQueryParams>,
) -> HttpResponse {
    let category = params
        .category
        .as_deref()
        .map(|raw| FacilityCategory::from_str(raw).ok());

    let facilities: Vec<&FacilityPoint> = state
        .ctx
        .facilities()
        .iter()
        .filter(|facility| match category {
            None => true,
            Some(Some(wanted)) => facility.category == wanted,
            Some(None) => false,
        })
        .collect();
    HttpResponse::Ok().json(facilities)
}

/// `POST /api/risk`
///
/// Runs one address through the risk pipeline. Always responds 200 with
/// a result body; per-query failures are carried in its `error` field.
pub async fn risk(state: web::Data<AppState>, body: web::Json<RiskRequest>) -> HttpResponse {
    let result = run_query(
        &body.address,
        &state.geocoder,
        &state.ctx,
        &state.model,
    )
    .await;
    HttpResponse::Ok().json(result)
}
