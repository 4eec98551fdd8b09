#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the storm map application.
//!
//! Serves the JSON API the map frontend consumes: county boundaries with
//! SVI ranks for the choropleth, hurricane tracks, critical facilities,
//! and the on-demand point-risk prediction. All datasets are loaded once
//! at startup into an immutable [`GeoContext`] shared across workers.

mod handlers;

use std::sync::Arc;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use storm_map_geodata::{DataPaths, GeoContext, paths};
use storm_map_model::RiskModel;
use storm_map_query::NominatimGeocoder;

/// Shared application state.
pub struct AppState {
    /// Loaded spatial datasets and county index.
    pub ctx: Arc<GeoContext>,
    /// Validated risk model.
    pub model: Arc<RiskModel>,
    /// Production geocoder.
    pub geocoder: NominatimGeocoder,
}

/// Starts the storm map API server.
///
/// Loads the four spatial datasets and the model artifact, then starts
/// the Actix-Web HTTP server. This is a regular async function — the
/// caller is responsible for providing the async runtime (e.g. via
/// `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind
/// or encounters a runtime error.
///
/// # Panics
///
/// Panics if any dataset or the model artifact fails to load — the
/// process cannot serve queries without them.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    log::info!("Loading spatial datasets...");
    let ctx = GeoContext::load(&DataPaths::from_env()).expect("Failed to load spatial datasets");

    log::info!("Loading risk model artifact...");
    let model =
        RiskModel::from_path(&paths::risk_model_path()).expect("Failed to load risk model");

    let geocoder = NominatimGeocoder::from_env().expect("Failed to build geocoder client");

    let state = web::Data::new(AppState {
        ctx: Arc::new(ctx),
        model: Arc::new(model),
        geocoder,
    });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(handlers::health))
                    .route("/counties", web::get().to(handlers::counties))
                    .route("/storms", web::get().to(handlers::storms))
                    .route("/facilities", web::get().to(handlers::facilities))
                    .route("/risk", web::post().to(handlers::risk)),
            )
            // Serve frontend static files (production)
            .service(Files::new("/", "app/dist").index_file("index.html"))
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
