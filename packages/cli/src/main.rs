#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the storm map.
//!
//! `serve` starts the API server; `query` runs a single address through
//! the risk pipeline and prints the result as JSON.

use clap::{Parser, Subcommand};
use storm_map_geodata::{DataPaths, GeoContext, paths};
use storm_map_model::RiskModel;
use storm_map_query::{NominatimGeocoder, run_query};

#[derive(Parser)]
#[command(name = "storm_map_cli", about = "Florida storm risk map toolchain")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the API server.
    Serve,
    /// Run one risk query and print the result as JSON.
    Query {
        /// Free-text address to score.
        #[arg(long)]
        address: String,
    },
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => storm_map_server::run_server().await,
        Command::Query { address } => {
            pretty_env_logger::init_custom_env("RUST_LOG");

            log::info!("Loading spatial datasets...");
            let ctx = GeoContext::load(&DataPaths::from_env())
                .expect("Failed to load spatial datasets");
            let model = RiskModel::from_path(&paths::risk_model_path())
                .expect("Failed to load risk model");
            let geocoder =
                NominatimGeocoder::from_env().expect("Failed to build geocoder client");

            let result = run_query(&address, &geocoder, &ctx, &model).await;

            let json = serde_json::to_string_pretty(&result)
                .expect("Failed to serialize query result");
            println!("{json}");
            Ok(())
        }
    }
}
