//! # kona
//!
//! A read-only HTTP API server for SQLite climate-observation datasets.
//!
//! This library serves a pre-populated database of daily weather-station
//! observations (precipitation and temperature) through a small set of JSON
//! endpoints. The dataset's schema is never declared in code; it is reflected
//! from the database file itself at startup.
//!
//! ## Architecture
//!
//! - **Schema Reflector**: discovers the `station` and `measurement` tables
//!   and their column layouts at process start
//! - **Query Layer**: one stateless aggregate/filter query per endpoint, each
//!   with its own scoped read-only connection
//! - **HTTP Router**: axum routes mapping five URL patterns to the queries and
//!   serializing their results as JSON

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod queries;
pub mod schema;
pub mod state;

/// Build the HTTP router: all five API routes plus the home route, with the
/// CORS and trace layers applied.
///
/// Used by both the server binary and the integration tests so they exercise
/// the same wiring.
pub fn router(state: Arc<state::AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::home_handler))
        .route(
            "/api/v1.0/precipitation",
            get(handlers::precipitation_handler),
        )
        .route("/api/v1.0/stations", get(handlers::stations_handler))
        .route("/api/v1.0/tobs", get(handlers::tobs_handler))
        .route("/api/v1.0/:start", get(handlers::temp_start_handler))
        .route("/api/v1.0/:start/:end", get(handlers::temp_range_handler))
        .layer(CorsLayer::permissive())
        .layer(logging::create_http_trace_layer())
        .with_state(state)
}

pub use config::Config;
pub use error::{KonaError, Result};
pub use logging::{
    create_http_trace_layer, generate_request_id, init_tracing, log_request_error,
    log_schema_stats,
};
pub use schema::{Schema, TableHandle};
pub use state::AppState;
