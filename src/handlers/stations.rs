//! Stations endpoint handler.
//!
//! Returns every station identifier as a flat JSON array of strings.

use axum::{extract::State, Json};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use crate::error::KonaError;
use crate::logging::{generate_request_id, log_request_error};
use crate::queries;
use crate::state::AppState;

/// Handle GET /api/v1.0/stations requests
pub async fn stations_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, KonaError> {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = "/api/v1.0/stations",
        request_id = %request_id,
        "Processing stations request"
    );

    let ids = queries::stations(&state).map_err(|e| {
        log_request_error(&e, "/api/v1.0/stations", &request_id, None);
        e
    })?;

    let duration = start_time.elapsed();
    info!(
        endpoint = "/api/v1.0/stations",
        request_id = %request_id,
        duration_us = duration.as_micros() as u64,
        station_count = ids.len(),
        "Stations request successful"
    );

    Ok(Json(ids))
}
