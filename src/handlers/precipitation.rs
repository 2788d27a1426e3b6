//! Precipitation endpoint handler.
//!
//! Returns the trailing year of `(date, prcp)` pairs as a JSON array.

use axum::{extract::State, Json};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use crate::error::KonaError;
use crate::logging::{generate_request_id, log_request_error};
use crate::queries::{self, PrecipReading};
use crate::state::AppState;

/// Handle GET /api/v1.0/precipitation requests
pub async fn precipitation_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PrecipReading>>, KonaError> {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = "/api/v1.0/precipitation",
        request_id = %request_id,
        "Processing precipitation request"
    );

    let readings = queries::precipitation(&state).map_err(|e| {
        log_request_error(&e, "/api/v1.0/precipitation", &request_id, None);
        e
    })?;

    let duration = start_time.elapsed();
    info!(
        endpoint = "/api/v1.0/precipitation",
        request_id = %request_id,
        duration_us = duration.as_micros() as u64,
        row_count = readings.len(),
        "Precipitation request successful"
    );

    Ok(Json(readings))
}
