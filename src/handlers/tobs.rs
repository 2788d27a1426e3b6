//! Temperature-observation (tobs) endpoint handler.
//!
//! Returns the most-active station's trailing year of temperature values as a
//! flat JSON array of numbers.

use axum::{extract::State, Json};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use crate::error::KonaError;
use crate::logging::{generate_request_id, log_request_error};
use crate::queries;
use crate::state::AppState;

/// Handle GET /api/v1.0/tobs requests
pub async fn tobs_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<f64>>, KonaError> {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = "/api/v1.0/tobs",
        request_id = %request_id,
        "Processing tobs request"
    );

    let temps = queries::tobs(&state).map_err(|e| {
        log_request_error(&e, "/api/v1.0/tobs", &request_id, None);
        e
    })?;

    let duration = start_time.elapsed();
    info!(
        endpoint = "/api/v1.0/tobs",
        request_id = %request_id,
        duration_us = duration.as_micros() as u64,
        observation_count = temps.len(),
        "Tobs request successful"
    );

    Ok(Json(temps))
}
