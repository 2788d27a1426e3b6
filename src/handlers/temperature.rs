//! Temperature-statistics endpoint handlers.
//!
//! Two path patterns route to the same query: `/api/v1.0/:start` leaves the
//! end bound open, `/api/v1.0/:start/:end` closes it. The path segments are
//! passed to the filter verbatim, never validated.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use crate::error::KonaError;
use crate::logging::{generate_request_id, log_request_error};
use crate::queries::{self, TempStats};
use crate::state::AppState;

/// Handle GET /api/v1.0/:start requests
pub async fn temp_start_handler(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
) -> Result<Json<TempStats>, KonaError> {
    stats_response(&state, &start, None).await
}

/// Handle GET /api/v1.0/:start/:end requests
pub async fn temp_range_handler(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<TempStats>, KonaError> {
    stats_response(&state, &start, Some(&end)).await
}

async fn stats_response(
    state: &AppState,
    start: &str,
    end: Option<&str>,
) -> Result<Json<TempStats>, KonaError> {
    let request_id = generate_request_id();
    let start_time = Instant::now();
    let params = match end {
        Some(end) => format!("start={}, end={}", start, end),
        None => format!("start={}", start),
    };

    debug!(
        endpoint = "/api/v1.0/:start[/:end]",
        request_id = %request_id,
        params = %params,
        "Processing temperature-stats request"
    );

    let stats = queries::temperature_stats(state, start, end).map_err(|e| {
        log_request_error(&e, "/api/v1.0/:start[/:end]", &request_id, Some(&params));
        e
    })?;

    let duration = start_time.elapsed();
    info!(
        endpoint = "/api/v1.0/:start[/:end]",
        request_id = %request_id,
        duration_us = duration.as_micros() as u64,
        params = %params,
        "Temperature-stats request successful"
    );

    Ok(Json(stats))
}
