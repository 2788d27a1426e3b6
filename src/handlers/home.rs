//! Home endpoint handler.
//!
//! Returns the static welcome text and route listing. Always responds 200,
//! regardless of dataset state.

use tracing::debug;

/// The route listing served at `/`.
pub const ROUTE_LISTING: &str = "Welcome to the Climate API!\n\
Available Routes:\n\
/api/v1.0/precipitation\n\
/api/v1.0/stations\n\
/api/v1.0/tobs\n\
/api/v1.0/<start>\n\
/api/v1.0/<start>/<end>\n\
\n\
Note: Use dates in YYYY-MM-DD format for start date and end date parameters.\n";

/// Handle GET / requests
pub async fn home_handler() -> &'static str {
    debug!(endpoint = "/", "Processing home request");
    ROUTE_LISTING
}
