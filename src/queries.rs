//! The query layer: one stateless function per endpoint.
//!
//! Each operation opens a fresh read-only connection from the shared state,
//! builds its SQL against the reflected table handles, and releases the
//! connection when it returns (drop covers the error paths too). Observation
//! dates are ISO `YYYY-MM-DD` strings, so lexicographic comparison in SQL is
//! chronological comparison.

use chrono::{Duration, NaiveDate};
use rusqlite::{Connection, OptionalExtension};
use serde::Serialize;
use tracing::debug;

use crate::error::{KonaError, Result};
use crate::schema::TableHandle;
use crate::state::AppState;

/// Sentinel `end_date` reported when no end bound was supplied.
pub const LATEST_AVAILABLE: &str = "Latest Available";

/// One `(date, prcp)` pair from the trailing-year precipitation window.
#[derive(Debug, Clone, Serialize)]
pub struct PrecipReading {
    /// Observation date, `YYYY-MM-DD`
    pub date: String,
    /// Precipitation amount; passes through as JSON null when absent
    pub prcp: Option<f64>,
}

/// Aggregate temperature statistics over a date range.
#[derive(Debug, Clone, Serialize)]
pub struct TempStats {
    /// The requested start date, echoed back verbatim
    pub start_date: String,
    /// The requested end date, or [`LATEST_AVAILABLE`]
    pub end_date: String,
    /// Minimum temperature over the range (null over an empty range)
    #[serde(rename = "TMIN")]
    pub tmin: Option<f64>,
    /// Average temperature over the range
    #[serde(rename = "TAVG")]
    pub tavg: Option<f64>,
    /// Maximum temperature over the range
    #[serde(rename = "TMAX")]
    pub tmax: Option<f64>,
}

/// All `(date, prcp)` pairs from the last 365 days of data, ascending by date.
///
/// A given date may repeat across stations; no deduplication or grouping.
pub fn precipitation(state: &AppState) -> Result<Vec<PrecipReading>> {
    let conn = state.connect()?;
    let m = &state.schema.measurement;
    let cutoff = one_year_ago(&conn, m)?;

    let sql = format!(
        "SELECT {date}, {prcp} FROM {t} WHERE {date} >= ?1 ORDER BY {date}",
        date = q(m.column("date")?),
        prcp = q(m.column("prcp")?),
        t = q(m.name()),
    );
    let mut stmt = conn.prepare(&sql)?;
    let readings = stmt
        .query_map([&cutoff], |row| {
            Ok(PrecipReading {
                date: row.get(0)?,
                prcp: row.get(1)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    debug!(
        cutoff = %cutoff,
        rows = readings.len(),
        "Precipitation query complete"
    );
    Ok(readings)
}

/// The identifier of every station row, in the dataset's natural order.
pub fn stations(state: &AppState) -> Result<Vec<String>> {
    let conn = state.connect()?;
    let s = &state.schema.station;

    let sql = format!(
        "SELECT {station} FROM {t}",
        station = q(s.column("station")?),
        t = q(s.name()),
    );
    let mut stmt = conn.prepare(&sql)?;
    let ids = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    debug!(rows = ids.len(), "Stations query complete");
    Ok(ids)
}

/// Temperature observations from the most-active station over the last 365
/// days of data, ascending by date.
///
/// The most-active station is the one with the highest measurement count;
/// ties fall to the dataset's natural row order since only the first result
/// is used.
pub fn tobs(state: &AppState) -> Result<Vec<f64>> {
    let conn = state.connect()?;
    let m = &state.schema.measurement;
    let station = q(m.column("station")?);
    let date = q(m.column("date")?);
    let tobs = q(m.column("tobs")?);
    let t = q(m.name());

    let sql = format!(
        "SELECT {station} FROM {t} GROUP BY {station} \
         ORDER BY COUNT({station}) DESC LIMIT 1"
    );
    let most_active: String = conn
        .query_row(&sql, [], |row| row.get(0))
        .optional()?
        .ok_or_else(|| KonaError::DataNotFound {
            message: "No measurement rows in dataset".to_string(),
        })?;

    let cutoff = one_year_ago(&conn, m)?;

    // Dates are fetched alongside for the ordering but dropped from the output.
    let sql = format!(
        "SELECT {date}, {tobs} FROM {t} \
         WHERE {date} >= ?1 AND {station} = ?2 ORDER BY {date}"
    );
    let mut stmt = conn.prepare(&sql)?;
    let temps = stmt
        .query_map(rusqlite::params![cutoff, most_active], |row| {
            row.get::<_, f64>(1)
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    debug!(
        station = %most_active,
        cutoff = %cutoff,
        rows = temps.len(),
        "Tobs query complete"
    );
    Ok(temps)
}

/// Min/avg/max temperature over `[start, end]` (or `[start, ∞)` with no end),
/// computed in a single aggregate pass.
///
/// `start` and `end` are raw path segments and are never validated; malformed
/// input or `start > end` yields null aggregates over the empty set.
pub fn temperature_stats(state: &AppState, start: &str, end: Option<&str>) -> Result<TempStats> {
    let conn = state.connect()?;
    let m = &state.schema.measurement;
    let date = q(m.column("date")?);
    let tobs = q(m.column("tobs")?);
    let t = q(m.name());

    let mut sql = format!(
        "SELECT MIN({tobs}), AVG({tobs}), MAX({tobs}) FROM {t} WHERE {date} >= ?1"
    );
    if end.is_some() {
        sql.push_str(&format!(" AND {date} <= ?2"));
    }

    let (tmin, tavg, tmax) = match end {
        Some(end) => conn.query_row(&sql, rusqlite::params![start, end], row_to_stats)?,
        None => conn.query_row(&sql, rusqlite::params![start], row_to_stats)?,
    };

    debug!(start = %start, end = ?end, "Temperature-stats query complete");
    Ok(TempStats {
        start_date: start.to_string(),
        end_date: end.unwrap_or(LATEST_AVAILABLE).to_string(),
        tmin,
        tavg,
        tmax,
    })
}

type StatsRow = (Option<f64>, Option<f64>, Option<f64>);

fn row_to_stats(row: &rusqlite::Row<'_>) -> rusqlite::Result<StatsRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?))
}

/// The cutoff date string for the trailing-year window: the maximum
/// observation date minus exactly 365 days.
///
/// The offset is a literal 365 days regardless of leap years; downstream
/// consumers depend on the exact window boundary.
fn one_year_ago(conn: &Connection, m: &TableHandle) -> Result<String> {
    let sql = format!(
        "SELECT MAX({date}) FROM {t}",
        date = q(m.column("date")?),
        t = q(m.name()),
    );
    let max_date: Option<String> = conn.query_row(&sql, [], |row| row.get(0))?;
    let max_date = max_date.ok_or_else(|| KonaError::DataNotFound {
        message: "No measurement rows in dataset".to_string(),
    })?;

    let parsed = NaiveDate::parse_from_str(&max_date, "%Y-%m-%d")?;
    let cutoff = parsed - Duration::days(365);
    Ok(cutoff.format("%Y-%m-%d").to_string())
}

/// Quote a reflected identifier for embedding in SQL.
fn q(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
