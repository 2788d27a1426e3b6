//! Fixture dataset builder for integration tests.
//!
//! Creates a small SQLite database with the same two-table layout as the real
//! dataset and a shape whose aggregates are known in advance.

use rusqlite::Connection;
use std::error::Error;
use std::path::Path;

/// All station identifiers, in insert order.
pub const STATION_IDS: [&str; 3] = ["USC00519281", "USC00513117", "USC00514830"];

/// The station with the most measurement rows.
pub const MOST_ACTIVE_STATION: &str = "USC00519281";

/// Maximum observation date in the fixture.
pub const MAX_DATE: &str = "2017-08-23";

/// `MAX_DATE` minus exactly 365 days.
pub const WINDOW_START: &str = "2016-08-23";

/// Minimum observation date in the fixture (the only out-of-window row).
pub const MIN_DATE: &str = "2016-08-22";

/// The most-active station's in-window temperatures, chronological order.
pub const MOST_ACTIVE_WINDOW_TOBS: [f64; 4] = [68.0, 70.0, 71.0, 76.0];

/// Global temperature extremes over the whole fixture.
pub const GLOBAL_TMIN: f64 = 65.0;
pub const GLOBAL_TMAX: f64 = 80.0;

/// Number of measurement rows with date >= `WINDOW_START`.
pub const WINDOW_ROW_COUNT: usize = 7;

/// Create the fixture dataset at the given path.
pub fn create_test_climate_db(path: &Path) -> Result<(), Box<dyn Error>> {
    let conn = Connection::open(path)?;
    conn.execute_batch(
        "CREATE TABLE station (
             id INTEGER PRIMARY KEY,
             station TEXT,
             name TEXT,
             latitude FLOAT,
             longitude FLOAT,
             elevation FLOAT
         );
         CREATE TABLE measurement (
             id INTEGER PRIMARY KEY,
             station TEXT,
             date TEXT,
             prcp FLOAT,
             tobs FLOAT
         );
         INSERT INTO station (station, name, latitude, longitude, elevation) VALUES
             ('USC00519281', 'WAIHEE 837.5, HI US', 21.45, -157.85, 32.9),
             ('USC00513117', 'KANEOHE 838.1, HI US', 21.42, -157.80, 14.6),
             ('USC00514830', 'KUALOA RANCH HEADQUARTERS 886.9, HI US', 21.52, -157.84, 7.0);
         INSERT INTO measurement (station, date, prcp, tobs) VALUES
             ('USC00519281', '2016-08-22', 0.01, 67.0),
             ('USC00519281', '2016-08-23', 0.70, 68.0),
             ('USC00519281', '2016-12-01', NULL, 70.0),
             ('USC00519281', '2017-03-15', 0.05, 71.0),
             ('USC00519281', '2017-08-23', 0.45, 76.0),
             ('USC00513117', '2017-01-10', 0.20, 65.0),
             ('USC00513117', '2017-08-23', 0.00, 78.0),
             ('USC00514830', '2017-05-01', 0.12, 80.0);",
    )?;
    Ok(())
}

/// Create a dataset with the right tables but no measurement rows.
pub fn create_empty_climate_db(path: &Path) -> Result<(), Box<dyn Error>> {
    let conn = Connection::open(path)?;
    conn.execute_batch(
        "CREATE TABLE station (
             id INTEGER PRIMARY KEY,
             station TEXT,
             name TEXT,
             latitude FLOAT,
             longitude FLOAT,
             elevation FLOAT
         );
         CREATE TABLE measurement (
             id INTEGER PRIMARY KEY,
             station TEXT,
             date TEXT,
             prcp FLOAT,
             tobs FLOAT
         );",
    )?;
    Ok(())
}
