//! Application state management for kona.
//!
//! This module defines the shared state that is passed to all handlers,
//! containing the configuration, the dataset path, and the reflected schema.
//! The state is read-only after startup and shared via `Arc` without locks;
//! every query opens its own short-lived connection.

use rusqlite::{Connection, OpenFlags};
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::error::{KonaError, Result};
use crate::schema::Schema;

/// The main application state shared across all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Configuration
    pub config: Config,
    /// Path to the SQLite dataset file
    pub db_path: PathBuf,
    /// Reflected dataset schema
    pub schema: Schema,
}

impl AppState {
    /// Create a new AppState
    pub fn new(config: Config, db_path: PathBuf, schema: Schema) -> Self {
        Self {
            config,
            db_path,
            schema,
        }
    }

    /// Create a new AppState wrapped in an Arc for shared ownership
    pub fn new_shared(config: Config, db_path: PathBuf, schema: Schema) -> Arc<Self> {
        Arc::new(Self::new(config, db_path, schema))
    }

    /// Open a fresh read-only connection to the dataset.
    ///
    /// Connections are scoped to a single query-layer operation and released
    /// on drop, including on error paths. An unreachable dataset is a server
    /// fault, not a missing-data condition, and surfaces as such.
    pub fn connect(&self) -> Result<Connection> {
        if !self.db_path.exists() {
            return Err(KonaError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Database file not found: {}", self.db_path.display()),
            )));
        }
        let conn = Connection::open_with_flags(
            &self.db_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(conn)
    }

    /// Validate the application state
    pub fn validate(&self) -> Result<()> {
        // Both handles must expose the columns the query layer references.
        self.schema.station.column("station")?;
        self.schema.measurement.column("station")?;
        self.schema.measurement.column("date")?;
        self.schema.measurement.column("prcp")?;
        self.schema.measurement.column("tobs")?;
        Ok(())
    }
}
