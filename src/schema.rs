//! Schema reflection for the SQLite dataset.
//!
//! Nothing in this crate declares the dataset's schema by hand. At startup the
//! database file is opened once and its table definitions are read back from
//! `sqlite_master` and `PRAGMA table_info`, producing typed handles for the
//! two record types the query layer works with.

use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use tracing::{debug, info};

use crate::error::{KonaError, Result};

/// A single reflected column.
#[derive(Debug, Clone)]
pub struct Column {
    /// Column name as stored in the database
    pub name: String,
    /// Declared SQL type (may be empty, SQLite does not require one)
    pub decl_type: String,
}

/// A reflected table: its name as stored in the database plus its columns.
#[derive(Debug, Clone)]
pub struct TableHandle {
    name: String,
    columns: Vec<Column>,
}

impl TableHandle {
    /// Reflect a table by its exact name.
    pub fn reflect(conn: &Connection, name: &str) -> Result<Self> {
        let sql = format!("PRAGMA table_info(\"{}\")", name.replace('"', "\"\""));
        let mut stmt = conn.prepare(&sql)?;
        let columns = stmt
            .query_map([], |row| {
                Ok(Column {
                    name: row.get(1)?,
                    decl_type: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        if columns.is_empty() {
            return Err(KonaError::Schema {
                message: format!("Table has no columns (does it exist?): {}", name),
            });
        }

        Ok(Self {
            name: name.to_string(),
            columns,
        })
    }

    /// The table name as stored in the database.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All reflected columns, in table order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Resolve a logical column name to the actual column name,
    /// case-insensitively.
    pub fn column(&self, logical: &str) -> Result<&str> {
        self.columns
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(logical))
            .map(|c| c.name.as_str())
            .ok_or_else(|| KonaError::Schema {
                message: format!("Column not found: {}.{}", self.name, logical),
            })
    }

    fn fixed(name: &str, columns: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            columns: columns
                .iter()
                .map(|c| Column {
                    name: (*c).to_string(),
                    decl_type: String::new(),
                })
                .collect(),
        }
    }
}

/// The reflected dataset schema: handles for the two record types.
#[derive(Debug, Clone)]
pub struct Schema {
    /// Weather station records
    pub station: TableHandle,
    /// Daily observation records
    pub measurement: TableHandle,
}

impl Schema {
    /// Reflect the schema from the database file.
    ///
    /// Runs exactly once per process lifetime, at startup.
    pub fn reflect(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(KonaError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Database file not found: {}", path.display()),
            )));
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        info!("Opened database file: {}", path.display());

        let tables = table_names(&conn)?;
        debug!("Database has {} tables: {}", tables.len(), tables.join(", "));

        let station = reflect_named(&conn, &tables, "station")?;
        let measurement = reflect_named(&conn, &tables, "measurement")?;

        Ok(Self {
            station,
            measurement,
        })
    }

    /// The known fixture layout, used when the database file is absent so the
    /// process can keep serving (queries then fail at request time).
    pub fn fallback() -> Self {
        Self {
            station: TableHandle::fixed(
                "station",
                &["id", "station", "name", "latitude", "longitude", "elevation"],
            ),
            measurement: TableHandle::fixed(
                "measurement",
                &["id", "station", "date", "prcp", "tobs"],
            ),
        }
    }
}

/// List the user tables of an open database.
pub fn table_names(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master \
         WHERE type = 'table' AND name NOT LIKE 'sqlite_%' \
         ORDER BY name",
    )?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(names)
}

fn reflect_named(conn: &Connection, tables: &[String], logical: &str) -> Result<TableHandle> {
    let actual = tables
        .iter()
        .find(|t| t.eq_ignore_ascii_case(logical))
        .ok_or_else(|| KonaError::Schema {
            message: format!("Table not found in dataset: {}", logical),
        })?;
    TableHandle::reflect(conn, actual)
}
