use std::error::Error;
use std::path::PathBuf;

use rusqlite::{Connection, OpenFlags};

use kona::schema::{table_names, TableHandle};

fn main() -> Result<(), Box<dyn Error>> {
    // Path to the SQLite file, defaulting to the fixture location
    let file_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("Resources/hawaii.sqlite"));

    println!("Inspecting SQLite file: {}", file_path.display());

    // Open the database read-only
    let conn = Connection::open_with_flags(&file_path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;

    println!("\n=== FILE INFORMATION ===");

    // Print tables and their reflected columns
    let tables = table_names(&conn)?;
    println!("\nTables ({}):", tables.len());
    for table in &tables {
        let handle = TableHandle::reflect(&conn, table)?;
        println!("  {}", handle.name());
        for col in handle.columns() {
            if col.decl_type.is_empty() {
                println!("    {}", col.name);
            } else {
                println!("    {} ({})", col.name, col.decl_type);
            }
        }

        // Print the row count
        let count_sql = format!(
            "SELECT COUNT(*) FROM \"{}\"",
            handle.name().replace('"', "\"\"")
        );
        match conn.query_row(&count_sql, [], |row| row.get::<_, i64>(0)) {
            Ok(count) => println!("    rows: {}", count),
            Err(e) => println!("    rows: error reading count: {}", e),
        }
    }

    // Print sample rows from each table
    println!("\nSample Rows:");
    for table in &tables {
        println!("  {}:", table);
        let sql = format!("SELECT * FROM \"{}\" LIMIT 3", table.replace('"', "\"\""));
        let mut stmt = conn.prepare(&sql)?;
        let column_count = stmt.column_count();
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(column_count);
            for i in 0..column_count {
                let value: rusqlite::types::Value = row.get(i)?;
                values.push(format!("{:?}", value));
            }
            println!("    ({})", values.join(", "));
        }
    }

    Ok(())
}
