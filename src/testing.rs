//! Test utilities for database setup.
//!
//! Reuses the authoritative schema and seed functions so test code never
//! duplicates table definitions.

use rusqlite::Connection;
use tempfile::TempDir;

/// Test database with the full schema and the genre set seeded.
pub struct TestDb {
    /// Temporary directory (kept alive for database file persistence)
    pub temp: TempDir,
    pub conn: Connection,
}

impl TestDb {
    pub fn new() -> rusqlite::Result<Self> {
        let temp =
            TempDir::new().map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let db_path = temp.path().join("learning_log.db");
        let conn = Connection::open(&db_path)?;
        crate::db::schema::run_migrations(&conn)?;
        crate::db::seed_genres(&conn)?;

        Ok(Self { temp, conn })
    }
}
