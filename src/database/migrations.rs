//! Schema migrations for the Linkshelf SQLite database.
//!
//! Uses a `schema_version` table to track which migrations have been applied.
//! Each migration runs exactly once and is recorded with a timestamp.

use rusqlite::Connection;

use crate::services::derived_fields::now_timestamp;

/// Current schema version. Bump this when adding a new migration.
pub const CURRENT_SCHEMA_VERSION: i32 = 2;

/// Returns the current schema version from the database (0 if table doesn't exist).
pub fn get_schema_version(conn: &Connection) -> i32 {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .unwrap_or(0)
}

/// Runs all pending schema migrations against the provided connection.
///
/// # Errors
/// Returns `rusqlite::Error` if any SQL statement fails.
pub fn run_all(conn: &Connection) -> Result<(), rusqlite::Error> {
    // journal_mode returns a row, so it goes through query_row rather than execute_batch
    let _mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
    conn.execute_batch(
        "PRAGMA foreign_keys = ON;
         CREATE TABLE IF NOT EXISTS schema_version (
             version INTEGER PRIMARY KEY,
             applied_at TEXT NOT NULL,
             description TEXT NOT NULL
         );",
    )?;

    let current = get_schema_version(conn);

    if current < 1 {
        migration_v1(conn)?;
        record_version(conn, 1, "Initial schema: bookmarks with free-text topic")?;
    }

    if current < 2 {
        migration_v2(conn)?;
        record_version(conn, 2, "Add projects table, project_id and custom_properties on bookmarks")?;
    }

    Ok(())
}

fn record_version(conn: &Connection, version: i32, description: &str) -> Result<(), rusqlite::Error> {
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at, description) VALUES (?1, ?2, ?3)",
        rusqlite::params![version, now_timestamp(), description],
    )?;
    Ok(())
}

/// V1: the original bookmark layout, where a project is only a topic string.
fn migration_v1(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS bookmarks (
            id TEXT PRIMARY KEY,
            url TEXT NOT NULL,
            title TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            content TEXT NOT NULL DEFAULT '',
            action TEXT,
            share_to TEXT,
            topic TEXT,
            tags TEXT NOT NULL DEFAULT '[]',
            timestamp TEXT NOT NULL,
            deleted INTEGER NOT NULL DEFAULT 0
        );
        ",
    )
}

/// V2: normalized projects. Columns are only added when an older table lacks them.
fn migration_v2(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS projects (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            description TEXT NOT NULL DEFAULT '',
            status TEXT NOT NULL DEFAULT 'active',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        ",
    )?;

    if conn.prepare("SELECT project_id FROM bookmarks LIMIT 0").is_err() {
        conn.execute_batch(
            "ALTER TABLE bookmarks ADD COLUMN project_id TEXT REFERENCES projects(id);",
        )?;
    }
    if conn.prepare("SELECT custom_properties FROM bookmarks LIMIT 0").is_err() {
        conn.execute_batch(
            "ALTER TABLE bookmarks ADD COLUMN custom_properties TEXT NOT NULL DEFAULT '{}';",
        )?;
    }

    conn.execute_batch(
        "
        CREATE INDEX IF NOT EXISTS idx_bookmarks_action ON bookmarks(action);
        CREATE INDEX IF NOT EXISTS idx_bookmarks_topic ON bookmarks(topic);
        CREATE INDEX IF NOT EXISTS idx_bookmarks_project_id ON bookmarks(project_id);
        CREATE INDEX IF NOT EXISTS idx_bookmarks_timestamp ON bookmarks(timestamp);
        ",
    )
}
