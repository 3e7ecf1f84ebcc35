//! App Core for Linkshelf.
//!
//! Holds the database and configuration shared by every request.

use crate::config::EngineConfig;
use crate::database::connection::Database;

/// Central application struct.
///
/// Managers are created on demand via `db.connection()` because they borrow
/// the connection with a lifetime parameter.
pub struct App {
    pub db: Database,
    pub config: EngineConfig,
}

impl App {
    /// Opens the database at `config.db_path()`, creating the data directory if needed.
    pub fn new(config: EngineConfig) -> Result<Self, Box<dyn std::error::Error>> {
        std::fs::create_dir_all(&config.data_dir)
            .map_err(|e| format!("Failed to create data dir {}: {}", config.data_dir.display(), e))?;
        let db = Database::open_with_config(config.db_path(), &config)?;
        Ok(Self { db, config })
    }

    /// Builds an app over an in-memory database.
    pub fn in_memory(config: EngineConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let db = Database::open_in_memory()?;
        Ok(Self { db, config })
    }
}
