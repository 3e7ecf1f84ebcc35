use thiserror::Error;

// === CodecError ===

/// Errors raised when persisted tag or property text cannot be decoded.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The tags column did not hold a JSON array of strings.
    #[error("Malformed tags: {0}")]
    Tags(String),
    /// The custom properties column did not hold a JSON object of strings.
    #[error("Malformed custom properties: {0}")]
    Properties(String),
}

// === ProjectError ===

/// Errors related to project resolution and listing.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// Project with the given ID was not found.
    #[error("Project not found: {0}")]
    NotFound(String),
    /// Database operation failed.
    #[error("Project database error: {0}")]
    DatabaseError(String),
}

impl From<rusqlite::Error> for ProjectError {
    fn from(value: rusqlite::Error) -> Self {
        Self::DatabaseError(value.to_string())
    }
}

// === BookmarkError ===

/// Errors related to bookmark repository operations.
#[derive(Debug, Error)]
pub enum BookmarkError {
    /// One or more required fields were missing or empty.
    #[error("Missing required field(s): {0}")]
    ValidationError(String),
    /// Bookmark with the given ID was not found.
    #[error("Bookmark not found: {0}")]
    NotFound(String),
    /// The referenced project does not exist.
    #[error("Project not found: {0}")]
    ProjectNotFound(String),
    /// Database operation failed.
    #[error("Bookmark database error: {0}")]
    DatabaseError(String),
}

impl BookmarkError {
    /// Returns true when the error originates in the store rather than the caller.
    pub fn is_store_failure(&self) -> bool {
        matches!(self, BookmarkError::DatabaseError(_))
    }
}

impl From<rusqlite::Error> for BookmarkError {
    fn from(value: rusqlite::Error) -> Self {
        Self::DatabaseError(value.to_string())
    }
}

impl From<ProjectError> for BookmarkError {
    fn from(value: ProjectError) -> Self {
        match value {
            ProjectError::NotFound(id) => Self::ProjectNotFound(id),
            ProjectError::DatabaseError(msg) => Self::DatabaseError(msg),
        }
    }
}

// === StatsError ===

/// Errors related to statistics aggregation.
#[derive(Debug, Error)]
pub enum StatsError {
    /// Database operation failed.
    #[error("Stats database error: {0}")]
    DatabaseError(String),
}

impl From<rusqlite::Error> for StatsError {
    fn from(value: rusqlite::Error) -> Self {
        Self::DatabaseError(value.to_string())
    }
}

// === ConfigError ===

/// Errors related to loading engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading the config file.
    #[error("Config I/O error: {0}")]
    IoError(String),
    /// Failed to parse the config file.
    #[error("Config serialization error: {0}")]
    SerializationError(String),
    /// A config value is out of range.
    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}
