use linkshelf::types::errors::*;

// === CodecError Tests ===

#[test]
fn codec_error_display_variants() {
    assert_eq!(
        CodecError::Tags("expected array".to_string()).to_string(),
        "Malformed tags: expected array"
    );
    assert_eq!(
        CodecError::Properties("expected object".to_string()).to_string(),
        "Malformed custom properties: expected object"
    );
}

// === ProjectError Tests ===

#[test]
fn project_error_display_variants() {
    assert_eq!(
        ProjectError::NotFound("p-1".to_string()).to_string(),
        "Project not found: p-1"
    );
    assert_eq!(
        ProjectError::DatabaseError("locked".to_string()).to_string(),
        "Project database error: locked"
    );
}

// === BookmarkError Tests ===

#[test]
fn bookmark_error_display_variants() {
    assert_eq!(
        BookmarkError::ValidationError("url, title".to_string()).to_string(),
        "Missing required field(s): url, title"
    );
    assert_eq!(
        BookmarkError::NotFound("b-1".to_string()).to_string(),
        "Bookmark not found: b-1"
    );
    assert_eq!(
        BookmarkError::DatabaseError("disk full".to_string()).to_string(),
        "Bookmark database error: disk full"
    );
}

#[test]
fn bookmark_error_from_project_error() {
    let err: BookmarkError = ProjectError::NotFound("p-9".to_string()).into();
    assert!(matches!(err, BookmarkError::ProjectNotFound(ref id) if id == "p-9"));

    let err: BookmarkError = ProjectError::DatabaseError("busy".to_string()).into();
    assert!(err.is_store_failure());
}

#[test]
fn only_database_errors_are_store_failures() {
    assert!(!BookmarkError::NotFound("x".to_string()).is_store_failure());
    assert!(!BookmarkError::ValidationError("url".to_string()).is_store_failure());
    assert!(!BookmarkError::ProjectNotFound("p".to_string()).is_store_failure());
}

#[test]
fn bookmark_error_from_rusqlite() {
    let err: BookmarkError = rusqlite::Error::QueryReturnedNoRows.into();
    assert!(err.is_store_failure());
}

// === StatsError / ConfigError Tests ===

#[test]
fn stats_and_config_error_display() {
    assert_eq!(
        StatsError::DatabaseError("boom".to_string()).to_string(),
        "Stats database error: boom"
    );
    assert_eq!(
        ConfigError::InvalidValue("page sizes must be positive".to_string()).to_string(),
        "Invalid config value: page sizes must be positive"
    );
}

#[test]
fn errors_implement_error_trait() {
    let err: Box<dyn std::error::Error> = Box::new(BookmarkError::NotFound("id".to_string()));
    assert!(err.source().is_none());
}
