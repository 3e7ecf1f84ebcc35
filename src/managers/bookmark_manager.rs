//! Bookmark Manager for Linkshelf.
//!
//! Implements `BookmarkManagerTrait`: create, replace, workflow update and
//! listing operations for bookmarks, backed by SQLite via `rusqlite`.
//! Project fields are routed through [`ProjectManager`] so that `topic` and
//! `project_id` stay consistent after every write.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::managers::project_manager::{ProjectManager, ProjectManagerTrait};
use crate::services::codec;
use crate::services::derived_fields::{
    calculate_age_at, extract_domain, now_timestamp, sql_instant, suggest_action,
};
use crate::types::bookmark::{
    Bookmark, BookmarkView, CreateBookmarkRequest, CustomProperties, FullUpdateRequest,
    Page, PartialUpdateRequest,
};
use crate::types::errors::BookmarkError;

const BOOKMARK_COLUMNS: &str = "id, url, title, description, content, action, share_to, \
                                topic, project_id, tags, custom_properties, timestamp, deleted";

/// SQL predicate selecting bookmarks with no decided action.
pub const TRIAGE_FILTER: &str = "(action IS NULL OR action = '' OR action = 'read-later')";

/// Trait defining bookmark repository operations.
pub trait BookmarkManagerTrait {
    fn create_bookmark(&mut self, request: &CreateBookmarkRequest) -> Result<Bookmark, BookmarkError>;
    /// Replaces every mutable field; omitted fields become empty.
    fn full_update(&mut self, id: &str, request: &FullUpdateRequest) -> Result<Bookmark, BookmarkError>;
    /// Rewrites action, share target, tags, properties and project association.
    fn partial_update(&mut self, id: &str, request: &PartialUpdateRequest) -> Result<Bookmark, BookmarkError>;
    fn get_bookmark(&self, id: &str) -> Result<BookmarkView, BookmarkError>;
    /// Paginated bookmarks with exactly `action`, newest first. Returns the page and total count.
    fn list_by_action(&self, action: &str, limit: i64, offset: i64) -> Result<Page<BookmarkView>, BookmarkError>;
    /// Paginated bookmarks with no decided action, newest first.
    fn list_triage_queue(&self, limit: i64, offset: i64) -> Result<Page<BookmarkView>, BookmarkError>;
}

/// Bookmark manager backed by a SQLite connection.
pub struct BookmarkManager<'a> {
    conn: &'a Connection,
}

impl<'a> BookmarkManager<'a> {
    /// Creates a new `BookmarkManager` using the provided database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Rejects blank `url`/`title`, naming every missing field.
    fn require_fields(fields: &[(&str, &str)]) -> Result<(), BookmarkError> {
        let missing: Vec<&str> = fields
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(BookmarkError::ValidationError(missing.join(", ")))
        }
    }

    /// Opens a write transaction that takes the write lock at `BEGIN`, so the
    /// resolver's lookup sees every project committed by other connections.
    fn begin_write(&self) -> rusqlite::Result<Transaction<'a>> {
        Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)
    }

    /// Empty strings are stored as NULL so "unset" has a single representation.
    fn non_empty(value: Option<&String>) -> Option<String> {
        value.map(|v| v.trim()).filter(|v| !v.is_empty()).map(str::to_string)
    }

    fn decode_tags_lenient(id: &str, text: &str) -> Vec<String> {
        codec::decode_tags(text).unwrap_or_else(|e| {
            warn!(bookmark_id = id, error = %e, "discarding undecodable tags");
            Vec::new()
        })
    }

    fn decode_properties_lenient(id: &str, text: &str) -> CustomProperties {
        codec::decode_properties(text).unwrap_or_else(|e| {
            warn!(bookmark_id = id, error = %e, "discarding undecodable custom properties");
            CustomProperties::new()
        })
    }

    /// Reads a single `Bookmark` row into a struct.
    fn row_to_bookmark(row: &rusqlite::Row) -> rusqlite::Result<Bookmark> {
        let id: String = row.get(0)?;
        let tags_text: Option<String> = row.get(9)?;
        let props_text: Option<String> = row.get(10)?;
        let tags = Self::decode_tags_lenient(&id, tags_text.as_deref().unwrap_or_default());
        let custom_properties =
            Self::decode_properties_lenient(&id, props_text.as_deref().unwrap_or_default());
        let optional = |value: Option<String>| value.filter(|v| !v.is_empty());

        Ok(Bookmark {
            url: row.get(1)?,
            title: row.get(2)?,
            description: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            content: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
            action: optional(row.get(5)?),
            share_to: optional(row.get(6)?),
            topic: optional(row.get(7)?),
            project_id: optional(row.get(8)?),
            tags,
            custom_properties,
            timestamp: row.get(11)?,
            deleted: row.get(12)?,
            id,
        })
    }

    /// Loads the stored record without derived fields.
    pub fn fetch_bookmark(&self, id: &str) -> Result<Bookmark, BookmarkError> {
        let sql = format!("SELECT {} FROM bookmarks WHERE id = ?1", BOOKMARK_COLUMNS);
        self.conn
            .query_row(&sql, params![id], Self::row_to_bookmark)
            .optional()?
            .ok_or_else(|| BookmarkError::NotFound(id.to_string()))
    }

    fn to_view(bookmark: Bookmark, now: DateTime<Utc>, with_suggestion: bool) -> BookmarkView {
        let domain = extract_domain(&bookmark.url);
        let age = calculate_age_at(&bookmark.timestamp, now);
        let suggested = with_suggestion
            .then(|| suggest_action(&domain, &bookmark.title, &bookmark.description));
        BookmarkView {
            bookmark,
            domain,
            age,
            suggested,
        }
    }

    /// Runs a filtered listing plus its separate total count.
    fn list_page(
        &self,
        filter: &str,
        filter_params: &[&dyn rusqlite::ToSql],
        limit: i64,
        offset: i64,
    ) -> Result<Page<BookmarkView>, BookmarkError> {
        let count_sql = format!("SELECT COUNT(*) FROM bookmarks WHERE {}", filter);
        let total: i64 = self
            .conn
            .query_row(&count_sql, filter_params, |row| row.get(0))?;

        let n = filter_params.len();
        let list_sql = format!(
            "SELECT {} FROM bookmarks WHERE {} \
             ORDER BY {} DESC, rowid DESC LIMIT ?{} OFFSET ?{}",
            BOOKMARK_COLUMNS,
            filter,
            sql_instant("timestamp"),
            n + 1,
            n + 2
        );
        let mut all_params: Vec<&dyn rusqlite::ToSql> = filter_params.to_vec();
        all_params.push(&limit);
        all_params.push(&offset);

        let mut stmt = self.conn.prepare(&list_sql)?;
        let rows = stmt.query_map(all_params.as_slice(), Self::row_to_bookmark)?;

        let now = Utc::now();
        let mut items = Vec::new();
        for row in rows {
            items.push(Self::to_view(row?, now, true));
        }
        debug!(total, returned = items.len(), limit, offset, "listed bookmarks");
        Ok(Page {
            items,
            total,
            limit,
            offset,
        })
    }
}

impl<'a> BookmarkManagerTrait for BookmarkManager<'a> {
    /// Creates a bookmark and returns the stored record with its generated ID.
    fn create_bookmark(&mut self, request: &CreateBookmarkRequest) -> Result<Bookmark, BookmarkError> {
        Self::require_fields(&[("url", request.url.as_str()), ("title", request.title.as_str())])?;

        let tx = self.begin_write()?;
        let association = ProjectManager::new(&tx)
            .resolve_association(request.topic.as_deref(), request.project_id.as_deref())?;

        let id = Uuid::new_v4().to_string();
        tx.execute(
            "INSERT INTO bookmarks (id, url, title, description, content, action, share_to, \
                                    topic, project_id, tags, custom_properties, timestamp, deleted) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, 0)",
            params![
                id,
                request.url.trim(),
                request.title.trim(),
                request.description.clone().unwrap_or_default(),
                request.content.clone().unwrap_or_default(),
                Self::non_empty(request.action.as_ref()),
                Self::non_empty(request.share_to.as_ref()),
                association.topic,
                association.project_id,
                codec::encode_tags(request.tags.as_deref()),
                codec::encode_properties(request.custom_properties.as_ref()),
                now_timestamp(),
            ],
        )?;
        tx.commit()?;

        self.fetch_bookmark(&id)
    }

    fn full_update(&mut self, id: &str, request: &FullUpdateRequest) -> Result<Bookmark, BookmarkError> {
        Self::require_fields(&[("title", request.title.as_str()), ("url", request.url.as_str())])?;

        // Dropping the transaction on NotFound rolls back any project it created.
        let tx = self.begin_write()?;
        let association = ProjectManager::new(&tx)
            .resolve_association(request.topic.as_deref(), request.project_id.as_deref())?;

        let affected = tx.execute(
            "UPDATE bookmarks SET url = ?1, title = ?2, description = ?3, content = ?4, \
                    action = ?5, share_to = ?6, topic = ?7, project_id = ?8, \
                    tags = ?9, custom_properties = ?10 \
             WHERE id = ?11",
            params![
                request.url.trim(),
                request.title.trim(),
                request.description.clone().unwrap_or_default(),
                request.content.clone().unwrap_or_default(),
                Self::non_empty(request.action.as_ref()),
                Self::non_empty(request.share_to.as_ref()),
                association.topic,
                association.project_id,
                codec::encode_tags(request.tags.as_deref()),
                codec::encode_properties(request.custom_properties.as_ref()),
                id,
            ],
        )?;
        if affected == 0 {
            return Err(BookmarkError::NotFound(id.to_string()));
        }
        tx.commit()?;

        self.fetch_bookmark(id)
    }

    fn partial_update(&mut self, id: &str, request: &PartialUpdateRequest) -> Result<Bookmark, BookmarkError> {
        let tx = self.begin_write()?;
        let association = ProjectManager::new(&tx)
            .resolve_association(request.topic.as_deref(), request.project_id.as_deref())?;

        let affected = tx.execute(
            "UPDATE bookmarks SET action = ?1, share_to = ?2, topic = ?3, project_id = ?4, \
                    tags = ?5, custom_properties = ?6 \
             WHERE id = ?7",
            params![
                Self::non_empty(request.action.as_ref()),
                Self::non_empty(request.share_to.as_ref()),
                association.topic,
                association.project_id,
                codec::encode_tags(request.tags.as_deref()),
                codec::encode_properties(request.custom_properties.as_ref()),
                id,
            ],
        )?;
        if affected == 0 {
            return Err(BookmarkError::NotFound(id.to_string()));
        }
        tx.commit()?;

        if association.is_cleared() {
            debug!(bookmark_id = id, "project association cleared");
        }
        self.fetch_bookmark(id)
    }

    /// Returns the record with domain and age derived at read time.
    fn get_bookmark(&self, id: &str) -> Result<BookmarkView, BookmarkError> {
        let bookmark = self.fetch_bookmark(id)?;
        Ok(Self::to_view(bookmark, Utc::now(), false))
    }

    fn list_by_action(&self, action: &str, limit: i64, offset: i64) -> Result<Page<BookmarkView>, BookmarkError> {
        self.list_page("action = ?1", &[&action], limit, offset)
    }

    fn list_triage_queue(&self, limit: i64, offset: i64) -> Result<Page<BookmarkView>, BookmarkError> {
        self.list_page(TRIAGE_FILTER, &[], limit, offset)
    }
}
