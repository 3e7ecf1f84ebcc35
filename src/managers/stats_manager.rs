//! Stats Manager for Linkshelf.
//!
//! Implements `StatsManagerTrait`: dashboard summary counts and
//! per-action rollups over the bookmark table.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use tracing::debug;

use crate::managers::bookmark_manager::TRIAGE_FILTER;
use crate::services::derived_fields::{display_status_at, sql_latest};
use crate::types::bookmark::Action;
use crate::types::errors::StatsError;
use crate::types::stats::{ActionCount, ProjectStat, Summary};

/// Maximum number of `working` topics reported in a summary.
pub const PROJECT_STATS_LIMIT: i64 = 10;

/// Trait defining statistics operations.
pub trait StatsManagerTrait {
    fn summary(&self) -> Result<Summary, StatsError>;
    /// Bookmark counts per action label, largest first. Absent and empty
    /// actions are counted under `read-later`.
    fn counts_by_action(&self) -> Result<Vec<ActionCount>, StatsError>;
}

/// Stats manager backed by a SQLite connection.
pub struct StatsManager<'a> {
    conn: &'a Connection,
}

impl<'a> StatsManager<'a> {
    /// Creates a new `StatsManager` using the provided database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn count(conn: &Connection, filter: &str, action: Option<&str>) -> Result<i64, StatsError> {
        let sql = format!("SELECT COUNT(*) FROM bookmarks WHERE {}", filter);
        let count: i64 = match action {
            Some(a) => conn.query_row(&sql, params![a], |row| row.get(0))?,
            None => conn.query_row(&sql, [], |row| row.get(0))?,
        };
        Ok(count)
    }

    fn project_stats(conn: &Connection, now: DateTime<Utc>) -> Result<Vec<ProjectStat>, StatsError> {
        let sql = format!(
            "SELECT topic, COUNT(*) AS cnt, {} AS last_updated \
             FROM bookmarks \
             WHERE action = ?1 AND topic IS NOT NULL AND topic != '' \
             GROUP BY topic \
             ORDER BY last_updated DESC, topic ASC \
             LIMIT ?2",
            sql_latest("timestamp")
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params![Action::Working.as_str(), PROJECT_STATS_LIMIT], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut results = Vec::new();
        for row in rows {
            let (topic, count, last_updated) = row?;
            let status = display_status_at(&last_updated, now);
            results.push(ProjectStat {
                topic,
                count,
                last_updated,
                status,
            });
        }
        Ok(results)
    }

    /// Computes the summary against `now`.
    ///
    /// All counts are read inside one transaction, so they describe the same
    /// snapshot and the category counts never exceed `total_bookmarks`.
    pub fn summary_at(&self, now: DateTime<Utc>) -> Result<Summary, StatsError> {
        let tx = self.conn.unchecked_transaction()?;

        let total_bookmarks = Self::count(&tx, "1 = 1", None)?;
        let needs_triage = Self::count(&tx, TRIAGE_FILTER, None)?;
        let active_projects: i64 = tx.query_row(
            "SELECT COUNT(DISTINCT topic) FROM bookmarks \
             WHERE action = ?1 AND topic IS NOT NULL AND topic != ''",
            params![Action::Working.as_str()],
            |row| row.get(0),
        )?;
        let ready_to_share = Self::count(&tx, "action = ?1", Some(Action::Share.as_str()))?;
        let archived = Self::count(&tx, "action = ?1", Some(Action::Archived.as_str()))?;
        let project_stats = Self::project_stats(&tx, now)?;

        tx.commit()?;

        debug!(
            total_bookmarks,
            needs_triage, active_projects, ready_to_share, archived, "computed summary"
        );
        Ok(Summary {
            total_bookmarks,
            needs_triage,
            active_projects,
            ready_to_share,
            archived,
            project_stats,
        })
    }
}

impl<'a> StatsManagerTrait for StatsManager<'a> {
    fn summary(&self) -> Result<Summary, StatsError> {
        self.summary_at(Utc::now())
    }

    fn counts_by_action(&self) -> Result<Vec<ActionCount>, StatsError> {
        let mut stmt = self.conn.prepare(
            "SELECT COALESCE(NULLIF(action, ''), ?1) AS label, COUNT(*) AS cnt \
             FROM bookmarks \
             GROUP BY label \
             ORDER BY cnt DESC, label ASC",
        )?;
        let rows = stmt.query_map(params![Action::ReadLater.as_str()], |row| {
            Ok(ActionCount {
                action: row.get(0)?,
                count: row.get(1)?,
            })
        })?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }
        Ok(results)
    }
}
