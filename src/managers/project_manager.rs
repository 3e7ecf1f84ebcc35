//! Project Manager for Linkshelf.
//!
//! Implements `ProjectManagerTrait`: resolving free-text topics to
//! normalized projects (creating them on first use), and the project
//! listings shown on the dashboard, backed by SQLite via `rusqlite`.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};
use uuid::Uuid;

use crate::services::derived_fields::{display_status_at, now_timestamp, sql_latest};
use crate::types::errors::ProjectError;
use crate::types::project::{
    ActiveProject, Association, Project, ReferenceCollection, DEFAULT_PROJECT_DESCRIPTION,
    DEFAULT_PROJECT_STATUS,
};

/// Maximum number of reference collections returned.
pub const REFERENCE_COLLECTION_LIMIT: i64 = 10;

const PROJECT_COLUMNS: &str = "id, name, description, status, created_at, updated_at";

/// Trait defining project resolution and listing operations.
pub trait ProjectManagerTrait {
    /// Finds the project named `name`, creating it if absent. Returns its ID.
    fn resolve_topic(&mut self, name: &str) -> Result<String, ProjectError>;
    /// Returns the name of the project with the given ID.
    fn topic_for_project(&self, project_id: &str) -> Result<String, ProjectError>;
    /// Computes the topic/project pair to store on a bookmark.
    fn resolve_association(
        &mut self,
        topic: Option<&str>,
        project_id: Option<&str>,
    ) -> Result<Association, ProjectError>;
    fn get_project(&self, id: &str) -> Result<Project, ProjectError>;
    fn find_by_name(&self, name: &str) -> Result<Option<Project>, ProjectError>;
    fn list_projects(&self) -> Result<Vec<Project>, ProjectError>;
    fn list_active_projects(&self) -> Result<Vec<ActiveProject>, ProjectError>;
    fn list_reference_collections(&self) -> Result<Vec<ReferenceCollection>, ProjectError>;
}

/// Project manager backed by a SQLite connection.
pub struct ProjectManager<'a> {
    conn: &'a Connection,
}

impl<'a> ProjectManager<'a> {
    /// Creates a new `ProjectManager` using the provided database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Reads a single `Project` row into a struct.
    fn row_to_project(row: &rusqlite::Row) -> rusqlite::Result<Project> {
        Ok(Project {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            status: row.get(3)?,
            created_at: row.get(4)?,
            updated_at: row.get(5)?,
        })
    }

    fn find_id_by_name(&self, name: &str) -> Result<Option<String>, ProjectError> {
        let id = self
            .conn
            .query_row(
                "SELECT id FROM projects WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }

    /// Active projects with bookmarks, classified against `now`.
    ///
    /// A bookmark belongs to a project through `project_id`, or, for legacy
    /// rows without one, through an exact `topic` match on the project name.
    pub fn list_active_projects_at(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<ActiveProject>, ProjectError> {
        let sql = format!(
            "SELECT p.id, p.name, p.description, p.status, p.created_at, p.updated_at, \
                    COUNT(b.id) AS bookmark_count, \
                    COALESCE({}, p.updated_at) AS last_activity \
             FROM projects p \
             JOIN bookmarks b \
               ON b.project_id = p.id OR (b.project_id IS NULL AND b.topic = p.name) \
             WHERE p.status = ?1 \
             GROUP BY p.id \
             HAVING COUNT(b.id) > 0 \
             ORDER BY last_activity DESC, p.name ASC",
            sql_latest("b.timestamp")
        );
        let mut stmt = self.conn.prepare(&sql)?;

        let rows = stmt.query_map(params![DEFAULT_PROJECT_STATUS], |row| {
            let project = Self::row_to_project(row)?;
            let bookmark_count: i64 = row.get(6)?;
            let last_activity: String = row.get(7)?;
            Ok((project, bookmark_count, last_activity))
        })?;

        let mut results = Vec::new();
        for row in rows {
            let (project, bookmark_count, last_activity) = row?;
            let display_status = display_status_at(&last_activity, now);
            results.push(ActiveProject {
                project,
                bookmark_count,
                last_activity,
                display_status,
            });
        }
        debug!(count = results.len(), "listed active projects");
        Ok(results)
    }
}

impl<'a> ProjectManagerTrait for ProjectManager<'a> {
    /// Lookup, then insert-if-absent, then lookup again. The unique index on
    /// `projects.name` makes a concurrent insert of the same name a no-op, so
    /// both callers end up with the same ID.
    fn resolve_topic(&mut self, name: &str) -> Result<String, ProjectError> {
        if let Some(id) = self.find_id_by_name(name)? {
            return Ok(id);
        }

        let now = now_timestamp();
        let inserted = self.conn.execute(
            "INSERT INTO projects (id, name, description, status, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?5) \
             ON CONFLICT(name) DO NOTHING",
            params![
                Uuid::new_v4().to_string(),
                name,
                DEFAULT_PROJECT_DESCRIPTION,
                DEFAULT_PROJECT_STATUS,
                now
            ],
        )?;

        let id = self
            .find_id_by_name(name)?
            .ok_or_else(|| ProjectError::NotFound(name.to_string()))?;
        if inserted > 0 {
            info!(project_id = %id, name, "created project for new topic");
        }
        Ok(id)
    }

    fn topic_for_project(&self, project_id: &str) -> Result<String, ProjectError> {
        self.conn
            .query_row(
                "SELECT name FROM projects WHERE id = ?1",
                params![project_id],
                |row| row.get(0),
            )
            .optional()?
            .ok_or_else(|| ProjectError::NotFound(project_id.to_string()))
    }

    /// A non-empty `project_id` wins and its name becomes the topic. Otherwise
    /// a non-empty topic is resolved (or created). Supplying neither clears
    /// the association; omission never means "leave unchanged".
    fn resolve_association(
        &mut self,
        topic: Option<&str>,
        project_id: Option<&str>,
    ) -> Result<Association, ProjectError> {
        let topic = topic.map(str::trim).filter(|t| !t.is_empty());
        let project_id = project_id.map(str::trim).filter(|p| !p.is_empty());

        match (project_id, topic) {
            (Some(pid), _) => {
                let name = self.topic_for_project(pid)?;
                Ok(Association {
                    topic: Some(name),
                    project_id: Some(pid.to_string()),
                })
            }
            (None, Some(name)) => {
                let pid = self.resolve_topic(name)?;
                Ok(Association {
                    topic: Some(name.to_string()),
                    project_id: Some(pid),
                })
            }
            (None, None) => Ok(Association::cleared()),
        }
    }

    fn get_project(&self, id: &str) -> Result<Project, ProjectError> {
        let sql = format!("SELECT {} FROM projects WHERE id = ?1", PROJECT_COLUMNS);
        self.conn
            .query_row(&sql, params![id], Self::row_to_project)
            .optional()?
            .ok_or_else(|| ProjectError::NotFound(id.to_string()))
    }

    fn find_by_name(&self, name: &str) -> Result<Option<Project>, ProjectError> {
        let sql = format!("SELECT {} FROM projects WHERE name = ?1", PROJECT_COLUMNS);
        let project = self
            .conn
            .query_row(&sql, params![name], Self::row_to_project)
            .optional()?;
        Ok(project)
    }

    fn list_projects(&self) -> Result<Vec<Project>, ProjectError> {
        let sql = format!("SELECT {} FROM projects ORDER BY name", PROJECT_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], Self::row_to_project)?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }
        Ok(results)
    }

    fn list_active_projects(&self) -> Result<Vec<ActiveProject>, ProjectError> {
        self.list_active_projects_at(Utc::now())
    }

    /// Topics with bookmarks that no `working` bookmark uses, busiest first.
    fn list_reference_collections(&self) -> Result<Vec<ReferenceCollection>, ProjectError> {
        let sql = format!(
            "SELECT topic, COUNT(*) AS cnt, {} AS last_updated \
             FROM bookmarks \
             WHERE topic IS NOT NULL AND topic != '' \
               AND topic NOT IN ( \
                   SELECT DISTINCT topic FROM bookmarks \
                   WHERE action = 'working' AND topic IS NOT NULL \
               ) \
             GROUP BY topic \
             ORDER BY cnt DESC, last_updated DESC \
             LIMIT ?1",
            sql_latest("timestamp")
        );
        let mut stmt = self.conn.prepare(&sql)?;

        let rows = stmt.query_map(params![REFERENCE_COLLECTION_LIMIT], |row| {
            Ok(ReferenceCollection {
                topic: row.get(0)?,
                count: row.get(1)?,
                last_updated: row.get(2)?,
            })
        })?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }
        Ok(results)
    }
}
