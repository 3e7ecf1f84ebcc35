use std::fmt;

use serde::{Deserialize, Serialize};

/// Administrative status assigned to newly created projects.
pub const DEFAULT_PROJECT_STATUS: &str = "active";

/// Description assigned to projects created on first use of a topic.
pub const DEFAULT_PROJECT_DESCRIPTION: &str = "Auto-created from bookmark topic";

/// A named grouping of bookmarks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Administrative flag. Never derived from bookmark activity.
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Recency classification shown for a project or topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayStatus {
    Active,
    Stale,
    Inactive,
}

impl DisplayStatus {
    /// `<= 7` days is active, `<= 30` is stale, anything older is inactive.
    pub fn from_days(days: i64) -> Self {
        if days <= 7 {
            DisplayStatus::Active
        } else if days <= 30 {
            DisplayStatus::Stale
        } else {
            DisplayStatus::Inactive
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayStatus::Active => "active",
            DisplayStatus::Stale => "stale",
            DisplayStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for DisplayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A project with at least one associated bookmark.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveProject {
    #[serde(flatten)]
    pub project: Project,
    pub bookmark_count: i64,
    pub last_activity: String,
    pub display_status: DisplayStatus,
}

/// A legacy topic used for reading rather than active work.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceCollection {
    pub topic: String,
    pub count: i64,
    pub last_updated: String,
}

/// The project fields written onto a bookmark. Both are `None` when unassigned;
/// when `project_id` is set, `topic` is that project's name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Association {
    pub topic: Option<String>,
    pub project_id: Option<String>,
}

impl Association {
    pub fn cleared() -> Self {
        Self::default()
    }

    pub fn is_cleared(&self) -> bool {
        self.topic.is_none() && self.project_id.is_none()
    }
}
