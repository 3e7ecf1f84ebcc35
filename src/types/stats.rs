use serde::Serialize;

use super::project::DisplayStatus;

/// Rollup entry for one `working` topic.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStat {
    pub topic: String,
    pub count: i64,
    pub last_updated: String,
    pub status: DisplayStatus,
}

/// Dashboard summary counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_bookmarks: i64,
    pub needs_triage: i64,
    pub active_projects: i64,
    pub ready_to_share: i64,
    pub archived: i64,
    pub project_stats: Vec<ProjectStat>,
}

/// Bookmark count for one action label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionCount {
    pub action: String,
    pub count: i64,
}
