use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Key-value metadata attached to a bookmark. Keys are unique.
pub type CustomProperties = BTreeMap<String, String>;

/// Recognized workflow labels. The stored `action` column is an open set;
/// values outside this list are kept verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    ReadLater,
    Working,
    Share,
    Archived,
    Irrelevant,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::ReadLater => "read-later",
            Action::Working => "working",
            Action::Share => "share",
            Action::Archived => "archived",
            Action::Irrelevant => "irrelevant",
        }
    }

    /// Maps a stored label to a known action. Unknown labels yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "read-later" => Some(Action::ReadLater),
            "working" => Some(Action::Working),
            "share" => Some(Action::Share),
            "archived" => Some(Action::Archived),
            "irrelevant" => Some(Action::Irrelevant),
            _ => None,
        }
    }

    /// Absent, empty and `read-later` all mean "not yet triaged".
    pub fn is_triage(label: Option<&str>) -> bool {
        match label {
            None => true,
            Some(l) => l.is_empty() || l == Action::ReadLater.as_str(),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents a saved link as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: String,
    pub url: String,
    pub title: String,
    pub description: String,
    pub content: String,
    pub action: Option<String>,
    pub share_to: Option<String>,
    pub topic: Option<String>,
    pub project_id: Option<String>,
    pub tags: Vec<String>,
    pub custom_properties: CustomProperties,
    pub timestamp: String,
    pub deleted: bool,
}

/// A bookmark enriched with fields derived at read time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkView {
    #[serde(flatten)]
    pub bookmark: Bookmark,
    pub domain: String,
    pub age: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested: Option<Action>,
}

/// Payload for creating a bookmark.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateBookmarkRequest {
    pub url: String,
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub action: Option<String>,
    pub share_to: Option<String>,
    pub topic: Option<String>,
    pub project_id: Option<String>,
    pub tags: Option<Vec<String>>,
    pub custom_properties: Option<CustomProperties>,
}

/// Payload for replacing every mutable field of a bookmark.
///
/// Omitted optional fields are written as empty; nothing is merged from the
/// prior record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FullUpdateRequest {
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub action: Option<String>,
    pub share_to: Option<String>,
    pub topic: Option<String>,
    pub project_id: Option<String>,
    pub tags: Option<Vec<String>>,
    pub custom_properties: Option<CustomProperties>,
}

/// Payload for updating workflow fields of a bookmark.
///
/// Omitting both `topic` and `project_id` unassigns the bookmark from its project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialUpdateRequest {
    pub action: Option<String>,
    pub share_to: Option<String>,
    pub topic: Option<String>,
    pub project_id: Option<String>,
    pub tags: Option<Vec<String>>,
    pub custom_properties: Option<CustomProperties>,
}

/// One page of a listing plus the total row count for the same filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}
