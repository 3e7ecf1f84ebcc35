// Linkshelf state managers
// Managers own the SQL for bookmarks, projects and statistics.

pub mod bookmark_manager;
pub mod project_manager;
pub mod stats_manager;
