//! RPC method handler for the Linkshelf JSON-RPC protocol.
//!
//! Kept apart from `rpc_server.rs` so it can be unit-tested independently.
//! `handle_method` decodes request parameters into the engine's request
//! types, calls the managers, and serializes their results.
//!
//! Store failures are logged with their detail and reported to the caller
//! only as `internal storage error`.

use std::fmt::Display;
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::error;

use crate::app::App;
use crate::managers::bookmark_manager::{BookmarkManager, BookmarkManagerTrait};
use crate::managers::project_manager::{ProjectManager, ProjectManagerTrait};
use crate::managers::stats_manager::{StatsManager, StatsManagerTrait};
use crate::types::bookmark::{CreateBookmarkRequest, FullUpdateRequest, PartialUpdateRequest};
use crate::types::errors::{BookmarkError, ProjectError, StatsError};

/// Message returned in place of store failure details.
pub const STORE_FAILURE_MESSAGE: &str = "internal storage error";

fn store_failure(method: &str, detail: &dyn Display) -> String {
    error!(method, error = %detail, "store operation failed");
    STORE_FAILURE_MESSAGE.to_string()
}

fn bookmark_failure(method: &str, err: BookmarkError) -> String {
    if err.is_store_failure() {
        store_failure(method, &err)
    } else {
        err.to_string()
    }
}

fn project_failure(method: &str, err: ProjectError) -> String {
    match err {
        ProjectError::DatabaseError(_) => store_failure(method, &err),
        ProjectError::NotFound(_) => err.to_string(),
    }
}

fn stats_failure(method: &str, err: StatsError) -> String {
    store_failure(method, &err)
}

fn parse_params<T: DeserializeOwned>(params: &Value) -> Result<T, String> {
    serde_json::from_value(params.clone()).map_err(|e| format!("invalid params: {}", e))
}

fn to_value<T: Serialize>(value: &T) -> Result<Value, String> {
    serde_json::to_value(value).map_err(|e| format!("serialization error: {}", e))
}

fn required_str<'p>(params: &'p Value, key: &str) -> Result<&'p str, String> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("missing {}", key))
}

/// Reads `limit`/`offset`, applying the configured page-size bounds.
fn page_params(app: &App, params: &Value) -> (i64, i64) {
    let limit = app
        .config
        .clamp_limit(params.get("limit").and_then(|v| v.as_i64()));
    let offset = params
        .get("offset")
        .and_then(|v| v.as_i64())
        .unwrap_or(0)
        .max(0);
    (limit, offset)
}

/// Dispatch a JSON-RPC method call to the appropriate manager.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Bookmarks ───
        "bookmark.create" => {
            let request: CreateBookmarkRequest = parse_params(params)?;
            let a = app.lock().map_err(|e| e.to_string())?;
            let mut mgr = BookmarkManager::new(a.db.connection());
            let bookmark = mgr
                .create_bookmark(&request)
                .map_err(|e| bookmark_failure(method, e))?;
            to_value(&bookmark)
        }
        "bookmark.get" => {
            let id = required_str(params, "id")?;
            let a = app.lock().map_err(|e| e.to_string())?;
            let mgr = BookmarkManager::new(a.db.connection());
            let view = mgr.get_bookmark(id).map_err(|e| bookmark_failure(method, e))?;
            to_value(&view)
        }
        "bookmark.update" => {
            let id = required_str(params, "id")?;
            let request: FullUpdateRequest = parse_params(params)?;
            let a = app.lock().map_err(|e| e.to_string())?;
            let mut mgr = BookmarkManager::new(a.db.connection());
            let bookmark = mgr
                .full_update(id, &request)
                .map_err(|e| bookmark_failure(method, e))?;
            to_value(&bookmark)
        }
        "bookmark.patch" => {
            let id = required_str(params, "id")?;
            let request: PartialUpdateRequest = parse_params(params)?;
            let a = app.lock().map_err(|e| e.to_string())?;
            let mut mgr = BookmarkManager::new(a.db.connection());
            let bookmark = mgr
                .partial_update(id, &request)
                .map_err(|e| bookmark_failure(method, e))?;
            to_value(&bookmark)
        }
        "bookmark.by_action" => {
            let action = required_str(params, "action")?;
            let a = app.lock().map_err(|e| e.to_string())?;
            let (limit, offset) = page_params(&a, params);
            let mgr = BookmarkManager::new(a.db.connection());
            let page = mgr
                .list_by_action(action, limit, offset)
                .map_err(|e| bookmark_failure(method, e))?;
            to_value(&page)
        }
        "bookmark.triage" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let (limit, offset) = page_params(&a, params);
            let mgr = BookmarkManager::new(a.db.connection());
            let page = mgr
                .list_triage_queue(limit, offset)
                .map_err(|e| bookmark_failure(method, e))?;
            to_value(&page)
        }

        // ─── Projects ───
        "project.get" => {
            let id = required_str(params, "id")?;
            let a = app.lock().map_err(|e| e.to_string())?;
            let mgr = ProjectManager::new(a.db.connection());
            let project = mgr.get_project(id).map_err(|e| project_failure(method, e))?;
            to_value(&project)
        }
        "project.list_active" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let mgr = ProjectManager::new(a.db.connection());
            let projects = mgr
                .list_active_projects()
                .map_err(|e| project_failure(method, e))?;
            to_value(&projects)
        }
        "project.reference_collections" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let mgr = ProjectManager::new(a.db.connection());
            let collections = mgr
                .list_reference_collections()
                .map_err(|e| project_failure(method, e))?;
            to_value(&collections)
        }

        // ─── Stats ───
        "stats.summary" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let mgr = StatsManager::new(a.db.connection());
            let summary = mgr.summary().map_err(|e| stats_failure(method, e))?;
            to_value(&summary)
        }
        "stats.by_action" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let mgr = StatsManager::new(a.db.connection());
            let counts = mgr
                .counts_by_action()
                .map_err(|e| stats_failure(method, e))?;
            to_value(&counts)
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
