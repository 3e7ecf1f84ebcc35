//! Read-time derivations: domain, relative age, suggested action and
//! recency-based display status. Everything here is pure; functions that
//! depend on the current time have an `_at` variant taking `now` explicitly.

use chrono::{DateTime, NaiveDateTime, Utc};
use url::Url;

use crate::types::bookmark::Action;
use crate::types::project::DisplayStatus;

/// Format written for every new timestamp (RFC 3339, UTC, second precision).
pub const CANONICAL_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Format found in rows written by older versions (SQLite `CURRENT_TIMESTAMP`).
pub const LEGACY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const SHARE_DOMAINS: [&str; 2] = ["github", "stackoverflow"];
const SHARE_WORDS: [&str; 4] = ["tutorial", "guide", "share", "useful"];
const WORKING_TITLE_WORDS: [&str; 4] = ["documentation", "docs", "api", "reference"];
const WORKING_DESCRIPTION_WORDS: [&str; 2] = ["work", "project"];

/// Formats a timestamp in the canonical stored format.
pub fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.format(CANONICAL_TIMESTAMP_FORMAT).to_string()
}

/// Current time in the canonical stored format.
pub fn now_timestamp() -> String {
    format_timestamp(Utc::now())
}

/// SQL expression ordering `column` by instant rather than by text, so a
/// legacy `YYYY-MM-DD HH:MM:SS` row sorts correctly against canonical rows.
pub fn sql_instant(column: &str) -> String {
    format!("datetime({})", column)
}

/// SQL aggregate yielding the latest instant in `column`, in canonical form.
///
/// Falls back to the textual maximum when no row holds a parsable timestamp.
pub fn sql_latest(column: &str) -> String {
    format!(
        "COALESCE(strftime('{}', MAX({})), MAX({}))",
        CANONICAL_TIMESTAMP_FORMAT,
        sql_instant(column),
        column
    )
}

/// Parses either an RFC 3339 timestamp or the legacy `YYYY-MM-DD HH:MM:SS` form (read as UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, LEGACY_TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Returns the host of `raw`, without any port.
///
/// Empty input yields an empty string. Input that does not parse as an
/// absolute URL, or has no host, is returned unchanged.
pub fn extract_domain(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    match Url::parse(raw) {
        Ok(parsed) => parsed
            .host_str()
            .map(str::to_string)
            .unwrap_or_else(|| raw.to_string()),
        Err(_) => raw.to_string(),
    }
}

/// Relative age of `timestamp` against the current time.
pub fn calculate_age(timestamp: &str) -> String {
    calculate_age_at(timestamp, Utc::now())
}

/// Relative age of `timestamp` against `now`: `just now`, `{n}m`, `{n}h`,
/// `{n}d`, `{n}w` or `{n}mo`. Unparsable input yields `unknown`.
pub fn calculate_age_at(timestamp: &str, now: DateTime<Utc>) -> String {
    let Some(then) = parse_timestamp(timestamp) else {
        return "unknown".to_string();
    };
    let elapsed = now.signed_duration_since(then);

    let minutes = elapsed.num_minutes();
    if minutes < 1 {
        return "just now".to_string();
    }
    if minutes < 60 {
        return format!("{}m", minutes);
    }
    let hours = elapsed.num_hours();
    if hours < 24 {
        return format!("{}h", hours);
    }
    let days = elapsed.num_days();
    if days < 7 {
        return format!("{}d", days);
    }
    let weeks = days / 7;
    if weeks < 4 {
        return format!("{}w", weeks);
    }
    // 28 and 29 days are past the week bucket but short of a 30-day month
    let months = (days / 30).max(1);
    format!("{}mo", months)
}

/// Heuristic, non-binding action for a bookmark. First matching rule wins.
pub fn suggest_action(domain: &str, title: &str, description: &str) -> Action {
    let domain = domain.to_lowercase();
    let title = title.to_lowercase();
    let description = description.to_lowercase();

    let share = SHARE_DOMAINS.iter().any(|d| domain.contains(d))
        || SHARE_WORDS
            .iter()
            .any(|w| title.contains(w) || description.contains(w));
    if share {
        return Action::Share;
    }

    let working = WORKING_TITLE_WORDS.iter().any(|w| title.contains(w))
        || WORKING_DESCRIPTION_WORDS.iter().any(|w| description.contains(w));
    if working {
        return Action::Working;
    }

    Action::ReadLater
}

/// Whole days elapsed since `timestamp`, or `None` if it does not parse.
pub fn days_since(timestamp: &str, now: DateTime<Utc>) -> Option<i64> {
    parse_timestamp(timestamp).map(|then| now.signed_duration_since(then).num_days())
}

/// Display status for a last-activity timestamp. Unparsable timestamps are inactive.
pub fn display_status_at(last_activity: &str, now: DateTime<Utc>) -> DisplayStatus {
    match days_since(last_activity, now) {
        Some(days) => DisplayStatus::from_days(days),
        None => DisplayStatus::Inactive,
    }
}
