//! Unit tests for the StatsManager summary and per-action rollups.

use chrono::{DateTime, Duration, TimeZone, Utc};
use linkshelf::database::Database;
use linkshelf::managers::bookmark_manager::{BookmarkManager, BookmarkManagerTrait};
use linkshelf::managers::stats_manager::{StatsManager, StatsManagerTrait, PROJECT_STATS_LIMIT};
use linkshelf::services::derived_fields::format_timestamp;
use linkshelf::types::bookmark::CreateBookmarkRequest;
use linkshelf::types::project::DisplayStatus;
use linkshelf::types::stats::ActionCount;
use rusqlite::params;

fn setup() -> Database {
    Database::open_in_memory().expect("Failed to open in-memory database")
}

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

fn insert_row(db: &Database, id: &str, action: Option<&str>, topic: Option<&str>, days_ago: i64) {
    let ts = format_timestamp(fixed_now() - Duration::days(days_ago));
    db.connection()
        .execute(
            "INSERT INTO bookmarks (id, url, title, action, topic, timestamp) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![id, format!("https://{}.io", id), id, action, topic, ts],
        )
        .unwrap();
}

#[test]
fn test_summary_of_empty_store() {
    let db = setup();
    let summary = StatsManager::new(db.connection()).summary().unwrap();
    assert_eq!(summary.total_bookmarks, 0);
    assert_eq!(summary.needs_triage, 0);
    assert_eq!(summary.active_projects, 0);
    assert!(summary.project_stats.is_empty());
}

/// A single working bookmark with a topic shows up as one active project.
#[test]
fn test_summary_after_single_working_bookmark() {
    let db = setup();
    BookmarkManager::new(db.connection())
        .create_bookmark(&CreateBookmarkRequest {
            url: "https://golang.org".to_string(),
            title: "Go".to_string(),
            action: Some("working".to_string()),
            topic: Some("Programming".to_string()),
            ..Default::default()
        })
        .unwrap();

    let summary = StatsManager::new(db.connection()).summary().unwrap();
    assert_eq!(summary.total_bookmarks, 1);
    assert_eq!(summary.active_projects, 1);
    assert_eq!(summary.needs_triage, 0);
    assert_eq!(summary.project_stats.len(), 1);
    let stat = &summary.project_stats[0];
    assert_eq!(stat.topic, "Programming");
    assert_eq!(stat.count, 1);
    assert_eq!(stat.status, DisplayStatus::Active);
}

#[test]
fn test_summary_category_counts() {
    let db = setup();
    insert_row(&db, "t1", None, None, 0);
    insert_row(&db, "t2", Some(""), None, 0);
    insert_row(&db, "t3", Some("read-later"), None, 0);
    insert_row(&db, "w1", Some("working"), Some("Api"), 0);
    insert_row(&db, "w2", Some("working"), Some("Api"), 1);
    insert_row(&db, "w3", Some("working"), Some("Site"), 2);
    insert_row(&db, "w4", Some("working"), None, 2);
    insert_row(&db, "s1", Some("share"), None, 0);
    insert_row(&db, "a1", Some("archived"), None, 0);
    insert_row(&db, "i1", Some("irrelevant"), None, 0);

    let summary = StatsManager::new(db.connection()).summary_at(fixed_now()).unwrap();
    assert_eq!(summary.total_bookmarks, 10);
    assert_eq!(summary.needs_triage, 3);
    assert_eq!(summary.active_projects, 2);
    assert_eq!(summary.ready_to_share, 1);
    assert_eq!(summary.archived, 1);

    let topics: Vec<(&str, i64)> = summary
        .project_stats
        .iter()
        .map(|p| (p.topic.as_str(), p.count))
        .collect();
    assert_eq!(topics, vec![("Api", 2), ("Site", 1)]);
}

#[test]
fn test_project_stats_ordered_by_recency_and_capped() {
    let db = setup();
    for i in 0..12 {
        insert_row(&db, &format!("w{}", i), Some("working"), Some(&format!("T{}", i)), i * 3);
    }

    let summary = StatsManager::new(db.connection()).summary_at(fixed_now()).unwrap();
    assert_eq!(summary.active_projects, 12);
    assert_eq!(summary.project_stats.len() as i64, PROJECT_STATS_LIMIT);
    assert_eq!(summary.project_stats[0].topic, "T0");
    assert_eq!(summary.project_stats[0].status, DisplayStatus::Active);
    assert_eq!(summary.project_stats[3].status, DisplayStatus::Stale);
    assert_eq!(summary.project_stats[9].topic, "T9");
}

#[test]
fn test_counts_by_action_folds_blank_into_read_later() {
    let db = setup();
    insert_row(&db, "a", None, None, 0);
    insert_row(&db, "b", Some(""), None, 0);
    insert_row(&db, "c", Some("read-later"), None, 0);
    insert_row(&db, "d", Some("share"), None, 0);
    insert_row(&db, "e", Some("share"), None, 0);
    insert_row(&db, "f", Some("custom-label"), None, 0);

    let counts = StatsManager::new(db.connection()).counts_by_action().unwrap();
    assert_eq!(
        counts,
        vec![
            ActionCount { action: "read-later".to_string(), count: 3 },
            ActionCount { action: "share".to_string(), count: 2 },
            ActionCount { action: "custom-label".to_string(), count: 1 },
        ]
    );
}

#[test]
fn test_project_stats_rank_mixed_timestamp_formats_by_instant() {
    let db = setup();
    db.connection()
        .execute_batch(
            "INSERT INTO bookmarks (id, url, title, action, topic, timestamp)
                 VALUES ('l', 'https://l.io', 'L', 'working', 'Legacy', '2024-06-15 09:00:00');
             INSERT INTO bookmarks (id, url, title, action, topic, timestamp)
                 VALUES ('c', 'https://c.io', 'C', 'working', 'Canonical', '2024-06-15T08:00:00Z');",
        )
        .unwrap();

    let summary = StatsManager::new(db.connection()).summary_at(fixed_now()).unwrap();
    let topics: Vec<(&str, &str)> = summary
        .project_stats
        .iter()
        .map(|s| (s.topic.as_str(), s.last_updated.as_str()))
        .collect();
    assert_eq!(
        topics,
        vec![
            ("Legacy", "2024-06-15T09:00:00Z"),
            ("Canonical", "2024-06-15T08:00:00Z"),
        ]
    );
}
