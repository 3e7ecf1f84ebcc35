//! Unit tests for read-time field derivation: domain, age, suggested action
//! and display status.

use chrono::{DateTime, Duration, TimeZone, Utc};
use linkshelf::services::derived_fields::{
    calculate_age_at, display_status_at, extract_domain, format_timestamp, suggest_action,
};
use linkshelf::types::bookmark::Action;
use linkshelf::types::project::DisplayStatus;
use rstest::rstest;

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

fn ago(d: Duration) -> String {
    format_timestamp(fixed_now() - d)
}

// ---------------------------------------------------------------------------
// Domain extraction
// ---------------------------------------------------------------------------

#[rstest]
#[case("", "")]
#[case("not a url", "not a url")]
#[case("https://golang.org", "golang.org")]
#[case("https://github.com/rust-lang/rust?tab=readme", "github.com")]
#[case("http://localhost:8080/api", "localhost")]
#[case("https://Docs.RS/serde", "docs.rs")]
#[case("mailto:someone@example.com", "mailto:someone@example.com")]
fn test_extract_domain(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(extract_domain(input), expected);
}

// ---------------------------------------------------------------------------
// Relative age buckets
// ---------------------------------------------------------------------------

#[rstest]
#[case(Duration::seconds(0), "just now")]
#[case(Duration::seconds(59), "just now")]
#[case(Duration::minutes(1), "1m")]
#[case(Duration::minutes(59), "59m")]
#[case(Duration::minutes(60), "1h")]
#[case(Duration::hours(23), "23h")]
#[case(Duration::hours(24), "1d")]
#[case(Duration::days(6), "6d")]
#[case(Duration::days(7), "1w")]
#[case(Duration::days(27), "3w")]
#[case(Duration::days(28), "1mo")]
#[case(Duration::days(65), "2mo")]
#[case(Duration::days(400), "13mo")]
fn test_age_buckets(#[case] elapsed: Duration, #[case] expected: &str) {
    assert_eq!(calculate_age_at(&ago(elapsed), fixed_now()), expected);
}

#[test]
fn test_age_accepts_legacy_format() {
    assert_eq!(calculate_age_at("2024-06-15 09:00:00", fixed_now()), "3h");
}

#[test]
fn test_age_of_garbage_is_unknown() {
    assert_eq!(calculate_age_at("", fixed_now()), "unknown");
    assert_eq!(calculate_age_at("15/06/2024", fixed_now()), "unknown");
}

// ---------------------------------------------------------------------------
// Suggested action
// ---------------------------------------------------------------------------

#[rstest]
#[case("github.com", "Some repo", "", Action::Share)]
#[case("stackoverflow.com", "Question", "", Action::Share)]
#[case("example.com", "A Rust Tutorial", "", Action::Share)]
#[case("example.com", "Post", "really USEFUL trick", Action::Share)]
#[case("example.com", "API Reference", "", Action::Working)]
#[case("example.com", "Blog", "notes for my project", Action::Working)]
#[case("docs.rs", "Docs for serde", "a guide", Action::Share)]
#[case("example.com", "Evening reading", "", Action::ReadLater)]
fn test_suggest_action(
    #[case] domain: &str,
    #[case] title: &str,
    #[case] description: &str,
    #[case] expected: Action,
) {
    assert_eq!(suggest_action(domain, title, description), expected);
}

/// Description keywords for "working" do not apply to the title.
#[test]
fn test_work_in_title_alone_is_not_working() {
    assert_eq!(suggest_action("example.com", "Homework", ""), Action::ReadLater);
}

// ---------------------------------------------------------------------------
// Display status
// ---------------------------------------------------------------------------

#[rstest]
#[case(Duration::days(0), DisplayStatus::Active)]
#[case(Duration::days(7), DisplayStatus::Active)]
#[case(Duration::days(8), DisplayStatus::Stale)]
#[case(Duration::days(30), DisplayStatus::Stale)]
#[case(Duration::days(31), DisplayStatus::Inactive)]
fn test_display_status(#[case] elapsed: Duration, #[case] expected: DisplayStatus) {
    assert_eq!(display_status_at(&ago(elapsed), fixed_now()), expected);
}

#[test]
fn test_unparsable_activity_is_inactive() {
    assert_eq!(display_status_at("never", fixed_now()), DisplayStatus::Inactive);
}
