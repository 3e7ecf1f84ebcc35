//! Property-based tests for relative-age bucketing.
//!
//! As elapsed time grows, the age label never moves to a smaller unit.

use chrono::{Duration, TimeZone, Utc};
use linkshelf::services::derived_fields::{calculate_age_at, format_timestamp};
use proptest::prelude::*;

/// Rank of the unit in an age label: just now < m < h < d < w < mo.
fn bucket_rank(label: &str) -> u8 {
    if label == "just now" {
        0
    } else if label.ends_with("mo") {
        5
    } else if label.ends_with('w') {
        4
    } else if label.ends_with('d') {
        3
    } else if label.ends_with('h') {
        2
    } else if label.ends_with('m') {
        1
    } else {
        u8::MAX
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn age_rank_is_monotonic(a in 0i64..120_000_000, b in 0i64..120_000_000) {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let (shorter, longer) = if a <= b { (a, b) } else { (b, a) };

        let near = calculate_age_at(&format_timestamp(now - Duration::seconds(shorter)), now);
        let far = calculate_age_at(&format_timestamp(now - Duration::seconds(longer)), now);

        prop_assert!(bucket_rank(&near) != u8::MAX, "unexpected label {}", near);
        prop_assert!(bucket_rank(&far) != u8::MAX, "unexpected label {}", far);
        prop_assert!(
            bucket_rank(&near) <= bucket_rank(&far),
            "{}s -> {} but {}s -> {}", shorter, near, longer, far
        );
    }
}
