//! Property-based tests for the tag / custom-property codec.
//!
//! Decoding what was encoded yields the original value, with `None` and an
//! empty collection collapsing to the same empty result.

use linkshelf::services::codec::{decode_properties, decode_tags, encode_properties, encode_tags};
use linkshelf::types::bookmark::CustomProperties;
use proptest::prelude::*;

/// Tags drawn from printable text, including quotes and unicode that need escaping.
fn arb_tags() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[a-zA-Z0-9 _\\-\"'é中]{0,12}", 0..8)
}

fn arb_properties() -> impl Strategy<Value = CustomProperties> {
    proptest::collection::btree_map("[a-z][a-z0-9_]{0,8}", "[ -~]{0,16}", 0..6)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn tags_roundtrip(tags in arb_tags()) {
        let encoded = encode_tags(Some(&tags));
        let decoded = decode_tags(&encoded).expect("encoded tags must decode");
        prop_assert_eq!(decoded, tags);
    }

    #[test]
    fn absent_tags_match_empty_tags(use_none in any::<bool>()) {
        let encoded = if use_none { encode_tags(None) } else { encode_tags(Some(&[])) };
        prop_assert_eq!(encoded.as_str(), "[]");
        prop_assert!(decode_tags(&encoded).unwrap().is_empty());
    }

    #[test]
    fn properties_roundtrip(props in arb_properties()) {
        let encoded = encode_properties(Some(&props));
        let decoded = decode_properties(&encoded).expect("encoded properties must decode");
        prop_assert_eq!(decoded, props);
    }
}
