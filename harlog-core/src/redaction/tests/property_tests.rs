use crate::har::NameValue;
use crate::redaction::{REDACTED, RedactionConfig};
use proptest::collection::vec;
use proptest::prelude::*;

/// Plain tokens plus the dotted and bracketed shapes query and form names take.
/// The small alphabet makes leaf and prefix collisions between names likely.
fn field_name() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z][a-zA-Z0-9_-]{0,8}",
        "[a-c]{1,2}",
        "[a-c]{1,2}\\.[a-c]{1,2}",
        "[a-c]{1,2}\\[[a-c0-9]{0,2}\\]",
        "[a-c]{1,2}\\[[a-c]\\]\\.[a-c]",
    ]
}

fn fields() -> impl Strategy<Value = Vec<NameValue>> {
    vec((field_name(), "[a-z0-9]{0,6}"), 0..12)
        .prop_map(|pairs| pairs.into_iter().map(|(n, v)| NameValue::new(n, v)).collect())
}

proptest! {
    #[test]
    fn allow_list_makes_deny_list_irrelevant(
        input in fields(),
        allow in vec(field_name(), 1..5),
        deny in vec(field_name(), 0..5),
    ) {
        let with_deny = RedactionConfig::new(deny, allow.clone()).filter().filter(input.clone());
        let without_deny = RedactionConfig::allow(allow.clone()).filter().filter(input.clone());

        prop_assert_eq!(&with_deny, &without_deny);
        for (before, after) in input.iter().zip(&with_deny) {
            if allow.contains(&before.name) {
                prop_assert_eq!(&after.value, &before.value);
            } else {
                prop_assert_eq!(after.value.as_str(), REDACTED);
            }
        }
    }

    #[test]
    fn deny_list_redacts_exactly_its_members(
        input in fields(),
        deny in vec(field_name(), 0..5),
    ) {
        let out = RedactionConfig::deny(deny.clone()).filter().filter(input.clone());

        for (before, after) in input.iter().zip(&out) {
            if deny.contains(&before.name) {
                prop_assert_eq!(after.value.as_str(), REDACTED);
            } else {
                prop_assert_eq!(&after.value, &before.value);
            }
        }
    }

    #[test]
    fn filtering_preserves_count_order_and_names(
        input in fields(),
        allow in vec(field_name(), 0..3),
        deny in vec(field_name(), 0..3),
    ) {
        let out = RedactionConfig::new(deny, allow).filter().filter(input.clone());

        prop_assert_eq!(out.len(), input.len());
        for (before, after) in input.iter().zip(&out) {
            prop_assert_eq!(&before.name, &after.name);
        }
    }
}
