//! Branch-name generation tests.

use crate::prd::services::{MAX_BRANCH_NAME_LEN, generate_branch_name};
use rstest::rstest;

#[rstest]
fn same_title_twice_yields_distinct_names() {
    let first = generate_branch_name("Add user authentication");
    let second = generate_branch_name("Add user authentication");
    assert_ne!(first, second);
}

#[rstest]
fn names_never_exceed_the_length_bound() {
    let long_title = "A very long requirements document title that keeps going \
                      well past any reasonable branch name length limit";
    let name = generate_branch_name(long_title);
    assert!(name.len() <= MAX_BRANCH_NAME_LEN, "{name} is too long");
}

#[rstest]
#[case("Add User Authentication", "add-user-authentication")]
#[case("Fix   spacing!!", "fix-spacing")]
#[case("v2.0 rollout", "v2-0-rollout")]
fn slug_is_lower_kebab(#[case] title: &str, #[case] expected_prefix: &str) {
    let name = generate_branch_name(title);
    assert!(
        name.starts_with(expected_prefix),
        "expected '{name}' to start with '{expected_prefix}'"
    );
}

#[rstest]
fn empty_title_falls_back_to_a_usable_slug() {
    let name = generate_branch_name("!!!");
    assert!(name.starts_with("prd-"), "got '{name}'");
}

#[rstest]
fn suffix_is_base36() {
    let name = generate_branch_name("Stamp check");
    let suffix = name.rsplit('-').next().unwrap_or_default();
    assert!(!suffix.is_empty());
    assert!(suffix.chars().all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit()));
}
