use std::cmp::Ordering;

use itertools::Itertools;
use semver_constraint::{Version, compare, version};
use simple_test_case::test_case;

#[test_case("1.0.0", "2.0.0", Ordering::Less; "less")]
#[test_case("1.0.0-alpha", "1.0.0", Ordering::Less; "pre_release_lower")]
#[test_case("1.2.3+build1", "1.2.3+build2", Ordering::Equal; "build_ignored")]
#[test_case("1.10.0", "1.9.0", Ordering::Greater; "numeric_fields")]
#[test]
fn compare_text(a: &str, b: &str, expected: Ordering) {
    pretty_assertions::assert_eq!(compare::compare(a, b), Ok(expected));
    pretty_assertions::assert_eq!(compare::less_than(a, b), Ok(expected.is_lt()));
    pretty_assertions::assert_eq!(compare::less_than_or_equal(a, b), Ok(expected.is_le()));
    pretty_assertions::assert_eq!(compare::greater_than(a, b), Ok(expected.is_gt()));
    pretty_assertions::assert_eq!(compare::greater_than_or_equal(a, b), Ok(expected.is_ge()));
    pretty_assertions::assert_eq!(compare::equal(a, b), Ok(expected.is_eq()));
    pretty_assertions::assert_eq!(compare::not_equal(a, b), Ok(expected.is_ne()));
}

#[test]
fn compare_versions() {
    let a = version!(1, 2, 3);
    let b = version!(parse => "1.2.3-rc.1");
    pretty_assertions::assert_eq!(compare::greater_than(&a, &b), Ok(true));
    pretty_assertions::assert_eq!(compare::equal(&a, "1.2.3+meta"), Ok(true));
}

#[test]
fn compare_invalid() {
    assert!(compare::equal("1.2.3", "1.2").is_err());
    assert!(compare::compare("", "1.2.3").is_err());
}

const UNSORTED: [&str; 7] = [
    "1.0.0",
    "1.0.0-beta.11",
    "0.9.9",
    "1.0.0-alpha",
    "1.0.0-beta.2",
    "2.0.0",
    "1.0.0-alpha.1",
];

const SORTED: [&str; 7] = [
    "0.9.9",
    "1.0.0-alpha",
    "1.0.0-alpha.1",
    "1.0.0-beta.2",
    "1.0.0-beta.11",
    "1.0.0",
    "2.0.0",
];

#[test]
fn sort_text() {
    pretty_assertions::assert_eq!(compare::sort(UNSORTED).expect("must sort"), SORTED);
}

#[test]
fn rsort_text() {
    let expected = SORTED.iter().rev().copied().collect_vec();
    pretty_assertions::assert_eq!(compare::rsort(UNSORTED).expect("must sort"), expected);
}

#[test]
fn sort_then_rsort_reverses() {
    let sorted = compare::sort(UNSORTED).expect("must sort");
    let mut reversed = compare::rsort(sorted.clone()).expect("must sort");
    reversed.reverse();
    pretty_assertions::assert_eq!(reversed, sorted);
}

#[test]
fn sort_versions() {
    let versions = UNSORTED.map(|v| version!(parse => v)).to_vec();
    let sorted = compare::sort(versions.clone()).expect("must sort");
    pretty_assertions::assert_eq!(sorted.iter().map(Version::to_string).collect_vec(), SORTED);

    let borrowed = compare::sort(&versions).expect("must sort");
    pretty_assertions::assert_eq!(borrowed.first().map(|v| v.to_string()).as_deref(), Some("0.9.9"));
}

#[test]
fn sort_owned_strings() {
    let input = vec![String::from("1.1.0"), String::from("1.0.0")];
    pretty_assertions::assert_eq!(compare::sort(input).expect("must sort"), ["1.0.0", "1.1.0"]);
}

#[test]
fn sort_invalid() {
    assert!(compare::sort(["1.0.0", "1.0"]).is_err());
    assert!(compare::rsort(["nope"]).is_err());
}

#[test]
fn satisfies() {
    pretty_assertions::assert_eq!(compare::satisfies("1.2.3", "^1.2.0"), Ok(true));
    pretty_assertions::assert_eq!(compare::satisfies(&version!(2, 0, 0), "^1.2.0"), Ok(false));
    assert!(compare::satisfies("1.2.3", "^^1").is_err());
}
