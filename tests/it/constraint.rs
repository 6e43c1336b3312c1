use semver_constraint::{Comparator, Constraint, Error, Op, ParseError, Version, constraint, version};
use simple_test_case::test_case;

#[test_case("1.2.3", "^1.2.0", true; "caret_inside")]
#[test_case("2.0.0", "^1.2.0", false; "caret_above")]
#[test_case("1.2.5", "~1.2.0", true; "tilde_inside")]
#[test_case("1.3.0", "~1.2.0", false; "tilde_above")]
#[test_case("1.5.0", "1.2.3 - 2.0.0", true; "hyphen_inside")]
#[test_case("2.0.0", "1.2.3 - 2.0.0", true; "hyphen_inclusive_end")]
#[test_case("2.0.1", "1.2.3 - 2.0.0", false; "hyphen_above")]
#[test_case("2.3.9", "1.2.3 - 2.3", true; "hyphen_partial_end")]
#[test_case("2.4.0-alpha", "1.2.3 - 2.3", false; "hyphen_partial_end_pre_release")]
#[test_case("0.9.0", ">=1.0.0 || <0.5.0", false; "or_neither")]
#[test_case("0.4.0", ">=1.0.0 || <0.5.0", true; "or_second")]
#[test_case("1.0.0", ">=1.0.0 || <0.5.0", true; "or_first")]
#[test_case("1.2.9", "1.2.x", true; "wildcard_inside")]
#[test_case("1.3.0-alpha", "1.2.x", false; "wildcard_excludes_next_pre_release")]
#[test_case("1.3.0", ">1.2.x", true; "greater_wildcard")]
#[test_case("1.2.9", ">1.2.x", false; "greater_wildcard_inside")]
#[test_case("1.1.0", "<1.2.x", true; "less_wildcard")]
#[test_case("1.2.0", "<1.2.x", false; "less_wildcard_inside")]
#[test_case("1.2.5", "!=1.2.*", false; "not_equal_wildcard_inside")]
#[test_case("1.4.0", "!=1.2.*", true; "not_equal_wildcard_outside")]
#[test_case("1.2.5", "<=1.2", true; "less_or_equal_partial")]
#[test_case("1.3.0", "=<1.2", false; "less_or_equal_alias")]
#[test_case("1.2.0", "=>1.2", true; "greater_or_equal_alias")]
#[test_case("5.0.0", "*", true; "any")]
#[test_case("5.0.0", ">*", false; "greater_any")]
#[test_case("0.2.5", "^0.2.3", true; "caret_zero_major")]
#[test_case("0.3.0", "^0.2.3", false; "caret_zero_major_above")]
#[test_case("0.0.4", "^0.0.3", false; "caret_zero_minor")]
#[test_case("0.9.0", "^0.x", true; "caret_zero_wildcard")]
#[test_case("1.9.0", "~>1.2", false; "tilde_gem_spelling")]
#[test_case("1.5.0", ">=1.2.0<2.0.0", true; "adjacent")]
#[test_case("1.5.0", "v1.5.0", true; "prefixed")]
#[test_case("1.5.0+build", "=1.5.0+other", true; "build_ignored")]
#[test_case("1.2.4", "1.2.3 | 1.2.4", true; "single_pipe")]
#[test]
fn satisfies(version: &str, constraint: &str, expected: bool) {
    let satisfied = Version::satisfies(version, constraint).expect("must parse");
    pretty_assertions::assert_eq!(satisfied, expected, "'{version}' satisfies '{constraint}'");
}

#[test_case(""; "empty")]
#[test_case("  "; "whitespace")]
#[test]
fn empty_matches_everything(input: &str) {
    let parsed = Constraint::parse(input).expect("must parse");
    pretty_assertions::assert_eq!(&parsed, Constraint::any());
    assert!(parsed.is_satisfied_by(&version!(999, 0, 0)));
    assert!(parsed.is_satisfied_by(Version::min()));
}

#[test_case("||"; "only_separators")]
#[test_case(">=1.0.0 foo"; "trailing_text")]
#[test_case("1.2.3 -"; "dangling_hyphen")]
#[test_case("1.2.3.4"; "four_fields")]
#[test_case("01.2.3"; "leading_zero")]
#[test_case("1.2-beta"; "pre_release_without_patch")]
#[test_case("^1.0.0-alpha.01"; "invalid_pre_release")]
#[test_case("==1.0.0"; "double_equal")]
#[test_case("~^1.0.0"; "mixed_operators")]
#[test]
fn parse_invalid(input: &str) {
    assert!(Constraint::parse(input).is_err(), "'{input}' must not parse");
    pretty_assertions::assert_eq!(Constraint::parse_or_none(input), None);
}

#[test]
fn invalid_operator_reported() {
    let err = Constraint::parse(">=1.0.0 || ==2.0.0").expect_err("must not parse");
    let Error::Parse(ParseError::Operator { operator, .. }) = &err else {
        panic!("unexpected error: {err:?}");
    };
    pretty_assertions::assert_eq!(operator, "==");
}

#[test]
fn groups() {
    let parsed = constraint!(">=1.0.0 <2 || ^3");
    let sizes = parsed.groups().iter().map(Vec::len).collect::<Vec<_>>();
    pretty_assertions::assert_eq!(sizes, [2, 1]);

    let Comparator::Condition(condition) = &parsed.groups()[0][0] else {
        panic!("expected a condition: {parsed:?}");
    };
    pretty_assertions::assert_eq!(condition.op(), Op::GreaterOrEqual);
    pretty_assertions::assert_eq!(condition.version(), &version!(1, 0, 0));
}

#[test_case("^1.2.3", ">=1.2.3 <2.0.0-0"; "caret")]
#[test_case("~1.2", ">=1.2.0 <1.3.0-0"; "tilde")]
#[test_case("1.x || >=2.5.0 <3", ">=1.0.0 <2.0.0-0 || >=2.5.0 <3.0.0"; "alternatives")]
#[test_case("1.2.x - 2", ">=1.2.0 <3.0.0-0"; "hyphen_wildcards")]
#[test_case("<=1.2", "<1.3.0-0"; "less_or_equal_partial")]
#[test_case(">1.2", ">=1.3.0-0"; "greater_partial")]
#[test]
fn render(input: &str, expected: &str) {
    pretty_assertions::assert_eq!(constraint!(input).to_string(), expected);
}

const PROBES: [&str; 14] = [
    "0.0.0",
    "0.1.0",
    "0.2.3",
    "0.3.0-0",
    "1.0.0-alpha",
    "1.0.0",
    "1.2.0",
    "1.2.3",
    "1.2.9",
    "1.3.0-0",
    "1.3.0",
    "2.0.0",
    "2.3.5",
    "3.0.0",
];

#[test_case("1.2.3"; "exact")]
#[test_case(">1.2.3"; "greater")]
#[test_case("<=1.2.3"; "less_or_equal")]
#[test_case("~1.2"; "tilde")]
#[test_case("^0.2.3"; "caret")]
#[test_case("1.2.x"; "wildcard")]
#[test_case("!=1.2.x"; "not_equal_wildcard")]
#[test_case(">1.x"; "greater_wildcard")]
#[test_case("<1.x"; "less_wildcard")]
#[test_case("<=1.2"; "less_or_equal_wildcard")]
#[test_case(">=1.2"; "greater_or_equal_wildcard")]
#[test_case("1.x - 2.x"; "hyphen_wildcards")]
#[test_case("*"; "any")]
#[test_case("<*"; "none")]
#[test]
fn opposite_negates(input: &str) {
    let parsed = constraint!(input);
    let [group] = parsed.groups() else {
        panic!("expected a single group: {parsed:?}");
    };
    let [comparator] = group.as_slice() else {
        panic!("expected a single comparator: {parsed:?}");
    };

    let opposite = Constraint::parse(comparator.opposite()).expect("opposite must parse");
    for probe in PROBES {
        let version = version!(parse => probe);
        pretty_assertions::assert_eq!(
            comparator.is_satisfied_by(&version),
            !opposite.is_satisfied_by(&version),
            "'{version}' against '{comparator}' and its opposite '{opposite}'"
        );
    }
}

#[test]
fn rendered_text_reparses() {
    for input in ["!=1.2.x >1.0.0 || ^2", "1.x - 2.3.4 <2.0.0", "~0.0.1 !=0.0.x"] {
        let parsed = constraint!(input);
        let reparsed = constraint!(parsed.to_string());
        for probe in PROBES {
            let version = version!(parse => probe);
            pretty_assertions::assert_eq!(
                parsed.is_satisfied_by(&version),
                reparsed.is_satisfied_by(&version),
                "'{version}' against '{parsed}'"
            );
        }
    }
}

#[test]
fn is_satisfying() {
    let constraint = constraint!(">=1.0.0");
    assert!(version!(1, 0, 0).is_satisfying(&constraint));
    assert!(!version!(parse => "1.0.0-rc.1").is_satisfying(&constraint));
}

#[test_case("^18446744073709551615.0.0"; "caret")]
#[test_case("18446744073709551615.x"; "wildcard_minor")]
#[test_case("~1.18446744073709551615.0"; "tilde")]
#[test_case("1.18446744073709551615"; "wildcard_patch")]
#[test]
fn upper_bound_overflow(input: &str) {
    let err = Constraint::parse(input).expect_err("must not parse");
    assert!(matches!(err, Error::Overflow { .. }), "unexpected error: {err:?}");
    assert!(Version::satisfies("18446744073709551615.0.0", input).is_err());
}
