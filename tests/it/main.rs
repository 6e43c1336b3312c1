//! Tests for the crate.

use simple_test_case::test_case;

use semver_constraint::*;

mod compare;
mod constraint;
mod error;

#[test_case(r#""1.2.3-alpha.1+b5""#; "version")]
#[test_case(r#""0.0.0""#; "min")]
#[test]
fn version_roundtrip(serialized: &str) {
    let version: Version = serde_json::from_str(serialized).expect("must deserialize");
    assert_eq!(serialized, serde_json::to_string(&version).expect("must serialize"));
}

#[test_case(r#"">=1.2.3 <2.0.0-0""#; "range")]
#[test_case(r#""=1.2.3 || >=2.0.0""#; "alternatives")]
#[test]
fn constraint_roundtrip(serialized: &str) {
    let constraint: Constraint = serde_json::from_str(serialized).expect("must deserialize");
    assert_eq!(serialized, serde_json::to_string(&constraint).expect("must serialize"));
}

#[test]
fn deserialize_invalid() {
    assert!(serde_json::from_str::<Version>(r#""1.2""#).is_err());
    assert!(serde_json::from_str::<PreRelease>(r#""alpha.01""#).is_err());
    assert!(serde_json::from_str::<Constraint>(r#""~>>1.0""#).is_err());
}

#[test_case(r#""strict""#, ParseMode::Strict; "strict")]
#[test_case(r#""loose""#, ParseMode::Loose; "loose")]
#[test]
fn parse_mode_serde(serialized: &str, mode: ParseMode) {
    assert_eq!(serde_json::from_str::<ParseMode>(serialized).expect("must deserialize"), mode);
    assert_eq!(serde_json::to_string(&mode).expect("must serialize"), serialized);
}
