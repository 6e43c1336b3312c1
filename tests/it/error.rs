use std::{error::Error as StdError, str::FromStr};

use assert_matches::assert_matches;
use color_eyre::{Result, eyre::Context};
use impls::impls;
use miette::Diagnostic;
use semver_constraint::{Constraint, Error, ParseError, ParseMode, PreRelease, Version, version};
use static_assertions::const_assert;

#[test]
fn trait_bounds() {
    const_assert!(impls!(Version: FromStr & Send & Sync));
    const_assert!(impls!(PreRelease: FromStr & Send & Sync));
    const_assert!(impls!(Constraint: FromStr & Send & Sync));
    const_assert!(impls!(Error: StdError & Diagnostic & Send & Sync));
}

#[test]
fn error_wrappable_context() -> Result<()> {
    let parsed = Version::parse("1.2.3").context("can wrap")?;
    pretty_assertions::assert_eq!(parsed, version!(1, 2, 3));

    let parsed = Constraint::parse("^1.2").context("can wrap")?;
    assert!(parsed.is_satisfied_by(&version!(1, 5, 0)));

    Ok(())
}

#[test]
fn error_wrappable_withcontext() -> Result<()> {
    let parsed = PreRelease::parse("rc.1").with_context(|| "can wrap")?;
    pretty_assertions::assert_eq!(parsed.to_string(), "rc.1");

    Ok(())
}

#[test]
fn error_context_preserves_message() {
    let err = Version::parse("1.2")
        .context("parse version")
        .expect_err("must not parse");
    pretty_assertions::assert_eq!(
        format!("{err:#}"),
        "parse version: invalid version '1.2': not a strict semantic version"
    );
}

#[test]
fn empty_input() {
    assert_matches!(Version::parse(""), Err(Error::Parse(ParseError::Empty)));
    assert_matches!(
        Version::parse_with(" ", ParseMode::Loose),
        Err(Error::Parse(ParseError::Empty))
    );
}

#[test]
fn version_error_reports_mode() {
    let err = Version::parse_with("x", ParseMode::Loose).expect_err("must not parse");
    assert_matches!(
        err,
        Error::Parse(ParseError::Version {
            mode: ParseMode::Loose,
            ..
        })
    );
    pretty_assertions::assert_eq!(err.to_string(), "invalid version 'x': not a loose semantic version");
}

#[test]
fn constraint_error_has_span() {
    let err = Constraint::parse("^1.0.0 foo").expect_err("must not parse");
    let Error::Parse(ParseError::Constraint { span, .. }) = &err else {
        panic!("unexpected error: {err:?}");
    };
    pretty_assertions::assert_eq!((span.offset(), span.len()), (7, 3));
    pretty_assertions::assert_eq!(err.to_string(), "invalid constraint '^1.0.0 foo'");
}
