//! Grammar for constraint text.
//!
//! A constraint is split on `|` into groups before it reaches this module;
//! each group is a sequence of items, which are either hyphen ranges
//! (`1.2 - 2.x`) or an optional operator followed by a version descriptor
//! (`>=1.2.3`, `^1`, `~> 2.1`, `1.x`). Items may be separated by whitespace
//! or written back to back (`>=1.0.0<2.0.0`).

use compact_str::CompactString;
use nom::{
    Finish, IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, digit0, multispace0, multispace1, one_of, satisfy},
    combinator::{all_consuming, map, map_res, not, opt, recognize},
    multi::{many1, separated_list1},
    sequence::{pair, preceded, terminated},
};

use crate::{Comparator, Error, Field, Op, Operator, ParseError, Range, VersionDescriptor};

/// A single item of a constraint group, before resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Item<'a> {
    /// `start - end`
    Hyphen(VersionDescriptor, VersionDescriptor),

    /// An operator, which may be empty, and the version it applies to.
    Condition(&'a str, VersionDescriptor),
}

impl Item<'_> {
    /// Resolve the item into a comparator.
    /// `input` is the full constraint text, used for error reporting.
    pub(crate) fn resolve(self, input: &str) -> Result<Comparator, Error> {
        match self {
            Item::Hyphen(start, end) => {
                let start = start.to_comparator(Op::GreaterOrEqual)?;
                let end = end.to_comparator(Op::LessOrEqual)?;
                Ok(Range::new(start, end, Op::Equal).into())
            }
            Item::Condition(operator, descriptor) => {
                let operator = Operator::parse_in(operator, input)?;
                descriptor.resolve(operator)
            }
        }
    }
}

/// Parse a non-empty constraint group.
///
/// On failure, returns the unparsed remainder of `input`.
pub(crate) fn group(input: &str) -> Result<Vec<Item<'_>>, &str> {
    all_consuming(many1(alt((hyphen, condition))))
        .parse(input)
        .finish()
        .map(|(_, items)| items)
        .map_err(|err| err.input)
}

/// Parse a standalone descriptor, optionally prefixed with `v`.
pub(crate) fn descriptor(input: &str) -> Result<VersionDescriptor, Error> {
    let leading = input.len() - input.trim_start().len();
    let trimmed = input.trim();
    all_consuming(preceded(opt(char('v')), xrange))
        .parse(trimmed)
        .finish()
        .map(|(_, descriptor)| descriptor)
        .map_err(|err| {
            ParseError::Constraint {
                input: input.to_string(),
                span: (leading + trimmed.len() - err.input.len(), err.input.len()).into(),
            }
            .into()
        })
}

fn hyphen(input: &str) -> IResult<&str, Item<'_>> {
    map(
        (
            multispace0,
            opt(char('v')),
            xrange,
            multispace1,
            char('-'),
            multispace1,
            opt(char('v')),
            xrange,
            multispace0,
        ),
        |(_, _, start, _, _, _, _, end, _)| Item::Hyphen(start, end),
    )
    .parse(input)
}

fn condition(input: &str) -> IResult<&str, Item<'_>> {
    map(
        (
            multispace0,
            operator,
            multispace0,
            opt(char('v')),
            xrange,
            multispace0,
        ),
        |(_, operator, _, _, descriptor, _)| Item::Condition(operator, descriptor),
    )
    .parse(input)
}

/// Operators are validated during resolution so that unknown ones,
/// like `==`, are reported as such rather than as a syntax error.
fn operator(input: &str) -> IResult<&str, &str> {
    take_while(|c: char| "<>=!~^".contains(c)).parse(input)
}

/// A version with optional wildcards, like `1.x` or `1.2.3-beta+build`.
///
/// Must not run directly into another version field or identifier,
/// so `1.2.3.4` and `01.2.3` are rejected.
fn xrange(input: &str) -> IResult<&str, VersionDescriptor> {
    let suffixes = (
        opt(preceded(char('-'), identifiers)),
        opt(preceded(char('+'), identifiers)),
    );
    let patch = preceded(char('.'), pair(field, suffixes));
    let minor = preceded(char('.'), pair(field, opt(patch)));
    let version = pair(field, opt(minor));

    map(
        terminated(
            version,
            not(satisfy(|c: char| c.is_ascii_alphanumeric() || c == '.')),
        ),
        |(major, minor)| {
            let (minor, patch) = match minor {
                Some((minor, patch)) => (Some(minor), patch),
                None => (None, None),
            };
            let (patch, (pre_release, build_meta)) = match patch {
                Some((patch, suffixes)) => (Some(patch), suffixes),
                None => (None, (None, None)),
            };
            VersionDescriptor::builder()
                .major(major)
                .maybe_minor(minor)
                .maybe_patch(patch)
                .maybe_pre_release(pre_release.map(CompactString::from))
                .maybe_build_meta(build_meta.map(CompactString::from))
                .build()
        },
    )
    .parse(input)
}

fn field(input: &str) -> IResult<&str, Field> {
    alt((
        map(one_of("xX*"), Field::Wildcard),
        map_res(numeric, |n: &str| n.parse().map(Field::Number)),
    ))
    .parse(input)
}

fn numeric(input: &str) -> IResult<&str, &str> {
    alt((tag("0"), recognize(pair(one_of("123456789"), digit0)))).parse(input)
}

fn identifiers(input: &str) -> IResult<&str, &str> {
    recognize(separated_list1(
        char('.'),
        take_while1(|c: char| c.is_ascii_alphanumeric() || c == '-'),
    ))
    .parse(input)
}
