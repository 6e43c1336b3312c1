//! # Version Constraints
//!
//! This module parses textual version constraints and evaluates them against [`Version`]s.
//!
//! ## Grammar
//!
//! A constraint is a set of alternatives separated by `|` (or `||`);
//! a version satisfies the constraint if it satisfies any alternative.
//! Each alternative is a sequence of items that must all be satisfied:
//!
//! - A version with an optional operator: `1.2.3`, `=1.2.3`, `!=1.2.3`,
//!   `<1.2.3`, `<=1.2.3` (or `=<`), `>1.2.3`, `>=1.2.3` (or `=>`).
//! - An X-range, where trailing fields are wildcards (`x`, `X`, `*`) or omitted:
//!   `1.2.x` and `1.2` both mean `>=1.2.0 <1.3.0-0`.
//! - A tilde range, `~1.2.3` (or `~>1.2.3`): `>=1.2.3 <1.3.0-0`.
//! - A caret range, `^1.2.3`: `>=1.2.3 <2.0.0-0`.
//!   Caret ranges keep the left-most non-zero field,
//!   so `^0.2.3` is `>=0.2.3 <0.3.0-0` and `^0.0.3` is `>=0.0.3 <0.0.4-0`.
//! - A hyphen range, `1.2.3 - 2.3`: `>=1.2.3 <2.4.0-0`.
//!
//! Upper bounds derived from wildcards and shorthands carry the pre-release `0`,
//! which is the lowest possible pre-release, so the pre-releases of the
//! next excluded version are excluded too.
//!
//! ## Normal form
//!
//! Parsed constraints are held as a list of groups of [`Comparator`]s
//! (an OR of ANDs). A comparator is either a single [`Condition`],
//! or a [`Range`] that reinterprets a pair of bounds with an aggregate operator
//! (this is how `>1.2.x` or `!=1.2.x` are represented).

use std::{borrow::Cow, fmt, str::FromStr};

use documented::Documented;
use duplicate::duplicate;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{
    PartialSchema, ToSchema,
    openapi::{ObjectBuilder, Type},
};

use crate::{Error, ParseError, Version, error};

mod comparator;
mod descriptor;
mod op;
mod parser;

pub use comparator::*;
pub use descriptor::*;
pub use op::*;

static ANY: Lazy<Constraint> =
    Lazy::new(|| Constraint(vec![vec![Condition::greater_than_min().clone().into()]]));

/// A parsed version constraint, such as `^1.2 || >=2.1.0 <3`.
///
/// A version satisfies the constraint when it satisfies every comparator
/// in at least one group.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Documented)]
pub struct Constraint(Vec<Vec<Comparator>>);

impl Constraint {
    /// The constraint `>=0.0.0`, which every release satisfies.
    ///
    /// Parsing empty constraint text yields this constraint.
    pub fn any() -> &'static Constraint {
        &ANY
    }

    /// Parse constraint text.
    ///
    /// ```
    /// # use semver_constraint::{Constraint, version};
    /// let constraint = Constraint::parse(">=1.0.0 || <0.5.0").expect("parse");
    /// assert!(!constraint.is_satisfied_by(&version!(0, 9, 0)));
    /// assert!(constraint.is_satisfied_by(&version!(1, 0, 0)));
    /// assert!(constraint.is_satisfied_by(&version!(0, 4, 0)));
    /// ```
    #[tracing::instrument(level = "trace", skip(input), fields(input = input.as_ref()))]
    pub fn parse(input: impl AsRef<str>) -> Result<Self, Error> {
        let input = input.as_ref();
        if input.trim().is_empty() {
            return Ok(Self::any().clone());
        }

        let mut groups = Vec::new();
        let mut offset = 0;
        for group in input.split('|') {
            let start = offset;
            offset += group.len() + 1;
            if group.trim().is_empty() {
                continue;
            }

            let items = parser::group(group).map_err(|rest| ParseError::Constraint {
                input: input.to_string(),
                span: (start + group.len() - rest.len(), rest.len()).into(),
            })?;
            let comparators = items
                .into_iter()
                .map(|item| item.resolve(input))
                .collect::<Result<Vec<_>, _>>()?;

            tracing::trace!(group, comparators = comparators.len(), "parsed constraint group");
            groups.push(comparators);
        }

        if groups.is_empty() {
            error::fatal!(ParseError::Constraint {
                input: input.to_string(),
                span: (0, input.len()).into(),
            });
        }
        Ok(Self(groups))
    }

    /// Parse constraint text, discarding any error.
    pub fn parse_or_none(input: impl AsRef<str>) -> Option<Self> {
        Self::parse(input)
            .inspect_err(|error| tracing::debug!(%error, "discarding invalid constraint"))
            .ok()
    }

    /// The groups of comparators making up the constraint.
    pub fn groups(&self) -> &[Vec<Comparator>] {
        &self.0
    }

    /// Report whether the version satisfies the constraint.
    pub fn is_satisfied_by(&self, version: &Version) -> bool {
        self.0
            .iter()
            .any(|group| group.iter().all(|c| c.is_satisfied_by(version)))
    }
}

impl Default for Constraint {
    fn default() -> Self {
        Self::any().clone()
    }
}

impl From<Comparator> for Constraint {
    fn from(comparator: Comparator) -> Self {
        Self(vec![vec![comparator]])
    }
}

/// Renders groups joined by ` || ` and comparators joined by a space.
///
/// A comparator whose own text contains alternatives (such as `!=1.2.x`,
/// rendered `<1.2.0 || >=1.3.0-0`) is distributed over the rest of its group,
/// so the output always parses back into an equivalent constraint.
impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut alternatives = Vec::new();
        for group in &self.0 {
            let mut rendered = vec![String::new()];
            for comparator in group {
                let text = comparator.to_string();
                rendered = rendered
                    .iter()
                    .flat_map(|prefix| {
                        text.split(" || ").map(move |part| match prefix.as_str() {
                            "" => part.to_string(),
                            prefix => format!("{prefix} {part}"),
                        })
                    })
                    .collect();
            }
            alternatives.extend(rendered);
        }
        f.write_str(&alternatives.join(" || "))
    }
}

impl FromStr for Constraint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

duplicate! {
    [
        ty;
        [&str];
        [&String];
        [String];
    ]
    impl TryFrom<ty> for Constraint {
        type Error = Error;

        fn try_from(value: ty) -> Result<Self, Self::Error> {
            Self::parse(value)
        }
    }
}

impl Serialize for Constraint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_string().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Constraint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(s).map_err(serde::de::Error::custom)
    }
}

impl PartialSchema for Constraint {
    fn schema() -> utoipa::openapi::RefOr<utoipa::openapi::schema::Schema> {
        ObjectBuilder::new()
            .description(Some(Self::DOCS))
            .examples([
                json!("^1.2.3"),
                json!("~1.2 || >=2.0.0 <2.5.0"),
                json!("1.2.3 - 2.x"),
            ])
            .schema_type(Type::String)
            .build()
            .into()
    }
}

impl ToSchema for Constraint {
    fn name() -> Cow<'static, str> {
        Cow::Borrowed("Constraint")
    }
}

/// Parse a [`Constraint`], panicking if it is invalid.
///
/// Intended for constraints written out in source, such as in tests.
///
/// ```
/// # use semver_constraint::version;
/// let constraint = semver_constraint::constraint!("^1.2");
/// assert!(constraint.is_satisfied_by(&version!(1, 9, 0)));
/// ```
#[macro_export]
macro_rules! constraint {
    ($input:expr) => {
        $crate::Constraint::parse($input).expect("parse constraint")
    };
}
