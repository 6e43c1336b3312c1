use std::{borrow::Cow, cmp::Ordering, fmt, str::FromStr};

use compact_str::{CompactString, ToCompactString};
use derive_more::Display;
use documented::Documented;
use duplicate::duplicate;
use lazy_regex::regex_is_match;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{
    PartialSchema, ToSchema,
    openapi::{ObjectBuilder, Type},
};

use crate::{Error, ParseError, PreReleaseViolation, error};

/// A single dot-separated component of a [`PreRelease`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Display)]
pub enum Identifier {
    /// Consists only of digits; compared as an integer.
    #[display("{_0}")]
    Numeric(u64),

    /// Contains at least one non-digit; compared in ASCII order.
    #[display("{_0}")]
    AlphaNumeric(CompactString),
}

impl Identifier {
    /// Report whether the identifier is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Identifier::Numeric(_))
    }

    /// Parse `part`, which was split out of the pre-release `input` at `offset`.
    fn parse(input: &str, part: &str, offset: usize) -> Result<Self, Error> {
        let violation = |reason| ParseError::PreRelease {
            input: input.to_string(),
            identifier: part.to_string(),
            reason,
            span: (offset, part.len()).into(),
        };

        if part.is_empty() {
            error::fatal!(violation(PreReleaseViolation::Empty));
        }
        if part.bytes().all(|b| b.is_ascii_digit()) {
            if part.len() > 1 && part.starts_with('0') {
                error::fatal!(violation(PreReleaseViolation::LeadingZero));
            }
            return part
                .parse()
                .map(Identifier::Numeric)
                .map_err(|_| violation(PreReleaseViolation::Overflow).into());
        }
        if !regex_is_match!(r"^[0-9A-Za-z-]+$", part) {
            error::fatal!(violation(PreReleaseViolation::InvalidCharacter));
        }
        Ok(Identifier::AlphaNumeric(part.to_compact_string()))
    }
}

impl PartialEq<str> for Identifier {
    fn eq(&self, other: &str) -> bool {
        match self {
            Identifier::Numeric(_) => self.to_compact_string().as_str() == other,
            Identifier::AlphaNumeric(s) => s.as_str() == other,
        }
    }
}

impl Ord for Identifier {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Identifier::Numeric(a), Identifier::Numeric(b)) => a.cmp(b),
            (Identifier::Numeric(_), Identifier::AlphaNumeric(_)) => Ordering::Less,
            (Identifier::AlphaNumeric(_), Identifier::Numeric(_)) => Ordering::Greater,
            (Identifier::AlphaNumeric(a), Identifier::AlphaNumeric(b)) => {
                a.as_bytes().cmp(b.as_bytes())
            }
        }
    }
}

impl PartialOrd for Identifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The pre-release part of a semantic version, such as `alpha.1` in `1.0.0-alpha.1`.
///
/// A pre-release is a non-empty sequence of [`Identifier`]s.
/// Pre-releases order identifier by identifier:
/// numeric identifiers sort below alphanumeric ones,
/// and when every shared identifier is equal the shorter pre-release sorts lower.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Documented)]
pub struct PreRelease(Vec<Identifier>);

impl PreRelease {
    /// Parse a pre-release.
    ///
    /// Empty input yields the default pre-release, `0`.
    ///
    /// ```
    /// # use semver_constraint::PreRelease;
    /// let pre = PreRelease::parse("alpha.1").expect("parse");
    /// assert_eq!(pre.to_string(), "alpha.1");
    ///
    /// assert_eq!(PreRelease::parse("").expect("parse").to_string(), "0");
    /// assert!(PreRelease::parse("alpha.01").is_err());
    /// ```
    pub fn parse(input: impl AsRef<str>) -> Result<Self, Error> {
        let input = input.as_ref().trim();
        if input.is_empty() {
            return Ok(Self::default());
        }

        let mut offset = 0;
        input
            .split('.')
            .map(|part| {
                let start = offset;
                offset += part.len() + 1;
                Identifier::parse(input, part, start)
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    /// Parse a pre-release, discarding any error.
    pub fn parse_or_none(input: impl AsRef<str>) -> Option<Self> {
        Self::parse(input)
            .inspect_err(|error| tracing::debug!(%error, "discarding invalid pre-release"))
            .ok()
    }

    /// The identifiers making up the pre-release.
    pub fn identifiers(&self) -> &[Identifier] {
        &self.0
    }

    /// The first identifier, naming the "track" of the pre-release
    /// (`alpha` in `alpha.3`).
    pub fn identity(&self) -> &Identifier {
        // Construction guarantees at least one identifier.
        &self.0[0]
    }

    /// Return a new pre-release with the last numeric identifier incremented,
    /// or with a `0` identifier appended if none are numeric.
    ///
    /// Fails if the last numeric identifier is already `u64::MAX`.
    ///
    /// ```
    /// # use semver_constraint::PreRelease;
    /// let pre = PreRelease::parse("alpha.5.Beta.7").expect("parse");
    /// assert_eq!(pre.increment().expect("increment").to_string(), "alpha.5.Beta.8");
    ///
    /// let pre = PreRelease::parse("alpha-3.Beta").expect("parse");
    /// assert_eq!(pre.increment().expect("increment").to_string(), "alpha-3.Beta.0");
    /// ```
    pub fn increment(&self) -> Result<Self, Error> {
        let mut identifiers = self.0.clone();
        let last_numeric = identifiers.iter_mut().rev().find_map(|id| match id {
            Identifier::Numeric(n) => Some(n),
            Identifier::AlphaNumeric(_) => None,
        });
        match last_numeric {
            Some(n) => {
                *n = n.checked_add(1).ok_or_else(|| Error::Overflow {
                    value: self.to_string(),
                    field: "pre-release",
                })?
            }
            None => identifiers.push(Identifier::Numeric(0)),
        }
        Ok(Self(identifiers))
    }
}

impl Default for PreRelease {
    fn default() -> Self {
        Self(vec![Identifier::Numeric(0)])
    }
}

impl fmt::Display for PreRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut identifiers = self.0.iter();
        if let Some(first) = identifiers.next() {
            write!(f, "{first}")?;
        }
        for identifier in identifiers {
            write!(f, ".{identifier}")?;
        }
        Ok(())
    }
}

impl Ord for PreRelease {
    fn cmp(&self, other: &Self) -> Ordering {
        // Lexicographic slice ordering already ranks a strict prefix lower.
        self.0.cmp(&other.0)
    }
}

impl PartialOrd for PreRelease {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for PreRelease {
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
    impl TryFrom<ty> for PreRelease {
        type Error = Error;

        fn try_from(value: ty) -> Result<Self, Self::Error> {
            Self::parse(value)
        }
    }
}

impl Serialize for PreRelease {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_string().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PreRelease {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(s).map_err(serde::de::Error::custom)
    }
}

impl PartialSchema for PreRelease {
    fn schema() -> utoipa::openapi::RefOr<utoipa::openapi::schema::Schema> {
        ObjectBuilder::new()
            .description(Some(Self::DOCS))
            .examples([json!("alpha"), json!("alpha.1"), json!("rc.2")])
            .schema_type(Type::String)
            .build()
            .into()
    }
}

impl ToSchema for PreRelease {
    fn name() -> Cow<'static, str> {
        Cow::Borrowed("PreRelease")
    }
}
