use bon::Builder;
use compact_str::CompactString;
use derive_more::Display;

use crate::{Comparator, Condition, Error, Op, Operator, PreRelease, Range, Version};

use super::parser;

/// A numeric version field in constraint text, which may be a wildcard.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display)]
pub enum Field {
    /// A concrete number.
    #[display("{_0}")]
    Number(u64),

    /// One of `x`, `X`, or `*`.
    #[display("{_0}")]
    Wildcard(char),
}

impl Field {
    fn is_wildcard(field: Option<Field>) -> bool {
        !matches!(field, Some(Field::Number(_)))
    }

    fn number(field: Option<Field>) -> u64 {
        match field {
            Some(Field::Number(n)) => n,
            _ => 0,
        }
    }
}

/// A possibly partial, possibly wildcarded version, like `1.2.x` or `1`,
/// as written in constraint text.
///
/// Minor and patch count as wildcards when they are absent.
/// Pre-release and build metadata only appear alongside an explicit patch.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Builder)]
pub struct VersionDescriptor {
    major: Field,
    minor: Option<Field>,
    patch: Option<Field>,
    #[builder(into)]
    pre_release: Option<CompactString>,
    #[builder(into)]
    build_meta: Option<CompactString>,
}

impl VersionDescriptor {
    /// Parse a descriptor, optionally prefixed with `v`.
    ///
    /// ```
    /// # use semver_constraint::VersionDescriptor;
    /// let descriptor = VersionDescriptor::parse("v1.x").expect("parse");
    /// assert!(descriptor.is_minor_wildcard());
    /// assert_eq!(descriptor.to_string(), "1.x");
    /// ```
    pub fn parse(input: impl AsRef<str>) -> Result<Self, Error> {
        parser::descriptor(input.as_ref())
    }

    /// Report whether major is a wildcard.
    pub fn is_major_wildcard(&self) -> bool {
        Field::is_wildcard(Some(self.major))
    }

    /// Report whether minor is a wildcard or absent.
    pub fn is_minor_wildcard(&self) -> bool {
        Field::is_wildcard(self.minor)
    }

    /// Report whether patch is a wildcard or absent.
    pub fn is_patch_wildcard(&self) -> bool {
        Field::is_wildcard(self.patch)
    }

    /// Report whether any numeric field is a wildcard or absent.
    pub fn is_wildcard(&self) -> bool {
        self.is_major_wildcard() || self.is_minor_wildcard() || self.is_patch_wildcard()
    }

    fn major(&self) -> u64 {
        Field::number(Some(self.major))
    }

    fn minor(&self) -> u64 {
        Field::number(self.minor)
    }

    fn patch(&self) -> u64 {
        Field::number(self.patch)
    }

    fn version(&self, major: u64, minor: u64, patch: u64) -> Result<Version, Error> {
        Version::create(
            major,
            minor,
            patch,
            self.pre_release.as_deref(),
            self.build_meta.as_deref(),
        )
    }

    /// Resolve the descriptor preceded by `operator` into a comparator.
    ///
    /// ```
    /// # use semver_constraint::{Operator, VersionDescriptor};
    /// let descriptor = VersionDescriptor::parse("1.2.3").expect("parse");
    /// let comparator = descriptor.resolve(Operator::Caret).expect("resolve");
    /// assert_eq!(comparator.to_string(), ">=1.2.3 <2.0.0-0");
    /// ```
    pub fn resolve(&self, operator: Operator) -> Result<Comparator, Error> {
        match operator.comparison() {
            Some(op) => self.to_comparator(op),
            None if operator == Operator::Tilde => self.tilde(),
            None => self.caret(),
        }
    }

    /// Resolve the descriptor under a plain comparison.
    ///
    /// A wildcard major matches every release, or nothing at all for
    /// `>`, `<`, and `!=`.
    /// A wildcard minor or patch produces a [`Range`] over the versions the
    /// wildcard covers, interpreted by `op`.
    pub fn to_comparator(&self, op: Op) -> Result<Comparator, Error> {
        if self.is_major_wildcard() {
            return Ok(match op {
                Op::Greater | Op::Less | Op::NotEqual => Condition::none().into(),
                _ => Condition::greater_than_min().clone().into(),
            });
        }

        if self.is_minor_wildcard() {
            let start = self.version(self.major(), 0, 0)?;
            let end = start.next_major(Some(""))?;
            return Ok(bounded(start, end, op));
        }

        if self.is_patch_wildcard() {
            let start = self.version(self.major(), self.minor(), 0)?;
            let end = start.next_minor(Some(""))?;
            return Ok(bounded(start, end, op));
        }

        let version = self.version(self.major(), self.minor(), self.patch())?;
        Ok(Condition::new(op, version).into())
    }

    /// `~1.2.3` allows patch-level changes: `>=1.2.3 <1.3.0-0`.
    fn tilde(&self) -> Result<Comparator, Error> {
        if self.is_wildcard() {
            return self.to_comparator(Op::Equal);
        }

        let start = self.version(self.major(), self.minor(), self.patch())?;
        let end = start.next_minor(Some(""))?;
        Ok(bounded(start, end, Op::Equal))
    }

    /// `^1.2.3` allows changes that keep the left-most non-zero field.
    fn caret(&self) -> Result<Comparator, Error> {
        let (major, minor, patch) = (self.major(), self.minor(), self.patch());

        if self.is_major_wildcard() {
            return Ok(Condition::greater_than_min().clone().into());
        }

        if self.is_minor_wildcard() {
            return match major {
                0 => Ok(from_min(floor(1, 0, 0))),
                _ => self.to_comparator(Op::Equal),
            };
        }

        if self.is_patch_wildcard() {
            return match (major, minor) {
                (0, 0) => Ok(from_min(floor(0, 1, 0))),
                (0, _) => self.to_comparator(Op::Equal),
                _ => {
                    let start = self.version(major, minor, 0)?;
                    let end = start.next_major(Some(""))?;
                    Ok(bounded(start, end, Op::Equal))
                }
            };
        }

        let start = self.version(major, minor, patch)?;
        let end = match (major, minor, patch) {
            (1.., _, _) => start.next_major(Some(""))?,
            (0, 1.., _) => start.next_minor(Some(""))?,
            (0, 0, 1..) => start.next_patch(Some(""))?,
            (0, 0, 0) => floor(0, 0, 1),
        };
        Ok(bounded(start, end, Op::Equal))
    }
}

impl std::fmt::Display for VersionDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.major)?;
        if let Some(minor) = self.minor {
            write!(f, ".{minor}")?;
        }
        if let Some(patch) = self.patch {
            write!(f, ".{patch}")?;
        }
        if let Some(pre_release) = &self.pre_release {
            write!(f, "-{pre_release}")?;
        }
        if let Some(build_meta) = &self.build_meta {
            write!(f, "+{build_meta}")?;
        }
        Ok(())
    }
}

/// `[start, end)` interpreted by `op`.
fn bounded(start: Version, end: Version, op: Op) -> Comparator {
    Range::new(
        Condition::new(Op::GreaterOrEqual, start),
        Condition::new(Op::Less, end),
        op,
    )
    .into()
}

/// `[0.0.0, end)`.
fn from_min(end: Version) -> Comparator {
    Range::new(
        Condition::greater_than_min().clone(),
        Condition::new(Op::Less, end),
        Op::Equal,
    )
    .into()
}

/// The lowest pre-release of the version, like `1.0.0-0`.
fn floor(major: u64, minor: u64, patch: u64) -> Version {
    Version::builder()
        .major(major)
        .minor(minor)
        .patch(patch)
        .pre_release(PreRelease::default())
        .build()
}
