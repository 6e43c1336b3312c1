use std::{borrow::Cow, cmp::Ordering, fmt, str::FromStr};

use bon::Builder;
use compact_str::CompactString;
use derivative::Derivative;
use documented::Documented;
use duplicate::duplicate;
use getset::CopyGetters;
use lazy_regex::regex_captures;
use serde::{Deserialize, Serialize};
use serde_json::json;
use strum::{AsRefStr, Display, EnumIter, EnumString};
use utoipa::{
    PartialSchema, ToSchema,
    openapi::{ObjectBuilder, Type},
};

use crate::{Constraint, Error, ParseError, PreRelease, error};

static MIN: Version = Version::new(0, 0, 0);

/// The grammar used when parsing a [`Version`].
#[derive(
    Copy,
    Clone,
    Eq,
    PartialEq,
    Hash,
    Debug,
    Default,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum ParseMode {
    /// Exactly `MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]`.
    #[default]
    Strict,

    /// Like [`ParseMode::Strict`], but also accepts a leading `v`
    /// and allows minor and patch to be omitted (they default to `0`),
    /// as in `v1` or `1.2-beta`.
    Loose,
}

/// The version field targeted by [`Version::inc`].
#[derive(
    Copy,
    Clone,
    Eq,
    PartialEq,
    Hash,
    Debug,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum Inc {
    /// See [`Version::next_major`].
    Major,

    /// See [`Version::next_minor`].
    Minor,

    /// See [`Version::next_patch`].
    Patch,

    /// See [`Version::next_pre_release`].
    PreRelease,
}

impl Inc {
    /// Parse the increment kind from its name, such as `major` or `pre_release`.
    pub fn parse(input: &str) -> Result<Self, Error> {
        Self::from_str(input.trim()).map_err(|error| {
            ParseError::Increment {
                input: input.to_string(),
                error,
            }
            .into()
        })
    }
}

/// A semantic version, as described by [SemVer 2.0.0](https://semver.org/spec/v2.0.0.html).
///
/// Versions are ordered by major, minor, and patch numerically;
/// when those are equal a release sorts above any of its pre-releases,
/// and two pre-releases are ordered by [`PreRelease`] precedence.
/// Build metadata never takes part in ordering or equality.
#[derive(Clone, Debug, Builder, Derivative, CopyGetters, Documented)]
#[derivative(PartialEq, Eq, Hash)]
pub struct Version {
    /// The major version.
    #[getset(get_copy = "pub")]
    major: u64,

    /// The minor version.
    #[builder(default)]
    #[getset(get_copy = "pub")]
    minor: u64,

    /// The patch version.
    #[builder(default)]
    #[getset(get_copy = "pub")]
    patch: u64,

    /// The pre-release of the version, if any.
    pre_release: Option<PreRelease>,

    /// Build metadata, kept verbatim for rendering.
    #[derivative(PartialEq = "ignore", Hash = "ignore")]
    #[builder(into)]
    build_meta: Option<CompactString>,
}

impl Version {
    /// Create a release version from its numeric fields.
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            pre_release: None,
            build_meta: None,
        }
    }

    /// Create a version from its parts,
    /// validating the pre-release if one is provided.
    ///
    /// An empty pre-release string yields the default pre-release `0`.
    pub fn create(
        major: u64,
        minor: u64,
        patch: u64,
        pre_release: Option<&str>,
        build_meta: Option<&str>,
    ) -> Result<Self, Error> {
        Ok(Self {
            major,
            minor,
            patch,
            pre_release: pre_release.map(PreRelease::parse).transpose()?,
            build_meta: build_meta.map(CompactString::from),
        })
    }

    /// The version `0.0.0`, shared for the life of the process.
    pub fn min() -> &'static Version {
        &MIN
    }

    /// Parse a version in [`ParseMode::Strict`] mode.
    ///
    /// ```
    /// # use semver_constraint::Version;
    /// let version = Version::parse("1.2.3-alpha.1+build.5").expect("parse");
    /// assert_eq!(version.major(), 1);
    /// assert_eq!(version.pre_release().map(ToString::to_string), Some(String::from("alpha.1")));
    /// assert_eq!(version.build_meta(), Some("build.5"));
    ///
    /// assert!(Version::parse("1.2").is_err());
    /// ```
    pub fn parse(input: impl AsRef<str>) -> Result<Self, Error> {
        Self::parse_with(input, ParseMode::Strict)
    }

    /// Parse a version in [`ParseMode::Strict`] mode, discarding any error.
    pub fn parse_or_none(input: impl AsRef<str>) -> Option<Self> {
        Self::parse_with_or_none(input, ParseMode::Strict)
    }

    /// Parse a version with the provided grammar.
    ///
    /// ```
    /// # use semver_constraint::{ParseMode, Version};
    /// let version = Version::parse_with("v1.2", ParseMode::Loose).expect("parse");
    /// assert_eq!(version.to_string(), "1.2.0");
    /// ```
    #[tracing::instrument(level = "trace", skip(input), fields(input = input.as_ref()))]
    pub fn parse_with(input: impl AsRef<str>, mode: ParseMode) -> Result<Self, Error> {
        let input = input.as_ref().trim();
        if input.is_empty() {
            error::fatal!(ParseError::Empty);
        }

        let captures = match mode {
            ParseMode::Strict => regex_captures!(
                r"^(0|[1-9]\d*)\.(0|[1-9]\d*)\.(0|[1-9]\d*)(?:-([0-9A-Za-z.-]+))?(?:\+([0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?$",
                input
            ),
            ParseMode::Loose => regex_captures!(
                r"^v?(0|[1-9]\d*)(?:\.(0|[1-9]\d*))?(?:\.(0|[1-9]\d*))?(?:-([0-9A-Za-z.-]+))?(?:\+([0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?$",
                input
            ),
        };
        let Some((_, major, minor, patch, pre_release, build_meta)) = captures else {
            error::fatal!(ParseError::Version {
                input: input.to_string(),
                mode,
                span: (0, input.len()).into(),
            });
        };

        let number = |field: &'static str, text: &str| -> Result<u64, Error> {
            if text.is_empty() {
                return Ok(0);
            }
            text.parse().map_err(|_| {
                ParseError::Number {
                    input: input.to_string(),
                    field,
                    span: error::span(input, text),
                }
                .into()
            })
        };

        let pre_release = match pre_release {
            "" => None,
            pre_release => Some(PreRelease::parse(pre_release)?),
        };
        let build_meta = match build_meta {
            "" => None,
            build_meta => Some(CompactString::from(build_meta)),
        };

        Ok(Self {
            major: number("major", major)?,
            minor: number("minor", minor)?,
            patch: number("patch", patch)?,
            pre_release,
            build_meta,
        })
    }

    /// Parse a version with the provided grammar, discarding any error.
    pub fn parse_with_or_none(input: impl AsRef<str>, mode: ParseMode) -> Option<Self> {
        Self::parse_with(input, mode)
            .inspect_err(|error| tracing::debug!(%error, "discarding invalid version"))
            .ok()
    }

    /// Parse `version` strictly and report whether it satisfies `constraint`.
    ///
    /// ```
    /// # use semver_constraint::Version;
    /// assert!(Version::satisfies("1.2.3", "^1.2.0").expect("parse"));
    /// assert!(!Version::satisfies("2.0.0", "^1.2.0").expect("parse"));
    /// ```
    pub fn satisfies(version: &str, constraint: &str) -> Result<bool, Error> {
        let version = Version::parse(version)?;
        let constraint = Constraint::parse(constraint)?;
        Ok(version.is_satisfying(&constraint))
    }

    /// Report whether the version satisfies the constraint.
    pub fn is_satisfying(&self, constraint: &Constraint) -> bool {
        constraint.is_satisfied_by(self)
    }

    /// The pre-release, if any.
    pub fn pre_release(&self) -> Option<&PreRelease> {
        self.pre_release.as_ref()
    }

    /// The build metadata, if any.
    pub fn build_meta(&self) -> Option<&str> {
        self.build_meta.as_deref()
    }

    /// Report whether the version is a pre-release version.
    pub fn is_pre_release(&self) -> bool {
        self.pre_release.is_some()
    }

    /// Report whether the version is stable: major is at least `1`
    /// and there is no pre-release.
    pub fn is_stable(&self) -> bool {
        self.major > 0 && self.pre_release.is_none()
    }

    /// Drop the pre-release and build metadata.
    pub fn without_suffixes(&self) -> Self {
        Self::new(self.major, self.minor, self.patch)
    }

    /// Copy the version with a different major number.
    pub fn with_major(&self, major: u64) -> Self {
        Self {
            major,
            ..self.clone()
        }
    }

    /// Copy the version with a different minor number.
    pub fn with_minor(&self, minor: u64) -> Self {
        Self {
            minor,
            ..self.clone()
        }
    }

    /// Copy the version with a different patch number.
    pub fn with_patch(&self, patch: u64) -> Self {
        Self {
            patch,
            ..self.clone()
        }
    }

    /// Copy the version with a different pre-release.
    pub fn with_pre_release(&self, pre_release: &str) -> Result<Self, Error> {
        Ok(Self {
            pre_release: Some(PreRelease::parse(pre_release)?),
            ..self.clone()
        })
    }

    /// Copy the version with different build metadata.
    pub fn with_build_meta(&self, build_meta: &str) -> Self {
        Self {
            build_meta: Some(CompactString::from(build_meta)),
            ..self.clone()
        }
    }

    /// The next major version: `1.2.3` becomes `2.0.0`.
    ///
    /// If `pre_release` is provided it is attached to the result;
    /// an empty string attaches the default pre-release `0`.
    /// Fails with [`Error::Overflow`] if major is already `u64::MAX`.
    pub fn next_major(&self, pre_release: Option<&str>) -> Result<Self, Error> {
        let major = self.bump("major", self.major)?;
        Self::create(major, 0, 0, pre_release, None)
    }

    /// The next minor version: `1.2.3` becomes `1.3.0`.
    ///
    /// If `pre_release` is provided it is attached to the result;
    /// an empty string attaches the default pre-release `0`.
    /// Fails with [`Error::Overflow`] if minor is already `u64::MAX`.
    pub fn next_minor(&self, pre_release: Option<&str>) -> Result<Self, Error> {
        let minor = self.bump("minor", self.minor)?;
        Self::create(self.major, minor, 0, pre_release, None)
    }

    /// The next patch version.
    ///
    /// A pre-release version is finalized onto its own patch number
    /// (`1.2.3-alpha` becomes `1.2.3`) unless a new pre-release is requested,
    /// in which case the patch number is incremented as it is for releases.
    pub fn next_patch(&self, pre_release: Option<&str>) -> Result<Self, Error> {
        let patch = if self.pre_release.is_none() || pre_release.is_some() {
            self.bump("patch", self.patch)?
        } else {
            self.patch
        };
        Self::create(self.major, self.minor, patch, pre_release, None)
    }

    /// The next pre-release version.
    ///
    /// - With no `pre_release` (or an empty one), an existing pre-release is
    ///   incremented; a release gets its patch bumped and the pre-release `0`.
    /// - If `pre_release` names the track the version is already on
    ///   (its [`PreRelease::identity`]), the existing pre-release is incremented.
    /// - Otherwise `pre_release` replaces the existing one.
    ///
    /// The patch number is only bumped when the version was a release.
    ///
    /// ```
    /// # use semver_constraint::version;
    /// let version = version!(parse => "1.2.3-alpha.0");
    /// assert_eq!(version.next_pre_release(Some("alpha")).expect("next").to_string(), "1.2.3-alpha.1");
    /// assert_eq!(version.next_pre_release(Some("beta")).expect("next").to_string(), "1.2.3-beta");
    /// ```
    pub fn next_pre_release(&self, pre_release: Option<&str>) -> Result<Self, Error> {
        let requested = pre_release.filter(|pre| !pre.trim().is_empty());
        let next = match (requested, &self.pre_release) {
            (Some(track), Some(current)) if current.identity() == track.trim() => {
                current.increment()?
            }
            (Some(track), _) => PreRelease::parse(track)?,
            (None, Some(current)) => current.increment()?,
            (None, None) => PreRelease::default(),
        };

        let patch = match self.pre_release {
            Some(_) => self.patch,
            None => self.bump("patch", self.patch)?,
        };
        Ok(Self {
            major: self.major,
            minor: self.minor,
            patch,
            pre_release: Some(next),
            build_meta: None,
        })
    }

    fn bump(&self, field: &'static str, number: u64) -> Result<u64, Error> {
        number.checked_add(1).ok_or_else(|| Error::Overflow {
            value: self.to_string(),
            field,
        })
    }

    /// Produce the next version according to `kind`.
    ///
    /// ```
    /// # use semver_constraint::{Inc, version};
    /// let version = version!(parse => "1.2.3-alpha");
    /// assert_eq!(version.inc(Inc::Patch, None).expect("inc").to_string(), "1.2.3");
    ///
    /// let version = version!(1, 2, 3);
    /// assert_eq!(version.inc(Inc::Patch, None).expect("inc").to_string(), "1.2.4");
    /// ```
    pub fn inc(&self, kind: Inc, pre_release: Option<&str>) -> Result<Self, Error> {
        match kind {
            Inc::Major => self.next_major(pre_release),
            Inc::Minor => self.next_minor(pre_release),
            Inc::Patch => self.next_patch(pre_release),
            Inc::PreRelease => self.next_pre_release(pre_release),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre_release) = &self.pre_release {
            write!(f, "-{pre_release}")?;
        }
        if let Some(build_meta) = &self.build_meta {
            write!(f, "+{build_meta}")?;
        }
        Ok(())
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        // Convenience macro for short circuiting pure numeric comparison.
        macro_rules! cmp_numeric {
            ($a:expr, $b:expr) => {
                if let ord @ (Ordering::Greater | Ordering::Less) = $a.cmp($b) {
                    return ord;
                }
            };
        }

        cmp_numeric!(self.major, &other.major);
        cmp_numeric!(self.minor, &other.minor);
        cmp_numeric!(self.patch, &other.patch);

        match (&self.pre_release, &other.pre_release) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for Version {
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
    impl TryFrom<ty> for Version {
        type Error = Error;

        fn try_from(value: ty) -> Result<Self, Self::Error> {
            Self::parse(value)
        }
    }
}

impl From<&Version> for Version {
    fn from(value: &Version) -> Self {
        value.clone()
    }
}

impl TryFrom<&semver::Version> for Version {
    type Error = Error;

    fn try_from(value: &semver::Version) -> Result<Self, Self::Error> {
        let pre_release = match value.pre.as_str() {
            "" => None,
            pre => Some(PreRelease::parse(pre)?),
        };
        let build_meta = match value.build.as_str() {
            "" => None,
            build => Some(CompactString::from(build)),
        };
        Ok(Self {
            major: value.major,
            minor: value.minor,
            patch: value.patch,
            pre_release,
            build_meta,
        })
    }
}

impl TryFrom<&Version> for semver::Version {
    type Error = semver::Error;

    fn try_from(value: &Version) -> Result<Self, Self::Error> {
        let pre = match &value.pre_release {
            Some(pre) => semver::Prerelease::new(&pre.to_string())?,
            None => semver::Prerelease::EMPTY,
        };
        let build = match &value.build_meta {
            Some(build) => semver::BuildMetadata::new(build)?,
            None => semver::BuildMetadata::EMPTY,
        };
        Ok(semver::Version {
            major: value.major,
            minor: value.minor,
            patch: value.patch,
            pre,
            build,
        })
    }
}

impl Serialize for Version {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_string().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(s).map_err(serde::de::Error::custom)
    }
}

impl PartialSchema for Version {
    fn schema() -> utoipa::openapi::RefOr<utoipa::openapi::schema::Schema> {
        ObjectBuilder::new()
            .description(Some(Self::DOCS))
            .examples([
                json!("1.0.0"),
                json!("1.0.0-alpha.1"),
                json!("1.0.0-rc.10+r1234"),
            ])
            .min_length(Some(5))
            .schema_type(Type::String)
            .build()
            .into()
    }
}

impl ToSchema for Version {
    fn name() -> Cow<'static, str> {
        Cow::Borrowed("Version")
    }
}

/// Create a [`Version`] in a manner that is known to not fail at compile time.
///
/// ```
/// # use semver_constraint::Version;
/// let version = semver_constraint::version!(1, 0, 0);
/// assert_eq!(version, Version::new(1, 0, 0));
/// ```
#[macro_export]
macro_rules! version {
    ($major:expr, $minor:expr, $patch:expr) => {
        $crate::Version::new($major, $minor, $patch)
    };

    // This is only meant for use in tests and examples, so it's undocumented.
    // Panics if the provided value fails to parse.
    (parse => $value:expr) => {
        $crate::Version::parse($value).expect("parse version")
    };
}
