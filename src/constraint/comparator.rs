use derive_more::{Display, From};
use derive_new::new;
use getset::{CopyGetters, Getters};

use crate::{Op, PreRelease, Version};

static GREATER_THAN_MIN: Condition = Condition {
    op: Op::GreaterOrEqual,
    version: Version::new(0, 0, 0),
};

/// A predicate over a [`Version`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Display, From)]
pub enum Comparator {
    /// A single operator applied to a version.
    #[display("{_0}")]
    Condition(Condition),

    /// A pair of bounds reinterpreted by an aggregate operator.
    #[display("{_0}")]
    Range(Range),
}

impl Comparator {
    /// Report whether the version satisfies the comparator.
    pub fn is_satisfied_by(&self, version: &Version) -> bool {
        match self {
            Comparator::Condition(condition) => condition.is_satisfied_by(version),
            Comparator::Range(range) => range.is_satisfied_by(version),
        }
    }

    /// Render the logical negation of the comparator as constraint text.
    ///
    /// ```
    /// # use semver_constraint::{Constraint, version};
    /// let constraint = Constraint::parse("1.2.x").expect("parse");
    /// let comparator = &constraint.groups()[0][0];
    /// assert_eq!(comparator.opposite(), "<1.2.0 || >=1.3.0-0");
    ///
    /// let negated = Constraint::parse(comparator.opposite()).expect("parse");
    /// assert!(negated.is_satisfied_by(&version!(1, 3, 0)));
    /// assert!(!negated.is_satisfied_by(&version!(1, 2, 9)));
    /// ```
    pub fn opposite(&self) -> String {
        match self {
            Comparator::Condition(condition) => condition.opposite(),
            Comparator::Range(range) => range.opposite(),
        }
    }
}

/// An operator applied to a version, like `>=1.2.3`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Display, Getters, CopyGetters, new)]
#[display("{op}{version}")]
pub struct Condition {
    /// The comparison performed.
    #[getset(get_copy = "pub")]
    op: Op,

    /// The version compared against.
    #[getset(get = "pub")]
    version: Version,
}

impl Condition {
    /// The condition `>=0.0.0`, shared for the life of the process.
    ///
    /// Every release satisfies it, so it serves as "no lower bound".
    pub fn greater_than_min() -> &'static Condition {
        &GREATER_THAN_MIN
    }

    /// The condition `<0.0.0-0`, which no version satisfies.
    pub(crate) fn none() -> Condition {
        let floor = Version::builder()
            .major(0)
            .pre_release(PreRelease::default())
            .build();
        Condition::new(Op::Less, floor)
    }

    /// Report whether the version satisfies the condition.
    pub fn is_satisfied_by(&self, version: &Version) -> bool {
        self.op.compare(version, &self.version)
    }

    /// Render the logical negation of the condition, like `<1.2.3` for `>=1.2.3`.
    pub fn opposite(&self) -> String {
        format!("{}{}", self.op.opposite(), self.version)
    }
}

/// A pair of bounds reinterpreted by an aggregate operator.
///
/// `start` is the lower bound (normally `>=`) and `end` the upper bound
/// (normally `<`), together describing the interval produced by a wildcard
/// or shorthand such as `1.2.x` (`[1.2.0, 1.3.0-0)`).
/// The aggregate operator then says how that interval is applied,
/// so `>1.2.x` means "above the interval" and `!=1.2.x` "outside of it":
///
/// | operator | satisfied when             |
/// |----------|----------------------------|
/// | `=`      | `start` and `end`          |
/// | `!=`     | not `start` or not `end`   |
/// | `<`      | not `start` and `end`      |
/// | `<=`     | `end`                      |
/// | `>`      | `start` and not `end`      |
/// | `>=`     | `start`                    |
///
/// Hyphen ranges with wildcard sides nest ranges as bounds,
/// so the bounds are themselves [`Comparator`]s.
#[derive(Clone, Debug, PartialEq, Eq, Hash, CopyGetters)]
pub struct Range {
    start: Box<Comparator>,
    end: Box<Comparator>,

    /// The aggregate operator.
    #[getset(get_copy = "pub")]
    op: Op,
}

impl Range {
    /// Create a range from its bounds and aggregate operator.
    pub fn new(start: impl Into<Comparator>, end: impl Into<Comparator>, op: Op) -> Self {
        Self {
            start: Box::new(start.into()),
            end: Box::new(end.into()),
            op,
        }
    }

    /// The lower bound.
    pub fn start(&self) -> &Comparator {
        &self.start
    }

    /// The upper bound.
    pub fn end(&self) -> &Comparator {
        &self.end
    }

    /// Report whether the version satisfies the range.
    pub fn is_satisfied_by(&self, version: &Version) -> bool {
        let start = self.start.is_satisfied_by(version);
        let end = self.end.is_satisfied_by(version);
        match self.op {
            Op::Equal => start && end,
            Op::NotEqual => !start || !end,
            Op::Less => !start && end,
            Op::LessOrEqual => end,
            Op::Greater => start && !end,
            Op::GreaterOrEqual => start,
        }
    }

    /// Render the logical negation of the range as constraint text.
    pub fn opposite(&self) -> String {
        self.render(self.op.opposite())
    }

    /// Render the range as if its aggregate operator were `op`.
    fn render(&self, op: Op) -> String {
        match op {
            Op::Equal => format!("{} {}", self.start, self.end),
            Op::NotEqual => format!("{} || {}", self.start.opposite(), self.end.opposite()),
            Op::Less => self.start.opposite(),
            Op::LessOrEqual => self.end.to_string(),
            Op::Greater => self.end.opposite(),
            Op::GreaterOrEqual => self.start.to_string(),
        }
    }
}

impl std::fmt::Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render(self.op))
    }
}
