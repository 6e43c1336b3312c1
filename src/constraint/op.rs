use std::str::FromStr;

use enum_assoc::Assoc;
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::{Error, ParseError, Version};

/// A comparison between two versions.
///
/// `=<` and `=>` are accepted as aliases of `<=` and `>=` when parsing,
/// but always render in their canonical form.
#[derive(
    Copy, Clone, Eq, PartialEq, Hash, Debug, Display, EnumString, EnumIter, AsRefStr, Assoc,
)]
#[func(const fn negated(&self) -> Op)]
pub enum Op {
    /// `=`
    #[strum(to_string = "=")]
    #[assoc(negated = Op::NotEqual)]
    Equal,

    /// `!=`
    #[strum(to_string = "!=")]
    #[assoc(negated = Op::Equal)]
    NotEqual,

    /// `<`
    #[strum(to_string = "<")]
    #[assoc(negated = Op::GreaterOrEqual)]
    Less,

    /// `<=`, also spelled `=<`.
    #[strum(to_string = "<=", serialize = "=<")]
    #[assoc(negated = Op::Greater)]
    LessOrEqual,

    /// `>`
    #[strum(to_string = ">")]
    #[assoc(negated = Op::LessOrEqual)]
    Greater,

    /// `>=`, also spelled `=>`.
    #[strum(to_string = ">=", serialize = "=>")]
    #[assoc(negated = Op::Less)]
    GreaterOrEqual,
}

impl Op {
    /// The operator that holds exactly when this one does not,
    /// like `>=` for `<`.
    pub const fn opposite(&self) -> Op {
        self.negated()
    }

    /// Report whether `version` compares to `target` as described by the operator.
    ///
    /// ```
    /// # use semver_constraint::{Op, version};
    /// assert!(Op::Less.compare(&version!(1, 0, 0), &version!(2, 0, 0)));
    /// assert!(!Op::Greater.compare(&version!(1, 0, 0), &version!(2, 0, 0)));
    /// ```
    pub fn compare(self, version: &Version, target: &Version) -> bool {
        match self {
            Op::Equal => version == target,
            Op::NotEqual => version != target,
            Op::Less => version < target,
            Op::LessOrEqual => version <= target,
            Op::Greater => version > target,
            Op::GreaterOrEqual => version >= target,
        }
    }
}

/// The operator in front of a version in constraint text.
///
/// This extends [`Op`] with the range shorthands `~` and `^`;
/// an absent operator means [`Operator::Equal`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Display, EnumString, EnumIter, AsRefStr)]
pub enum Operator {
    /// `=`, or no operator at all.
    #[strum(to_string = "=", serialize = "")]
    Equal,

    /// `!=`
    #[strum(to_string = "!=")]
    NotEqual,

    /// `<`
    #[strum(to_string = "<")]
    Less,

    /// `<=` or `=<`
    #[strum(to_string = "<=", serialize = "=<")]
    LessOrEqual,

    /// `>`
    #[strum(to_string = ">")]
    Greater,

    /// `>=` or `=>`
    #[strum(to_string = ">=", serialize = "=>")]
    GreaterOrEqual,

    /// `~` or `~>`: patch-level changes within the given minor version.
    #[strum(to_string = "~", serialize = "~>")]
    Tilde,

    /// `^`: changes that do not modify the left-most non-zero field.
    #[strum(to_string = "^")]
    Caret,
}

impl Operator {
    /// Parse the operator, reporting `input` as the surrounding text on failure.
    pub(crate) fn parse_in(operator: &str, input: &str) -> Result<Self, Error> {
        Self::from_str(operator).map_err(|error| {
            ParseError::Operator {
                input: input.to_string(),
                operator: operator.to_string(),
                error,
            }
            .into()
        })
    }

    /// The plain comparison this operator performs,
    /// or `None` for the range shorthands.
    pub fn comparison(self) -> Option<Op> {
        match self {
            Operator::Equal => Some(Op::Equal),
            Operator::NotEqual => Some(Op::NotEqual),
            Operator::Less => Some(Op::Less),
            Operator::LessOrEqual => Some(Op::LessOrEqual),
            Operator::Greater => Some(Op::Greater),
            Operator::GreaterOrEqual => Some(Op::GreaterOrEqual),
            Operator::Tilde | Operator::Caret => None,
        }
    }
}

impl From<Op> for Operator {
    fn from(op: Op) -> Self {
        match op {
            Op::Equal => Operator::Equal,
            Op::NotEqual => Operator::NotEqual,
            Op::Less => Operator::Less,
            Op::LessOrEqual => Operator::LessOrEqual,
            Op::Greater => Operator::Greater,
            Op::GreaterOrEqual => Operator::GreaterOrEqual,
        }
    }
}
