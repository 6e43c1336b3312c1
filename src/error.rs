use derive_more::Display;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::ParseMode;

/// Records all errors reported by this library.
#[derive(Error, Diagnostic, Clone, PartialEq, Eq, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Errors encountered while parsing.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    /// A numeric field cannot be incremented without exceeding `u64::MAX`.
    #[error("cannot increment {field} of '{value}': number is out of range")]
    Overflow {
        /// The version or pre-release being incremented.
        value: String,

        /// The field that would overflow.
        field: &'static str,
    },
}

/// Errors encountered when parsing versions, pre-releases, and constraints.
#[derive(Error, Diagnostic, Clone, PartialEq, Eq, Debug)]
#[non_exhaustive]
pub enum ParseError {
    /// The provided value was empty, which is invalid for this type.
    #[error("input was empty, which is invalid for this type")]
    Empty,

    /// The input is not a semantic version under the requested parse mode.
    #[error("invalid version '{input}': not a {mode} semantic version")]
    Version {
        /// The input originally provided.
        #[source_code]
        input: String,

        /// The grammar the input was checked against.
        mode: ParseMode,

        /// The location of the error.
        #[label("unexpected input")]
        span: SourceSpan,
    },

    /// A numeric field is syntactically valid but does not fit in a `u64`.
    #[error("invalid version '{input}': {field} number is out of range")]
    Number {
        /// The input originally provided.
        #[source_code]
        input: String,

        /// The field that failed.
        field: &'static str,

        /// The location of the error.
        #[label("out of range")]
        span: SourceSpan,
    },

    /// An identifier in a pre-release failed validation.
    #[error("invalid pre-release '{input}': part '{identifier}' {reason}")]
    PreRelease {
        /// The pre-release text originally provided.
        #[source_code]
        input: String,

        /// The identifier that failed validation.
        identifier: String,

        /// Why the identifier is invalid.
        reason: PreReleaseViolation,

        /// The location of the error.
        #[label("invalid identifier")]
        span: SourceSpan,
    },

    /// The input did not match the constraint grammar.
    #[error("invalid constraint '{input}'")]
    Constraint {
        /// The input originally provided.
        #[source_code]
        input: String,

        /// The location of the error.
        #[label("unexpected input")]
        span: SourceSpan,
    },

    /// An unsupported constraint operator was provided.
    #[error("invalid constraint operator '{operator}' in '{input}'")]
    Operator {
        /// The input originally provided.
        input: String,

        /// The operator that was attempted to parse.
        operator: String,

        /// The error returned by the parser.
        #[source]
        error: strum::ParseError,
    },

    /// An unsupported increment kind was provided.
    #[error("invalid increment kind '{input}'")]
    Increment {
        /// The input originally provided.
        input: String,

        /// The error returned by the parser.
        #[source]
        error: strum::ParseError,
    },
}

/// The ways in which a pre-release identifier can be invalid.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Display)]
#[non_exhaustive]
pub enum PreReleaseViolation {
    /// A numeric identifier longer than one digit starts with `0`.
    #[display("is numeric but contains a leading zero")]
    LeadingZero,

    /// The identifier contains a character outside `[0-9A-Za-z-]`.
    #[display("contains an invalid character")]
    InvalidCharacter,

    /// The identifier is empty, as in `alpha..1`.
    #[display("is empty")]
    Empty,

    /// A numeric identifier does not fit in a `u64`.
    #[display("is numeric but out of range")]
    Overflow,
}

/// Return the span of `substr`, which must be a subslice of `text`
/// (such as a regex capture taken from it).
pub(crate) fn span(text: &str, substr: &str) -> SourceSpan {
    let start = (substr.as_ptr() as usize).saturating_sub(text.as_ptr() as usize);
    (start.min(text.len()), substr.len()).into()
}

/// Shorthand for conversion into [`Error`] and returning.
macro_rules! fatal {
    ($err:expr) => {
        return Err($crate::error::Error::from($err))
    };
}
pub(crate) use fatal;
