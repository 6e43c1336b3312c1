//! Comparison and sorting of versions given either as text or as [`Version`]s.
//!
//! Text is parsed in [`ParseMode::Strict`](crate::ParseMode::Strict) mode;
//! every function fails if any input is not a valid version.
//!
//! ```
//! # use semver_constraint::{compare, version};
//! assert!(compare::less_than("1.0.0-alpha", "1.0.0").expect("compare"));
//! assert!(compare::equal("1.2.3+build1", "1.2.3+build2").expect("compare"));
//! assert!(compare::greater_than(&version!(2, 0, 0), "1.9.9").expect("compare"));
//!
//! let sorted = compare::sort(["1.10.0", "1.2.0", "1.2.0-rc.1"]).expect("sort");
//! assert_eq!(sorted, ["1.2.0-rc.1", "1.2.0", "1.10.0"]);
//! ```

use std::{borrow::Cow, cmp::Ordering};

use compact_str::CompactString;
use duplicate::duplicate;

use crate::{Constraint, Error, Version};

/// Values which can be viewed as a [`Version`], parsing if needed.
pub trait AsVersion {
    /// View the value as a version.
    fn as_version(&self) -> Result<Cow<'_, Version>, Error>;
}

impl AsVersion for Version {
    fn as_version(&self) -> Result<Cow<'_, Version>, Error> {
        Ok(Cow::Borrowed(self))
    }
}

duplicate! {
    [
        ty;
        [str];
        [String];
        [CompactString];
    ]
    impl AsVersion for ty {
        fn as_version(&self) -> Result<Cow<'_, Version>, Error> {
            Version::parse(self).map(Cow::Owned)
        }
    }
}

impl<T: AsVersion + ?Sized> AsVersion for &T {
    fn as_version(&self) -> Result<Cow<'_, Version>, Error> {
        (**self).as_version()
    }
}

/// Compare two versions by precedence.
///
/// Build metadata does not take part in the comparison.
pub fn compare(a: &(impl AsVersion + ?Sized), b: &(impl AsVersion + ?Sized)) -> Result<Ordering, Error> {
    Ok(a.as_version()?.cmp(&b.as_version()?))
}

duplicate! {
    [
        name                      check                  summary;
        [less_than]               [Ordering::is_lt]      ["Report whether `a` has lower precedence than `b`."];
        [less_than_or_equal]      [Ordering::is_le]      ["Report whether `a` does not have higher precedence than `b`."];
        [greater_than]            [Ordering::is_gt]      ["Report whether `a` has higher precedence than `b`."];
        [greater_than_or_equal]   [Ordering::is_ge]      ["Report whether `a` does not have lower precedence than `b`."];
        [equal]                   [Ordering::is_eq]      ["Report whether `a` and `b` have the same precedence."];
        [not_equal]               [Ordering::is_ne]      ["Report whether `a` and `b` differ in precedence."];
    ]
    #[doc = summary]
    pub fn name(a: &(impl AsVersion + ?Sized), b: &(impl AsVersion + ?Sized)) -> Result<bool, Error> {
        compare(a, b).map(check)
    }
}

/// Report whether `version` satisfies the `constraint` text.
///
/// ```
/// # use semver_constraint::compare;
/// assert!(compare::satisfies("1.2.5", "~1.2.0").expect("parse"));
/// assert!(!compare::satisfies("1.3.0", "~1.2.0").expect("parse"));
/// ```
pub fn satisfies(version: &(impl AsVersion + ?Sized), constraint: &str) -> Result<bool, Error> {
    let version = version.as_version()?;
    Ok(Constraint::parse(constraint)?.is_satisfied_by(&version))
}

/// Sort versions from lowest to highest precedence,
/// returning the original items.
///
/// The sort is stable, so items of equal precedence
/// (such as those differing only in build metadata) keep their relative order.
pub fn sort<T: AsVersion>(items: impl IntoIterator<Item = T>) -> Result<Vec<T>, Error> {
    let mut keyed = keyed(items)?;
    keyed.sort_by(|(a, _), (b, _)| a.cmp(b));
    Ok(keyed.into_iter().map(|(_, item)| item).collect())
}

/// Sort versions from highest to lowest precedence,
/// returning the original items.
pub fn rsort<T: AsVersion>(items: impl IntoIterator<Item = T>) -> Result<Vec<T>, Error> {
    let mut keyed = keyed(items)?;
    keyed.sort_by(|(a, _), (b, _)| b.cmp(a));
    Ok(keyed.into_iter().map(|(_, item)| item).collect())
}

fn keyed<T: AsVersion>(items: impl IntoIterator<Item = T>) -> Result<Vec<(Version, T)>, Error> {
    items
        .into_iter()
        .map(|item| {
            let version = item.as_version()?.into_owned();
            Ok((version, item))
        })
        .collect()
}
