//! Condition variants making up a range expression

mod bounds;
mod operator;

use std::fmt;

pub use operator::Operator;

pub(crate) use bounds::{caret_upper, tilde_upper};

use crate::version::Version;

/// One condition inside a range expression's AND-group.
///
/// A closed union: adding a new range operator forces the containment
/// evaluator below to be updated at compile time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// An explicit comparator against a partial version, e.g. `>=1.2.3`
    Primitive { op: Operator, version: Version },
    /// A bare partial version, implicit equality, e.g. `1.2.x`
    Partial { version: Version },
    /// A tilde range, e.g. `~1.2.3`; the upper bound is derived once
    Tilde {
        version: Version,
        upper: Option<Version>,
    },
    /// A caret range, e.g. `^0.2.3`; the upper bound is derived once
    Caret {
        version: Version,
        upper: Option<Version>,
    },
    /// A hyphen range with two inclusive bounds, e.g. `1.2.3 - 2.3.4`
    Hyphen { lower: Version, upper: Version },
}

impl Condition {
    /// Decide whether `candidate` satisfies this condition.
    ///
    /// An incomparable precedence result is never containment.
    pub fn contains(&self, candidate: &Version) -> bool {
        match self {
            Condition::Primitive { op, version } => match candidate.compare(version, false) {
                Some(ordering) => op.matches(ordering),
                None => false,
            },
            Condition::Partial { version } => {
                candidate.compare(version, false) == Some(std::cmp::Ordering::Equal)
            }
            Condition::Tilde { version, upper } | Condition::Caret { version, upper } => {
                lower_and_upper(candidate, version, upper.as_ref())
            }
            Condition::Hyphen { lower, upper } => hyphen_contains(candidate, lower, upper),
        }
    }
}

/// Shared tilde/caret evaluation: at least the lower partial, and below
/// the derived bound when one exists. The upper check carries the lower
/// bound's prerelease context so `~1.2.3-beta` admits `1.2.3-rc`.
fn lower_and_upper(candidate: &Version, lower: &Version, upper: Option<&Version>) -> bool {
    let at_least_lower = matches!(
        candidate.compare(lower, false),
        Some(std::cmp::Ordering::Greater) | Some(std::cmp::Ordering::Equal)
    );
    if !at_least_lower {
        return false;
    }

    match upper {
        None => true,
        Some(upper) => matches!(
            candidate.compare(upper, lower.has_prerelease()),
            Some(std::cmp::Ordering::Less)
        ),
    }
}

fn hyphen_contains(candidate: &Version, lower: &Version, upper: &Version) -> bool {
    let in_bounds = matches!(
        candidate.compare(lower, true),
        Some(std::cmp::Ordering::Greater) | Some(std::cmp::Ordering::Equal)
    ) && matches!(
        candidate.compare(upper, true),
        Some(std::cmp::Ordering::Less) | Some(std::cmp::Ordering::Equal)
    );
    if !in_bounds || !candidate.has_prerelease() {
        return in_bounds;
    }

    // A prerelease candidate is only admitted next to a bound that also
    // carries a prerelease on the same major.minor.patch triplet.
    [lower, upper].into_iter().any(|bound| {
        bound.has_prerelease()
            && candidate.major() == bound.major()
            && candidate.minor() == bound.minor()
            && candidate.patch() == bound.patch()
    })
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Primitive { op, version } => write!(f, "{}{}", op.as_str(), version),
            Condition::Partial { version } => write!(f, "{}", version),
            Condition::Tilde { version, .. } => write!(f, "~{}", version),
            Condition::Caret { version, .. } => write!(f, "^{}", version),
            Condition::Hyphen { lower, upper } => write!(f, "{} - {}", lower, upper),
        }
    }
}
