//! SemVer precedence comparison

use std::cmp::Ordering;

use crate::version::{is_unconstrained, numeric_cmp, Version};

/// Compare two versions by SemVer 2.0.0 precedence.
///
/// Major, minor and patch are compared numerically in order; an
/// unconstrained field on either side ends the descent with the fields
/// considered equal. Build metadata never participates.
///
/// Returns `None` (incomparable) when `a` carries a prerelease that a
/// plain containment check must not sweep in: `include_prerelease` is
/// false and the triplets differ, or `b` has no prerelease of its own.
pub(crate) fn precedence(
    a: &Version,
    b: &Version,
    include_prerelease: bool,
) -> Option<Ordering> {
    let mut result = Ordering::Equal;
    let pairs = [
        (a.major(), b.major()),
        (a.minor(), b.minor()),
        (a.patch(), b.patch()),
    ];
    for (x, y) in pairs {
        if is_unconstrained(x) || is_unconstrained(y) {
            break;
        }
        result = numeric_cmp(x, y);
        if result != Ordering::Equal {
            break;
        }
    }

    if !include_prerelease
        && a.has_prerelease()
        && (result != Ordering::Equal || !b.has_prerelease())
    {
        return None;
    }

    if result == Ordering::Equal && (include_prerelease || b.has_prerelease()) {
        result = prerelease_cmp(a.prerelease(), b.prerelease());
    }

    Some(result)
}

/// Order two prerelease identifier sequences.
///
/// An empty sequence outranks any non-empty one. Identifiers compare
/// numerically when both are digits, a numeric identifier is lower than
/// an alphanumeric one, otherwise lexically; a shared prefix makes the
/// shorter sequence lower.
fn prerelease_cmp(a: &[String], b: &[String]) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }
    if a.is_empty() {
        return Ordering::Greater;
    }
    if b.is_empty() {
        return Ordering::Less;
    }

    for (x, y) in a.iter().zip(b.iter()) {
        if x == y {
            continue;
        }
        let x_numeric = x.chars().all(|c| c.is_ascii_digit());
        let y_numeric = y.chars().all(|c| c.is_ascii_digit());
        return match (x_numeric, y_numeric) {
            (true, true) => numeric_cmp(x, y),
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => x.cmp(y),
        };
    }

    a.len().cmp(&b.len())
}

/// Convenience comparisons over parsed versions.
///
/// These use the total order (`include_prerelease = true`) and are what
/// sorting builds on; containment checks go through
/// [`Version::compare`] instead.
pub struct Comparator;

impl Comparator {
    /// Check if a > b
    pub fn greater_than(a: &Version, b: &Version) -> bool {
        Self::total(a, b) == Ordering::Greater
    }

    /// Check if a >= b
    pub fn greater_than_or_equal_to(a: &Version, b: &Version) -> bool {
        Self::total(a, b) != Ordering::Less
    }

    /// Check if a < b
    pub fn less_than(a: &Version, b: &Version) -> bool {
        Self::total(a, b) == Ordering::Less
    }

    /// Check if a <= b
    pub fn less_than_or_equal_to(a: &Version, b: &Version) -> bool {
        Self::total(a, b) != Ordering::Greater
    }

    /// Check if a and b have equal precedence
    pub fn equal_to(a: &Version, b: &Version) -> bool {
        Self::total(a, b) == Ordering::Equal
    }

    fn total(a: &Version, b: &Version) -> Ordering {
        precedence(a, b, true).unwrap_or(Ordering::Equal)
    }
}
