//! Semver facade providing high-level string-in operations

use crate::{Comparator, RangeExpression, Version};

/// Main facade for version and range operations on raw strings.
///
/// Every method swallows parse failures: an unparsable version or range
/// never satisfies anything and unparsable list entries are dropped.
pub struct Semver;

impl Semver {
    /// Check if a version satisfies a range expression
    pub fn satisfies(version: &str, range: &str) -> bool {
        let version = match Version::parse(version, false) {
            Ok(v) => v,
            Err(_) => return false,
        };

        let range = match RangeExpression::parse(range) {
            Ok(r) => r,
            Err(_) => return false,
        };

        range.contains(&version)
    }

    /// Return all versions that satisfy the given range
    pub fn satisfied_by(versions: &[&str], range: &str) -> Vec<String> {
        let range = match RangeExpression::parse(range) {
            Ok(r) => r,
            Err(_) => return Vec::new(),
        };

        versions
            .iter()
            .filter_map(|text| {
                let version = Version::parse(text, false).ok()?;
                if range.contains(&version) {
                    Some(text.to_string())
                } else {
                    None
                }
            })
            .collect()
    }

    /// Check if a string is a well-formed standalone version
    pub fn valid(version: &str) -> bool {
        Version::parse(version, false).is_ok()
    }

    /// Sort versions in ascending precedence order
    pub fn sort(versions: &[&str]) -> Vec<String> {
        Self::usort(versions, true)
    }

    /// Sort versions in descending precedence order (reverse sort)
    pub fn rsort(versions: &[&str]) -> Vec<String> {
        Self::usort(versions, false)
    }

    fn usort(versions: &[&str], ascending: bool) -> Vec<String> {
        let mut parsed: Vec<(Version, usize)> = versions
            .iter()
            .enumerate()
            .filter_map(|(i, text)| Some((Version::parse(text, false).ok()?, i)))
            .collect();

        parsed.sort_by(|(a, _), (b, _)| {
            let cmp = if Comparator::less_than(a, b) {
                std::cmp::Ordering::Less
            } else if Comparator::equal_to(a, b) {
                std::cmp::Ordering::Equal
            } else {
                std::cmp::Ordering::Greater
            };

            if ascending {
                cmp
            } else {
                cmp.reverse()
            }
        });

        parsed
            .into_iter()
            .map(|(_, i)| versions[i].to_string())
            .collect()
    }
}
