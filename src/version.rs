//! Version model and the incremental character-by-character parser

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error type for version parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid version string \"{0}\"")]
pub struct InvalidVersion(pub String);

/// Wildcard markers accepted in range context
fn is_wildcard_char(ch: char) -> bool {
    matches!(ch, 'x' | 'X' | '*')
}

pub(crate) fn is_wildcard(value: &str) -> bool {
    matches!(value, "x" | "X" | "*")
}

/// A field is unconstrained when it is a wildcard or was never reached
/// while parsing a partial version.
pub(crate) fn is_unconstrained(value: &str) -> bool {
    value.is_empty() || is_wildcard(value)
}

/// Compare two canonical digit strings numerically.
///
/// Leading zeros are rejected at parse time, so length ordering agrees
/// with numeric ordering and no integer conversion is needed.
pub(crate) fn numeric_cmp(a: &str, b: &str) -> std::cmp::Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// The field the parser is currently filling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Prefix,
    Major,
    Minor,
    Patch,
    Prerelease,
    Build,
}

/// Outcome of offering one character to the current field
enum Step {
    /// The character was absorbed; stay on the current field.
    Consumed,
    /// The character terminated the field; move on and discard it.
    AdvanceOnly(Field),
    /// The field is over but the character belongs to the next one;
    /// move on and offer it again.
    AdvanceAndRetry(Field),
}

/// A parsed, immutable semantic version.
///
/// `raw` preserves the exact accepted input so rendering round-trips.
/// In range context the numeric fields may hold a wildcard marker or be
/// empty (unconstrained); standalone versions always carry all three.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    raw: String,
    prefix: String,
    major: String,
    minor: String,
    patch: String,
    prerelease: Vec<String>,
    build: String,
}

impl Version {
    /// Parse a version string.
    ///
    /// With `range_context` set, wildcard fields (`x`, `X`, `*`) and
    /// partial versions such as `1.2` are accepted; otherwise the string
    /// must be a full `major.minor.patch` version with optional
    /// prerelease and build metadata.
    pub fn parse(text: &str, range_context: bool) -> Result<Version, InvalidVersion> {
        if text.is_empty() {
            return Err(InvalidVersion(text.to_string()));
        }

        let mut builder = VersionBuilder::new(range_context);
        for ch in text.chars() {
            builder.accept(ch)?;
        }
        builder.finish()
    }

    /// The leading marker: `""`, `"v"` or `"="`
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The major field: digits, a wildcard marker, or empty
    pub fn major(&self) -> &str {
        &self.major
    }

    /// The minor field: digits, a wildcard marker, or empty
    pub fn minor(&self) -> &str {
        &self.minor
    }

    /// The patch field: digits, a wildcard marker, or empty
    pub fn patch(&self) -> &str {
        &self.patch
    }

    /// The dot-separated prerelease identifiers
    pub fn prerelease(&self) -> &[String] {
        &self.prerelease
    }

    /// The build metadata, without the leading `+`
    pub fn build(&self) -> &str {
        &self.build
    }

    pub fn has_prerelease(&self) -> bool {
        !self.prerelease.is_empty()
    }

    /// Compare this version to another by SemVer precedence.
    ///
    /// Returns `None` when the two versions are incomparable: a
    /// prerelease on `self` checked against a release-only `other`
    /// without `include_prerelease`. Callers deciding containment must
    /// treat `None` as non-containment.
    pub fn compare(
        &self,
        other: &Version,
        include_prerelease: bool,
    ) -> Option<std::cmp::Ordering> {
        crate::compare::precedence(self, other, include_prerelease)
    }

    /// Build a synthetic partial version from bare numeric fields.
    /// Used for derived range bounds; never rendered to users.
    pub(crate) fn from_fields(major: String, minor: String, patch: String) -> Version {
        let mut raw = major.clone();
        for part in [&minor, &patch] {
            if !part.is_empty() {
                raw.push('.');
                raw.push_str(part);
            }
        }

        Version {
            raw,
            prefix: String::new(),
            major,
            minor,
            patch,
            prerelease: Vec::new(),
            build: String::new(),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl FromStr for Version {
    type Err = InvalidVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s, false)
    }
}

/// Incremental builder driving the version field state machine.
///
/// Characters are offered one at a time with [`VersionBuilder::accept`];
/// [`VersionBuilder::finish`] consumes the builder and yields the
/// immutable [`Version`], so a finished value can never be mutated or
/// finalized twice.
#[derive(Debug, Clone)]
pub struct VersionBuilder {
    raw: String,
    field: Field,
    range_context: bool,
    prefix: String,
    major: String,
    minor: String,
    patch: String,
    prerelease: Vec<String>,
    build: String,
    // last prerelease identifier is purely numeric with a leading zero
    invalid_numeric: bool,
}

impl VersionBuilder {
    pub fn new(range_context: bool) -> Self {
        VersionBuilder {
            raw: String::new(),
            field: Field::Prefix,
            range_context,
            prefix: String::new(),
            major: String::new(),
            minor: String::new(),
            patch: String::new(),
            prerelease: Vec::new(),
            build: String::new(),
            invalid_numeric: false,
        }
    }

    /// Offer the next character to the state machine.
    ///
    /// Fails fast at the first offending character; the builder must be
    /// discarded after an error.
    pub fn accept(&mut self, ch: char) -> Result<(), InvalidVersion> {
        let mut step = self.step(ch)?;
        while let Step::AdvanceAndRetry(next) = step {
            self.field = next;
            step = self.step(ch)?;
        }
        if let Step::AdvanceOnly(next) = step {
            self.field = next;
        }

        self.raw.push(ch);
        Ok(())
    }

    /// Finalize the accumulated state into an immutable [`Version`].
    pub fn finish(mut self) -> Result<Version, InvalidVersion> {
        match self.field {
            Field::Prefix => {
                if !self.range_context {
                    return Err(self.invalid());
                }
            }
            Field::Major => {
                if self.major.is_empty() || !self.range_context {
                    return Err(self.invalid());
                }
            }
            Field::Minor => {
                if self.minor.is_empty() || !self.range_context {
                    return Err(self.invalid());
                }
            }
            Field::Patch => {
                if self.patch.is_empty() {
                    return Err(self.invalid());
                }
            }
            Field::Prerelease => {
                let valid = !self.invalid_numeric
                    && self.prerelease.last().is_some_and(|id| !id.is_empty());
                if !valid {
                    return Err(self.invalid());
                }
            }
            Field::Build => {
                if self.build.is_empty() {
                    return Err(self.invalid());
                }
            }
        }

        if self.range_context {
            self.erase_after_wildcard();
        }

        Ok(Version {
            raw: self.raw,
            prefix: self.prefix,
            major: self.major,
            minor: self.minor,
            patch: self.patch,
            prerelease: self.prerelease,
            build: self.build,
        })
    }

    fn step(&mut self, ch: char) -> Result<Step, InvalidVersion> {
        match self.field {
            Field::Prefix => self.step_prefix(ch),
            Field::Major => self.step_numeric(ch, Field::Major),
            Field::Minor => self.step_numeric(ch, Field::Minor),
            Field::Patch => self.step_numeric(ch, Field::Patch),
            Field::Prerelease => self.step_prerelease(ch),
            Field::Build => {
                self.build.push(ch);
                Ok(Step::Consumed)
            }
        }
    }

    fn step_prefix(&mut self, ch: char) -> Result<Step, InvalidVersion> {
        if ch.is_ascii_digit() || is_wildcard_char(ch) {
            return Ok(Step::AdvanceAndRetry(Field::Major));
        }
        if self.prefix.is_empty() && (ch == 'v' || ch == '=') {
            self.prefix.push(ch);
            return Ok(Step::Consumed);
        }
        Err(self.invalid_at(ch))
    }

    fn step_numeric(&mut self, ch: char, field: Field) -> Result<Step, InvalidVersion> {
        let next = match field {
            Field::Major => Some(Field::Minor),
            Field::Minor => Some(Field::Patch),
            _ => None,
        };
        let value = match field {
            Field::Major => self.major.as_str(),
            Field::Minor => self.minor.as_str(),
            _ => self.patch.as_str(),
        };

        if ch == '.' {
            if let Some(next) = next {
                if value.is_empty() {
                    return Err(self.invalid_at(ch));
                }
                return Ok(Step::AdvanceOnly(next));
            }
            // a fourth numeric field (1.2.3.4) is not a semver
            return Err(self.invalid_at(ch));
        }
        if next.is_none() && (ch == '-' || ch == '+') {
            if value.is_empty() {
                return Err(self.invalid_at(ch));
            }
            let target = if ch == '-' {
                Field::Prerelease
            } else {
                Field::Build
            };
            return Ok(Step::AdvanceOnly(target));
        }

        let starts_field = value.is_empty();
        let valid_char =
            ch.is_ascii_digit() || (self.range_context && starts_field && is_wildcard_char(ch));
        // no leading zeros, and nothing may follow a wildcard marker
        let extendable = starts_field || (value != "0" && !is_wildcard(value));
        if !(valid_char && extendable) {
            return Err(self.invalid_at(ch));
        }

        match field {
            Field::Major => self.major.push(ch),
            Field::Minor => self.minor.push(ch),
            _ => self.patch.push(ch),
        }
        Ok(Step::Consumed)
    }

    fn step_prerelease(&mut self, ch: char) -> Result<Step, InvalidVersion> {
        if ch == '+' || ch == '.' {
            let valid = !self.invalid_numeric
                && self.prerelease.last().is_some_and(|id| !id.is_empty());
            if !valid {
                return Err(self.invalid_at(ch));
            }
            if ch == '+' {
                return Ok(Step::AdvanceOnly(Field::Build));
            }
            self.prerelease.push(String::new());
            return Ok(Step::Consumed);
        }

        if !(ch.is_ascii_alphanumeric() || ch == '-') {
            return Err(self.invalid_at(ch));
        }

        if self.prerelease.is_empty() {
            self.prerelease.push(String::new());
        }
        let last = self.prerelease.last_mut().unwrap();
        self.invalid_numeric = (self.invalid_numeric || last.as_str() == "0") && ch.is_ascii_digit();
        last.push(ch);
        Ok(Step::Consumed)
    }

    /// Wildcards propagate rightward: every numeric field after a
    /// wildcard marker is forced back to unconstrained.
    fn erase_after_wildcard(&mut self) {
        let mut erase = false;
        for value in [&mut self.major, &mut self.minor, &mut self.patch] {
            if erase {
                value.clear();
            }
            if is_wildcard(value) {
                erase = true;
            }
        }
    }

    fn invalid(&self) -> InvalidVersion {
        InvalidVersion(self.raw.clone())
    }

    fn invalid_at(&self, ch: char) -> InvalidVersion {
        let mut text = self.raw.clone();
        text.push(ch);
        InvalidVersion(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Version {
        Version::parse(text, false).unwrap()
    }

    fn parse_partial(text: &str) -> Version {
        Version::parse(text, true).unwrap()
    }

    #[test]
    fn test_parse_basic() {
        let v = parse("1.2.3");
        assert_eq!(v.prefix(), "");
        assert_eq!(v.major(), "1");
        assert_eq!(v.minor(), "2");
        assert_eq!(v.patch(), "3");
        assert!(!v.has_prerelease());
        assert_eq!(v.build(), "");
    }

    #[test]
    fn test_parse_prefix() {
        assert_eq!(parse("v1.2.3").prefix(), "v");
        assert_eq!(parse("=1.2.3").prefix(), "=");
        assert!(Version::parse("vv1.2.3", false).is_err());
        assert!(Version::parse("=v1.2.3", false).is_err());
        assert!(Version::parse("w1.2.3", false).is_err());
    }

    #[test]
    fn test_parse_prerelease_and_build() {
        let v = parse("1.2.3-alpha.1+build.42");
        assert_eq!(v.prerelease(), &["alpha".to_string(), "1".to_string()]);
        assert_eq!(v.build(), "build.42");

        let v = parse("1.2.3+exp.sha.5114f85");
        assert!(!v.has_prerelease());
        assert_eq!(v.build(), "exp.sha.5114f85");

        // hyphens are legal inside prerelease identifiers
        let v = parse("1.0.0-x-y-z.-");
        assert_eq!(v.prerelease(), &["x-y-z".to_string(), "-".to_string()]);
    }

    #[test]
    fn test_leading_zero_rejection() {
        assert!(Version::parse("01.0.0", false).is_err());
        assert!(Version::parse("1.02.3", false).is_err());
        assert!(Version::parse("1.0.01", false).is_err());
        assert!(Version::parse("0.0.0", false).is_ok());
        assert!(Version::parse("10.20.30", false).is_ok());
    }

    #[test]
    fn test_prerelease_identifier_rules() {
        // purely numeric identifiers may not carry a leading zero
        assert!(Version::parse("1.2.3-01", false).is_err());
        assert!(Version::parse("1.2.3-alpha.02.x", false).is_err());
        // mixed alphanumeric identifiers may
        assert!(Version::parse("1.2.3-0a", false).is_ok());
        assert!(Version::parse("1.2.3-0x7", false).is_ok());
        assert!(Version::parse("1.2.3-0", false).is_ok());
        // identifiers must be non-empty
        assert!(Version::parse("1.2.3-", false).is_err());
        assert!(Version::parse("1.2.3-alpha.", false).is_err());
        assert!(Version::parse("1.2.3-alpha..1", false).is_err());
        assert!(Version::parse("1.2.3-.alpha", false).is_err());
        assert!(Version::parse("1.2.3-alpha.+b", false).is_err());
    }

    #[test]
    fn test_standalone_requires_full_triplet() {
        assert!(Version::parse("1", false).is_err());
        assert!(Version::parse("1.2", false).is_err());
        assert!(Version::parse("1.2.", false).is_err());
        assert!(Version::parse("", false).is_err());
        assert!(Version::parse("1.2.3.4", false).is_err());
    }

    #[test]
    fn test_standalone_rejects_wildcards() {
        assert!(Version::parse("x", false).is_err());
        assert!(Version::parse("1.x.3", false).is_err());
        assert!(Version::parse("*", false).is_err());
    }

    #[test]
    fn test_partials_in_range_context() {
        assert_eq!(parse_partial("1").major(), "1");
        assert_eq!(parse_partial("1.2").minor(), "2");
        assert_eq!(parse_partial("v1").prefix(), "v");

        let v = parse_partial("1.2.x");
        assert_eq!(v.patch(), "x");

        let v = parse_partial("*");
        assert_eq!(v.major(), "*");
        assert_eq!(v.minor(), "");

        // trailing dot is still malformed
        assert!(Version::parse("1.", true).is_err());
        assert!(Version::parse("", true).is_err());
    }

    #[test]
    fn test_wildcards_propagate_rightward() {
        let v = parse_partial("x.2.3");
        assert_eq!(v.major(), "x");
        assert_eq!(v.minor(), "");
        assert_eq!(v.patch(), "");

        let v = parse_partial("1.X.3");
        assert_eq!(v.minor(), "X");
        assert_eq!(v.patch(), "");

        // a digit may not extend a wildcard field
        assert!(Version::parse("1.x2.3", true).is_err());
    }

    #[test]
    fn test_empty_fields_rejected() {
        assert!(Version::parse(".1.2", false).is_err());
        assert!(Version::parse("1..2", false).is_err());
        assert!(Version::parse("1.2.-alpha", false).is_err());
        assert!(Version::parse("1.2.3+", false).is_err());
    }

    #[test]
    fn test_round_trip() {
        for text in [
            "1.2.3",
            "v1.2.3",
            "=1.2.3",
            "0.0.0",
            "1.2.3-alpha.1",
            "1.2.3-alpha.1+build.42",
            "1.2.3+odd build chars",
        ] {
            assert_eq!(parse(text).to_string(), text);
        }

        for text in ["1", "1.2", "1.2.x", "v1.*", "~invalid-is-not-this"] {
            if let Ok(v) = Version::parse(text, true) {
                assert_eq!(v.to_string(), text);
            }
        }
    }

    #[test]
    fn test_reparse_canonical_render() {
        let v = parse("1.2.3-rc.1+abc");
        let again = Version::parse(&v.to_string(), false).unwrap();
        assert_eq!(v, again);
    }

    #[test]
    fn test_incremental_builder() {
        let mut builder = VersionBuilder::new(false);
        for ch in "1.2.3-beta".chars() {
            builder.accept(ch).unwrap();
        }
        let v = builder.finish().unwrap();
        assert_eq!(v.patch(), "3");
        assert_eq!(v.prerelease(), &["beta".to_string()]);

        // fail-fast at the offending character
        let mut builder = VersionBuilder::new(false);
        builder.accept('1').unwrap();
        builder.accept('.').unwrap();
        let err = builder.accept('.').unwrap_err();
        assert_eq!(err, InvalidVersion("1..".to_string()));
    }

    #[test]
    fn test_from_str() {
        let v: Version = "2.0.0-beta".parse().unwrap();
        assert_eq!(v.major(), "2");
        assert!("2.0".parse::<Version>().is_err());
    }
}
