//! Upper-bound derivation for tilde and caret ranges

use crate::version::{is_unconstrained, Version};

/// Exclusive upper bound for a tilde range.
///
/// `~1.2.3` and `~1.2` allow patch-level drift below `1.3`; `~1` allows
/// minor-level drift below `2`. A wildcard major leaves the range
/// unbounded above.
pub(crate) fn tilde_upper(lower: &Version) -> Option<Version> {
    if is_unconstrained(lower.major()) {
        return None;
    }

    let upper = if !is_unconstrained(lower.minor()) {
        Version::from_fields(
            lower.major().to_string(),
            bump(lower.minor()),
            String::new(),
        )
    } else {
        Version::from_fields(bump(lower.major()), String::new(), String::new())
    };
    Some(upper)
}

/// Exclusive upper bound for a caret range.
///
/// The pivot is the first specified field that is non-zero; when every
/// specified leading field is zero the last specified one pivots
/// instead. The pivot is incremented and everything after it is left
/// unconstrained, so `^1.2.3` < `2`, `^0.2.3` < `0.3` and `^0.0.3` <
/// `0.0.4`. With no specified field at all (`^x`) there is no bound.
pub(crate) fn caret_upper(lower: &Version) -> Option<Version> {
    let fields = [lower.major(), lower.minor(), lower.patch()];
    let mut copied = [String::new(), String::new(), String::new()];
    let mut pivot = None;

    for (i, field) in fields.into_iter().enumerate() {
        if is_unconstrained(field) {
            break;
        }
        copied[i] = field.to_string();
        pivot = Some(i);
        if field != "0" {
            break;
        }
    }

    pivot.map(|i| {
        copied[i] = bump(&copied[i]);
        let [major, minor, patch] = copied;
        Version::from_fields(major, minor, patch)
    })
}

/// Increment a canonical digit string by one, carrying in place.
/// Fields have no width limit, so no integer conversion is involved.
fn bump(value: &str) -> String {
    let mut digits: Vec<u8> = value.bytes().collect();
    let mut carry = true;
    for digit in digits.iter_mut().rev() {
        if !carry {
            break;
        }
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            carry = false;
        }
    }
    if carry {
        digits.insert(0, b'1');
    }
    digits.into_iter().map(char::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partial(text: &str) -> Version {
        Version::parse(text, true).unwrap()
    }

    fn fields(v: &Version) -> (String, String, String) {
        (
            v.major().to_string(),
            v.minor().to_string(),
            v.patch().to_string(),
        )
    }

    #[test]
    fn test_tilde_upper() {
        let upper = tilde_upper(&partial("1.2.3")).unwrap();
        assert_eq!(fields(&upper), ("1".into(), "3".into(), "".into()));

        let upper = tilde_upper(&partial("1.2")).unwrap();
        assert_eq!(fields(&upper), ("1".into(), "3".into(), "".into()));

        let upper = tilde_upper(&partial("1")).unwrap();
        assert_eq!(fields(&upper), ("2".into(), "".into(), "".into()));

        let upper = tilde_upper(&partial("1.x")).unwrap();
        assert_eq!(fields(&upper), ("2".into(), "".into(), "".into()));

        let upper = tilde_upper(&partial("0")).unwrap();
        assert_eq!(fields(&upper), ("1".into(), "".into(), "".into()));

        assert!(tilde_upper(&partial("x")).is_none());
        assert!(tilde_upper(&partial("*")).is_none());
    }

    #[test]
    fn test_caret_upper_nonzero_pivot() {
        let upper = caret_upper(&partial("1.2.3")).unwrap();
        assert_eq!(fields(&upper), ("2".into(), "".into(), "".into()));

        let upper = caret_upper(&partial("1.2")).unwrap();
        assert_eq!(fields(&upper), ("2".into(), "".into(), "".into()));

        let upper = caret_upper(&partial("0.2.3")).unwrap();
        assert_eq!(fields(&upper), ("0".into(), "3".into(), "".into()));
    }

    #[test]
    fn test_caret_upper_zero_pivot() {
        let upper = caret_upper(&partial("0.0.3")).unwrap();
        assert_eq!(fields(&upper), ("0".into(), "0".into(), "4".into()));

        let upper = caret_upper(&partial("0.0")).unwrap();
        assert_eq!(fields(&upper), ("0".into(), "1".into(), "".into()));

        let upper = caret_upper(&partial("0.0.x")).unwrap();
        assert_eq!(fields(&upper), ("0".into(), "1".into(), "".into()));

        let upper = caret_upper(&partial("0")).unwrap();
        assert_eq!(fields(&upper), ("1".into(), "".into(), "".into()));
    }

    #[test]
    fn test_caret_upper_unbounded() {
        assert!(caret_upper(&partial("x")).is_none());
        assert!(caret_upper(&partial("*")).is_none());
    }

    #[test]
    fn test_bump_carries_without_width_limit() {
        assert_eq!(bump("0"), "1");
        assert_eq!(bump("9"), "10");
        assert_eq!(bump("199"), "200");
        assert_eq!(bump("999"), "1000");
        // one past u64::MAX
        assert_eq!(bump("18446744073709551615"), "18446744073709551616");

        let upper = tilde_upper(&partial("18446744073709551615")).unwrap();
        assert_eq!(upper.major(), "18446744073709551616");
        let upper = caret_upper(&partial("18446744073709551616.2.3")).unwrap();
        assert_eq!(upper.major(), "18446744073709551617");
    }
}
