//! Dotted numeric versions used as constraint bounds

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    static ref VERSION_RE: Regex = Regex::new(r"^(?:[0-9]+\.)*[0-9]+$").unwrap();
}

/// Error type for version parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("Invalid version string \"{0}\"")]
    Invalid(String),
    #[error("Version component out of range in \"{0}\"")]
    ComponentOverflow(String),
}

/// A version made of dot-separated non-negative integers (`1`, `1.2`, `1.2.3.4`)
///
/// Ordering is numeric per component, and missing trailing components count
/// as zero, so `1`, `1.0` and `1.0.0` are all equal. The original text is
/// kept for rendering.
#[derive(Debug, Clone)]
pub struct Version {
    text: String,
    numbers: Vec<u64>,
}

impl Version {
    /// The version as it was written
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_greater_than(&self, other: &Version) -> bool {
        self > other
    }

    pub fn is_greater_or_equal_to(&self, other: &Version) -> bool {
        self >= other
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if !VERSION_RE.is_match(text) {
            return Err(VersionError::Invalid(s.to_string()));
        }

        let numbers = text
            .split('.')
            .map(|part| part.parse::<u64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| VersionError::ComponentOverflow(text.to_string()))?;

        Ok(Version {
            text: text.to_string(),
            numbers,
        })
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let max_len = std::cmp::max(self.numbers.len(), other.numbers.len());
        for i in 0..max_len {
            let a = self.numbers.get(i).copied().unwrap_or(0);
            let b = other.numbers.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => continue,
                other => return other,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_valid() {
        assert_eq!(v("1").numbers, vec![1]);
        assert_eq!(v("1.2").numbers, vec![1, 2]);
        assert_eq!(v("1.2.3.4").numbers, vec![1, 2, 3, 4]);
        assert_eq!(v(" 10.0.1 ").as_str(), "10.0.1");
    }

    #[test]
    fn test_parse_invalid() {
        for input in ["", "1.", ".1", "1..2", "v1.2", "1.2-beta", "1.2.x", "abc"] {
            assert_eq!(
                input.parse::<Version>(),
                Err(VersionError::Invalid(input.to_string())),
                "{input}"
            );
        }
    }

    #[test]
    fn test_parse_rejects_non_ascii_digits() {
        for input in ["١.٢", "1.٣", "１.0"] {
            assert_eq!(
                input.parse::<Version>(),
                Err(VersionError::Invalid(input.to_string())),
                "{input}"
            );
        }
    }

    #[test]
    fn test_parse_overflow() {
        let err = "1.99999999999999999999999".parse::<Version>().unwrap_err();
        assert!(matches!(err, VersionError::ComponentOverflow(_)));
    }

    #[test]
    fn test_ordering() {
        assert!(v("1.25.0").is_greater_than(&v("1.24.0")));
        assert!(!v("1.25.0").is_greater_than(&v("1.25.0")));
        assert!(v("1.25.0").is_greater_or_equal_to(&v("1.25.0")));
        assert!(!v("1.24.0").is_greater_or_equal_to(&v("1.25.0")));
        assert!(v("1.10").is_greater_than(&v("1.9")));
        assert!(v("2").is_greater_than(&v("1.99.99")));
    }

    #[test]
    fn test_trailing_zeroes_are_insignificant() {
        assert_eq!(v("1"), v("1.0"));
        assert_eq!(v("1.0.0"), v("1"));
        assert!(v("1.0.0.1").is_greater_than(&v("1")));
        assert_eq!(v("1.0").to_string(), "1.0");
    }
}
