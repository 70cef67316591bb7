//! PostgreSQL major version as reported by `SHOW server_version`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StatsError;

/// Major release of a PostgreSQL server.
///
/// Releases before 10 are identified by two numbers (`9.6`), later ones by one
/// (`12`). Ordering follows release order, so `9.6 < 10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MajorVersion {
    major: u8,
    minor: u8,
}

impl MajorVersion {
    pub const V9_4: Self = Self::old_style(4);
    pub const V9_5: Self = Self::old_style(5);
    pub const V9_6: Self = Self::old_style(6);
    pub const V10: Self = Self::new_style(10);
    pub const V12: Self = Self::new_style(12);
    pub const V13: Self = Self::new_style(13);
    pub const V14: Self = Self::new_style(14);
    pub const V17: Self = Self::new_style(17);

    /// A `9.x` release.
    pub const fn old_style(minor: u8) -> Self {
        Self { major: 9, minor }
    }

    /// A release numbered 10 or later.
    pub const fn new_style(major: u8) -> Self {
        Self { major, minor: 0 }
    }

    pub fn major(self) -> u8 {
        self.major
    }

    /// Second component for `9.x` releases, zero otherwise.
    pub fn minor(self) -> u8 {
        self.minor
    }
}

impl fmt::Display for MajorVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.major < 10 {
            write!(f, "{}.{}", self.major, self.minor)
        } else {
            write!(f, "{}", self.major)
        }
    }
}

impl FromStr for MajorVersion {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_major_version(s)
    }
}

/// Extracts the major version from a free-form `server_version` string.
///
/// Accepts a leading `9.<digit>` (old numbering, "9.6.1" → 9.6) or two leading
/// digits (new numbering, "12.3" → 12, "14beta1" → 14). Anything else,
/// including "8.4" or "foo", is a [`StatsError::VersionParse`].
pub fn parse_major_version(version: &str) -> Result<MajorVersion, StatsError> {
    let digit = |b: u8| b.is_ascii_digit().then(|| b - b'0');

    match version.as_bytes() {
        [b'9', b'.', d, ..] if d.is_ascii_digit() => Ok(MajorVersion::old_style(d - b'0')),
        [a, b, ..] => match (digit(*a), digit(*b)) {
            (Some(a), Some(b)) => Ok(MajorVersion::new_style(a * 10 + b)),
            _ => Err(StatsError::VersionParse(version.to_string())),
        },
        _ => Err(StatsError::VersionParse(version.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_old_style_versions() {
        assert_eq!(parse_major_version("9.6.1").unwrap(), MajorVersion::V9_6);
        assert_eq!(parse_major_version("9.5").unwrap(), MajorVersion::V9_5);
        assert_eq!(parse_major_version("9.4.26").unwrap(), MajorVersion::V9_4);
    }

    #[test]
    fn parses_new_style_versions() {
        assert_eq!(parse_major_version("12.3").unwrap(), MajorVersion::V12);
        assert_eq!(parse_major_version("14beta1").unwrap(), MajorVersion::V14);
        assert_eq!(parse_major_version("10").unwrap(), MajorVersion::V10);
        assert_eq!(
            parse_major_version("16.2 (Debian 16.2-1.pgdg120+2)").unwrap(),
            MajorVersion::new_style(16)
        );
    }

    #[test]
    fn rejects_unrecognized_versions() {
        for input in ["foo", "", "8.4.22", "9", "9.x", "v12", "1"] {
            let err = parse_major_version(input).unwrap_err();
            assert!(
                matches!(err, StatsError::VersionParse(ref s) if s == input),
                "{input:?} should not parse"
            );
        }
    }

    #[test]
    fn ordering_follows_release_order() {
        assert!(MajorVersion::V9_4 < MajorVersion::V9_5);
        assert!(MajorVersion::V9_6 < MajorVersion::V10);
        assert!(MajorVersion::V10 < MajorVersion::V12);
        assert!(MajorVersion::old_style(9) < MajorVersion::V10);
    }

    #[test]
    fn displays_like_the_server() {
        assert_eq!(MajorVersion::V9_6.to_string(), "9.6");
        assert_eq!(MajorVersion::V14.to_string(), "14");
    }

    #[test]
    fn from_str_delegates_to_parser() {
        assert_eq!("13.9".parse::<MajorVersion>().unwrap(), MajorVersion::V13);
        assert!("devel".parse::<MajorVersion>().is_err());
    }
}
