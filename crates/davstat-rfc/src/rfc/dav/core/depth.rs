//! Depth header values.

use std::fmt;

/// `WebDAV` Depth header value.
///
/// Only two levels are modeled: the resource itself, or the resource plus its
/// immediate members. `infinity` and any depth above one collapse to [`Depth::One`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Depth {
    /// Depth: 0 - The resource itself only.
    #[default]
    Zero,
    /// Depth: 1 (or more) - The resource and its immediate members.
    One,
}

impl Depth {
    /// Parses from header value.
    #[must_use]
    pub fn from_header(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("infinity") {
            return Some(Self::One);
        }

        if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        if value.bytes().all(|b| b == b'0') {
            Some(Self::Zero)
        } else {
            Some(Self::One)
        }
    }

    /// Resolves an optional header value, falling back to `0` when the header
    /// is missing or malformed.
    #[must_use]
    pub fn from_header_or_default(value: Option<&str>) -> Self {
        let Some(raw) = value else {
            return Self::default();
        };

        Self::from_header(raw).unwrap_or_else(|| {
            tracing::debug!(value = %raw, "Malformed Depth header, using 0");
            Self::default()
        })
    }

    /// Returns the header value string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Zero => "0",
            Self::One => "1",
        }
    }

    /// Returns whether members of a collection are included.
    #[must_use]
    pub const fn includes_members(self) -> bool {
        matches!(self, Self::One)
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Depth {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_header(s).ok_or(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_from_header() {
        assert_eq!(Depth::from_header("0"), Some(Depth::Zero));
        assert_eq!(Depth::from_header("1"), Some(Depth::One));
        assert_eq!(Depth::from_header(" 1 "), Some(Depth::One));
        assert_eq!(Depth::from_header("abc"), None);
    }

    #[test]
    fn depth_collapses_to_one() {
        assert_eq!(Depth::from_header("2"), Some(Depth::One));
        assert_eq!(Depth::from_header("infinity"), Some(Depth::One));
        assert_eq!(Depth::from_header("INFINITY"), Some(Depth::One));
        assert_eq!(Depth::from_header("4294967296"), Some(Depth::One));
        assert_eq!(Depth::from_header("00"), Some(Depth::Zero));
        assert_eq!(Depth::from_header("-1"), None);
    }

    #[test]
    fn depth_defaults_to_zero() {
        assert_eq!(Depth::from_header_or_default(None), Depth::Zero);
        assert_eq!(Depth::from_header_or_default(Some("bogus")), Depth::Zero);
        assert_eq!(Depth::from_header_or_default(Some("1")), Depth::One);
    }

    #[test]
    fn depth_as_str() {
        assert_eq!(Depth::Zero.as_str(), "0");
        assert_eq!(Depth::One.as_str(), "1");
        assert_eq!("infinity".parse::<Depth>().map(Depth::as_str), Ok("1"));
    }
}
