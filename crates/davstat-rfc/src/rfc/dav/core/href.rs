//! DAV href type.

use std::fmt;

/// A `WebDAV` href (URL reference).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Href(pub String);

impl Href {
    /// Creates a new href.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Returns the href as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Ensures the href ends with a slash (for collections).
    ///
    /// Applying this more than once yields the same href.
    #[must_use]
    pub fn with_trailing_slash(self) -> Self {
        if self.0.ends_with('/') {
            self
        } else {
            Self(format!("{}/", self.0))
        }
    }

    /// Joins a child segment onto this href.
    #[must_use]
    pub fn join(&self, child: &str) -> Self {
        let child = child.trim_start_matches('/');
        if self.0.ends_with('/') {
            Self(format!("{}{child}", self.0))
        } else {
            Self(format!("{}/{child}", self.0))
        }
    }

    /// Returns the format-suffixed variant of this href (`/notes/1` -> `/notes/1.txt`).
    #[must_use]
    pub fn with_extension(&self, extension: &str) -> Self {
        let base = self.0.trim_end_matches('/');
        Self(format!("{base}.{extension}"))
    }
}

impl fmt::Display for Href {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Href {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Href {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<Href> for String {
    fn from(href: Href) -> Self {
        href.0
    }
}

impl AsRef<str> for Href {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
