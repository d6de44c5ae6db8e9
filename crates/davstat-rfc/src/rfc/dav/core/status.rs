//! HTTP status lines embedded in multistatus documents.

use std::borrow::Cow;
use std::fmt;

use http::StatusCode;

use crate::error::{RfcError, RfcResult};

/// Protocol version written into every status line.
pub const HTTP_VERSION: &str = "HTTP/1.1";

/// A status indicator, either numeric (`404`) or symbolic (`not_found`, `not-found`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Numeric status code.
    Code(u16),
    /// Symbolic name derived from the reason phrase.
    Symbol(Cow<'static, str>),
}

impl Status {
    /// 200 OK
    pub const OK: Self = Self::Code(200);
    /// 404 Not Found
    pub const NOT_FOUND: Self = Self::Code(404);

    /// Creates a symbolic status.
    #[must_use]
    pub fn symbol(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Symbol(name.into())
    }

    /// Resolves the indicator to a status code with a known reason phrase.
    ///
    /// ## Errors
    /// Returns `UnknownStatusCode` if the code or symbol has no standard reason phrase.
    pub fn resolve(&self) -> RfcResult<StatusCode> {
        match self {
            Self::Code(code) => StatusCode::from_u16(*code)
                .ok()
                .filter(|status| status.canonical_reason().is_some())
                .ok_or_else(|| RfcError::UnknownStatusCode(code.to_string())),
            Self::Symbol(name) => lookup_symbol(name)
                .ok_or_else(|| RfcError::UnknownStatusCode(name.to_string())),
        }
    }

    /// Returns the status line, e.g. `HTTP/1.1 404 Not Found`.
    ///
    /// ## Errors
    /// Returns `UnknownStatusCode` if the status cannot be resolved.
    pub fn status_line(&self) -> RfcResult<String> {
        let status = self.resolve()?;
        let reason = status.canonical_reason().unwrap_or_default();
        Ok(format!("{HTTP_VERSION} {} {reason}", status.as_u16()))
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::OK
    }
}

impl From<u16> for Status {
    fn from(code: u16) -> Self {
        Self::Code(code)
    }
}

impl From<StatusCode> for Status {
    fn from(status: StatusCode) -> Self {
        Self::Code(status.as_u16())
    }
}

impl std::str::FromStr for Status {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(s.parse::<u16>()
            .map_or_else(|_| Self::Symbol(Cow::Owned(s.to_owned())), Self::Code))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => write!(f, "{code}"),
            Self::Symbol(name) => f.write_str(name),
        }
    }
}

/// Returns the status line for an optional status, defaulting to `200 OK`.
///
/// ## Errors
/// Returns `UnknownStatusCode` if the status cannot be resolved.
pub fn status_line(status: Option<&Status>) -> RfcResult<String> {
    status.unwrap_or(&Status::OK).status_line()
}

/// Finds the status whose reason phrase normalizes to the same symbol.
fn lookup_symbol(name: &str) -> Option<StatusCode> {
    let wanted = normalize_symbol(name);
    (100_u16..600)
        .filter_map(|code| StatusCode::from_u16(code).ok())
        .find(|status| {
            status
                .canonical_reason()
                .is_some_and(|reason| normalize_symbol(reason) == wanted)
        })
}

/// `Not Found` / `not-found` / `NOT_FOUND` -> `not_found`
fn normalize_symbol(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}
