//! `WebDAV` method vocabulary (RFC 2518 §8).

/// Methods added on top of HTTP/1.1 by `WebDAV`.
pub const WEBDAV_METHODS: [&str; 7] = [
    "PROPFIND", "PROPPATCH", "MKCOL", "COPY", "MOVE", "LOCK", "UNLOCK",
];

/// Plain HTTP methods a `WebDAV` host is expected to answer as well.
pub const HTTP_METHODS: [&str; 5] = ["OPTIONS", "GET", "HEAD", "PUT", "DELETE"];

/// Returns whether `method` is a `WebDAV` extension method.
///
/// Matching is case-sensitive, as HTTP method names are.
#[must_use]
pub fn is_webdav_method(method: &str) -> bool {
    WEBDAV_METHODS.contains(&method)
}

/// Builds an `Allow` header value from the HTTP and `WebDAV` vocabularies.
#[must_use]
pub fn allow_header_value() -> String {
    HTTP_METHODS
        .iter()
        .chain(WEBDAV_METHODS.iter())
        .copied()
        .collect::<Vec<_>>()
        .join(", ")
}
