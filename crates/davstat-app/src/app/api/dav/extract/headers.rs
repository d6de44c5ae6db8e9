use salvo::Request;
use salvo::http::header::CONTENT_TYPE;

use davstat_core::constants::DEPTH_HEADER;
use davstat_rfc::rfc::dav::Depth;

/// ## Summary
/// Parses the `WebDAV` `Depth` header.
///
/// A missing or malformed header resolves to `0`; `infinity` and any value
/// above one resolve to `1`.
#[must_use]
pub fn parse_depth(req: &Request) -> Depth {
    let value = req
        .headers()
        .get(DEPTH_HEADER)
        .and_then(|value| value.to_str().ok());

    Depth::from_header_or_default(value)
}

/// Returns whether the request body is declared as JSON.
#[must_use]
pub fn is_json_body(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("json"))
}
