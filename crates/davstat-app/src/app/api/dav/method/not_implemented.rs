use salvo::http::StatusCode;
use salvo::{Request, Response, handler};

use davstat_core::constants::ALLOW_HEADER;
use davstat_rfc::rfc::dav::core::method::allow_header_value;

/// ## Summary
/// Answers `WebDAV` methods other than PROPFIND with `501 Not Implemented`.
#[handler]
#[tracing::instrument(skip_all, fields(method = %req.method(), path = %req.uri().path()))]
pub async fn not_implemented(req: &mut Request, res: &mut Response) {
    tracing::warn!("Unsupported WebDAV method");

    #[expect(
        clippy::let_underscore_must_use,
        reason = "Header addition failure is non-fatal"
    )]
    let _ = res.add_header(ALLOW_HEADER, allow_header_value(), true);
    res.status_code(StatusCode::NOT_IMPLEMENTED);
}
