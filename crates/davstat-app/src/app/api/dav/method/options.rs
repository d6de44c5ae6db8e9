//! OPTIONS method handler.

use salvo::http::StatusCode;
use salvo::{Request, Response, handler};

use davstat_core::constants::{ALLOW_HEADER, DAV_COMPLIANCE_CLASS, DAV_HEADER};
use davstat_rfc::rfc::dav::core::method::allow_header_value;

/// ## Summary
/// Handles OPTIONS requests.
///
/// ## Side Effects
/// Sets the `Allow` and `DAV` headers on the response.
#[handler]
#[tracing::instrument(skip_all, fields(path = %req.uri().path()))]
pub async fn options(req: &mut Request, res: &mut Response) {
    tracing::info!("Handling OPTIONS request");

    #[expect(
        clippy::let_underscore_must_use,
        reason = "Header addition failure is non-fatal"
    )]
    let _ = res.add_header(ALLOW_HEADER, allow_header_value(), true);
    #[expect(
        clippy::let_underscore_must_use,
        reason = "Header addition failure is non-fatal"
    )]
    let _ = res.add_header(DAV_HEADER, DAV_COMPLIANCE_CLASS, true);
    res.status_code(StatusCode::OK);
}
