use salvo::Response;
use salvo::http::StatusCode;

use davstat_core::constants::{DAV_COMPLIANCE_CLASS, DAV_HEADER, DEPTH_HEADER, XML_CONTENT_TYPE};
use davstat_rfc::rfc::dav::Depth;

/// ## Summary
/// Writes a rendered multistatus document as a `207 Multi-Status` response.
///
/// ## Side Effects
/// Sets the `DAV`, `Depth` and `Content-Type` headers.
pub fn write_multistatus(res: &mut Response, xml: String, depth: Depth) {
    res.status_code(StatusCode::MULTI_STATUS);
    #[expect(
        clippy::let_underscore_must_use,
        reason = "Header addition failure is non-fatal"
    )]
    let _ = res.add_header(DAV_HEADER, DAV_COMPLIANCE_CLASS, true);
    #[expect(
        clippy::let_underscore_must_use,
        reason = "Header addition failure is non-fatal"
    )]
    let _ = res.add_header(DEPTH_HEADER, depth.as_str(), true);
    #[expect(
        clippy::let_underscore_must_use,
        reason = "Header addition failure is non-fatal"
    )]
    let _ = res.add_header("Content-Type", XML_CONTENT_TYPE, true);
    #[expect(
        clippy::let_underscore_must_use,
        reason = "Write body failure is non-fatal"
    )]
    let _ = res.write_body(xml);
}
