//! PROPFIND method handler.

use salvo::http::StatusCode;
use salvo::{Depot, Request, Response, handler};

use crate::app::api::dav::extract::body::parse_propfind_body;
use crate::app::api::dav::extract::headers::{is_json_body, parse_depth};
use crate::app::api::dav::response::write_multistatus;
use crate::host::get_site_from_depot;

/// ## Summary
/// Handles PROPFIND requests.
///
/// Parses the request body, renders the multistatus document for the
/// requested path on a blocking thread and writes it out.
///
/// ## Side Effects
/// - Reads the served directory tree
/// - Returns 207 Multi-Status XML response
///
/// ## Errors
/// Returns 400 for malformed requests and 500 for rendering failures.
#[handler]
#[tracing::instrument(skip_all, fields(
    method = "PROPFIND",
    path = %req.uri().path()
))]
pub async fn propfind(req: &mut Request, res: &mut Response, depot: &Depot) {
    tracing::info!("Handling PROPFIND request");

    let depth = parse_depth(req);
    let json = is_json_body(req);
    tracing::debug!(%depth, json, "Depth header parsed");

    let site = match get_site_from_depot(depot) {
        Ok(site) => site,
        Err(e) => {
            tracing::error!(error = %e, "Failed to get site");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            return;
        }
    };

    let body = match req.payload().await {
        Ok(bytes) => bytes.to_vec(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to read request body");
            res.status_code(StatusCode::BAD_REQUEST);
            return;
        }
    };

    let request = match parse_propfind_body(&body, json) {
        Ok(request) => request,
        Err(e) => {
            tracing::error!(error = %e, "Failed to parse PROPFIND request");
            res.status_code(e.status_code());
            return;
        }
    };

    let path = req.uri().path().to_owned();
    let rendered =
        tokio::task::spawn_blocking(move || site.render_propfind(&path, request, depth)).await;

    let (xml, depth) = match rendered {
        Ok(Ok(rendered)) => rendered,
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Failed to render PROPFIND response");
            res.status_code(e.status_code());
            return;
        }
        Err(e) => {
            tracing::error!(error = %e, "PROPFIND render task failed");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            return;
        }
    };

    tracing::debug!(%xml, "WebDAV response");
    write_multistatus(res, xml, depth);
}
