// WebDAV glue around the rendering engine: header parsing, body extraction
// and the 207 Multi-Status response writer.

use salvo::Router;

use davstat_rfc::rfc::dav::core::method::is_webdav_method;

pub mod extract;
pub mod method;
pub mod response;

#[must_use]
pub fn routes() -> Router {
    Router::new()
        .push(Router::with_path("{**path}").options(method::options::options))
        .push(
            // PROPFIND method
            Router::with_path("{**path}")
                .filter_fn(|req, _| req.method().as_str() == "PROPFIND")
                .goal(method::propfind::propfind),
        )
        .push(
            // Remaining WebDAV methods
            Router::with_path("{**path}")
                .filter_fn(|req, _| {
                    let method = req.method().as_str();
                    method != "PROPFIND" && is_webdav_method(method)
                })
                .goal(method::not_implemented::not_implemented),
        )
}
