mod dav;

use salvo::Router;

/// ## Summary
/// Constructs the router serving every path of the site over `WebDAV`.
#[must_use]
pub fn routes() -> Router {
    dav::routes()
}
