//! Resource supplier backing the PROPFIND handlers.

mod filesystem;

use std::sync::Arc;

use salvo::async_trait;

use crate::error::AppResult;
use davstat_core::error::CoreError;

pub use filesystem::FsSite;

pub struct SiteHandler {
    pub site: Arc<FsSite>,
}

impl SiteHandler {
    #[must_use]
    pub fn new(site: FsSite) -> Self {
        Self {
            site: Arc::new(site),
        }
    }
}

#[async_trait]
impl salvo::Handler for SiteHandler {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(Arc::clone(&self.site));
    }
}

/// ## Summary
/// Retrieves the served site from the depot.
///
/// ## Errors
/// Returns an error if no site was injected into the depot.
pub fn get_site_from_depot(depot: &salvo::Depot) -> AppResult<Arc<FsSite>> {
    depot
        .obtain::<Arc<FsSite>>()
        .cloned()
        .map_err(|_err| CoreError::InvariantViolation("Site not found in depot").into())
}
