//! Application state shared across all request handlers.

use crate::site::Site;

/// Shared application state available to all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The site being served.
    pub site: Site,
}

impl AppState {
    #[must_use]
    pub fn new(site: Site) -> Self {
        tracing::info!(
            root = %site.root(),
            name = %site.settings().name,
            "application state initialized"
        );
        Self { site }
    }
}
