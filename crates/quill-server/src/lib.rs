//! HTTP server for a quill site.
//!
//! Serves a site root: page templates rendered with the site settings, blog
//! posts and their listing, the Atom feed, static files and ACME challenge
//! tokens. Every request reads from the file system; nothing is cached.

mod error;
mod mime;
mod paths;
mod routes;
mod site;
mod state;
mod visitor;

use axum::http::Request;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::Level;

pub use error::SiteError;
pub use routes::router;
pub use site::Site;
pub use state::AppState;
pub use visitor::Visitor;

/// The router with request tracing.
pub fn app(state: AppState) -> Router {
    router(state).layer(
        TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
            tracing::span!(
                Level::INFO,
                "http_request",
                method = %request.method(),
                path = %request.uri().path(),
            )
        }),
    )
}

/// Serve `site` on `addr` until the process is stopped.
pub async fn serve(site: Site, addr: &str) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "starting site server");

    axum::serve(listener, app(AppState::new(site))).await
}
