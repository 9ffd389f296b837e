//! Route definitions for the site server.
//!
//! ## Routes
//!
//! - `GET /blog/atom.xml` - Atom feed
//! - `GET /blog?id=N` - Post listing starting at the Nth post
//! - `GET /blog/{slug}` - A single post
//! - `GET /.well-known/acme-challenge/{token}` - ACME HTTP-01 challenge
//! - Site sources and templates - redirect to `/`
//! - Anything else - a page template or static file below the site root

mod acme;
mod blog;
mod pages;

use axum::http::header;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;
use axum::Router;

use crate::error::SiteError;
use crate::state::AppState;

/// Files in the site root that are never served.
const PROTECTED: &[&str] = &[
    "/.git",
    "/.git/{*rest}",
    "/.quill.toml",
    "/admin",
    "/admin.cfg",
    "/app.json",
    "/header.html",
    "/meta.html",
    "/package.json",
    "/post.css",
    "/post.html",
    "/quill.toml",
    "/site.css",
    "/stream.html",
    "/web.config",
];

/// Build the complete site router.
pub fn router(state: AppState) -> Router {
    let mut router = Router::new();
    for path in PROTECTED {
        router = router.route(path, get(home));
    }

    router
        .route("/blog", get(blog::listing))
        .route("/blog/atom.xml", get(blog::feed))
        .route("/blog/{*slug}", get(blog::post))
        .route("/.well-known/acme-challenge/{token}", get(acme::challenge))
        .fallback(pages::page)
        .with_state(state)
}

async fn home() -> Response {
    found("/")
}

/// 302 to `location`.
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

/// 301 to `location`.
fn moved_permanently(location: &str) -> Response {
    (
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, location.to_string())],
    )
        .into_response()
}

/// Run file system work off the async workers.
async fn blocking<F, T>(f: F) -> Result<T, SiteError>
where
    F: FnOnce() -> Result<T, SiteError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await?
}
