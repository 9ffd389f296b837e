use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::http::Method;
use axum::http::StatusCode;
use axum::http::Uri;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Response;

use super::blocking;
use super::found;
use super::moved_permanently;
use crate::error::SiteError;
use crate::mime;
use crate::paths;
use crate::site::Site;
use crate::state::AppState;
use crate::visitor::Visitor;

const INDEX: &str = "index.html";

/// Fallback for every path without a route of its own.
pub async fn page(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Response, SiteError> {
    if method != Method::GET && method != Method::HEAD {
        return Ok(found("/"));
    }
    serve(&state, uri.path(), &headers).await
}

pub(super) async fn serve(
    state: &AppState,
    path: &str,
    headers: &HeaderMap,
) -> Result<Response, SiteError> {
    let site = state.site.clone();
    let path = path.to_string();
    let visitor = Visitor::from_headers(headers);
    blocking(move || respond(&site, &path, &visitor)).await
}

fn respond(site: &Site, requested: &str, visitor: &Visitor) -> Result<Response, SiteError> {
    let mut pathname = paths::clean(&requested.to_lowercase());
    if pathname != "/" && requested.ends_with('/') {
        pathname.push('/');
    }

    if let Some(directory) = pathname.strip_suffix("/index.html") {
        let location = format!("/{}", directory.trim_start_matches('/'));
        return Ok(moved_permanently(&location));
    }

    let file = if pathname.ends_with('/') {
        format!("{pathname}{INDEX}")
    } else {
        pathname.clone()
    };
    let file = file.trim_start_matches('/');
    let extension = paths::extension(file);

    if site.is_directory(file) {
        return Ok(found(&format!("{pathname}/")));
    }

    if let Some(content_type) = extension.and_then(mime::content_type) {
        return match site.read(file) {
            Ok(bytes) => Ok((
                [
                    (header::CONTENT_TYPE, content_type),
                    (header::CACHE_CONTROL, "private, max-age=0"),
                    (header::EXPIRES, "-1"),
                ],
                bytes,
            )
                .into_response()),
            Err(err) if err.is_not_found() => {
                Ok((StatusCode::NOT_FOUND, [(header::CONTENT_TYPE, content_type)]).into_response())
            }
            Err(err) => Err(err),
        };
    }

    if !site.is_file(file) {
        if file == INDEX {
            tracing::warn!("site has no {INDEX}");
            return Ok(StatusCode::NOT_FOUND.into_response());
        }
        return Ok(found(paths::parent(pathname.trim_end_matches('/'))));
    }

    if extension != Some("html") {
        return Ok(StatusCode::NOT_FOUND.into_response());
    }

    let html = site.page(file, visitor)?;
    Ok(Html(html).into_response())
}
