use axum::extract::Query;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::http::Uri;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Response;
use chrono::Utc;
use serde::Deserialize;

use super::blocking;
use super::found;
use super::pages;
use crate::error::SiteError;
use crate::mime;
use crate::paths;
use crate::state::AppState;
use crate::visitor::Visitor;

#[derive(Debug, Deserialize)]
pub struct ListingQuery {
    id: Option<String>,
}

/// `GET /blog?id=N`: the listing fragment loaded by the page's "more" link.
pub async fn listing(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ListingQuery>,
) -> Result<Response, SiteError> {
    let Some(start) = query.id.as_deref().and_then(|id| id.parse::<usize>().ok()) else {
        return Ok(found("/"));
    };

    let visible_to_drafts = Visitor::from_headers(&headers).is_local();
    let site = state.site.clone();
    let html = blocking(move || site.blog(visible_to_drafts, start)).await?;
    Ok(Html(html).into_response())
}

pub async fn feed(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, SiteError> {
    let visitor = Visitor::from_headers(&headers);
    let site = state.site.clone();
    let xml = blocking(move || site.feed(&visitor, Utc::now())).await?;
    Ok(([(header::CONTENT_TYPE, "application/atom+xml")], xml).into_response())
}

/// `GET /blog/{slug}`: a post page. Unknown slugs that look like static
/// files are served as such, anything else goes home.
pub async fn post(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Response, SiteError> {
    let path = paths::clean(&uri.path().to_lowercase());
    let Some(slug) = path.strip_prefix("/blog/").map(str::to_string) else {
        return Ok(found("/"));
    };

    let site = state.site.clone();
    let lookup = slug.clone();
    if let Some(html) = blocking(move || site.post(&lookup)).await? {
        return Ok(Html(html).into_response());
    }

    if paths::extension(&slug).and_then(mime::content_type).is_some() {
        return pages::serve(&state, uri.path(), &headers).await;
    }

    tracing::debug!(slug = %slug, "no such post");
    Ok(found("/"))
}
