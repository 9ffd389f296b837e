use axum::extract::State;
use axum::http::header;
use axum::http::Uri;
use axum::response::IntoResponse;
use axum::response::Response;

use super::blocking;
use super::found;
use crate::error::SiteError;
use crate::paths;
use crate::state::AppState;

/// Serve an ACME HTTP-01 challenge file from the site root.
pub async fn challenge(State(state): State<AppState>, uri: Uri) -> Result<Response, SiteError> {
    let file = paths::clean(uri.path());
    let site = state.site.clone();

    blocking(move || {
        if !site.is_file(&file) {
            tracing::debug!(file = %file, "unknown challenge");
            return Ok(found("/"));
        }
        let token = site.read(&file)?;
        Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], token).into_response())
    })
    .await
}
