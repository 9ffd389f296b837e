//! Error type for site rendering and request handling.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use quill_blog::BlogError;

#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Reading site content failed.
    #[error(transparent)]
    Blog(#[from] BlogError),

    /// A blocking render task panicked or was cancelled.
    #[error("render task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl SiteError {
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Blog(err) if err.is_not_found())
    }
}

impl IntoResponse for SiteError {
    fn into_response(self) -> Response {
        match &self {
            Self::Blog(err) if err.is_not_found() => {
                tracing::debug!(error = %err, "not found");
                StatusCode::NOT_FOUND.into_response()
            }
            Self::Blog(err) => {
                tracing::error!(error = %err, source = ?std::error::Error::source(err), "read error");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
            Self::Task(err) => {
                tracing::error!(error = %err, "render task failed");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
