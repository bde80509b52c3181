//! Server error types.

use asmd_site::ResolveError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Body returned for every request that maps to no content.
pub(crate) const NOT_FOUND_BODY: &str = "Path not found.";

/// Error returned by request handlers.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    #[error("{0}")]
    NotFound(#[from] ResolveError),

    #[error("Render task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound(e) => {
                tracing::debug!(error = %e, "Request not found");
                (StatusCode::NOT_FOUND, NOT_FOUND_BODY).into_response()
            }
            Self::Join(_) => {
                tracing::error!(error = %self, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.").into_response()
            }
        }
    }
}
