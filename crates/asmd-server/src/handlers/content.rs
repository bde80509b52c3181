//! Content endpoint.
//!
//! Serves every GET path: Markdown pages and directory index documents are
//! rendered to full HTML documents, any other file is returned unmodified.

use std::sync::Arc;

use asmd_site::{PageContext, ResolveError};
use axum::extract::State;
use axum::http::{HeaderMap, Uri, header};
use axum::response::{Html, IntoResponse, Response};
use mime_guess::Mime;

use crate::error::ServerError;
use crate::state::AppState;

/// Loaded response payload.
enum Content {
    /// Rendered HTML document.
    Page(String),
    /// Raw file bytes with a guessed content type.
    Asset { body: Vec<u8>, mime: Mime },
}

/// Handle GET for any path.
pub(crate) async fn get_content(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    uri: Uri,
) -> Result<Response, ServerError> {
    let host = request_host(&headers, &uri);
    let path = uri.path().to_owned();

    // Tree building and file reads block on the filesystem
    let content =
        tokio::task::spawn_blocking(move || load_content(&state, host.as_deref(), &path)).await??;

    Ok(match content {
        Content::Page(html) => Html(html).into_response(),
        Content::Asset { body, mime } => {
            ([(header::CONTENT_TYPE, mime.to_string())], body).into_response()
        }
    })
}

/// Resolve the request and load its page or asset.
fn load_content(state: &AppState, host: Option<&str>, path: &str) -> Result<Content, ServerError> {
    let resolved = state.resolver.resolve(host, path)?;

    if resolved.is_page() {
        tracing::debug!(
            subdomain = %resolved.subdomain,
            source = %resolved.target.display(),
            "Rendering page"
        );
        let context = PageContext::from(resolved);
        return Ok(Content::Page(state.renderer.render(&context)));
    }

    let mime = mime_guess::from_path(&resolved.target).first_or_octet_stream();
    let body = std::fs::read(&resolved.target).map_err(|e| {
        tracing::warn!(path = %resolved.target.display(), error = %e, "Asset unreadable");
        ResolveError::NotFound(path.to_owned())
    })?;
    tracing::debug!(path = %resolved.target.display(), mime = %mime, "Serving raw asset");
    Ok(Content::Asset { body, mime })
}

/// Host the request was addressed to.
///
/// Prefers the `Host` header and falls back to the URI authority used by
/// HTTP/2 requests.
fn request_host(headers: &HeaderMap, uri: &Uri) -> Option<String> {
    headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| uri.host())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_request_host_from_header() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("docs.example.com"));
        let uri: Uri = "/guide".parse().unwrap();

        assert_eq!(
            request_host(&headers, &uri),
            Some("docs.example.com".to_owned())
        );
    }

    #[test]
    fn test_request_host_from_authority() {
        let uri: Uri = "http://blog.example.com/post".parse().unwrap();

        assert_eq!(
            request_host(&HeaderMap::new(), &uri),
            Some("blog.example.com".to_owned())
        );
    }

    #[test]
    fn test_request_host_missing() {
        let uri: Uri = "/".parse().unwrap();
        assert_eq!(request_host(&HeaderMap::new(), &uri), None);
    }
}
