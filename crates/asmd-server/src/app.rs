//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
///
/// Every GET path is content: the handler decides between a rendered page,
/// a raw asset and the not-found body.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let routes = Router::new()
        .route("/", get(handlers::content::get_content))
        .route("/{*path}", get(handlers::content::get_content));

    security::with_security_headers(routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
