//! Application state.
//!
//! Shared state for all request handlers. Nothing in it is mutated after
//! startup, so requests never contend for it.

use asmd_site::{PageRenderer, PathResolver};

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Maps request host and path to content.
    pub(crate) resolver: PathResolver,
    /// Composes HTML documents for Markdown pages.
    pub(crate) renderer: PageRenderer,
}
