//! Content tree navigation, path resolution and page composition for asmd.
//!
//! This crate provides:
//! - [`PathResolver`]: maps a request host and path to a page or raw asset
//! - [`TreeBuilder`]: builds the navigation tree expanded along the viewed page
//! - [`render_navbar`]: renders that tree as nested lists
//! - [`PageRenderer`]: composes the complete HTML document
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use asmd_renderer::MarkdownRenderer;
//! use asmd_site::{ContentLayout, PageContext, PageRenderer, PathResolver};
//!
//! let layout = ContentLayout::new("pub");
//! let resolver = PathResolver::new(layout.clone());
//! let converter = Arc::new(MarkdownRenderer::new().with_external_links_in_new_tab(true));
//! let renderer = PageRenderer::new(converter, layout);
//!
//! if let Ok(resolved) = resolver.resolve(Some("docs.example.com"), "/guide") {
//!     if resolved.is_page() {
//!         let _html = renderer.render(&PageContext::from(resolved));
//!     }
//! }
//! ```

mod layout;
mod nav;
mod navbar;
mod page;
mod resolve;

pub use layout::{ContentLayout, MARKDOWN_SUFFIX, STYLE_FILENAME, SUBTITLE_FILENAME, TITLE_FILENAME};
pub use nav::{NavEntry, TreeBuilder, is_on_goal_path};
pub use navbar::{INTENDED_CLASS, NOT_INTENDED_CLASS, render_navbar, url_for};
pub use page::{PageContext, PageRenderer};
pub use resolve::{PathResolver, ResolveError, Resolved, TargetKind, clean_url_path};
