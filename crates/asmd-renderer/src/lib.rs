//! Markdown to HTML conversion for asmd pages.
//!
//! This crate provides [`MarkdownRenderer`], a thin layer over pulldown-cmark
//! that produces the article body of a page. Callers depend on the
//! [`Converter`] trait so page composition can be exercised with any
//! conversion function.
//!
//! # Example
//!
//! ```
//! use asmd_renderer::{Converter, MarkdownRenderer};
//!
//! let renderer = MarkdownRenderer::new().with_external_links_in_new_tab(true);
//! let html = renderer.to_html("See [docs](https://example.com).");
//! assert!(html.contains(r#"target="_blank""#));
//! ```

mod html;
mod renderer;

pub use html::{escape_html, is_external_link};
pub use renderer::MarkdownRenderer;

/// Converts Markdown source into an HTML fragment.
pub trait Converter: Send + Sync {
    /// Convert `markdown` to HTML.
    fn to_html(&self, markdown: &str) -> String;
}
