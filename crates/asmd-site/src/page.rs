//! Full HTML page composition.
//!
//! [`PageRenderer`] stitches together the inlined style sheet, the header
//! slot, the navigation sidebar and the converted article. Every piece that
//! cannot be read degrades to an empty section instead of failing the page.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use asmd_renderer::{Converter, escape_html};

use crate::layout::ContentLayout;
use crate::nav::TreeBuilder;
use crate::navbar::{render_navbar, url_for};
use crate::resolve::Resolved;

/// Everything needed to render one page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageContext {
    /// Subdomain serving the page.
    pub subdomain: String,
    /// Content root the navigation is built from.
    pub root: PathBuf,
    /// Markdown source of the article (the goal path of the navigation).
    pub source: PathBuf,
    /// Slash-separated directory the page lives in, relative to the root.
    pub base: String,
}

impl From<Resolved> for PageContext {
    fn from(resolved: Resolved) -> Self {
        Self {
            subdomain: resolved.subdomain,
            root: resolved.root,
            source: resolved.target,
            base: resolved.base,
        }
    }
}

/// Composes complete HTML documents.
pub struct PageRenderer {
    converter: Arc<dyn Converter>,
    tree_builder: TreeBuilder,
    layout: ContentLayout,
}

impl PageRenderer {
    /// Create a page renderer converting articles with `converter`.
    #[must_use]
    pub fn new(converter: Arc<dyn Converter>, layout: ContentLayout) -> Self {
        Self {
            converter,
            tree_builder: TreeBuilder::new(layout.clone()),
            layout,
        }
    }

    /// Render the full document for `context`.
    #[must_use]
    pub fn render(&self, context: &PageContext) -> String {
        let title = read_text(&self.layout.title_path(&context.root));
        let subtitle = read_text(&self.layout.subtitle_path(&context.root));
        let document_title = if title.is_empty() {
            &context.subdomain
        } else {
            &title
        };

        let mut html = String::with_capacity(8192);
        html.push_str("<!doctype html><html><head><meta charset=\"utf-8\">");
        html.push_str("<title>");
        html.push_str(&escape_html(document_title));
        html.push_str("</title>");
        html.push_str("<base href=\"");
        html.push_str(&escape_html(&base_href(&context.base)));
        html.push_str("\">");
        html.push_str(&self.render_style(&context.root));
        html.push_str("</head><body>");
        html.push_str("<header><a href=\"/\"><h1 id=\"title\">");
        html.push_str(&escape_html(&title));
        html.push_str("</h1><h3 id=\"subtitle\">");
        html.push_str(&escape_html(&subtitle));
        html.push_str("</h3></a></header>");
        html.push_str(&self.render_navbar(context));
        html.push_str(&self.render_article(&context.source));
        html.push_str("</body></html>");
        html
    }

    /// Navigation sidebar rooted at the content root, expanded along the page.
    fn render_navbar(&self, context: &PageContext) -> String {
        let tree = self.tree_builder.build(&context.root, &context.source);
        render_navbar(&tree)
    }

    /// Inlined style sheet, or nothing if it cannot be read.
    fn render_style(&self, root: &Path) -> String {
        let path = self.layout.style_path(root);
        match fs::read_to_string(&path) {
            Ok(css) => format!("<style>{css}</style>"),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Style sheet unavailable");
                String::new()
            }
        }
    }

    /// Converted article, or nothing if the source cannot be read.
    fn render_article(&self, source: &Path) -> String {
        match fs::read(source) {
            Ok(bytes) => {
                let markdown = String::from_utf8_lossy(&bytes);
                format!(
                    "<article class=\"rest\">{}</article>",
                    self.converter.to_html(&markdown)
                )
            }
            Err(e) => {
                tracing::warn!(path = %source.display(), error = %e, "Article unreadable");
                String::new()
            }
        }
    }
}

/// `<base>` target making relative links resolve against the page's directory.
fn base_href(base: &str) -> String {
    let url = url_for(base);
    if url.ends_with('/') {
        url
    } else {
        format!("{url}/")
    }
}

/// Trimmed text file content, or empty if unreadable.
fn read_text(path: &Path) -> String {
    fs::read_to_string(path)
        .map(|s| s.trim().to_owned())
        .unwrap_or_default()
}
