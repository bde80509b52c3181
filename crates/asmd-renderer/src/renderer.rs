//! pulldown-cmark backed Markdown renderer.

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, html};

use crate::Converter;
use crate::html::{escape_html, is_external_link};

/// Markdown renderer producing an HTML fragment.
///
/// GFM extensions are enabled by default. External links can optionally be
/// rewritten to open in a new browsing context.
#[derive(Clone, Debug)]
pub struct MarkdownRenderer {
    gfm: bool,
    external_links_new_tab: bool,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer {
    /// Create a new renderer with GFM enabled and links left untouched.
    #[must_use]
    pub fn new() -> Self {
        Self {
            gfm: true,
            external_links_new_tab: false,
        }
    }

    /// Enable or disable GitHub Flavored Markdown features.
    ///
    /// When enabled, the parser supports:
    /// - Tables
    /// - Strikethrough (`~~text~~`)
    /// - Task lists (`- [ ] item`)
    /// - Footnotes
    /// - Heading attributes (`# Title {#id}`)
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Open external links with `target="_blank"`.
    #[must_use]
    pub fn with_external_links_in_new_tab(mut self, enabled: bool) -> Self {
        self.external_links_new_tab = enabled;
        self
    }

    /// Get parser options based on GFM configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_FOOTNOTES
                | Options::ENABLE_HEADING_ATTRIBUTES
        } else {
            Options::empty()
        }
    }

    /// Render markdown text to HTML.
    #[must_use]
    pub fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.parser_options());
        let mut out = String::with_capacity(markdown.len() * 3 / 2);

        if self.external_links_new_tab {
            html::push_html(&mut out, NewTabLinks::new(parser));
        } else {
            html::push_html(&mut out, parser);
        }

        out
    }
}

impl Converter for MarkdownRenderer {
    fn to_html(&self, markdown: &str) -> String {
        self.render(markdown)
    }
}

/// Event adapter replacing external link tags with raw anchors carrying
/// `target="_blank"`.
struct NewTabLinks<I> {
    inner: I,
    /// One flag per open link: whether its start tag was rewritten.
    open: Vec<bool>,
}

impl<I> NewTabLinks<I> {
    fn new(inner: I) -> Self {
        Self {
            inner,
            open: Vec::new(),
        }
    }
}

impl<'a, I: Iterator<Item = Event<'a>>> Iterator for NewTabLinks<I> {
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.inner.next()? {
            Event::Start(Tag::Link {
                dest_url, title, ..
            }) if is_external_link(&dest_url) => {
                self.open.push(true);
                let title_attr = if title.is_empty() {
                    String::new()
                } else {
                    format!(r#" title="{}""#, escape_html(&title))
                };
                Some(Event::InlineHtml(CowStr::from(format!(
                    r#"<a href="{}"{title_attr} target="_blank" rel="noopener noreferrer">"#,
                    escape_html(&dest_url)
                ))))
            }
            event @ Event::Start(Tag::Link { .. }) => {
                self.open.push(false);
                Some(event)
            }
            Event::End(TagEnd::Link) if self.open.pop() == Some(true) => {
                Some(Event::InlineHtml(CowStr::Borrowed("</a>")))
            }
            event => Some(event),
        }
    }
}
