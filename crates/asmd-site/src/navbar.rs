//! Navigation sidebar markup.

use asmd_renderer::escape_html;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::nav::NavEntry;

/// Characters percent-encoded inside a URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// CSS class of the marker on entries leading to the current page.
pub const INTENDED_CLASS: &str = "nav-intended";

/// CSS class of the marker on every other entry.
pub const NOT_INTENDED_CLASS: &str = "nav-not-intended";

/// Absolute URL path for a slash-separated path relative to the content root.
///
/// Each segment is percent-encoded; the result is not HTML-escaped.
#[must_use]
pub fn url_for(relative_path: &str) -> String {
    let mut url = String::with_capacity(relative_path.len() + 1);
    for segment in relative_path.split('/').filter(|s| !s.is_empty()) {
        url.push('/');
        url.extend(utf8_percent_encode(segment, PATH_SEGMENT));
    }
    if url.is_empty() {
        url.push('/');
    }
    url
}

/// Render the navigation tree as a `<nav>` element.
///
/// The root is the single top-level list item; children follow as nested
/// lists only where an entry has any.
#[must_use]
pub fn render_navbar(root: &NavEntry) -> String {
    let mut out = String::from("<nav>");
    render_list(std::slice::from_ref(root), &mut out);
    out.push_str("</nav>");
    out
}

fn render_list(entries: &[NavEntry], out: &mut String) {
    out.push_str("<ul>");
    for entry in entries {
        render_item(entry, out);
    }
    out.push_str("</ul>");
}

fn render_item(entry: &NavEntry, out: &mut String) {
    let marker = if entry.on_goal_path {
        INTENDED_CLASS
    } else {
        NOT_INTENDED_CLASS
    };

    out.push_str("<li><a href=\"");
    out.push_str(&escape_html(&url_for(&entry.relative_path)));
    out.push_str("\"><span class=\"");
    out.push_str(marker);
    out.push_str("\"></span>");
    out.push_str(&escape_html(&entry.display_name));
    if entry.is_dir {
        out.push('/');
    }
    out.push_str("</a>");

    if !entry.children.is_empty() {
        render_list(&entry.children, out);
    }

    out.push_str("</li>");
}
