//! HTML helpers shared by the renderer and page composition.

/// Escape text for use in HTML element content and quoted attributes.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Check whether a link points outside the site.
///
/// Protocol-relative URLs (`//host/path`) and URLs with a scheme followed by
/// `://` are external. Fragments, absolute paths, relative paths and
/// `mailto:`-style links are not.
#[must_use]
pub fn is_external_link(url: &str) -> bool {
    if url.starts_with("//") {
        return true;
    }
    url.split_once("://").is_some_and(|(scheme, _)| {
        scheme
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic())
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}
