//! Request to filesystem resolution.
//!
//! Maps a request host and URL path to a file inside one content root:
//!
//! 1. The first label of the host selects the subdomain, falling back to the
//!    default subdomain when no such content root exists.
//! 2. The URL path is cleaned lexically and joined onto the root.
//! 3. A missing path is retried once with the Markdown suffix appended.
//! 4. Directories are pages only through their index document.

use std::fs;
use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;

use crate::layout::{ContentLayout, MARKDOWN_SUFFIX};

/// Error returned when a request cannot be mapped to content.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ResolveError {
    /// Neither the path nor its suffixed variant exists, or a directory has no
    /// index document.
    #[error("Path not found: {0}")]
    NotFound(String),
}

/// How a resolved target is served.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetKind {
    /// Index document of a requested directory.
    DirectoryIndex,
    /// Markdown file rendered as a page.
    Page,
    /// Any other file, served byte-for-byte.
    Asset,
}

/// Result of resolving a request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolved {
    /// Subdomain whose content root serves the request.
    pub subdomain: String,
    /// Content root of the subdomain.
    pub root: PathBuf,
    /// File to render or serve.
    pub target: PathBuf,
    /// Slash-separated directory of the target relative to the root.
    pub base: String,
    /// How the target is served.
    pub kind: TargetKind,
}

impl Resolved {
    /// Whether the target is rendered as an HTML page.
    #[must_use]
    pub fn is_page(&self) -> bool {
        matches!(self.kind, TargetKind::DirectoryIndex | TargetKind::Page)
    }
}

/// Which candidate of the suffix retry matched.
enum Attempt {
    Exact,
    WithSuffix,
}

/// Resolves requests against a [`ContentLayout`].
#[derive(Clone, Debug)]
pub struct PathResolver {
    layout: ContentLayout,
}

impl PathResolver {
    /// Create a resolver for `layout`.
    #[must_use]
    pub fn new(layout: ContentLayout) -> Self {
        Self { layout }
    }

    /// Layout this resolver reads from.
    #[must_use]
    pub fn layout(&self) -> &ContentLayout {
        &self.layout
    }

    /// Pick the subdomain serving `host`.
    ///
    /// The candidate is the first `.`-separated label with any port removed.
    /// It is used only if it names an existing content root.
    #[must_use]
    pub fn subdomain_for_host(&self, host: Option<&str>) -> String {
        let candidate = host
            .and_then(|h| h.split(':').next())
            .and_then(|h| h.split('.').next())
            .filter(|label| is_plain_component(label));

        match candidate {
            Some(label) if self.layout.content_root(label).is_dir() => label.to_owned(),
            _ => self.layout.default_subdomain.clone(),
        }
    }

    /// Resolve a request to a page or asset.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NotFound`] if neither the path nor the path with
    /// the Markdown suffix exists, or if a directory lacks its index document.
    pub fn resolve(&self, host: Option<&str>, url_path: &str) -> Result<Resolved, ResolveError> {
        let not_found = || ResolveError::NotFound(url_path.to_owned());

        let subdomain = self.subdomain_for_host(host);
        let root = self.layout.content_root(&subdomain);
        let mut segments = clean_url_path(url_path).ok_or_else(not_found)?;

        let exact = segments.iter().fold(root.clone(), |path, s| path.join(s));
        let (attempt, path, metadata) = match fs::metadata(&exact) {
            Ok(metadata) => (Attempt::Exact, exact, metadata),
            // The content root itself has no suffixed variant
            Err(_) if segments.is_empty() => return Err(not_found()),
            Err(_) => {
                let suffixed = with_suffix(&exact);
                let metadata = fs::metadata(&suffixed).map_err(|_| not_found())?;
                if let Some(last) = segments.last_mut() {
                    last.push_str(MARKDOWN_SUFFIX);
                }
                (Attempt::WithSuffix, suffixed, metadata)
            }
        };

        if metadata.is_dir() {
            let index = path.join(&self.layout.index_filename);
            if !index.is_file() {
                tracing::debug!(dir = %path.display(), "Directory has no index document");
                return Err(not_found());
            }
            return Ok(Resolved {
                subdomain,
                root,
                target: index,
                base: segments.join("/"),
                kind: TargetKind::DirectoryIndex,
            });
        }

        let kind = match attempt {
            Attempt::WithSuffix => TargetKind::Page,
            Attempt::Exact if has_markdown_suffix(&path) => TargetKind::Page,
            Attempt::Exact => TargetKind::Asset,
        };
        let parent = segments.len().saturating_sub(1);

        Ok(Resolved {
            subdomain,
            root,
            target: path,
            base: segments[..parent].join("/"),
            kind,
        })
    }
}

/// Split a URL path into decoded segments, dropping `.` and resolving `..`.
///
/// `..` never climbs above the root. Returns `None` if a decoded segment
/// contains a path separator or NUL byte.
#[must_use]
pub fn clean_url_path(url_path: &str) -> Option<Vec<String>> {
    let mut segments: Vec<String> = Vec::new();
    for raw in url_path.split('/') {
        let segment = percent_decode_str(raw).decode_utf8().ok()?;
        match &*segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s if s.contains(['/', '\\', '\0']) => return None,
            s => segments.push(s.to_owned()),
        }
    }
    Some(segments)
}

fn is_plain_component(s: &str) -> bool {
    !s.is_empty() && s != "." && s != ".." && !s.contains(['/', '\\', '\0'])
}

fn with_suffix(path: &Path) -> PathBuf {
    let mut suffixed = path.as_os_str().to_owned();
    suffixed.push(MARKDOWN_SUFFIX);
    PathBuf::from(suffixed)
}

fn has_markdown_suffix(path: &Path) -> bool {
    path.as_os_str()
        .to_string_lossy()
        .ends_with(MARKDOWN_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Create `<tmp>/default` and `<tmp>/docs` content roots.
    fn setup() -> (tempfile::TempDir, PathResolver) {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(temp_dir.path().join("default")).unwrap();
        fs::create_dir_all(temp_dir.path().join("docs")).unwrap();
        let resolver = PathResolver::new(ContentLayout::new(temp_dir.path()));
        (temp_dir, resolver)
    }

    #[test]
    fn test_clean_url_path() {
        assert_eq!(clean_url_path("/"), Some(vec![]));
        assert_eq!(clean_url_path("/a/./b/"), Some(vec!["a".to_owned(), "b".to_owned()]));
        assert_eq!(clean_url_path("/a/../b"), Some(vec!["b".to_owned()]));
        assert_eq!(clean_url_path("/../../etc/passwd"), Some(vec!["etc".to_owned(), "passwd".to_owned()]));
        assert_eq!(clean_url_path("/my%20notes"), Some(vec!["my notes".to_owned()]));
        assert_eq!(clean_url_path("/a%2Fb"), None);
        assert_eq!(clean_url_path("/%2e%2e/x"), Some(vec!["x".to_owned()]));
    }

    #[test]
    fn test_subdomain_for_host() {
        let (_temp_dir, resolver) = setup();
        assert_eq!(resolver.subdomain_for_host(Some("docs.example.com")), "docs");
        assert_eq!(resolver.subdomain_for_host(Some("docs.example.com:8080")), "docs");
        assert_eq!(resolver.subdomain_for_host(Some("docs:8080")), "docs");
        assert_eq!(resolver.subdomain_for_host(Some("blog.example.com")), "default");
        assert_eq!(resolver.subdomain_for_host(Some("localhost:8080")), "default");
        assert_eq!(resolver.subdomain_for_host(Some("..")), "default");
        assert_eq!(resolver.subdomain_for_host(None), "default");
    }

    #[test]
    fn test_missing_path_not_found() {
        let (_temp_dir, resolver) = setup();
        assert_eq!(
            resolver.resolve(None, "/missing"),
            Err(ResolveError::NotFound("/missing".to_owned()))
        );
    }

    #[test]
    fn test_directory_without_index_not_found() {
        let (temp_dir, resolver) = setup();
        fs::create_dir(temp_dir.path().join("default/docs")).unwrap();
        fs::write(temp_dir.path().join("default/docs/page.md"), "").unwrap();

        assert!(matches!(
            resolver.resolve(None, "/docs"),
            Err(ResolveError::NotFound(_))
        ));
    }

    #[test]
    fn test_directory_with_index() {
        let (temp_dir, resolver) = setup();
        let root = temp_dir.path().join("default");
        fs::create_dir(root.join("guide")).unwrap();
        fs::write(root.join("guide/view.md"), "# Guide").unwrap();

        let resolved = resolver.resolve(None, "/guide").unwrap();

        assert_eq!(
            resolved,
            Resolved {
                subdomain: "default".to_owned(),
                root: root.clone(),
                target: root.join("guide/view.md"),
                base: "guide".to_owned(),
                kind: TargetKind::DirectoryIndex,
            }
        );
        assert!(resolved.is_page());
    }

    #[test]
    fn test_root_directory_index() {
        let (temp_dir, resolver) = setup();
        let root = temp_dir.path().join("default");
        fs::write(root.join("view.md"), "# Home").unwrap();

        let resolved = resolver.resolve(Some("example.com"), "/").unwrap();

        assert_eq!(resolved.target, root.join("view.md"));
        assert_eq!(resolved.base, "");
        assert_eq!(resolved.kind, TargetKind::DirectoryIndex);
    }

    #[test]
    fn test_suffix_retry() {
        let (temp_dir, resolver) = setup();
        let root = temp_dir.path().join("default");
        fs::write(root.join("notes.md"), "# Notes").unwrap();

        let resolved = resolver.resolve(None, "/notes").unwrap();

        assert_eq!(resolved.target, root.join("notes.md"));
        assert_eq!(resolved.base, "");
        assert_eq!(resolved.kind, TargetKind::Page);
    }

    #[test]
    fn test_suffix_retry_nested_base() {
        let (temp_dir, resolver) = setup();
        let root = temp_dir.path().join("default");
        fs::create_dir_all(root.join("a/b")).unwrap();
        fs::write(root.join("a/b/c.md"), "").unwrap();

        let resolved = resolver.resolve(None, "/a/b/c").unwrap();

        assert_eq!(resolved.base, "a/b");
        assert_eq!(resolved.kind, TargetKind::Page);
    }

    #[test]
    fn test_suffix_retry_directory_base() {
        let (temp_dir, resolver) = setup();
        let root = temp_dir.path().join("default");
        fs::create_dir(root.join("slides.md")).unwrap();
        fs::write(root.join("slides.md/view.md"), "# Slides").unwrap();

        let resolved = resolver.resolve(None, "/slides").unwrap();

        assert_eq!(resolved.target, root.join("slides.md/view.md"));
        assert_eq!(resolved.base, "slides.md");
        assert_eq!(resolved.kind, TargetKind::DirectoryIndex);
    }

    #[test]
    fn test_missing_root_has_no_suffixed_variant() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("default.md"), "# Stray").unwrap();
        let resolver = PathResolver::new(ContentLayout::new(temp_dir.path()));

        assert!(matches!(
            resolver.resolve(None, "/"),
            Err(ResolveError::NotFound(_))
        ));
    }

    #[test]
    fn test_suffix_only_appended_once() {
        let (temp_dir, resolver) = setup();
        fs::write(temp_dir.path().join("default/notes.md.md"), "").unwrap();

        assert!(resolver.resolve(None, "/notes").is_err());
    }

    #[test]
    fn test_exact_markdown_file() {
        let (temp_dir, resolver) = setup();
        fs::write(temp_dir.path().join("default/notes.md"), "").unwrap();

        let resolved = resolver.resolve(None, "/notes.md").unwrap();

        assert_eq!(resolved.kind, TargetKind::Page);
    }

    #[test]
    fn test_exact_path_wins_over_suffixed() {
        let (temp_dir, resolver) = setup();
        let root = temp_dir.path().join("default");
        fs::write(root.join("notes"), "plain").unwrap();
        fs::write(root.join("notes.md"), "# Notes").unwrap();

        let resolved = resolver.resolve(None, "/notes").unwrap();

        assert_eq!(resolved.target, root.join("notes"));
        assert_eq!(resolved.kind, TargetKind::Asset);
    }

    #[test]
    fn test_raw_asset() {
        let (temp_dir, resolver) = setup();
        let root = temp_dir.path().join("default");
        fs::write(root.join("image.png"), [0x89, b'P', b'N', b'G']).unwrap();

        let resolved = resolver.resolve(None, "/image.png").unwrap();

        assert_eq!(resolved.target, root.join("image.png"));
        assert_eq!(resolved.kind, TargetKind::Asset);
        assert!(!resolved.is_page());
    }

    #[test]
    fn test_subdomain_root_used() {
        let (temp_dir, resolver) = setup();
        let docs = temp_dir.path().join("docs");
        fs::write(docs.join("api.md"), "").unwrap();

        let resolved = resolver.resolve(Some("docs.example.com"), "/api").unwrap();

        assert_eq!(resolved.subdomain, "docs");
        assert_eq!(resolved.root, docs);
        assert_eq!(resolved.target, docs.join("api.md"));
    }

    #[test]
    fn test_unknown_subdomain_falls_back() {
        let (temp_dir, resolver) = setup();
        fs::write(temp_dir.path().join("default/api.md"), "").unwrap();

        let resolved = resolver.resolve(Some("nope.example.com"), "/api").unwrap();

        assert_eq!(resolved.subdomain, "default");
    }

    #[test]
    fn test_traversal_stays_inside_root() {
        let (temp_dir, resolver) = setup();
        fs::write(temp_dir.path().join("secret.md"), "").unwrap();

        assert!(resolver.resolve(None, "/../secret").is_err());
        assert!(resolver.resolve(None, "/%2e%2e/secret.md").is_err());
    }
}
