//! On-disk layout of content roots.
//!
//! Every subdomain owns one content root at `<pub_dir>/<subdomain>`. Inside a
//! root, directories become pages through their index document and the assets
//! directory holds the style sheet and optional title files.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Suffix identifying Markdown pages.
pub const MARKDOWN_SUFFIX: &str = ".md";

/// Style sheet inlined into every page, relative to the assets directory.
pub const STYLE_FILENAME: &str = "style.css";

/// Optional page title text, relative to the assets directory.
pub const TITLE_FILENAME: &str = "title.txt";

/// Optional page subtitle text, relative to the assets directory.
pub const SUBTITLE_FILENAME: &str = "subtitle.txt";

/// Filesystem layout shared by path resolution, tree building and page composition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentLayout {
    /// Directory holding one content root per subdomain.
    pub pub_dir: PathBuf,
    /// Subdomain served when the request host has no content root.
    pub default_subdomain: String,
    /// File that makes a directory a viewable page.
    pub index_filename: String,
    /// Per-root directory holding the style sheet and title files.
    pub assets_dir: String,
}

impl Default for ContentLayout {
    fn default() -> Self {
        Self {
            pub_dir: PathBuf::from("pub"),
            default_subdomain: "default".to_owned(),
            index_filename: "view.md".to_owned(),
            assets_dir: "assets".to_owned(),
        }
    }
}

impl ContentLayout {
    /// Create a layout with default reserved names rooted at `pub_dir`.
    #[must_use]
    pub fn new(pub_dir: impl Into<PathBuf>) -> Self {
        Self {
            pub_dir: pub_dir.into(),
            ..Self::default()
        }
    }

    /// Content root of `subdomain`.
    #[must_use]
    pub fn content_root(&self, subdomain: &str) -> PathBuf {
        self.pub_dir.join(subdomain)
    }

    /// Whether `name` is reserved and never shown in navigation.
    #[must_use]
    pub fn is_reserved(&self, name: &OsStr) -> bool {
        name == OsStr::new(&self.index_filename) || name == OsStr::new(&self.assets_dir)
    }

    /// Style sheet path inside `root`.
    #[must_use]
    pub fn style_path(&self, root: &Path) -> PathBuf {
        root.join(&self.assets_dir).join(STYLE_FILENAME)
    }

    /// Title text path inside `root`.
    #[must_use]
    pub fn title_path(&self, root: &Path) -> PathBuf {
        root.join(&self.assets_dir).join(TITLE_FILENAME)
    }

    /// Subtitle text path inside `root`.
    #[must_use]
    pub fn subtitle_path(&self, root: &Path) -> PathBuf {
        root.join(&self.assets_dir).join(SUBTITLE_FILENAME)
    }
}
