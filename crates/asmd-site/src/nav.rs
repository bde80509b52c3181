//! Navigation tree construction.
//!
//! The tree is expanded lazily: only directories on the ancestor chain of the
//! page being viewed (the goal) are listed, so each render reads one directory
//! per level of the goal path and never walks unrelated branches.
//!
//! # Example
//!
//! ```text
//! root/                 goal = root/b/c.md
//! ├── a.md              ─►  /         intended
//! ├── b/                    ├── a.md
//! │   ├── c.md              └── b/    intended
//! │   └── d/                    ├── c.md  intended
//! └── view.md                   └── d/
//! ```

use std::fs;
use std::path::Path;

use crate::layout::ContentLayout;

/// One entry of the navigation tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavEntry {
    /// Slash-separated path relative to the content root (`""` for the root).
    pub relative_path: String,
    /// Base name of the file or directory (`""` for the root).
    pub display_name: String,
    /// Whether the entry is a directory.
    pub is_dir: bool,
    /// Whether the entry is an ancestor (inclusive) of the goal path.
    pub on_goal_path: bool,
    /// Child entries, only populated for directories on the goal path.
    pub children: Vec<NavEntry>,
}

impl NavEntry {
    /// Synthesized entry for the content root itself.
    #[must_use]
    pub fn root(children: Vec<NavEntry>) -> Self {
        Self {
            relative_path: String::new(),
            display_name: String::new(),
            is_dir: true,
            on_goal_path: true,
            children,
        }
    }

    /// Visit this entry and all of its descendants in render order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a NavEntry)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}

/// Check whether `entry` is an ancestor of (or equal to) `goal`.
///
/// Comparison is by whole path components, so `/a/bc` is not an ancestor of
/// `/a/b`.
#[must_use]
pub fn is_on_goal_path(goal: &Path, entry: &Path) -> bool {
    goal.starts_with(entry)
}

/// Builds navigation trees for one content layout.
#[derive(Clone, Debug)]
pub struct TreeBuilder {
    layout: ContentLayout,
}

impl TreeBuilder {
    /// Create a tree builder that hides the layout's reserved names.
    #[must_use]
    pub fn new(layout: ContentLayout) -> Self {
        Self { layout }
    }

    /// Build the navigation tree of `root` expanded along `goal`.
    ///
    /// Symlinks in both paths are resolved before comparison. If either
    /// cannot be resolved the root is returned without children.
    #[must_use]
    pub fn build(&self, root: &Path, goal: &Path) -> NavEntry {
        let children = match fs::canonicalize(goal) {
            Ok(goal) => self.list(root, &goal, "", 0),
            Err(e) => {
                tracing::debug!(goal = %goal.display(), error = %e, "Goal path unresolvable, navigation pruned");
                Vec::new()
            }
        };
        NavEntry::root(children)
    }

    /// List the direct entries of `dir`, recursing into the ones on the goal path.
    fn list(&self, dir: &Path, goal: &Path, prefix: &str, level: usize) -> Vec<NavEntry> {
        let dir = match fs::canonicalize(dir) {
            Ok(dir) => dir,
            Err(e) => {
                tracing::debug!(dir = %dir.display(), error = %e, "Directory unresolvable, subtree pruned");
                return Vec::new();
            }
        };
        let read_dir = match fs::read_dir(&dir) {
            Ok(read_dir) => read_dir,
            Err(e) => {
                tracing::debug!(dir = %dir.display(), error = %e, "Directory unreadable, subtree pruned");
                return Vec::new();
            }
        };

        let mut dir_entries: Vec<_> = read_dir.filter_map(Result::ok).collect();
        dir_entries.sort_by_key(fs::DirEntry::file_name);

        let mut entries = Vec::with_capacity(dir_entries.len());
        for dir_entry in dir_entries {
            let name = dir_entry.file_name();
            if self.layout.is_reserved(&name) {
                continue;
            }

            let path = dir_entry.path();
            let display_name = name.to_string_lossy().into_owned();
            let relative_path = if prefix.is_empty() {
                display_name.clone()
            } else {
                format!("{prefix}/{display_name}")
            };
            // Follows symlinks so linked directories render as directories
            let is_dir = fs::metadata(&path).is_ok_and(|m| m.is_dir());
            let on_goal_path = is_on_goal_path(goal, &path);

            let children = if is_dir && on_goal_path {
                self.list(&path, goal, &relative_path, level + 1)
            } else {
                Vec::new()
            };

            entries.push(NavEntry {
                relative_path,
                display_name,
                is_dir,
                on_goal_path,
                children,
            });
        }

        tracing::trace!(dir = %dir.display(), level, count = entries.len(), "Listed navigation level");
        entries
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new(ContentLayout::default())
    }
}
