//! Virtual filesystem: an in-memory, read-only tree addressed by `/` paths.
//!
//! The tree is built once at startup from [`FsNode`] values and never mutated
//! afterwards. All lookups work on absolute paths; [`VirtualFs::resolve_path`]
//! turns a user-supplied path plus the current working directory into an
//! absolute one.
//!
//! # Path Convention
//!
//! - Root: `"/"`
//! - Nested: `"/blog"`, `"/blog/post.md"`
//! - No trailing slash except on the root itself

use crate::models::FsNode;

/// One entry of a directory listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
    pub size: usize,
}

/// The virtual filesystem.
#[derive(Clone)]
pub struct VirtualFs {
    root: FsNode,
}

impl VirtualFs {
    /// Create a filesystem from a root directory node.
    ///
    /// # Panics
    ///
    /// Panics if `root` is not a directory.
    pub fn new(root: FsNode) -> Self {
        assert!(root.is_directory(), "VirtualFs root must be a directory");
        Self { root }
    }

    /// Empty filesystem containing only the root directory.
    pub fn empty() -> Self {
        Self::new(FsNode::dir())
    }

    /// Resolve a user path against the current working directory.
    ///
    /// Absolute paths pass through; relative paths are joined to `cwd` with
    /// exactly one separator. `.` and `..` segments are normalized, clamped
    /// at the root, and `~` (or an empty path) means the root.
    pub fn resolve_path(path: &str, cwd: &str) -> String {
        if path == "~" || path.is_empty() {
            return "/".to_string();
        }
        if let Some(rest) = path.strip_prefix("~/") {
            return Self::normalize(rest);
        }
        if path.starts_with('/') {
            return Self::normalize(path);
        }

        let joined = if cwd.ends_with('/') {
            format!("{cwd}{path}")
        } else {
            format!("{cwd}/{path}")
        };
        Self::normalize(&joined)
    }

    /// Normalize a path to absolute form, resolving `.` and `..` segments.
    ///
    /// `..` never climbs above the root.
    pub fn normalize(path: &str) -> String {
        let mut parts: Vec<&str> = Vec::new();
        for part in path.split('/').filter(|s| !s.is_empty()) {
            match part {
                "." => {}
                ".." => {
                    parts.pop();
                }
                _ => parts.push(part),
            }
        }

        if parts.is_empty() {
            "/".to_string()
        } else {
            format!("/{}", parts.join("/"))
        }
    }

    /// Parent directory of an absolute path, clamped at the root.
    pub fn parent(path: &str) -> String {
        Self::normalize(&format!("{path}/.."))
    }

    /// Look up a node by absolute path.
    ///
    /// Returns `None` as soon as any segment is missing or a file is indexed
    /// into as if it were a directory.
    pub fn node(&self, path: &str) -> Option<&FsNode> {
        let mut current = &self.root;
        for part in path.split('/').filter(|s| !s.is_empty()) {
            current = current.children()?.get(part)?;
        }
        Some(current)
    }

    pub fn is_directory(&self, path: &str) -> bool {
        self.node(path).is_some_and(FsNode::is_directory)
    }

    /// List a directory, sorted the way the terminal displays entries:
    /// directories first, then files, hidden names last within each group.
    pub fn list(&self, path: &str) -> Option<Vec<DirEntry>> {
        let children = self.node(path)?.children()?;

        let mut entries: Vec<DirEntry> = children
            .iter()
            .map(|(name, node)| DirEntry {
                name: name.clone(),
                is_dir: node.is_directory(),
                size: node.size(),
            })
            .collect();

        entries.sort_by(|a, b| {
            let a_hidden = a.name.starts_with('.');
            let b_hidden = b.name.starts_with('.');
            match (a.is_dir, b.is_dir, a_hidden, b_hidden) {
                (true, false, _, _) => std::cmp::Ordering::Less,
                (false, true, _, _) => std::cmp::Ordering::Greater,
                (_, _, false, true) => std::cmp::Ordering::Less,
                (_, _, true, false) => std::cmp::Ordering::Greater,
                _ => a.name.cmp(&b.name),
            }
        });

        Some(entries)
    }

    /// Depth-first walk of the subtree at `path`, visiting every node with
    /// its absolute path. Used by `find` and `tree`.
    pub fn walk<F>(&self, path: &str, visit: &mut F)
    where
        F: FnMut(&str, &FsNode),
    {
        let start = Self::normalize(path);
        let Some(node) = self.node(&start) else {
            return;
        };
        Self::walk_node(&start, node, visit);
    }

    fn walk_node<F>(path: &str, node: &FsNode, visit: &mut F)
    where
        F: FnMut(&str, &FsNode),
    {
        visit(path, node);
        if let Some(children) = node.children() {
            for (name, child) in children {
                let child_path = if path == "/" {
                    format!("/{name}")
                } else {
                    format!("{path}/{name}")
                };
                Self::walk_node(&child_path, child, visit);
            }
        }
    }
}

impl Default for VirtualFs {
    fn default() -> Self {
        Self::empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
