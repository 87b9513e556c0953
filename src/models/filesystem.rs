//! Node types for the virtual filesystem.

use std::collections::BTreeMap;

/// A node in the virtual filesystem tree.
///
/// Files carry their content as ordered lines; directories map child names to
/// child nodes. Nodes are immutable after construction: the tree is built once
/// at startup and never mutated at runtime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FsNode {
    File { lines: Vec<String> },
    Directory { children: BTreeMap<String, FsNode> },
}

impl FsNode {
    /// Create a file node from a text blob, split into lines.
    pub fn file(content: &str) -> Self {
        Self::File {
            lines: content.lines().map(str::to_string).collect(),
        }
    }

    /// Create an empty directory node.
    pub fn dir() -> Self {
        Self::Directory {
            children: BTreeMap::new(),
        }
    }

    /// Builder-style child insertion. Panics on a file node.
    pub fn with(mut self, name: &str, child: FsNode) -> Self {
        match &mut self {
            Self::Directory { children } => {
                children.insert(name.to_string(), child);
            }
            Self::File { .. } => panic!("cannot add child '{name}' to a file node"),
        }
        self
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, Self::Directory { .. })
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Self::File { .. })
    }

    /// Children of a directory node.
    pub fn children(&self) -> Option<&BTreeMap<String, FsNode>> {
        match self {
            Self::Directory { children } => Some(children),
            Self::File { .. } => None,
        }
    }

    /// Content lines of a file node.
    pub fn lines(&self) -> Option<&[String]> {
        match self {
            Self::File { lines } => Some(lines),
            Self::Directory { .. } => None,
        }
    }

    /// Synthetic byte size: content length for files, a fixed block size for
    /// directories.
    pub fn size(&self) -> usize {
        match self {
            Self::File { lines } => lines.iter().map(|l| l.len() + 1).sum(),
            Self::Directory { .. } => 4096,
        }
    }
}
