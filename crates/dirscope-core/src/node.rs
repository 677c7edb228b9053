//! File and directory node types.

use std::path::{Path, PathBuf};

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Type of file system node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Regular file, or any non-directory entry (symlinks are not followed).
    File,
    /// Directory.
    Directory,
}

impl NodeKind {
    /// Check if this is a directory.
    pub fn is_dir(self) -> bool {
        matches!(self, NodeKind::Directory)
    }

    /// Check if this is a file.
    pub fn is_file(self) -> bool {
        matches!(self, NodeKind::File)
    }

    /// Label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            NodeKind::File => "file",
            NodeKind::Directory => "directory",
        }
    }
}

/// A single file or directory in the tree.
///
/// Children are owned by their parent; there are no back-references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Full path of the entry.
    pub path: PathBuf,

    /// Display name (last path component, or the full path for roots).
    pub name: CompactString,

    /// Node type.
    pub kind: NodeKind,

    /// Size in bytes (aggregate for directories).
    pub size: u64,

    /// Depth below the scan root (root = 0).
    pub level: u32,

    /// `true` if listing this directory failed. Such a node keeps size 0
    /// and no children.
    pub access_denied: bool,

    /// Children in scan order (directories only).
    pub children: Vec<Node>,
}

impl Node {
    /// Create a new file node.
    pub fn new_file(path: impl Into<PathBuf>, size: u64, level: u32) -> Self {
        let path = path.into();
        Self {
            name: display_name(&path),
            path,
            kind: NodeKind::File,
            size,
            level,
            access_denied: false,
            children: Vec::new(),
        }
    }

    /// Create a new, empty directory node.
    pub fn new_directory(path: impl Into<PathBuf>, level: u32) -> Self {
        let path = path.into();
        Self {
            name: display_name(&path),
            path,
            kind: NodeKind::Directory,
            size: 0,
            level,
            access_denied: false,
            children: Vec::new(),
        }
    }

    /// Create a directory node whose listing failed.
    pub fn new_denied(path: impl Into<PathBuf>, level: u32) -> Self {
        let mut node = Self::new_directory(path, level);
        node.access_denied = true;
        node
    }

    /// Check if this node is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }

    /// Check if this node is a file.
    pub fn is_file(&self) -> bool {
        self.kind.is_file()
    }

    /// Link a child and add its size to this node.
    pub fn push_child(&mut self, child: Node) {
        self.size += child.size;
        self.children.push(child);
    }

    /// Get the number of direct children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Number of files in this subtree (1 for a file).
    pub fn file_count(&self) -> u64 {
        match self.kind {
            NodeKind::File => 1,
            NodeKind::Directory => self.children.iter().map(Node::file_count).sum(),
        }
    }

    /// Number of directories below this node, excluding itself.
    pub fn dir_count(&self) -> u64 {
        self.children
            .iter()
            .filter(|c| c.is_dir())
            .map(|c| 1 + c.dir_count())
            .sum()
    }

    /// Children ordered by size descending, ties kept in scan order.
    pub fn children_by_size(&self) -> Vec<&Node> {
        let mut sorted: Vec<&Node> = self.children.iter().collect();
        sorted.sort_by(|a, b| b.size.cmp(&a.size));
        sorted
    }

    /// Pre-order iterator over this node and all its descendants.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }
}

/// Pre-order traversal returned by [`Node::walk`].
pub struct Walk<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

fn display_name(path: &Path) -> CompactString {
    match path.file_name() {
        Some(name) => CompactString::new(name.to_string_lossy()),
        None => CompactString::new(path.to_string_lossy()),
    }
}
