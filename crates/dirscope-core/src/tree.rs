//! Scanned tree container, statistics and the finalized report.

use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use crate::error::ScanWarning;
use crate::extension::ExtensionTable;
use crate::node::Node;

/// Summary statistics for a scanned tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStats {
    /// Total size in bytes.
    pub total_size: u64,
    /// Total number of files.
    pub total_files: u64,
    /// Total number of directories below the root.
    pub total_dirs: u64,
    /// Directories whose listing failed.
    pub denied_dirs: u64,
    /// Maximum depth reached.
    pub max_depth: u32,
}

impl TreeStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update stats with a file entry.
    pub fn record_file(&mut self, size: u64, depth: u32) {
        self.total_files += 1;
        self.total_size += size;
        self.max_depth = self.max_depth.max(depth);
    }

    /// Record a directory.
    pub fn record_dir(&mut self, depth: u32) {
        self.total_dirs += 1;
        self.max_depth = self.max_depth.max(depth);
    }

    /// Record a directory whose listing failed.
    pub fn record_denied(&mut self) {
        self.denied_dirs += 1;
    }
}

/// Complete scanned tree with its extension table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanTree {
    /// Root node of the tree.
    pub root: Node,

    /// Root path that was scanned.
    pub root_path: PathBuf,

    /// Byte totals per extension.
    pub extensions: ExtensionTable,

    /// Summary statistics.
    pub stats: TreeStats,

    /// Per-path failures recovered during the scan.
    pub warnings: Vec<ScanWarning>,

    /// When this scan was performed.
    pub scanned_at: SystemTime,

    /// Duration of the scan.
    pub scan_duration: Duration,
}

impl ScanTree {
    /// Create a new scanned tree.
    pub fn new(
        root: Node,
        extensions: ExtensionTable,
        stats: TreeStats,
        warnings: Vec<ScanWarning>,
        scan_duration: Duration,
    ) -> Self {
        Self {
            root_path: root.path.clone(),
            root,
            extensions,
            stats,
            warnings,
            scanned_at: SystemTime::now(),
            scan_duration,
        }
    }

    /// Get the total size of the tree.
    pub fn total_size(&self) -> u64 {
        self.root.size
    }

    /// Check if there were any warnings during scanning.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// One entry of the largest-files list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopFile {
    /// Full path.
    pub path: String,
    /// File name.
    pub name: String,
    /// Size in bytes.
    pub size_bytes: u64,
    /// Human-readable size.
    pub size_human: String,
    /// Share of the root total, in percent.
    pub percent_total: f64,
    /// Depth below the scan root.
    pub level: u32,
}

/// A finalized scan: the tree plus every view derived from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// The scanned tree and its extension table.
    pub tree: ScanTree,
    /// Largest files, descending by size.
    pub top_files: Vec<TopFile>,
}

impl ScanReport {
    /// Bundle a tree with its largest-files list.
    pub fn new(tree: ScanTree, top_files: Vec<TopFile>) -> Self {
        Self { tree, top_files }
    }

    /// Root node of the scanned tree.
    pub fn root(&self) -> &Node {
        &self.tree.root
    }

    /// Extension table of the scanned tree.
    pub fn extensions(&self) -> &ExtensionTable {
        &self.tree.extensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_stats_default() {
        let stats = TreeStats::default();
        assert_eq!(stats.total_size, 0);
        assert_eq!(stats.total_files, 0);
        assert_eq!(stats.total_dirs, 0);
    }

    #[test]
    fn test_tree_stats_record() {
        let mut stats = TreeStats::new();
        stats.record_file(1024, 2);
        stats.record_dir(1);
        stats.record_denied();

        assert_eq!(stats.total_files, 1);
        assert_eq!(stats.total_size, 1024);
        assert_eq!(stats.total_dirs, 1);
        assert_eq!(stats.denied_dirs, 1);
        assert_eq!(stats.max_depth, 2);
    }

    #[test]
    fn test_scan_tree_root_path() {
        let root = Node::new_directory("/data", 0);
        let tree = ScanTree::new(
            root,
            ExtensionTable::new(),
            TreeStats::new(),
            Vec::new(),
            Duration::ZERO,
        );
        assert_eq!(tree.root_path, PathBuf::from("/data"));
        assert_eq!(tree.total_size(), 0);
        assert!(!tree.has_warnings());
    }
}
