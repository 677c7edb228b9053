//! Flat row records shared by every encoder.

use serde::{Deserialize, Serialize};

use dirscope_core::{ExtensionTable, Node, ScanReport, TopFile, human_size, percent_of};

/// One node of the tree, flattened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeRow {
    pub path: String,
    pub name: String,
    pub level: u32,
    /// `"directory"` or `"file"`.
    #[serde(rename = "type")]
    pub kind: String,
    pub size_bytes: u64,
    pub size_human: String,
    /// Share of the root total.
    pub percent_total: f64,
    pub access_denied: bool,
}

impl TreeRow {
    fn from_node(node: &Node, total: u64) -> Self {
        Self {
            path: node.path.to_string_lossy().into_owned(),
            name: node.name.to_string(),
            level: node.level,
            kind: node.kind.label().to_string(),
            size_bytes: node.size,
            size_human: human_size(node.size),
            percent_total: percent_of(node.size, total),
            access_denied: node.access_denied,
        }
    }
}

/// Byte total of one extension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtensionRow {
    pub extension: String,
    pub size_bytes: u64,
    pub size_human: String,
    /// Share of the extension total.
    pub percent_total: f64,
}

/// Largest-files rows are the finalized [`TopFile`] records as-is.
pub type TopFileRow = TopFile;

/// Flatten `root` in pre-order, keeping scan order among siblings.
///
/// Nodes deeper than `max_depth` are left out.
pub fn flatten(root: &Node, max_depth: Option<u32>) -> Vec<TreeRow> {
    let total = root.size;
    root.walk()
        .filter(|node| max_depth.is_none_or(|max| node.level <= max))
        .map(|node| TreeRow::from_node(node, total))
        .collect()
}

/// Extension rows sorted by size descending.
pub fn extension_rows(table: &ExtensionTable) -> Vec<ExtensionRow> {
    table
        .sorted_by_size()
        .into_iter()
        .map(|(extension, size)| ExtensionRow {
            extension: extension.to_string(),
            size_bytes: size,
            size_human: human_size(size),
            percent_total: table.percent_of_total(size),
        })
        .collect()
}

/// The three row sets of a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportData {
    pub tree: Vec<TreeRow>,
    pub extensions: Vec<ExtensionRow>,
    pub top_files: Vec<TopFileRow>,
}

impl ReportData {
    /// Build every row set from a finalized report.
    pub fn from_report(report: &ScanReport, max_depth: Option<u32>) -> Self {
        Self {
            tree: flatten(report.root(), max_depth),
            extensions: extension_rows(report.extensions()),
            top_files: report.top_files.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        let mut root = Node::new_directory("/r", 0);
        let mut sub = Node::new_directory("/r/sub", 1);
        sub.push_child(Node::new_file("/r/sub/deep.txt", 30, 2));
        root.push_child(Node::new_file("/r/first.txt", 10, 1));
        root.push_child(sub);
        root.push_child(Node::new_denied("/r/locked", 1));
        root
    }

    #[test]
    fn test_flatten_keeps_scan_order() {
        let rows = flatten(&sample(), None);
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["r", "first.txt", "sub", "deep.txt", "locked"]);
        assert_eq!(rows[0].percent_total, 100.0);
        assert_eq!(rows[2].kind, "directory");
        assert_eq!(rows[3].percent_total, 75.0);
        assert!(rows[4].access_denied);
    }

    #[test]
    fn test_flatten_depth_limit() {
        let rows = flatten(&sample(), Some(1));
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|r| r.level <= 1));

        let rows = flatten(&sample(), Some(0));
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_extension_rows() {
        let mut table = ExtensionTable::new();
        table.record("a.log", 10);
        table.record("b.bin", 30);
        let rows = extension_rows(&table);
        assert_eq!(rows[0].extension, ".bin");
        assert_eq!(rows[0].percent_total, 75.0);
        assert_eq!(rows[1].size_human, "10.0 o");
    }

    #[test]
    fn test_empty_root_percent() {
        let root = Node::new_directory("/empty", 0);
        let rows = flatten(&root, None);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].percent_total, 0.0);
    }
}
