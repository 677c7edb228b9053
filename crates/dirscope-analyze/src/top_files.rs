//! Largest-files selection.

use dirscope_core::{MAX_TOP_FILES, Node, ScanReport, ScanTree, TopFile, human_size, percent_of};
use tracing::debug;

/// Most files a finalized report keeps.
pub const TOP_FILES_LIMIT: usize = MAX_TOP_FILES;

/// Collect the `limit` largest files under `root`.
///
/// Every file is visited depth-first, then a single stable sort ranks them
/// by size descending, so equal sizes keep their traversal order. Percentages
/// are relative to the root total.
pub fn top_files(root: &Node, limit: usize) -> Vec<TopFile> {
    let total = root.size;
    let mut files: Vec<TopFile> = root
        .walk()
        .filter(|node| node.is_file())
        .map(|node| TopFile {
            path: node.path.to_string_lossy().into_owned(),
            name: node.name.to_string(),
            size_bytes: node.size,
            size_human: human_size(node.size),
            percent_total: percent_of(node.size, total),
            level: node.level,
        })
        .collect();

    let file_count = files.len();
    files.sort_by(|a, b| b.size_bytes.cmp(&a.size_bytes));
    files.truncate(limit);

    debug!(file_count, kept = files.len(), "Ranked largest files");
    files
}

/// Turn a completed scan into a report by computing its derived views.
///
/// `limit` is capped at [`TOP_FILES_LIMIT`].
pub fn finalize(tree: ScanTree, limit: usize) -> ScanReport {
    let top = top_files(&tree.root, limit.min(TOP_FILES_LIMIT));
    ScanReport::new(tree, top)
}
