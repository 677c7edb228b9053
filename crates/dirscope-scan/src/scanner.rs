//! Depth-first directory scanner.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, warn};

use dirscope_core::{
    ExtensionTable, Node, ScanError, ScanTree, ScanWarning, TreeStats, WarningKind,
};

/// Canonicalize `root` and check it is a directory.
pub fn validate_root(root: &Path) -> Result<PathBuf, ScanError> {
    let root_path = root.canonicalize().map_err(|e| ScanError::io(root, e))?;
    let metadata = fs::metadata(&root_path).map_err(|e| ScanError::io(&root_path, e))?;
    if !metadata.is_dir() {
        return Err(ScanError::NotADirectory { path: root_path });
    }
    Ok(root_path)
}

/// Recursive scanner building a [`ScanTree`] with sizes aggregated bottom-up.
///
/// Only an invalid root fails the scan. Unreadable directories become
/// `access_denied` nodes, and entries that vanish or cannot be stat'ed are
/// recorded as warnings.
#[derive(Debug, Default, Clone, Copy)]
pub struct TreeScanner;

impl TreeScanner {
    /// Create a new scanner.
    pub fn new() -> Self {
        Self
    }

    /// Scan `root`, calling `on_entry` once for every listed entry before it
    /// is classified.
    pub fn scan<F>(&self, root: &Path, on_entry: F) -> Result<ScanTree, ScanError>
    where
        F: FnMut(),
    {
        let start = Instant::now();
        let root_path = validate_root(root)?;
        info!(root = %root_path.display(), "Starting scan");

        let mut walker = Walker {
            on_entry,
            extensions: ExtensionTable::new(),
            stats: TreeStats::new(),
            warnings: Vec::new(),
        };
        let root_node = walker
            .scan_dir(&root_path, 0)
            .map_err(|e| ScanError::io(&root_path, e))?;

        let scan_duration = start.elapsed();
        info!(
            root = %root_path.display(),
            size = root_node.size,
            files = walker.stats.total_files,
            dirs = walker.stats.total_dirs,
            warnings = walker.warnings.len(),
            elapsed_ms = scan_duration.as_millis() as u64,
            "Scan finished"
        );

        Ok(ScanTree::new(
            root_node,
            walker.extensions,
            walker.stats,
            walker.warnings,
            scan_duration,
        ))
    }
}

struct Walker<F> {
    on_entry: F,
    extensions: ExtensionTable,
    stats: TreeStats,
    warnings: Vec<ScanWarning>,
}

impl<F: FnMut()> Walker<F> {
    /// Scan one directory. Fails only when the directory itself cannot be
    /// stat'ed; a failed listing yields an `access_denied` node instead.
    fn scan_dir(&mut self, path: &Path, level: u32) -> io::Result<Node> {
        fs::metadata(path)?;

        let entries = match fs::read_dir(path) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Cannot list directory");
                self.warnings.push(ScanWarning::listing_failed(path, &err));
                self.stats.record_denied();
                return Ok(Node::new_denied(path, level));
            }
        };

        let mut node = Node::new_directory(path, level);
        let child_level = level + 1;

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    debug!(path = %path.display(), error = %err, "Skipping unreadable entry");
                    self.warnings.push(ScanWarning::new(
                        path,
                        format!("Cannot read directory entry: {err}"),
                        WarningKind::classify(&err, WarningKind::ReadError),
                    ));
                    continue;
                }
            };

            (self.on_entry)();

            let child_path = entry.path();
            // `file_type` does not traverse symlinks, so links land in the file branch.
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);

            if is_dir {
                match self.scan_dir(&child_path, child_level) {
                    Ok(child) => {
                        self.stats.record_dir(child_level);
                        node.push_child(child);
                    }
                    Err(err) => {
                        debug!(path = %child_path.display(), error = %err, "Dropping directory");
                        self.warnings
                            .push(ScanWarning::metadata_failed(&child_path, &err));
                    }
                }
                continue;
            }

            let size = match fs::symlink_metadata(&child_path) {
                Ok(metadata) => metadata.len(),
                Err(err) => {
                    debug!(path = %child_path.display(), error = %err, "Cannot stat file");
                    self.warnings
                        .push(ScanWarning::metadata_failed(&child_path, &err));
                    0
                }
            };

            let file = Node::new_file(child_path, size, child_level);
            self.extensions.record(&file.name, size);
            self.stats.record_file(size, child_level);
            node.push_child(file);
        }

        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_root() {
        let tmp = TempDir::new().unwrap();
        let err = TreeScanner::new()
            .scan(&tmp.path().join("nope"), || {})
            .unwrap_err();
        assert!(matches!(err, ScanError::NotFound { .. }));
    }

    #[test]
    fn test_file_root() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("plain.txt");
        fs::write(&file, b"x").unwrap();
        let err = validate_root(&file).unwrap_err();
        assert!(matches!(err, ScanError::NotADirectory { .. }));
    }

    #[test]
    fn test_nested_sizes() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("a/b")).unwrap();
        fs::write(tmp.path().join("a/b/deep.bin"), vec![0u8; 300]).unwrap();
        fs::write(tmp.path().join("a/mid.bin"), vec![0u8; 20]).unwrap();
        fs::write(tmp.path().join("top.bin"), vec![0u8; 1]).unwrap();

        let mut ticks = 0;
        let tree = TreeScanner::new().scan(tmp.path(), || ticks += 1).unwrap();

        assert_eq!(tree.total_size(), 321);
        assert_eq!(tree.stats.total_files, 3);
        assert_eq!(tree.stats.total_dirs, 2);
        assert_eq!(tree.stats.max_depth, 3);
        assert_eq!(ticks, 5);
        assert!(!tree.has_warnings());

        let a = tree.root.children.iter().find(|n| n.name.as_str() == "a").unwrap();
        assert_eq!(a.size, 320);
        assert_eq!(a.level, 1);
    }
}
