use dirscope_core::{
    ExtensionTable, NO_EXTENSION, Node, NodeKind, ScanConfig, ScanError, ScanReport, ScanTree,
    TopFile, TreeStats, WarningKind, extension_key, human_size, percent_of,
};
use std::path::PathBuf;
use std::time::Duration;

fn build_tree() -> Node {
    let mut root = Node::new_directory("/srv", 0);

    let mut logs = Node::new_directory("/srv/logs", 1);
    logs.push_child(Node::new_file("/srv/logs/app.log", 4096, 2));
    logs.push_child(Node::new_file("/srv/logs/app.log.1", 2048, 2));

    let mut www = Node::new_directory("/srv/www", 1);
    let mut assets = Node::new_directory("/srv/www/assets", 2);
    assets.push_child(Node::new_file("/srv/www/assets/logo.png", 10_000, 3));
    www.push_child(assets);
    www.push_child(Node::new_file("/srv/www/index.html", 512, 2));

    root.push_child(logs);
    root.push_child(www);
    root.push_child(Node::new_file("/srv/.env", 64, 1));
    root.push_child(Node::new_denied("/srv/secret", 1));
    root
}

fn assert_sizes_consistent(node: &Node) {
    if node.is_dir() {
        let sum: u64 = node.children.iter().map(|c| c.size).sum();
        assert_eq!(node.size, sum, "size mismatch at {}", node.path.display());
        for child in &node.children {
            assert_sizes_consistent(child);
        }
    }
}

#[test]
fn test_directory_size_is_sum_of_children() {
    let root = build_tree();
    assert_sizes_consistent(&root);
    assert_eq!(root.size, 4096 + 2048 + 10_000 + 512 + 64);
}

#[test]
fn test_counts_and_levels() {
    let root = build_tree();
    assert_eq!(root.file_count(), 5);
    assert_eq!(root.dir_count(), 4);
    assert_eq!(root.walk().map(|n| n.level).max(), Some(3));
    assert!(root.walk().all(|n| n.children.iter().all(|c| c.level == n.level + 1)));
}

#[test]
fn test_denied_directory_contributes_nothing() {
    let root = build_tree();
    let denied = root
        .children
        .iter()
        .find(|c| c.access_denied)
        .expect("denied child");
    assert_eq!(denied.kind, NodeKind::Directory);
    assert_eq!(denied.size, 0);
    assert!(denied.children.is_empty());
}

#[test]
fn test_extension_table_matches_file_total() {
    let root = build_tree();
    let mut table = ExtensionTable::new();
    for node in root.walk().filter(|n| n.is_file()) {
        table.record(&node.name, node.size);
    }

    assert_eq!(table.total(), root.size);
    assert_eq!(table.get(".log"), Some(4096));
    assert_eq!(table.get(".1"), Some(2048));
    assert_eq!(table.get(NO_EXTENSION), Some(64));
}

#[test]
fn test_extension_sentinel_cases() {
    assert_eq!(extension_key("LICENSE"), NO_EXTENSION);
    assert_eq!(extension_key("."), NO_EXTENSION);
    assert_eq!(extension_key("Photo.JPEG"), ".jpeg");
}

#[test]
fn test_human_size_reference_values() {
    assert_eq!(human_size(0), "0.0 o");
    assert_eq!(human_size(1536), "1.5 Ko");
    assert_eq!(human_size(1_073_741_824), "1.0 Go");
}

#[test]
fn test_percent_of_zero_total() {
    assert_eq!(percent_of(0, 0), 0.0);
    assert!((percent_of(1, 3) - 33.333_333).abs() < 1e-4);
}

#[test]
fn test_scan_error_display() {
    let err = ScanError::NotADirectory {
        path: PathBuf::from("/etc/hosts"),
    };
    assert!(err.to_string().contains("/etc/hosts"));
    assert!(ScanError::ScanInProgress.to_string().contains("already"));

    let err = ScanError::io(
        "/gone",
        std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
    );
    assert!(matches!(err, ScanError::NotFound { .. }));
}

#[test]
fn test_warning_kind_classification() {
    let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
    assert_eq!(
        WarningKind::classify(&err, WarningKind::ReadError),
        WarningKind::PermissionDenied
    );
    let err = std::io::Error::other("boom");
    assert_eq!(
        WarningKind::classify(&err, WarningKind::MetadataError),
        WarningKind::MetadataError
    );
}

#[test]
fn test_report_accessors() {
    let root = build_tree();
    let mut extensions = ExtensionTable::new();
    extensions.record("logo.png", 10_000);
    let tree = ScanTree::new(
        root,
        extensions,
        TreeStats::new(),
        Vec::new(),
        Duration::from_millis(5),
    );
    let top = vec![TopFile {
        path: "/srv/www/assets/logo.png".to_string(),
        name: "logo.png".to_string(),
        size_bytes: 10_000,
        size_human: human_size(10_000),
        percent_total: percent_of(10_000, tree.total_size()),
        level: 3,
    }];
    let report = ScanReport::new(tree, top);

    assert_eq!(report.root().name, "srv");
    assert_eq!(report.extensions().get(".png"), Some(10_000));
    assert_eq!(report.top_files[0].size_human, "9.8 Ko");
}

#[test]
fn test_scan_config_builder_defaults() {
    let config = ScanConfig::builder().root("/srv").build().unwrap();
    assert_eq!(config.top_files, 100);
    assert_eq!(config.poll_interval_ms, 200);
    assert!(config.count_entries);
}
