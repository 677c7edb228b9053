//! Entry-count pre-pass used as the progress denominator.

use std::path::Path;
use std::time::Duration;

use jwalk::{Parallelism, WalkDir};
use tracing::debug;

/// Count every file and directory below `root`, the root itself excluded.
///
/// Symlinks are not followed and hidden entries are included. Entries under
/// directories that cannot be listed are skipped silently, matching the
/// entries [`crate::TreeScanner`] reports through its callback. The result is
/// never below 1.
pub fn count_entries(root: &Path, threads: usize) -> u64 {
    let parallelism = match threads {
        0 => Parallelism::RayonDefaultPool {
            busy_timeout: Duration::from_millis(100),
        },
        n => Parallelism::RayonNewPool(n),
    };

    let walker = WalkDir::new(root)
        .parallelism(parallelism)
        .skip_hidden(false)
        .follow_links(false)
        .min_depth(1);

    let mut count = 0u64;
    let mut unreadable = 0u64;
    for entry in walker {
        match entry {
            Ok(_) => count += 1,
            Err(_) => unreadable += 1,
        }
    }

    debug!(root = %root.display(), count, unreadable, "Counted entries");
    count.max(1)
}
