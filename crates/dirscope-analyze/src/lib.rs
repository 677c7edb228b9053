//! Analysis passes over a scanned dirscope tree.
//!
//! - **Largest files** - one depth-first collection of every file, ranked by
//!   size with ties kept in traversal order.
//! - **Visibility filter** - the name-substring / maximum-depth predicate
//!   behind every filtered tree view, including the one embedded in the
//!   HTML report.
//!
//! ```rust,ignore
//! use dirscope_analyze::{NodeFilter, top_files, TOP_FILES_LIMIT};
//!
//! let largest = top_files(&tree.root, TOP_FILES_LIMIT);
//! let filter = NodeFilter::builder().name_contains("log").build().unwrap();
//! for node in filter.visible_nodes(&tree.root) {
//!     println!("{}", node.path.display());
//! }
//! ```

mod filter;
mod top_files;

pub use filter::{NodeFilter, NodeFilterBuilder};
pub use top_files::{TOP_FILES_LIMIT, finalize, top_files};

// Re-export core types
pub use dirscope_core::{Node, ScanReport, ScanTree, TopFile};
