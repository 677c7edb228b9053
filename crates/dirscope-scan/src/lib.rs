//! File system scanning engine for dirscope.
//!
//! # Overview
//!
//! `dirscope-scan` walks a directory tree and builds a [`ScanTree`] with
//! sizes aggregated bottom-up and an extension table filled along the way.
//!
//! - **Entry counting** via jwalk to give progress a denominator
//! - **Depth-first scanning** where unreadable directories become flagged
//!   nodes instead of errors
//! - **Background orchestration** with non-blocking polling
//!
//! # Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use dirscope_scan::{ScanConfig, ScanController};
//!
//! let mut controller = ScanController::new();
//! controller.start(&ScanConfig::new("/path/to/scan")).unwrap();
//! let report = controller
//!     .wait(Duration::from_millis(200), |p| eprintln!("{:.1} %", p.percent))
//!     .unwrap();
//!
//! println!("Total size: {} bytes", report.tree.total_size());
//! ```

mod controller;
mod counter;
mod progress;
mod scanner;

pub use controller::{ScanController, ScanStatus};
pub use counter::count_entries;
pub use progress::{ProgressSnapshot, ScanPhase, ScanProgress};
pub use scanner::{TreeScanner, validate_root};

// Re-export core types for convenience
pub use dirscope_core::{
    Node, NodeKind, ScanConfig, ScanError, ScanReport, ScanTree, ScanWarning, TreeStats,
    WarningKind,
};
