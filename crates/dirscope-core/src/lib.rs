//! Core types for dirscope.
//!
//! This crate provides the data model shared by the scanner, the analysis
//! passes and the report encoders: file nodes, the per-extension byte table,
//! the scanned tree container, configuration and error types.

mod config;
mod error;
mod extension;
pub mod format;
mod node;
mod tree;

pub use config::{DEFAULT_POLL_INTERVAL_MS, DEFAULT_TOP_FILES, MAX_TOP_FILES, ScanConfig, ScanConfigBuilder};
pub use error::{ScanError, ScanWarning, WarningKind};
pub use extension::{ExtensionTable, NO_EXTENSION, extension_key};
pub use format::{human_size, percent_of};
pub use node::{Node, NodeKind, Walk};
pub use tree::{ScanReport, ScanTree, TopFile, TreeStats};
