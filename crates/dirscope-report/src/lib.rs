//! Report rendering and export for dirscope.
//!
//! A finalized [`ScanReport`] is flattened into three row sets (tree,
//! extensions, largest files) and written as CSV, JSON or plain text, one
//! sibling file per row set, or as a single interactive HTML document.
//!
//! ```rust,no_run
//! use std::path::Path;
//! use dirscope_report::{ExportOptions, export};
//! # fn demo(report: &dirscope_core::ScanReport) -> Result<(), dirscope_report::ExportError> {
//! let written = export(report, Path::new("scan.csv"), None, &ExportOptions::default())?;
//! for path in written {
//!     println!("{}", path.display());
//! }
//! # Ok(())
//! # }
//! ```

mod delimited;
mod error;
mod export;
mod html;
mod json;
mod rows;
mod text;

pub use error::ExportError;
pub use export::{
    ExportOptions, ReportFormat, ReportKind, bundle_path, bundle_zip, default_report_stem, export,
    sibling_path,
};
pub use rows::{ExtensionRow, ReportData, TopFileRow, TreeRow, extension_rows, flatten};

pub use dirscope_core::ScanReport;
