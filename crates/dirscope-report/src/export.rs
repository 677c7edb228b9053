//! Writing reports to disk.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use strum::{Display, EnumString};
use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use dirscope_core::ScanReport;

use crate::error::ExportError;
use crate::rows::ReportData;
use crate::{delimited, html, json, text};

/// Output format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ReportFormat {
    Csv,
    Json,
    #[strum(to_string = "txt", serialize = "text")]
    Text,
    #[strum(to_string = "html", serialize = "htm")]
    Html,
}

impl ReportFormat {
    /// Pick a format from the suffix of `path`. Unknown suffixes mean CSV.
    pub fn from_path(path: &Path) -> Self {
        let suffix = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match suffix.as_str() {
            "html" | "htm" => Self::Html,
            "json" => Self::Json,
            "txt" => Self::Text,
            _ => Self::Csv,
        }
    }

    /// File extension written for this format, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Text => "txt",
            Self::Html => "html",
        }
    }

    /// Whether this format is split into one file per row set.
    pub fn is_split(self) -> bool {
        !matches!(self, Self::Html)
    }
}

/// The row sets written as sibling files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ReportKind {
    Tree,
    Extensions,
    #[strum(to_string = "top100")]
    Top100,
}

/// Settings that shape an export.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Leave out tree nodes deeper than this level.
    pub max_depth: Option<u32>,
    /// Timestamp printed in the HTML footer.
    pub generated_at: DateTime<Local>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            max_depth: None,
            generated_at: Local::now(),
        }
    }
}

/// Path of one sibling file: `{stem}_{kind}.{ext}` next to `base`.
pub fn sibling_path(base: &Path, kind: ReportKind, format: ReportFormat) -> PathBuf {
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report".to_string());
    base.with_file_name(format!("{stem}_{kind}.{}", format.extension()))
}

/// Write `report` next to `base`.
///
/// The format is `format` when given, otherwise derived from the suffix of
/// `base`. Split formats write three sibling files; HTML writes `base`
/// itself. The first failure aborts the export without removing files that
/// were already written. Returns the written paths in write order.
pub fn export(
    report: &ScanReport,
    base: &Path,
    format: Option<ReportFormat>,
    options: &ExportOptions,
) -> Result<Vec<PathBuf>, ExportError> {
    let format = format.unwrap_or_else(|| ReportFormat::from_path(base));
    info!(base = %base.display(), %format, "Exporting report");

    if !format.is_split() {
        let document = html::render(report, options.max_depth, &options.generated_at);
        let mut out = create(base)?;
        out.write_all(document.as_bytes())
            .and_then(|_| out.flush())
            .map_err(|e| ExportError::io(base, e))?;
        return Ok(vec![base.to_path_buf()]);
    }

    let data = ReportData::from_report(report, options.max_depth);
    let kinds = [ReportKind::Tree, ReportKind::Extensions, ReportKind::Top100];
    let mut written = Vec::with_capacity(kinds.len());

    for kind in kinds {
        let path = sibling_path(base, kind, format);
        let mut out = create(&path)?;
        write_part(&mut out, &data, kind, format, &path)?;
        out.flush().map_err(|e| ExportError::io(&path, e))?;
        debug!(path = %path.display(), "Wrote report file");
        written.push(path);
    }

    Ok(written)
}

fn write_part<W: Write>(
    out: &mut W,
    data: &ReportData,
    kind: ReportKind,
    format: ReportFormat,
    path: &Path,
) -> Result<(), ExportError> {
    let text_err = |e| ExportError::io(path, e);
    match (format, kind) {
        (ReportFormat::Csv, ReportKind::Tree) => delimited::write_tree(out, &data.tree),
        (ReportFormat::Csv, ReportKind::Extensions) => {
            delimited::write_extensions(out, &data.extensions)
        }
        (ReportFormat::Csv, ReportKind::Top100) => delimited::write_top_files(out, &data.top_files),
        (ReportFormat::Json, ReportKind::Tree) => json::write_rows(out, &data.tree),
        (ReportFormat::Json, ReportKind::Extensions) => json::write_rows(out, &data.extensions),
        (ReportFormat::Json, ReportKind::Top100) => json::write_rows(out, &data.top_files),
        (ReportFormat::Text, ReportKind::Tree) => text::write_tree(out, &data.tree).map_err(text_err),
        (ReportFormat::Text, ReportKind::Extensions) => {
            text::write_extensions(out, &data.extensions).map_err(text_err)
        }
        (ReportFormat::Text, ReportKind::Top100) => {
            text::write_top_files(out, &data.top_files).map_err(text_err)
        }
        // Not split; written whole by `export`.
        (ReportFormat::Html, _) => Ok(()),
    }
}

fn create(path: &Path) -> Result<BufWriter<File>, ExportError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| ExportError::io(path, e))
}

/// Default file stem for a report: `dirscope_{YYYYmmdd_HHMMSS}_{root}`.
///
/// Characters that are invalid in Windows file names are stripped from the
/// root name; an empty result becomes `root`.
pub fn default_report_stem(root_name: &str, now: &DateTime<Local>) -> String {
    let cleaned: String = root_name
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*'))
        .collect();
    let cleaned = cleaned.trim();
    let root = if cleaned.is_empty() { "root" } else { cleaned };
    format!("dirscope_{}_{root}", now.format("%Y%m%d_%H%M%S"))
}

/// Zip archive path used when bundling the export written for `base`.
pub fn bundle_path(base: &Path) -> PathBuf {
    base.with_extension("zip")
}

/// Deflate `files` into one archive at `dest`, stored by file name.
pub fn bundle_zip(files: &[PathBuf], dest: &Path) -> Result<PathBuf, ExportError> {
    let archive = File::create(dest).map_err(|e| ExportError::io(dest, e))?;
    let mut zip = ZipWriter::new(BufWriter::new(archive));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for path in files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        zip.start_file(name, options)?;
        let mut input = File::open(path).map_err(|e| ExportError::io(path, e))?;
        io::copy(&mut input, &mut zip).map_err(|e| ExportError::io(path, e))?;
    }

    let mut out = zip.finish()?;
    out.flush().map_err(|e| ExportError::io(dest, e))?;
    info!(archive = %dest.display(), files = files.len(), "Bundled report");
    Ok(dest.to_path_buf())
}
