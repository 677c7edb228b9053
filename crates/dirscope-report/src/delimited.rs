//! Semicolon-separated CSV output.
//!
//! Files start with a UTF-8 byte order mark so spreadsheet tools detect the
//! encoding; percentages carry four decimals.

use std::io::Write;

use csv::{Writer, WriterBuilder};

use crate::error::ExportError;
use crate::rows::{ExtensionRow, TopFileRow, TreeRow};

const BOM: &[u8] = b"\xEF\xBB\xBF";

fn writer<W: Write>(mut out: W) -> Result<Writer<W>, ExportError> {
    out.write_all(BOM).map_err(csv::Error::from)?;
    Ok(WriterBuilder::new().delimiter(b';').from_writer(out))
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

/// Write the flattened tree.
pub fn write_tree<W: Write>(out: W, rows: &[TreeRow]) -> Result<(), ExportError> {
    let mut wtr = writer(out)?;
    wtr.write_record([
        "path",
        "name",
        "level",
        "type",
        "size_bytes",
        "size_human",
        "percent_total",
        "access_denied",
    ])?;
    for row in rows {
        wtr.write_record([
            row.path.as_str(),
            row.name.as_str(),
            &row.level.to_string(),
            row.kind.as_str(),
            &row.size_bytes.to_string(),
            row.size_human.as_str(),
            &format!("{:.4}", row.percent_total),
            yes_no(row.access_denied),
        ])?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write the extension table.
pub fn write_extensions<W: Write>(out: W, rows: &[ExtensionRow]) -> Result<(), ExportError> {
    let mut wtr = writer(out)?;
    wtr.write_record(["extension", "size_bytes", "size_human", "percent_total"])?;
    for row in rows {
        wtr.write_record([
            row.extension.as_str(),
            &row.size_bytes.to_string(),
            row.size_human.as_str(),
            &format!("{:.4}", row.percent_total),
        ])?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write the largest-files list.
pub fn write_top_files<W: Write>(out: W, rows: &[TopFileRow]) -> Result<(), ExportError> {
    let mut wtr = writer(out)?;
    wtr.write_record([
        "path",
        "name",
        "size_bytes",
        "size_human",
        "percent_total",
        "level",
    ])?;
    for row in rows {
        wtr.write_record([
            row.path.as_str(),
            row.name.as_str(),
            &row.size_bytes.to_string(),
            row.size_human.as_str(),
            &format!("{:.4}", row.percent_total),
            &row.level.to_string(),
        ])?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}
