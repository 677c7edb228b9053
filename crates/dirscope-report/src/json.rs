//! Pretty-printed JSON arrays of row records.

use std::io::Write;

use serde::Serialize;

use crate::error::ExportError;

/// Write `rows` as one indented JSON array followed by a newline.
pub fn write_rows<W: Write, T: Serialize>(mut out: W, rows: &[T]) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(&mut out, rows)?;
    out.write_all(b"\n").map_err(serde_json::Error::io)?;
    Ok(())
}
