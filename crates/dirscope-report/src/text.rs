//! Plain-text listings.

use std::io::{self, Write};

use crate::rows::{ExtensionRow, TopFileRow, TreeRow};

/// One line per node, indented two spaces per level.
pub fn write_tree<W: Write>(mut out: W, rows: &[TreeRow]) -> io::Result<()> {
    for row in rows {
        writeln!(
            out,
            "{indent}{name} ({kind}, {size}, {pct:.2} %, access denied: {denied}) - {path}",
            indent = "  ".repeat(row.level as usize),
            name = row.name,
            kind = row.kind,
            size = row.size_human,
            pct = row.percent_total,
            denied = if row.access_denied { "yes" } else { "no" },
            path = row.path,
        )?;
    }
    Ok(())
}

/// One line per extension bucket, largest first.
pub fn write_extensions<W: Write>(mut out: W, rows: &[ExtensionRow]) -> io::Result<()> {
    for row in rows {
        writeln!(
            out,
            "{}: {} ({:.2} %, {} bytes)",
            row.extension, row.size_human, row.percent_total, row.size_bytes
        )?;
    }
    Ok(())
}

/// One line per file of the largest-files list.
pub fn write_top_files<W: Write>(mut out: W, rows: &[TopFileRow]) -> io::Result<()> {
    for row in rows {
        writeln!(
            out,
            "{} ({}, {:.2} %, level {}) - {}",
            row.name, row.size_human, row.percent_total, row.level, row.path
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_line() {
        let rows = [TreeRow {
            path: "/data/docs/a.txt".to_string(),
            name: "a.txt".to_string(),
            level: 2,
            kind: "file".to_string(),
            size_bytes: 2048,
            size_human: "2.0 Ko".to_string(),
            percent_total: 12.5,
            access_denied: false,
        }];
        let mut buf = Vec::new();
        write_tree(&mut buf, &rows).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "    a.txt (file, 2.0 Ko, 12.50 %, access denied: no) - /data/docs/a.txt\n"
        );
    }

    #[test]
    fn test_extension_and_top_lines() {
        let mut buf = Vec::new();
        write_extensions(
            &mut buf,
            &[ExtensionRow {
                extension: ".log".to_string(),
                size_bytes: 512,
                size_human: "512.0 o".to_string(),
                percent_total: 50.0,
            }],
        )
        .unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), ".log: 512.0 o (50.00 %, 512 bytes)\n");

        let mut buf = Vec::new();
        write_top_files(
            &mut buf,
            &[TopFileRow {
                path: "/a/b.iso".to_string(),
                name: "b.iso".to_string(),
                size_bytes: 1024,
                size_human: "1.0 Ko".to_string(),
                percent_total: 99.999,
                level: 1,
            }],
        )
        .unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "b.iso (1.0 Ko, 100.00 %, level 1) - /a/b.iso\n"
        );
    }
}
