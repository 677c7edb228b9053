//! Byte totals aggregated by file extension.

use compact_str::CompactString;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::format::percent_of;

/// Key used for files that have no usable suffix.
pub const NO_EXTENSION: &str = "<no extension>";

/// Compute the extension key of a file name.
///
/// The key is the lower-cased suffix including its dot (`".txt"`). A name
/// whose only dot is the leading one (`.bashrc`, `.`) or that ends with a
/// dot (`notes.`) has no suffix and maps to [`NO_EXTENSION`].
pub fn extension_key(name: &str) -> CompactString {
    match name.rfind('.') {
        Some(pos) if pos > 0 && pos + 1 < name.len() => {
            CompactString::new(name[pos..].to_lowercase())
        }
        _ => CompactString::new(NO_EXTENSION),
    }
}

/// Cumulative byte totals per extension, independent of tree position.
///
/// Keys keep their first-seen order so that equal totals sort
/// deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionTable {
    totals: IndexMap<CompactString, u64>,
}

impl ExtensionTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one file. Files with a size of zero still create their bucket.
    pub fn record(&mut self, file_name: &str, size: u64) {
        *self.totals.entry(extension_key(file_name)).or_insert(0) += size;
    }

    /// Total bytes recorded under `key`.
    pub fn get(&self, key: &str) -> Option<u64> {
        self.totals.get(key).copied()
    }

    /// Sum over all buckets.
    pub fn total(&self) -> u64 {
        self.totals.values().sum()
    }

    /// Share of `size` in the table total, in percent.
    pub fn percent_of_total(&self, size: u64) -> f64 {
        percent_of(size, self.total())
    }

    /// Buckets sorted by size descending, ties in first-seen order.
    pub fn sorted_by_size(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> = self
            .totals
            .iter()
            .map(|(key, size)| (key.as_str(), *size))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }

    /// Number of distinct extensions.
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    /// Check if no file has been recorded.
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Iterate buckets in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.totals.iter().map(|(key, size)| (key.as_str(), *size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_key() {
        assert_eq!(extension_key("report.PDF"), ".pdf");
        assert_eq!(extension_key("archive.tar.gz"), ".gz");
        assert_eq!(extension_key("Makefile"), NO_EXTENSION);
        assert_eq!(extension_key("."), NO_EXTENSION);
        assert_eq!(extension_key(".bashrc"), NO_EXTENSION);
        assert_eq!(extension_key("notes."), NO_EXTENSION);
        assert_eq!(extension_key(""), NO_EXTENSION);
    }

    #[test]
    fn test_record_and_sort() {
        let mut table = ExtensionTable::new();
        table.record("a.txt", 10);
        table.record("b.rs", 30);
        table.record("c.TXT", 25);
        table.record("README", 5);
        table.record("empty.log", 0);

        assert_eq!(table.get(".txt"), Some(35));
        assert_eq!(table.get(".log"), Some(0));
        assert_eq!(table.get(NO_EXTENSION), Some(5));
        assert_eq!(table.total(), 70);
        assert_eq!(table.len(), 4);

        let sorted = table.sorted_by_size();
        assert_eq!(sorted[0], (".txt", 35));
        assert_eq!(sorted[1], (".rs", 30));
        assert_eq!(sorted.last(), Some(&(".log", 0)));
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let mut table = ExtensionTable::new();
        table.record("z.zip", 10);
        table.record("a.avi", 10);
        let sorted = table.sorted_by_size();
        assert_eq!(sorted[0].0, ".zip");
        assert_eq!(sorted[1].0, ".avi");
    }

    #[test]
    fn test_percent_uses_table_total() {
        let mut table = ExtensionTable::new();
        table.record("a.txt", 25);
        table.record("b.rs", 75);
        assert_eq!(table.percent_of_total(25), 25.0);
        assert_eq!(ExtensionTable::new().percent_of_total(0), 0.0);
    }
}
