//! Fault-tolerant file loading.
//!
//! A dashboard section must never take the page down, so [`Loader::load`]
//! turns every read or parse failure into an empty table plus a diagnostic
//! string the page can show.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use super::cache::TableCache;
use super::normalize::normalize_headers;
use super::parser::Parser;
use super::source::{DataTable, SourceMetadata};

/// What came out of loading one file.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    /// The normalized table, empty when loading failed.
    pub table: Arc<DataTable>,
    /// Metadata for a successful read.
    pub metadata: Option<SourceMetadata>,
    /// User-facing message for a failed read.
    pub diagnostic: Option<String>,
}

impl LoadOutcome {
    /// Outcome for a successfully parsed file.
    pub fn loaded(table: DataTable, metadata: SourceMetadata) -> Self {
        Self {
            table: Arc::new(table),
            metadata: Some(metadata),
            diagnostic: None,
        }
    }

    /// Outcome for a file that could not be read or parsed.
    pub fn failed(message: String) -> Self {
        Self {
            table: Arc::new(DataTable::empty()),
            metadata: None,
            diagnostic: Some(message),
        }
    }

    /// True when the table has rows to work with.
    pub fn is_ok(&self) -> bool {
        !self.table.is_empty()
    }
}

/// Loads tables from disk through a caller-owned cache.
#[derive(Debug, Clone, Default)]
pub struct Loader {
    parser: Parser,
}

impl Loader {
    /// Create a loader with the default parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `path`, serving from `cache` when the cache still holds it.
    pub fn load(&self, cache: &mut TableCache, path: impl AsRef<Path>) -> LoadOutcome {
        let path = path.as_ref();
        if let Some(hit) = cache.lookup(path) {
            return hit;
        }

        let outcome = self.load_uncached(path);
        cache.store(path, outcome.clone());
        outcome
    }

    /// Read and normalize `path` without consulting any cache.
    pub fn load_uncached(&self, path: impl AsRef<Path>) -> LoadOutcome {
        let path = path.as_ref();
        match self.parser.parse_file(path) {
            Ok((table, metadata)) => {
                debug!(
                    path = %path.display(),
                    rows = metadata.row_count,
                    columns = metadata.column_count,
                    format = %metadata.format,
                    "loaded table"
                );
                LoadOutcome::loaded(normalize_headers(table), metadata)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load table");
                LoadOutcome::failed(format!("Failed to load `{}`: {}", path.display(), e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::CachePolicy;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file
    }

    #[test]
    fn test_missing_file_yields_empty_table_and_diagnostic() {
        let loader = Loader::new();
        let outcome = loader.load_uncached("/nonexistent/hopemarket/crypto_under30.csv");

        assert!(outcome.table.is_empty());
        assert!(outcome.metadata.is_none());
        let message = outcome.diagnostic.unwrap();
        assert!(message.contains("crypto_under30.csv"));
    }

    #[test]
    fn test_load_normalizes_headers() {
        let file = create_test_file(" year , under30_lottery_pct ,source\n2003,31,Gallup\n");
        let outcome = Loader::new().load_uncached(file.path());

        assert!(outcome.is_ok());
        assert_eq!(outcome.table.headers, vec!["year", "under30_lottery_pct", "source"]);
        assert_eq!(outcome.metadata.unwrap().row_count, 1);
    }

    #[test]
    fn test_forever_cache_does_not_reread() {
        let mut file = create_test_file("year,pct\n2003,31\n");
        let loader = Loader::new();
        let mut cache = TableCache::new(CachePolicy::Forever);

        let first = loader.load(&mut cache, file.path());
        file.write_all(b"2016,20\n").unwrap();
        file.flush().unwrap();
        let second = loader.load(&mut cache, file.path());

        assert_eq!(first.table.row_count(), 1);
        assert_eq!(second.table.row_count(), 1);
        assert!(Arc::ptr_eq(&first.table, &second.table));
    }

    #[test]
    fn test_content_hash_cache_reloads_changed_file() {
        let mut file = create_test_file("year,pct\n2003,31\n");
        let loader = Loader::new();
        let mut cache = TableCache::new(CachePolicy::ContentHash);

        let first = loader.load(&mut cache, file.path());
        let unchanged = loader.load(&mut cache, file.path());
        assert!(Arc::ptr_eq(&first.table, &unchanged.table));

        file.write_all(b"2016,20\n").unwrap();
        file.flush().unwrap();
        let changed = loader.load(&mut cache, file.path());
        assert_eq!(changed.table.row_count(), 2);
    }
}
