//! Path-keyed memo of load outcomes.
//!
//! The cache is a plain value owned by whoever renders pages. Nothing in the
//! library keeps one behind a global, so tests and servers each decide how
//! long a loaded table stays valid.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::loader::LoadOutcome;
use super::parser::{content_hash, read_bytes};

/// When a cached load stops being served.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CachePolicy {
    /// Entries live until the cache is dropped or cleared.
    #[default]
    Forever,
    /// Entries expire after a fixed number of seconds.
    Ttl { seconds: u64 },
    /// Entries are re-validated against the file's SHA-256 on every lookup.
    ContentHash,
}

#[derive(Debug, Clone)]
struct CachedLoad {
    outcome: LoadOutcome,
    stored_at: Instant,
}

/// Memoized load outcomes keyed by file path.
#[derive(Debug, Default)]
pub struct TableCache {
    policy: CachePolicy,
    entries: HashMap<PathBuf, CachedLoad>,
}

impl TableCache {
    /// Create an empty cache with the given invalidation policy.
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            policy,
            entries: HashMap::new(),
        }
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drop the entry for one path. Returns true if something was removed.
    pub fn invalidate(&mut self, path: impl AsRef<Path>) -> bool {
        self.entries.remove(path.as_ref()).is_some()
    }

    /// Return the cached outcome for `path` if it is still valid under the policy.
    pub fn lookup(&self, path: impl AsRef<Path>) -> Option<LoadOutcome> {
        let path = path.as_ref();
        let entry = self.entries.get(path)?;

        let valid = match self.policy {
            CachePolicy::Forever => true,
            CachePolicy::Ttl { seconds } => {
                entry.stored_at.elapsed() < Duration::from_secs(seconds)
            }
            CachePolicy::ContentHash => {
                let current = read_bytes(path).ok().map(|bytes| content_hash(&bytes));
                let stored = entry.outcome.metadata.as_ref().map(|m| m.hash.clone());
                current == stored
            }
        };

        if valid {
            debug!(path = %path.display(), "table cache hit");
            Some(entry.outcome.clone())
        } else {
            debug!(path = %path.display(), "table cache entry is stale");
            None
        }
    }

    /// Remember an outcome for `path`, replacing any previous entry.
    pub fn store(&mut self, path: impl Into<PathBuf>, outcome: LoadOutcome) {
        self.entries.insert(
            path.into(),
            CachedLoad {
                outcome,
                stored_at: Instant::now(),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::DataTable;

    fn outcome() -> LoadOutcome {
        LoadOutcome::failed("Failed to load".to_string())
    }

    #[test]
    fn test_forever_policy_keeps_entries() {
        let mut cache = TableCache::new(CachePolicy::Forever);
        cache.store("data/missing.csv", outcome());

        assert_eq!(cache.len(), 1);
        assert!(cache.lookup("data/missing.csv").is_some());
        assert!(cache.lookup("data/other.csv").is_none());
    }

    #[test]
    fn test_zero_ttl_expires_immediately() {
        let mut cache = TableCache::new(CachePolicy::Ttl { seconds: 0 });
        cache.store("data/missing.csv", outcome());
        assert!(cache.lookup("data/missing.csv").is_none());
    }

    #[test]
    fn test_invalidate_and_clear() {
        let mut cache = TableCache::default();
        cache.store("a.csv", outcome());
        cache.store("b.csv", outcome());

        assert!(cache.invalidate("a.csv"));
        assert!(!cache.invalidate("a.csv"));
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_content_hash_policy_keeps_failed_load_while_file_is_absent() {
        let mut cache = TableCache::new(CachePolicy::ContentHash);
        cache.store("/nonexistent/hopemarket/table.csv", outcome());
        let hit = cache.lookup("/nonexistent/hopemarket/table.csv").unwrap();
        assert_eq!(*hit.table, DataTable::empty());
    }

    #[test]
    fn test_policy_deserializes_from_tagged_json() {
        let policy: CachePolicy = serde_json::from_str(r#"{"kind":"ttl","seconds":30}"#).unwrap();
        assert_eq!(policy, CachePolicy::Ttl { seconds: 30 });

        let policy: CachePolicy = serde_json::from_str(r#"{"kind":"content_hash"}"#).unwrap();
        assert_eq!(policy, CachePolicy::ContentHash);
    }
}
