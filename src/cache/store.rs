use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

// ============================================================================
// Cache store — content-hash keyed memoization of computed results
// ============================================================================

/// One memoized computation, keyed by the content hash of its input.
/// Inserted on miss, never mutated; re-storing the same hash overwrites.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheEntry {
    pub content_hash: String,

    /// Serialized result (classification, slot mapping, report, ...).
    pub payload: serde_json::Value,

    pub created_at_ms: u128,
}

impl CacheEntry {
    pub fn new(content_hash: String, payload: serde_json::Value) -> Self {
        let created_at_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        Self {
            content_hash,
            payload,
            created_at_ms,
        }
    }
}

#[derive(Debug)]
pub enum CacheError {
    /// Storage backend I/O failed (missing directory, permissions, disk).
    Io { context: String, source: std::io::Error },

    /// A stored payload could not be encoded or decoded.
    Serde { context: String, source: serde_json::Error },
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::Io { context, source } => {
                write!(f, "cache I/O error ({}): {}", context, source)
            }
            CacheError::Serde { context, source } => {
                write!(f, "cache encoding error ({}): {}", context, source)
            }
        }
    }
}

impl std::error::Error for CacheError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CacheError::Io { source, .. } => Some(source),
            CacheError::Serde { source, .. } => Some(source),
        }
    }
}

/// Key-value contract the pipeline memoizes through. Implementations
/// serialize their own writes; per-entry atomicity is the only guarantee the
/// pipeline relies on. A failing store must never fail classification:
/// callers treat every error here as a cache miss.
pub trait CacheStore {
    /// Fetch by hash. `Ok(None)` is a miss; errors are degraded misses.
    fn lookup(&self, hash: &str) -> Result<Option<CacheEntry>, CacheError>;

    /// Idempotent upsert keyed by the entry's hash; last write wins.
    fn store(&self, entry: CacheEntry) -> Result<(), CacheError>;

    /// Drop one entry, for content known to have changed out-of-band.
    fn invalidate(&self, hash: &str) -> Result<(), CacheError>;

    /// Drop everything.
    fn clear_all(&self) -> Result<(), CacheError>;
}

// ============================================================================
// In-memory store — tests and single-process embedding
// ============================================================================

#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, CacheEntry>> {
        // A poisoned lock still holds valid entries; recover rather than fail.
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl CacheStore for MemoryStore {
    fn lookup(&self, hash: &str) -> Result<Option<CacheEntry>, CacheError> {
        Ok(self.lock().get(hash).cloned())
    }

    fn store(&self, entry: CacheEntry) -> Result<(), CacheError> {
        self.lock().insert(entry.content_hash.clone(), entry);
        Ok(())
    }

    fn invalidate(&self, hash: &str) -> Result<(), CacheError> {
        self.lock().remove(hash);
        Ok(())
    }

    fn clear_all(&self) -> Result<(), CacheError> {
        self.lock().clear();
        Ok(())
    }
}

// ============================================================================
// File store — one JSON file per hash under a cache directory
// ============================================================================

pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn entry_path(&self, hash: &str) -> PathBuf {
        self.dir.join(format!("{}.json", hash))
    }
}

impl CacheStore for FileStore {
    fn lookup(&self, hash: &str) -> Result<Option<CacheEntry>, CacheError> {
        let path = self.entry_path(hash);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(CacheError::Io {
                    context: format!("reading {}", path.display()),
                    source: e,
                });
            }
        };
        let entry = serde_json::from_str(&content).map_err(|e| CacheError::Serde {
            context: format!("decoding {}", path.display()),
            source: e,
        })?;
        Ok(Some(entry))
    }

    fn store(&self, entry: CacheEntry) -> Result<(), CacheError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| CacheError::Io {
            context: format!("creating {}", self.dir.display()),
            source: e,
        })?;
        let content = serde_json::to_string(&entry).map_err(|e| CacheError::Serde {
            context: format!("encoding entry {}", entry.content_hash),
            source: e,
        })?;
        let path = self.entry_path(&entry.content_hash);
        std::fs::write(&path, content).map_err(|e| CacheError::Io {
            context: format!("writing {}", path.display()),
            source: e,
        })
    }

    fn invalidate(&self, hash: &str) -> Result<(), CacheError> {
        let path = self.entry_path(hash);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CacheError::Io {
                context: format!("removing {}", path.display()),
                source: e,
            }),
        }
    }

    fn clear_all(&self) -> Result<(), CacheError> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => {
                return Err(CacheError::Io {
                    context: format!("listing {}", self.dir.display()),
                    source: e,
                });
            }
        };
        for entry in entries.filter_map(|e| e.ok()) {
            let path = entry.path();
            if path.extension().map_or(false, |e| e == "json") {
                std::fs::remove_file(&path).map_err(|e| CacheError::Io {
                    context: format!("removing {}", path.display()),
                    source: e,
                })?;
            }
        }
        Ok(())
    }
}
