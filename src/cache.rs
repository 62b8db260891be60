//! Persistent extraction cache for the document phase.
//!
//! PDF-to-text is by far the slowest step of a scan, so its normalized
//! output is memoized across runs in a flat JSON file inside the scanned
//! directory. The cache is a performance optimization, never a correctness
//! requirement: any problem reading or writing it degrades to an empty
//! in-memory cache with a warning. Other formats are cheap to re-extract
//! and are never cached.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Lives inside the scanned directory, scoping the cache to it. Not
/// versioned: a schema change means deleting the file.
pub(crate) const CACHE_FILE_NAME: &str = ".datasweep-cache.json";

/// Map of canonical path string to normalized full text. The empty string
/// is a valid value: extraction was attempted and yielded nothing, so
/// future runs must not retry.
#[derive(Default, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct ExtractionCache {
    entries: HashMap<String, String>,
}

impl ExtractionCache {
    /// Load the cache persisted at `path`. An absent file is an empty
    /// cache; an unreadable or malformed one is warned about and ignored.
    pub fn load(path: &Path) -> Self {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                warn!("could not read cache {}: {e}", path.display());
                return Self::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(cache) => {
                info!("loaded cache from {}", path.display());
                cache
            }
            Err(e) => {
                warn!("ignoring malformed cache {}: {e}", path.display());
                Self::default()
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: String, text: String) {
        self.entries.insert(key, text);
    }

    /// Rewrite the whole cache at `path`. Failure is a warning, not an
    /// error: the scan result is already complete at this point.
    pub fn persist(&self, path: &Path) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                warn!("could not serialize cache: {e}");
                return;
            }
        };
        if let Err(e) = fs::write(path, json) {
            warn!("could not write cache {}: {e}", path.display());
        }
    }
}

/// Cache keys are resolved absolute path strings. Keying by the path as
/// enumerated would miss on every re-run invoked from a different working
/// directory.
pub(crate) fn cache_key(path: &Path) -> String {
    fs::canonicalize(path)
        .unwrap_or_else(|_| PathBuf::from(path))
        .to_string_lossy()
        .into_owned()
}
