//! Expiring response cache for devstats.
//!
//! Stores one JSON file per key under a cache directory so that repeated
//! runs within the TTL don't hit the upstream APIs again. Keys are hashed
//! (SHA-256, hex) to produce safe file names; each file holds an envelope
//! with the write timestamp, the original key, and the cached payload.
//!
//! Expired and corrupt entries are deleted on read and reported as misses,
//! never as errors: losing a cache entry only costs a refetch.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Cache errors.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Filesystem access failed.
    #[error("cache io error: {0}")]
    Io(#[from] std::io::Error),
    /// Payload could not be serialized.
    #[error("cache serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Envelope written to disk around every cached payload.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct Envelope<T> {
    timestamp: DateTime<Utc>,
    key: String,
    data: T,
}

/// Metadata about one cache entry, for `devstats cache info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    pub key: String,
    pub cached_at: DateTime<Utc>,
    pub size_bytes: u64,
}

/// Hash-keyed expiring JSON file store.
#[derive(Debug, Clone)]
pub struct Cache {
    dir: PathBuf,
    ttl: Duration,
}

impl Cache {
    /// Opens a cache rooted at `dir`, creating the directory if needed.
    /// Entries older than `ttl_hours` are treated as misses.
    pub fn open(dir: impl Into<PathBuf>, ttl_hours: i64) -> Result<Self, CacheError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            ttl: Duration::hours(ttl_hours),
        })
    }

    /// Returns the file path for a key.
    fn entry_path(&self, key: &str) -> PathBuf {
        let digest = Sha256::digest(key.as_bytes());
        self.dir.join(format!("{}.json", hex::encode(digest)))
    }

    /// Fetches a cached value.
    ///
    /// Returns `Ok(None)` when the key is absent, expired, or the file is
    /// corrupt; expired and corrupt files are removed.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        let path = self.entry_path(key);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let envelope: Envelope<T> = match serde_json::from_str(&contents) {
            Ok(envelope) => envelope,
            Err(err) => {
                tracing::warn!(key, %err, "removing corrupt cache entry");
                fs::remove_file(&path)?;
                return Ok(None);
            }
        };

        if Utc::now() - envelope.timestamp > self.ttl {
            tracing::debug!(key, "cache entry expired");
            fs::remove_file(&path)?;
            return Ok(None);
        }

        Ok(Some(envelope.data))
    }

    /// Stores a value under a key, replacing any previous entry.
    pub fn put<T: Serialize>(&self, key: &str, data: &T) -> Result<(), CacheError> {
        let envelope = Envelope {
            timestamp: Utc::now(),
            key: key.to_string(),
            data,
        };
        let contents = serde_json::to_string_pretty(&envelope)?;
        fs::write(self.entry_path(key), contents)?;
        Ok(())
    }

    /// Removes one entry. Returns whether an entry existed.
    pub fn remove(&self, key: &str) -> Result<bool, CacheError> {
        let path = self.entry_path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    /// Removes all entries. Returns the number removed.
    pub fn clear(&self) -> Result<usize, CacheError> {
        let mut removed = 0;
        for path in self.entry_files()? {
            fs::remove_file(&path)?;
            removed += 1;
        }
        Ok(removed)
    }

    /// Lists entry metadata, newest first. Unreadable files are skipped.
    pub fn entries(&self) -> Result<Vec<EntryInfo>, CacheError> {
        let mut entries = Vec::new();
        for path in self.entry_files()? {
            let Ok(contents) = fs::read_to_string(&path) else {
                continue;
            };
            let Ok(envelope) = serde_json::from_str::<Envelope<serde_json::Value>>(&contents)
            else {
                continue;
            };
            let size_bytes = fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
            entries.push(EntryInfo {
                key: envelope.key,
                cached_at: envelope.timestamp,
                size_bytes,
            });
        }
        entries.sort_by(|a, b| b.cached_at.cmp(&a.cached_at));
        Ok(entries)
    }

    /// Returns the cache directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_files(&self) -> Result<Vec<PathBuf>, CacheError> {
        let mut files = Vec::new();
        for dir_entry in fs::read_dir(&self.dir)? {
            let path = dir_entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                files.push(path);
            }
        }
        Ok(files)
    }
}
