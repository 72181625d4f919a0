// Cache store for reading and writing persisted client data.
// A dumb string key/value layer plus a timestamped JSON envelope on top.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::Utc;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::warn;

use crate::error::{DeparturesError, Result};

use super::paths;

/// String-keyed storage for JSON text.
///
/// Freshness is the caller's concern; implementations only move bytes.
/// Reads fail soft: anything missing or unreadable is reported as absent.
pub trait KeyValue: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn put(&self, key: &str, value: &str) -> Result<()>;
}

/// One JSON file per key under a cache directory.
pub struct DiskStore {
    root: PathBuf,
}

impl DiskStore {
    /// Open the store under the platform cache directory.
    pub fn open() -> Result<Self> {
        let root = paths::cache_dir()
            .ok_or_else(|| DeparturesError::Cache("no cache directory available".to_string()))?;
        Ok(Self { root })
    }

    /// Open the store rooted at the given directory.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl KeyValue for DiskStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(paths::key_path(&self.root, key)).ok()
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        let path = paths::key_path(&self.root, key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write atomically via temp file
        let temp_path = path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(value.as_bytes())?;
        file.sync_all()?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }
}

/// In-memory store for tests and embedders without a filesystem.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValue for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.get(key).cloned()
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Wrapper for cached payloads with a write timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// When the payload was written, milliseconds since the epoch.
    pub timestamp: i64,
    /// The cached payload.
    pub data: T,
}

impl<T> Envelope<T> {
    /// Wrap a payload with the current time.
    pub fn new(data: T) -> Self {
        Self {
            timestamp: now_ms(),
            data,
        }
    }

    /// Whether the envelope has outlived the TTL as of `now_ms`.
    ///
    /// Strict comparison: an envelope exactly `ttl_ms` old is still fresh.
    pub fn is_expired_at(&self, now_ms: i64, ttl_ms: i64) -> bool {
        now_ms - self.timestamp > ttl_ms
    }

    /// Whether the envelope has outlived the TTL right now.
    pub fn is_expired(&self, ttl_ms: i64) -> bool {
        self.is_expired_at(now_ms(), ttl_ms)
    }
}

/// Current time in milliseconds since the epoch.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Read and decode an envelope; missing or corrupt data reads as absent.
pub fn read_envelope<T: DeserializeOwned>(kv: &dyn KeyValue, key: &str) -> Option<Envelope<T>> {
    let text = kv.get(key)?;
    match serde_json::from_str(&text) {
        Ok(envelope) => Some(envelope),
        Err(err) => {
            warn!(key, error = %err, "discarding unparsable cache entry");
            None
        }
    }
}

/// Read an envelope and return its payload only while fresh.
pub fn read_if_fresh<T: DeserializeOwned>(kv: &dyn KeyValue, key: &str, ttl_ms: i64) -> Option<T> {
    let envelope = read_envelope::<T>(kv, key)?;
    if envelope.is_expired(ttl_ms) {
        return None;
    }
    Some(envelope.data)
}

/// Write a payload wrapped in a freshly stamped envelope.
pub fn write_envelope<T: Serialize>(kv: &dyn KeyValue, key: &str, data: &T) -> Result<()> {
    let envelope = Envelope {
        timestamp: now_ms(),
        data,
    };
    let json = serde_json::to_string(&envelope)?;
    kv.put(key, &json)
}
