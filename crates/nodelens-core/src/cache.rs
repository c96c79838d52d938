use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};
use std::time::Duration;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::resources::ResourcePayload;

/// Result of a cache probe. Stale entries keep their payload so a failed
/// refresh can still fall back to the last good data.
#[derive(Debug, Clone)]
pub enum Lookup {
    Fresh(ResourcePayload),
    Stale(ResourcePayload),
    Absent,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    payload: ResourcePayload,
    fetched_at: Timestamp,
    ttl: Duration,
    invalidated: bool,
}

impl CacheEntry {
    fn is_fresh(&self, now: Timestamp) -> bool {
        if self.invalidated {
            return false;
        }
        now.as_second() - self.fetched_at.as_second() < self.ttl.as_secs() as i64
    }
}

/// On-disk form of one entry: a single JSON file per cache key.
#[derive(Serialize, Deserialize)]
struct DiskEntry {
    key: String,
    fetched_at: i64,
    ttl_secs: u64,
    payload: ResourcePayload,
}

/// Keyed storage of cluster query results with a time-to-live.
///
/// Entries are replaced wholesale under the write guard, so readers never
/// observe a half-written entry. Explicit invalidation marks entries stale
/// without discarding them. Disk persistence is best-effort: any IO error
/// drops the cache to in-memory-only operation and is never surfaced to
/// callers.
pub struct PayloadCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    default_ttl: Duration,
    disk: Mutex<Option<PathBuf>>,
}

impl PayloadCache {
    /// In-memory cache with no persistence.
    pub fn new(default_ttl: Duration) -> Self {
        Self { entries: RwLock::new(HashMap::new()), default_ttl, disk: Mutex::new(None) }
    }

    /// Cache persisted under `dir`, seeded from any entries already on
    /// disk. Each loaded entry is evaluated for freshness normally; a
    /// stale one is still a usable fallback.
    pub fn with_disk(default_ttl: Duration, dir: PathBuf) -> Self {
        if let Err(e) = fs::create_dir_all(&dir) {
            tracing::warn!("cannot create cache dir {}, caching in memory only: {e}", dir.display());
            return Self::new(default_ttl);
        }
        let entries = load_dir(&dir);
        if !entries.is_empty() {
            tracing::info!("loaded {} cache entries from {}", entries.len(), dir.display());
        }
        Self { entries: RwLock::new(entries), default_ttl, disk: Mutex::new(Some(dir)) }
    }

    pub fn get(&self, key: &str) -> Lookup {
        let Ok(entries) = self.entries.read() else { return Lookup::Absent };
        let now = Timestamp::now();
        match entries.get(key) {
            None => Lookup::Absent,
            Some(entry) if entry.is_fresh(now) => Lookup::Fresh(entry.payload.clone()),
            Some(entry) => Lookup::Stale(entry.payload.clone()),
        }
    }

    pub fn put(&self, key: &str, payload: ResourcePayload) {
        self.put_with_ttl(key, payload, self.default_ttl);
    }

    pub fn put_with_ttl(&self, key: &str, payload: ResourcePayload, ttl: Duration) {
        let entry = CacheEntry { payload, fetched_at: Timestamp::now(), ttl, invalidated: false };
        self.persist(key, &entry);
        let Ok(mut entries) = self.entries.write() else { return };
        entries.insert(key.to_string(), entry);
    }

    /// Force the next `get` for `key` to report stale. The payload stays
    /// available as a fallback.
    pub fn invalidate(&self, key: &str) {
        let Ok(mut entries) = self.entries.write() else { return };
        if let Some(entry) = entries.get_mut(key) {
            entry.invalidated = true;
        }
    }

    /// Invalidate every key starting with `prefix` — used when the keys
    /// scoped to a cluster context become meaningless after a switch.
    pub fn invalidate_prefix(&self, prefix: &str) {
        let Ok(mut entries) = self.entries.write() else { return };
        for (key, entry) in entries.iter_mut() {
            if key.starts_with(prefix) {
                entry.invalidated = true;
            }
        }
    }

    pub fn invalidate_all(&self) {
        let Ok(mut entries) = self.entries.write() else { return };
        for entry in entries.values_mut() {
            entry.invalidated = true;
        }
    }

    pub fn last_updated(&self, key: &str) -> Option<Timestamp> {
        let entries = self.entries.read().ok()?;
        entries.get(key).map(|entry| entry.fetched_at)
    }

    fn persist(&self, key: &str, entry: &CacheEntry) {
        let Ok(mut disk) = self.disk.lock() else { return };
        let Some(dir) = disk.as_ref() else { return };

        let record = DiskEntry {
            key: key.to_string(),
            fetched_at: entry.fetched_at.as_second(),
            ttl_secs: entry.ttl.as_secs(),
            payload: entry.payload.clone(),
        };
        let path = file_for(dir, key);
        let result = serde_json::to_vec(&record)
            .map_err(|e| std::io::Error::other(e.to_string()))
            .and_then(|bytes| fs::write(&path, bytes));
        if let Err(e) = result {
            tracing::warn!("cache write to {} failed, dropping to in-memory only: {e}", path.display());
            *disk = None;
        }
    }
}

fn load_dir(dir: &Path) -> HashMap<String, CacheEntry> {
    let mut entries = HashMap::new();
    let Ok(listing) = fs::read_dir(dir) else { return entries };

    for item in listing.flatten() {
        let path = item.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }
        match read_entry(&path) {
            Ok((key, entry)) => {
                entries.insert(key, entry);
            }
            Err(e) => {
                tracing::warn!("ignoring unreadable cache file {}: {e}", path.display());
            }
        }
    }
    entries
}

fn read_entry(path: &Path) -> anyhow::Result<(String, CacheEntry)> {
    let bytes = fs::read(path)?;
    let record: DiskEntry = serde_json::from_slice(&bytes)?;
    let fetched_at = Timestamp::from_second(record.fetched_at)?;
    let entry = CacheEntry {
        payload: record.payload,
        fetched_at,
        ttl: Duration::from_secs(record.ttl_secs),
        invalidated: false,
    };
    Ok((record.key, entry))
}

fn file_for(dir: &Path, key: &str) -> PathBuf {
    dir.join(format!("{}.json", sanitize_key(key)))
}

fn sanitize_key(key: &str) -> String {
    key.chars().map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '.' { c } else { '_' }).collect()
}

#[cfg(test)]
mod tests;
