//! A small persistent key-value store used to memoize external lookups.
//!
//! Each store lives in a single bincode file, `<name>.bin`, inside the cache folder.
//! The whole map is loaded on open and rewritten atomically after every insert.
//! Entries never expire. Decoding, encoding and the file replace run on tokio's
//! blocking pool.

use crate::cache::error::CacheError;
use bincode::config::{Configuration, Fixint, LittleEndian};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const BINCODE_CONFIG: Configuration<LittleEndian, Fixint> =
    bincode::config::standard().with_fixed_int_encoding();

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry<V> {
    fetched_at: DateTime<Utc>,
    value: V,
}

type Entries<K, V> = HashMap<K, CacheEntry<V>>;

/// A named, disk-backed memo table.
///
/// Keys are the exact arguments of a lookup and values are the raw responses of the
/// service that was consulted. Use [`DiskCache::get_or_compute`] to wrap a lookup.
#[derive(Debug)]
pub struct DiskCache<K, V> {
    name: String,
    path: PathBuf,
    entries: Entries<K, V>,
}

impl<K, V> DiskCache<K, V>
where
    K: Serialize + DeserializeOwned + Eq + Hash + Debug + Clone + Send + 'static,
    V: Serialize + DeserializeOwned + Clone + Send + 'static,
{
    /// Opens (or creates) the store `name` inside `cache_dir`.
    ///
    /// The directory is created if it doesn't exist. An existing store file is read
    /// in full; a file that cannot be decoded is reported rather than silently replaced.
    pub async fn open(cache_dir: &Path, name: &str) -> Result<Self, CacheError> {
        tokio::fs::create_dir_all(cache_dir)
            .await
            .map_err(|e| CacheError::CacheDirCreation(cache_dir.to_path_buf(), e))?;
        let path = cache_dir.join(format!("{name}.bin"));

        let exists = tokio::fs::try_exists(&path)
            .await
            .map_err(|e| CacheError::CacheRead(path.clone(), e))?;
        let entries = if exists {
            let path_clone = path.clone();
            let entries =
                tokio::task::spawn_blocking(move || read_entries::<K, V>(&path_clone)).await??;
            debug!("Loaded {} entries from {}", entries.len(), path.display());
            entries
        } else {
            HashMap::new()
        };

        Ok(Self {
            name: name.to_string(),
            path,
            entries,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key).map(|entry| &entry.value)
    }

    /// Stores `value` under `key` and writes the store to disk.
    pub async fn insert(&mut self, key: K, value: V) -> Result<(), CacheError> {
        self.entries.insert(
            key,
            CacheEntry {
                fetched_at: Utc::now(),
                value,
            },
        );
        self.persist().await
    }

    /// Returns the stored value for `key`, or runs `compute`, stores its result and returns it.
    ///
    /// `compute` is not invoked on a hit. A failed computation is returned as-is and
    /// nothing is stored, so the next call with the same key tries again.
    pub async fn get_or_compute<F, Fut, E>(&mut self, key: K, compute: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
        E: From<CacheError>,
    {
        if let Some(entry) = self.entries.get(&key) {
            debug!(
                "Cache hit in {} for {:?} (fetched {})",
                self.name, key, entry.fetched_at
            );
            return Ok(entry.value.clone());
        }

        warn!("Cache miss in {} for {:?}", self.name, key);
        let value = compute().await?;
        self.insert(key, value.clone()).await?;
        Ok(value)
    }

    async fn persist(&self) -> Result<(), CacheError> {
        let entries = self.entries.clone();
        let path = self.path.clone();
        let written = tokio::task::spawn_blocking(move || write_entries(&path, &entries)).await??;

        info!(
            "Wrote {} entries ({} bytes) to {}",
            self.entries.len(),
            written,
            self.path.display()
        );
        Ok(())
    }
}

fn read_entries<K, V>(path: &Path) -> Result<Entries<K, V>, CacheError>
where
    K: DeserializeOwned + Eq + Hash,
    V: DeserializeOwned,
{
    let bytes = std::fs::read(path).map_err(|e| CacheError::CacheRead(path.to_path_buf(), e))?;
    let (entries, _) = bincode::serde::decode_from_slice::<Entries<K, V>, _>(&bytes, BINCODE_CONFIG)
        .map_err(|e| CacheError::CacheDecode(path.to_path_buf(), Box::new(e)))?;
    Ok(entries)
}

/// Encodes `entries` and atomically replaces the file at `path`. Returns the byte count.
fn write_entries<K, V>(path: &Path, entries: &Entries<K, V>) -> Result<usize, CacheError>
where
    K: Serialize + Eq + Hash,
    V: Serialize,
{
    let bytes = bincode::serde::encode_to_vec(entries, BINCODE_CONFIG)
        .map_err(|e| CacheError::CacheEncode(Box::new(e)))?;

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut temp_file =
        NamedTempFile::new_in(dir).map_err(|e| CacheError::CacheWrite(path.to_path_buf(), e))?;
    temp_file
        .write_all(&bytes)
        .map_err(|e| CacheError::CacheWrite(path.to_path_buf(), e))?;
    temp_file
        .persist(path)
        .map_err(|e| CacheError::CacheWrite(path.to_path_buf(), e.error))?;
    Ok(bytes.len())
}
