use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, warn};
use moka::future::Cache;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::config::CacheConfig;
use crate::error::{CacheError, CacheResult};
use crate::pipeline::SchemaData;
use crate::resolver::PathSegments;
use crate::tree::NamespaceNode;

/// Key-value store backing the schema cache
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> CacheResult<Option<Arc<Vec<u8>>>>;
    async fn set(&self, key: &str, data: Vec<u8>) -> CacheResult<()>;
}

/// Metadata for cached entries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheMetadata {
    pub key: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub size_bytes: u64,
}

impl CacheMetadata {
    pub fn new(key: String, ttl: Duration) -> Self {
        let now = Utc::now();
        let expires_at =
            now + chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::hours(24));

        Self {
            key,
            created_at: now,
            expires_at,
            size_bytes: 0,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size_bytes = size;
        self
    }
}

/// In-memory store using Moka
pub struct MemoryStore {
    cache: Cache<String, Arc<Vec<u8>>>,
}

impl MemoryStore {
    pub fn new(max_capacity: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(ttl)
            .build();

        Self { cache }
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self, key: &str) -> CacheResult<Option<Arc<Vec<u8>>>> {
        Ok(self.cache.get(key).await)
    }

    async fn set(&self, key: &str, data: Vec<u8>) -> CacheResult<()> {
        self.cache.insert(key.to_string(), Arc::new(data)).await;
        Ok(())
    }
}

/// Persistent store using cacache, with expiry tracked in JSON metadata files
pub struct DiskStore {
    cache_dir: PathBuf,
    ttl: Duration,
}

impl DiskStore {
    pub fn new(cache_dir: PathBuf, ttl: Duration) -> Self {
        Self { cache_dir, ttl }
    }

    /// Remove entry from disk cache
    pub async fn remove(&self, key: &str) -> CacheResult<()> {
        let _ = cacache::remove(&self.cache_dir, key).await;
        let _ = fs::remove_file(self.metadata_path(key)).await;
        Ok(())
    }

    async fn get_metadata(&self, key: &str) -> CacheResult<Option<CacheMetadata>> {
        match fs::read_to_string(self.metadata_path(key)).await {
            Ok(content) => {
                let metadata =
                    serde_json::from_str(&content).map_err(|e| CacheError::Corruption {
                        key: key.to_string(),
                        details: format!("unreadable metadata: {}", e),
                    })?;
                Ok(Some(metadata))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CacheError::Read {
                key: key.to_string(),
                details: e.to_string(),
            }),
        }
    }

    async fn set_metadata(&self, key: &str, metadata: &CacheMetadata) -> CacheResult<()> {
        let metadata_path = self.metadata_path(key);
        let write_error = |e: std::io::Error| CacheError::Write {
            key: key.to_string(),
            details: e.to_string(),
        };

        if let Some(parent) = metadata_path.parent() {
            fs::create_dir_all(parent).await.map_err(write_error)?;
        }

        let content =
            serde_json::to_string_pretty(metadata).map_err(|e| CacheError::Serialization {
                key: key.to_string(),
                details: e.to_string(),
            })?;

        fs::write(&metadata_path, content)
            .await
            .map_err(write_error)?;

        Ok(())
    }

    /// Metadata file of `key`, always directly inside `metadata/`
    fn metadata_path(&self, key: &str) -> PathBuf {
        self.cache_dir
            .join("metadata")
            .join(format!("{}.json", Self::file_stem(key)))
    }

    /// Keys carry raw path segments, so the file name is derived from a hash
    fn file_stem(key: &str) -> String {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);

        let mut readable = sanitize(key);
        readable.truncate(64);
        format!("{}_{:016x}", readable, hasher.finish())
    }
}

#[async_trait]
impl CacheStore for DiskStore {
    async fn get(&self, key: &str) -> CacheResult<Option<Arc<Vec<u8>>>> {
        match self.get_metadata(key).await? {
            Some(metadata) if !metadata.is_expired() => {}
            Some(_) => {
                debug!("Disk cache entry {} expired", key);
                let _ = self.remove(key).await;
                return Ok(None);
            }
            None => return Ok(None),
        }

        match cacache::read(&self.cache_dir, key).await {
            Ok(data) => Ok(Some(Arc::new(data))),
            Err(cacache::Error::EntryNotFound(_, _)) => Ok(None),
            Err(e) => Err(CacheError::Read {
                key: key.to_string(),
                details: e.to_string(),
            }),
        }
    }

    async fn set(&self, key: &str, data: Vec<u8>) -> CacheResult<()> {
        let metadata = CacheMetadata::new(key.to_string(), self.ttl).with_size(data.len() as u64);

        cacache::write(&self.cache_dir, key, &data)
            .await
            .map_err(|e| CacheError::Write {
                key: key.to_string(),
                details: e.to_string(),
            })?;

        self.set_metadata(key, &metadata).await
    }
}

/// Memory in front of an optional disk tier
pub struct TieredStore {
    memory: MemoryStore,
    disk: Option<DiskStore>,
}

impl TieredStore {
    pub fn new(memory: MemoryStore, disk: Option<DiskStore>) -> Self {
        Self { memory, disk }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        let memory = MemoryStore::new(config.max_memory_entries, config.memory_ttl());
        let disk = config
            .disk_enabled
            .then(|| DiskStore::new(config.directory.clone(), config.disk_ttl()));

        Self::new(memory, disk)
    }
}

#[async_trait]
impl CacheStore for TieredStore {
    async fn get(&self, key: &str) -> CacheResult<Option<Arc<Vec<u8>>>> {
        if let Some(data) = self.memory.get(key).await? {
            return Ok(Some(data));
        }

        let Some(disk) = &self.disk else {
            return Ok(None);
        };

        match disk.get(key).await? {
            Some(data) => {
                // Populate memory cache for future access
                self.memory.set(key, data.as_ref().clone()).await?;
                Ok(Some(data))
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, data: Vec<u8>) -> CacheResult<()> {
        match &self.disk {
            Some(disk) => {
                self.memory.set(key, data.clone()).await?;
                disk.set(key, data).await
            }
            None => self.memory.set(key, data).await,
        }
    }
}

/// Replace every run of characters outside `[A-Za-z0-9]` with a single `-`
pub fn sanitize(value: &str) -> String {
    let mut sanitized = String::with_capacity(value.len());
    let mut in_run = false;

    for c in value.chars() {
        if c.is_ascii_alphanumeric() {
            sanitized.push(c);
            in_run = false;
        } else if !in_run {
            sanitized.push('-');
            in_run = true;
        }
    }

    sanitized
}

/// Cache keys for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKeys {
    /// Key of the namespace tree of a component set and version
    pub tree: String,
    /// Key of the resolved data for one path
    pub resolved: String,
}

impl CacheKeys {
    pub fn new(component_set: &str, version: &str, segments: &PathSegments) -> Self {
        let tree = sanitize(&format!("{}{}", component_set, version));
        let resolved = format!("{}{}", tree, segments.concatenated());
        Self { tree, resolved }
    }

    // Prefixes keep the two namespaces apart when the path is empty
    fn tree_entry(&self) -> String {
        format!("tree.{}", self.tree)
    }

    fn resolved_entry(&self) -> String {
        format!("resolved.{}", self.resolved)
    }
}

/// Tree and resolved-data caches over a shared store.
///
/// Failures of the store are logged and reported as misses.
#[derive(Clone)]
pub struct SchemaCache {
    store: Arc<dyn CacheStore>,
}

impl SchemaCache {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(Arc::new(TieredStore::from_config(config)))
    }

    pub async fn tree(&self, keys: &CacheKeys) -> Option<NamespaceNode> {
        self.read(&keys.tree_entry()).await
    }

    pub async fn store_tree(&self, keys: &CacheKeys, tree: &NamespaceNode) {
        self.write(&keys.tree_entry(), tree).await;
    }

    pub async fn resolved(&self, keys: &CacheKeys) -> Option<SchemaData> {
        self.read(&keys.resolved_entry()).await
    }

    pub async fn store_resolved(&self, keys: &CacheKeys, data: &SchemaData) {
        self.write(&keys.resolved_entry(), data).await;
    }

    async fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let data = match self.store.get(key).await {
            Ok(Some(data)) => data,
            Ok(None) => {
                debug!("Cache miss for {}", key);
                return None;
            }
            Err(e) => {
                warn!("Treating cache failure as a miss: {}", e);
                return None;
            }
        };

        match serde_json::from_slice(&data) {
            Ok(value) => {
                debug!("Cache hit for {}", key);
                Some(value)
            }
            Err(e) => {
                let error = CacheError::Corruption {
                    key: key.to_string(),
                    details: e.to_string(),
                };
                warn!("Treating cache failure as a miss: {}", error);
                None
            }
        }
    }

    async fn write<T: Serialize>(&self, key: &str, value: &T) {
        let data = match serde_json::to_vec(value) {
            Ok(data) => data,
            Err(e) => {
                warn!("Skipping cache write for {}: {}", key, e);
                return;
            }
        };

        if let Err(e) = self.store.set(key, data).await {
            warn!("Cache write failed: {}", e);
        }
    }
}
