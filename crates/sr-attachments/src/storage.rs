//! Storage Abstraction
//!
//! Two stores back the attachment registry:
//! - [`BinaryStore`]: payloads in process memory, keyed by a generated id
//! - [`SessionStorage`]: a small string key-value store scoped to one session

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use parking_lot::RwLock;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::model::AttachmentId;

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Entry not found: {0}")]
    NotFound(String),
    #[error("Quota exceeded: {needed} bytes needed, {quota} allowed")]
    QuotaExceeded { needed: usize, quota: usize },
    #[error("Invalid key: {0}")]
    InvalidKey(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Binary payload store
///
/// No eviction besides explicit removal and no capacity bound.
pub trait BinaryStore: Send + Sync {
    /// Store a payload under a fresh id that collides with no live entry
    fn put(&self, payload: Bytes) -> AttachmentId;

    /// Retrieve a payload
    fn get(&self, id: &AttachmentId) -> StoreResult<Bytes>;

    /// Evict an entry, returning whether it existed
    fn remove(&self, id: &AttachmentId) -> bool;

    fn contains(&self, id: &AttachmentId) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Evict everything
    fn clear(&self);
}

/// In-memory binary store
pub struct MemoryBinaryStore {
    payloads: RwLock<HashMap<AttachmentId, Bytes>>,
}

impl Default for MemoryBinaryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBinaryStore {
    pub fn new() -> Self {
        Self {
            payloads: RwLock::new(HashMap::new()),
        }
    }
}

impl BinaryStore for MemoryBinaryStore {
    fn put(&self, payload: Bytes) -> AttachmentId {
        let mut payloads = self.payloads.write();

        let mut id = AttachmentId::generate();
        while payloads.contains_key(&id) {
            id = AttachmentId::generate();
        }

        debug!(id = %id, size = payload.len(), "Payload stored");
        payloads.insert(id.clone(), payload);
        id
    }

    fn get(&self, id: &AttachmentId) -> StoreResult<Bytes> {
        self.payloads
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn remove(&self, id: &AttachmentId) -> bool {
        let removed = self.payloads.write().remove(id).is_some();
        if removed {
            debug!(id = %id, "Payload evicted");
        }
        removed
    }

    fn contains(&self, id: &AttachmentId) -> bool {
        self.payloads.read().contains_key(id)
    }

    fn len(&self) -> usize {
        self.payloads.read().len()
    }

    fn clear(&self) {
        self.payloads.write().clear();
    }
}

/// Session-scoped string key-value storage
///
/// Quotas count the bytes of every key plus its value.
pub trait SessionStorage: Send + Sync {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>>;

    /// Overwrite the value for a key; fails when the quota would be exceeded
    fn set_item(&self, key: &str, value: &str) -> StoreResult<()>;

    fn remove_item(&self, key: &str) -> StoreResult<()>;

    /// Storage name for logging
    fn name(&self) -> &str;
}

/// In-memory session storage with an optional byte quota
pub struct MemorySessionStorage {
    items: RwLock<HashMap<String, String>>,
    quota: Option<usize>,
}

impl Default for MemorySessionStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(HashMap::new()),
            quota: None,
        }
    }

    /// Refuse writes once keys plus values would exceed `quota` bytes
    pub fn with_quota(quota: usize) -> Self {
        Self {
            items: RwLock::new(HashMap::new()),
            quota: Some(quota),
        }
    }
}

impl SessionStorage for MemorySessionStorage {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.items.read().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut items = self.items.write();

        if let Some(quota) = self.quota {
            let others: usize = items
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > quota {
                return Err(StoreError::QuotaExceeded { needed, quota });
            }
        }

        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        self.items.write().remove(key);
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

/// Session storage backed by a directory, one file per key
pub struct FileSessionStorage {
    root: PathBuf,
    quota: usize,
}

impl FileSessionStorage {
    pub fn new(root: impl AsRef<Path>, quota: usize) -> StoreResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root, quota })
    }

    /// Storage in a fresh temp directory
    pub fn temp(quota: usize) -> StoreResult<Self> {
        let dir = std::env::temp_dir()
            .join("supplier-registration-session")
            .join(uuid::Uuid::new_v4().to_string());
        Self::new(dir, quota)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a key to a file path
    fn resolve_path(&self, key: &str) -> StoreResult<PathBuf> {
        // Keys map to single file names inside the root
        if key.is_empty()
            || key.contains("..")
            || key.contains('/')
            || key.contains('\\')
        {
            return Err(StoreError::InvalidKey(key.to_string()));
        }

        Ok(self.root.join(format!("{}.json", key)))
    }

    /// Key plus value bytes of every item except `except`
    fn used_bytes(&self, except: &Path) -> StoreResult<usize> {
        let mut used = 0;
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path == except || path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }
            let key_len = path.file_stem().map_or(0, |stem| stem.len());
            used += key_len + fs::metadata(&path)?.len() as usize;
        }
        Ok(used)
    }
}

impl SessionStorage for FileSessionStorage {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.resolve_path(key)?;

        if !path.exists() {
            return Ok(None);
        }

        Ok(Some(fs::read_to_string(&path)?))
    }

    #[instrument(skip(self, value), fields(storage = "file"))]
    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.resolve_path(key)?;

        let needed = self.used_bytes(&path)? + key.len() + value.len();
        if needed > self.quota {
            return Err(StoreError::QuotaExceeded {
                needed,
                quota: self.quota,
            });
        }

        fs::write(&path, value)?;
        debug!(path = ?path, size = value.len(), "Session item written");
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        let path = self.resolve_path(key)?;

        if path.exists() {
            fs::remove_file(&path)?;
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}
