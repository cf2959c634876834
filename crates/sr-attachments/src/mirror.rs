//! Session Mirror
//!
//! Best-effort copy of attachment metadata in session storage. Payloads are
//! never mirrored, so a reload can recall names and ids but not content.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::model::AttachmentMeta;
use crate::storage::{SessionStorage, StoreResult};

/// Default session key for the attachment list
pub const DEFAULT_SESSION_KEY: &str = "anexos";

pub struct SessionMirror<S: SessionStorage> {
    storage: Arc<S>,
    key: String,
}

impl<S: SessionStorage> SessionMirror<S> {
    pub fn new(storage: Arc<S>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Overwrite the mirror with `metas`. Failures are logged and dropped.
    pub fn sync(&self, metas: &[AttachmentMeta]) {
        match self.try_sync(metas) {
            Ok(()) => debug!(key = %self.key, count = metas.len(), "Session mirror synced"),
            Err(e) => warn!(
                key = %self.key,
                storage = self.storage.name(),
                error = %e,
                "Session mirror write failed, attachments stay in memory only"
            ),
        }
    }

    /// Overwrite the mirror, reporting failures
    pub fn try_sync(&self, metas: &[AttachmentMeta]) -> StoreResult<()> {
        let text = serde_json::to_string(metas)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        self.storage.set_item(&self.key, &text)
    }

    /// Metadata recalled from a previous write in this session
    ///
    /// Missing or unreadable values give an empty list.
    pub fn load(&self) -> Vec<AttachmentMeta> {
        let text = match self.storage.get_item(&self.key) {
            Ok(Some(text)) => text,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "Session mirror read failed");
                return Vec::new();
            }
        };

        serde_json::from_str(&text).unwrap_or_else(|e| {
            warn!(key = %self.key, error = %e, "Session mirror holds unreadable data");
            Vec::new()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemorySessionStorage;

    fn metas(names: &[&str]) -> Vec<AttachmentMeta> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| AttachmentMeta::new(i.to_string().as_str().into(), *name))
            .collect()
    }

    #[test]
    fn test_sync_writes_id_name_pairs() {
        let storage = Arc::new(MemorySessionStorage::new());
        let mirror = SessionMirror::new(storage.clone(), DEFAULT_SESSION_KEY);

        mirror.sync(&metas(&["a.pdf", "b.png"]));

        let raw = storage.get_item("anexos").unwrap().unwrap();
        assert_eq!(raw, r#"[{"id":"0","name":"a.pdf"},{"id":"1","name":"b.png"}]"#);
    }

    #[test]
    fn test_sync_overwrites() {
        let storage = Arc::new(MemorySessionStorage::new());
        let mirror = SessionMirror::new(storage, DEFAULT_SESSION_KEY);

        mirror.sync(&metas(&["a.pdf", "b.png"]));
        mirror.sync(&metas(&["c.txt"]));

        let loaded = mirror.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "c.txt");
    }

    #[test]
    fn test_sync_swallows_quota_errors() {
        let storage = Arc::new(MemorySessionStorage::with_quota(10));
        let mirror = SessionMirror::new(storage.clone(), DEFAULT_SESSION_KEY);

        mirror.sync(&metas(&["a-very-long-file-name.pdf"]));

        assert!(mirror.try_sync(&metas(&["a-very-long-file-name.pdf"])).is_err());
        assert_eq!(storage.get_item("anexos").unwrap(), None);
    }

    #[test]
    fn test_load_handles_missing_and_garbage() {
        let storage = Arc::new(MemorySessionStorage::new());
        let mirror = SessionMirror::new(storage.clone(), DEFAULT_SESSION_KEY);

        assert!(mirror.load().is_empty());

        storage.set_item("anexos", "not json").unwrap();
        assert!(mirror.load().is_empty());
    }
}
