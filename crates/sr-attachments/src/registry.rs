//! Attachment Registry
//!
//! Ordered list of attachments for one form session. Keeps the binary store
//! and the session mirror consistent with the list.

use std::sync::Arc;

use bytes::Bytes;
use parking_lot::RwLock;
use sr_core::SrError;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::mirror::SessionMirror;
use crate::model::{AttachmentId, AttachmentMeta, AttachmentRecord};
use crate::storage::{BinaryStore, SessionStorage, StoreError};

/// Registry errors
#[derive(Debug, Error)]
pub enum AttachmentError {
    #[error("Attachment not found: {0}")]
    NotFound(AttachmentId),
    #[error("Storage error: {0}")]
    StorageError(#[from] StoreError),
}

pub type AttachmentResult<T> = Result<T, AttachmentError>;

impl From<AttachmentError> for SrError {
    fn from(err: AttachmentError) -> Self {
        match err {
            AttachmentError::NotFound(id) => SrError::AttachmentNotFound { id: id.to_string() },
            AttachmentError::StorageError(e) => SrError::Internal(e.to_string()),
        }
    }
}

struct Entry {
    meta: AttachmentMeta,
    added_at: chrono::DateTime<chrono::Utc>,
}

/// Attachment registry
pub struct AttachmentRegistry<B: BinaryStore, S: SessionStorage> {
    entries: RwLock<Vec<Entry>>,
    store: Arc<B>,
    mirror: SessionMirror<S>,
}

impl<B: BinaryStore, S: SessionStorage> AttachmentRegistry<B, S> {
    pub fn new(store: Arc<B>, mirror: SessionMirror<S>) -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            store,
            mirror,
        }
    }

    /// Add an attachment; mirror failures do not fail the add
    pub fn add(&self, name: impl Into<String>, payload: impl Into<Bytes>) -> AttachmentId {
        let name = name.into();
        let payload = payload.into();
        let size = payload.len();

        let id = self.store.put(payload);

        let metas = {
            let mut entries = self.entries.write();
            entries.push(Entry {
                meta: AttachmentMeta::new(id.clone(), name.clone()),
                added_at: chrono::Utc::now(),
            });
            Self::project(&entries)
        };
        self.mirror.sync(&metas);

        info!(id = %id, name = %name, size = size, "Attachment added");
        id
    }

    /// Remove an attachment by id
    ///
    /// Unknown ids are ignored: returns `false` and leaves everything as is.
    pub fn remove(&self, id: &AttachmentId) -> bool {
        let metas = {
            let mut entries = self.entries.write();
            let Some(pos) = entries.iter().position(|e| &e.meta.id == id) else {
                debug!(id = %id, "Remove ignored, attachment not present");
                return false;
            };
            entries.remove(pos);
            Self::project(&entries)
        };

        self.store.remove(id);
        self.mirror.sync(&metas);

        info!(id = %id, remaining = metas.len(), "Attachment removed");
        true
    }

    /// Snapshot of all attachments in insertion order
    ///
    /// The returned records are copies; mutating the registry afterwards
    /// does not change them.
    pub fn list(&self) -> Vec<AttachmentRecord> {
        let entries = self.entries.read();
        entries
            .iter()
            .filter_map(|entry| match self.store.get(&entry.meta.id) {
                Ok(payload) => Some(AttachmentRecord {
                    id: entry.meta.id.clone(),
                    name: entry.meta.name.clone(),
                    payload,
                    added_at: entry.added_at,
                }),
                Err(e) => {
                    warn!(id = %entry.meta.id, error = %e, "Attachment payload missing from store");
                    None
                }
            })
            .collect()
    }

    /// Metadata of all attachments in insertion order
    pub fn metas(&self) -> Vec<AttachmentMeta> {
        Self::project(&self.entries.read())
    }

    /// Fetch one attachment for viewing or download
    pub fn open(&self, id: &AttachmentId) -> AttachmentResult<AttachmentRecord> {
        let entries = self.entries.read();
        let entry = entries
            .iter()
            .find(|e| &e.meta.id == id)
            .ok_or_else(|| AttachmentError::NotFound(id.clone()))?;

        let payload = self.store.get(id).map_err(|e| match e {
            StoreError::NotFound(_) => AttachmentError::NotFound(id.clone()),
            other => AttachmentError::StorageError(other),
        })?;

        Ok(AttachmentRecord {
            id: entry.meta.id.clone(),
            name: entry.meta.name.clone(),
            payload,
            added_at: entry.added_at,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Whether the attachment list should be shown
    pub fn is_visible(&self) -> bool {
        !self.is_empty()
    }

    /// End of session: drop every attachment and empty the mirror
    pub fn clear(&self) {
        let ids: Vec<AttachmentId> = {
            let mut entries = self.entries.write();
            entries.drain(..).map(|e| e.meta.id).collect()
        };

        for id in &ids {
            self.store.remove(id);
        }
        self.mirror.sync(&[]);

        info!(count = ids.len(), "Attachment registry cleared");
    }

    pub fn mirror(&self) -> &SessionMirror<S> {
        &self.mirror
    }

    fn project(entries: &[Entry]) -> Vec<AttachmentMeta> {
        entries.iter().map(|e| e.meta.clone()).collect()
    }
}
