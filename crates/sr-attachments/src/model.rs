//! Attachment Model

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque attachment identifier
///
/// Ids are stable for the lifetime of an attachment and are never reused
/// for a live entry. They say nothing about position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttachmentId(String);

impl AttachmentId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Fresh random id
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AttachmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AttachmentId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// The mirrored subset of an attachment: what survives a reload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentMeta {
    pub id: AttachmentId,
    pub name: String,
}

impl AttachmentMeta {
    pub fn new(id: AttachmentId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// An attachment with its payload
///
/// Returned by registry snapshots. The payload is a shared handle to the
/// immutable buffer owned by the binary store entry.
#[derive(Debug, Clone)]
pub struct AttachmentRecord {
    pub id: AttachmentId,
    /// Original file name
    pub name: String,
    pub payload: Bytes,
    pub added_at: DateTime<Utc>,
}

impl AttachmentRecord {
    pub fn new(id: AttachmentId, name: impl Into<String>, payload: Bytes) -> Self {
        Self {
            id,
            name: name.into(),
            payload,
            added_at: Utc::now(),
        }
    }

    pub fn size(&self) -> usize {
        self.payload.len()
    }

    /// MIME type guessed from the file name
    pub fn content_type(&self) -> String {
        mime_guess::from_path(&self.name)
            .first_or_octet_stream()
            .to_string()
    }

    /// Name to save the file under when downloaded
    pub fn download_name(&self) -> &str {
        if self.name.trim().is_empty() {
            "anexo"
        } else {
            &self.name
        }
    }
}
