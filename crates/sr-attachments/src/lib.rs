//! # sr-attachments
//!
//! Attachment handling for Supplier Registration RS.
//!
//! ## Features
//!
//! - Binary store holding attachment payloads in process memory
//! - Session mirror persisting `{id, name}` pairs to session-scoped storage
//! - Attachment registry keeping both consistent, in insertion order
//! - Data URL encoder turning payloads into transport-safe text
//!
//! ## Example
//!
//! ```rust,ignore
//! use sr_attachments::{
//!     AttachmentRegistry, MemoryBinaryStore, MemorySessionStorage, SessionMirror,
//! };
//! use std::sync::Arc;
//!
//! let store = Arc::new(MemoryBinaryStore::new());
//! let mirror = SessionMirror::new(Arc::new(MemorySessionStorage::new()), "anexos");
//! let registry = AttachmentRegistry::new(store, mirror);
//!
//! let id = registry.add("contrato.pdf", bytes::Bytes::from(file_data));
//! registry.remove(&id);
//! ```

pub mod encoder;
pub mod mirror;
pub mod model;
pub mod registry;
pub mod storage;

pub use encoder::{
    decode_data_url, to_data_url, DataUrlEncoder, DecodedDataUrl, EncodeError, Encoder,
};
pub use mirror::{SessionMirror, DEFAULT_SESSION_KEY};
pub use model::{AttachmentId, AttachmentMeta, AttachmentRecord};
pub use registry::{AttachmentError, AttachmentRegistry, AttachmentResult};
pub use storage::{
    BinaryStore, FileSessionStorage, MemoryBinaryStore, MemorySessionStorage, SessionStorage,
    StoreError, StoreResult,
};
