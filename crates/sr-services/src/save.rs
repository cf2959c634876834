//! Save action
//!
//! Validates the form, assembles the document and hands the pretty JSON to
//! a [`DocumentSink`]. Nothing reaches the sink unless every step succeeded.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use sr_attachments::{BinaryStore, Encoder, SessionStorage};
use sr_contracts::{Contract, SaveSupplierContract};
use sr_core::{SrError, SrResult};
use sr_models::SupplierDocument;
use tracing::{error, info, instrument};

use crate::assembler::DocumentAssembler;
use crate::form::SupplierForm;

/// Destination of a serialized document
#[async_trait]
pub trait DocumentSink: Send + Sync {
    async fn deliver(&self, json: &str) -> SrResult<()>;

    fn name(&self) -> &str;
}

/// Writes the document to a file, replacing any previous one
pub struct FileSink {
    path: PathBuf,
    name: String,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DocumentSink for FileSink {
    async fn deliver(&self, json: &str) -> SrResult<()> {
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Keeps delivered documents in memory
#[derive(Default)]
pub struct MemorySink {
    delivered: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delivered(&self) -> Vec<String> {
        self.delivered.lock().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.delivered.lock().last().cloned()
    }
}

#[async_trait]
impl DocumentSink for MemorySink {
    async fn deliver(&self, json: &str) -> SrResult<()> {
        self.delivered.lock().push(json.to_string());
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

/// Save action service
pub struct SaveService<E: Encoder, K: DocumentSink> {
    contract: SaveSupplierContract,
    assembler: DocumentAssembler<E>,
    sink: Arc<K>,
}

impl<E: Encoder, K: DocumentSink> SaveService<E, K> {
    pub fn new(encoder: Arc<E>, sink: Arc<K>) -> Self {
        Self {
            contract: SaveSupplierContract::new(),
            assembler: DocumentAssembler::new(encoder),
            sink,
        }
    }

    pub fn sink(&self) -> &Arc<K> {
        &self.sink
    }

    /// Run the save action for `form`
    #[instrument(skip_all, fields(sink = self.sink.name()))]
    pub async fn save<B, S>(&self, form: &SupplierForm<B, S>) -> SrResult<SupplierDocument>
    where
        B: BinaryStore,
        S: SessionStorage,
    {
        self.validate(form)?;

        let document = self.assembler.assemble(form).await?;
        let json = document.to_pretty_json()?;

        if let Err(e) = self.sink.deliver(&json).await {
            error!(error = %e, "Document delivery failed");
            return Err(e);
        }

        info!(
            produtos = document.produtos.len(),
            anexos = document.anexos.len(),
            bytes = json.len(),
            "Supplier document saved"
        );
        Ok(document)
    }

    fn validate<B, S>(&self, form: &SupplierForm<B, S>) -> SrResult<()>
    where
        B: BinaryStore,
        S: SessionStorage,
    {
        self.contract.validate(form).map_err(|errors| {
            if errors.has_error(SaveSupplierContract::PRODUCTS_FIELD) {
                SrError::EmptyProductList
            } else {
                SrError::Validation(errors)
            }
        })
    }
}
