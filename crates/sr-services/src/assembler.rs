//! Document Assembler
//!
//! Builds the [`SupplierDocument`] for a save action:
//! 1. scalar supplier fields, trimmed, absent fields as ""
//! 2. product lines in order, densely numbered
//! 3. attachments from a registry snapshot, encoded one after the other
//!
//! Attachments are never encoded concurrently. Each encode finishes before
//! the next one starts, so `anexos` follows registry order whatever the
//! individual encode latency. The first encode failure rejects the whole
//! document.

use std::sync::Arc;

use sr_attachments::{AttachmentRecord, BinaryStore, Encoder, SessionStorage};
use sr_core::SrResult;
use sr_models::supplier::field_value;
use sr_models::{SupplierDocument, SupplierFields};
use tracing::{debug, error, instrument};

use crate::form::SupplierForm;

pub struct DocumentAssembler<E: Encoder> {
    encoder: Arc<E>,
}

impl<E: Encoder> DocumentAssembler<E> {
    pub fn new(encoder: Arc<E>) -> Self {
        Self { encoder }
    }

    /// Assemble the document for `form`
    #[instrument(skip_all, fields(products = form.products.len()))]
    pub async fn assemble<B, S>(&self, form: &SupplierForm<B, S>) -> SrResult<SupplierDocument>
    where
        B: BinaryStore,
        S: SessionStorage,
    {
        let mut document = read_fields(&form.fields);
        document.produtos = form.products.lines();

        // Later registry changes must not leak into this document
        let snapshot = form.attachments().list();
        self.encode_all(&mut document, &snapshot).await?;

        debug!(
            produtos = document.produtos.len(),
            anexos = document.anexos.len(),
            "Document assembled"
        );
        Ok(document)
    }

    async fn encode_all(
        &self,
        document: &mut SupplierDocument,
        snapshot: &[AttachmentRecord],
    ) -> SrResult<()> {
        for record in snapshot {
            let encoded = self.encoder.encode(record).await.map_err(|e| {
                error!(
                    id = %record.id,
                    name = %record.name,
                    error = %e,
                    "Attachment encode failed"
                );
                e
            })?;
            document.push_attachment(record.name.clone(), encoded);
        }
        Ok(())
    }
}

/// Copy the scalar fields into a fresh document
fn read_fields(fields: &SupplierFields) -> SupplierDocument {
    SupplierDocument {
        razao_social: field_value(&fields.razao_social),
        nome_fantasia: field_value(&fields.nome_fantasia),
        cnpj: field_value(&fields.cnpj),
        inscricao_estadual: field_value(&fields.inscricao_estadual),
        inscricao_municipal: field_value(&fields.inscricao_municipal),
        nome_contato: field_value(&fields.nome_contato),
        telefone_contato: field_value(&fields.telefone_contato),
        email_contato: field_value(&fields.email_contato),
        produtos: Vec::new(),
        anexos: Vec::new(),
    }
}
