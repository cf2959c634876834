//! Supplier form state
//!
//! One [`SupplierForm`] lives for one form session. It owns the scalar
//! fields, the address block, the product lines and the attachment registry.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sr_attachments::{
    AttachmentRegistry, BinaryStore, MemoryBinaryStore, MemorySessionStorage, SessionMirror,
    SessionStorage,
};
use sr_contracts::SupplierFormData;
use sr_models::{AddressFields, ProductLineInput, SupplierFields};

use crate::products::ProductList;

/// Form contents that can be loaded from a JSON file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormInput {
    #[serde(flatten)]
    pub fields: SupplierFields,
    #[serde(alias = "endereco")]
    pub address: AddressFields,
    #[serde(alias = "produtos")]
    pub products: Vec<ProductLineInput>,
}

/// The registration form
pub struct SupplierForm<B: BinaryStore, S: SessionStorage> {
    pub fields: SupplierFields,
    pub address: AddressFields,
    pub products: ProductList,
    attachments: Arc<AttachmentRegistry<B, S>>,
}

/// Form backed entirely by memory
pub type MemoryForm = SupplierForm<MemoryBinaryStore, MemorySessionStorage>;

impl<B: BinaryStore, S: SessionStorage> SupplierForm<B, S> {
    pub fn new(attachments: Arc<AttachmentRegistry<B, S>>) -> Self {
        Self {
            fields: SupplierFields::default(),
            address: AddressFields::default(),
            products: ProductList::new(),
            attachments,
        }
    }

    /// Build a registry over the given stores and wrap it in a fresh form
    pub fn with_stores(store: Arc<B>, session: Arc<S>, session_key: &str) -> Self {
        let registry = AttachmentRegistry::new(store, SessionMirror::new(session, session_key));
        Self::new(Arc::new(registry))
    }

    pub fn attachments(&self) -> &Arc<AttachmentRegistry<B, S>> {
        &self.attachments
    }

    /// Replace fields, address and product lines with `input`
    ///
    /// Attachments are left alone.
    pub fn load(&mut self, input: FormInput) {
        self.fields = input.fields;
        self.address = input.address;
        self.products = ProductList::new();
        for line in input.products {
            self.products.add(line);
        }
    }
}

impl MemoryForm {
    pub fn in_memory(session_key: &str) -> Self {
        Self::with_stores(
            Arc::new(MemoryBinaryStore::new()),
            Arc::new(MemorySessionStorage::new()),
            session_key,
        )
    }
}

impl<B: BinaryStore, S: SessionStorage> SupplierFormData for SupplierForm<B, S> {
    fn product_count(&self) -> usize {
        self.products.len()
    }

    fn attachment_count(&self) -> usize {
        self.attachments.len()
    }
}
