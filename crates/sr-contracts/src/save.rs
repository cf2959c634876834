//! Save contract for the supplier form
//!
//! Runs before any document assembly starts.

use sr_core::error::ValidationErrors;

use crate::base::{finish, Contract, ValidationResult};

/// Trait for form data being saved
pub trait SupplierFormData {
    fn product_count(&self) -> usize;
    fn attachment_count(&self) -> usize;
}

/// Contract for saving a supplier registration
#[derive(Debug, Default, Clone, Copy)]
pub struct SaveSupplierContract;

impl SaveSupplierContract {
    pub const PRODUCTS_FIELD: &'static str = "produtos";

    pub fn new() -> Self {
        Self
    }

    /// At least one product line is required
    fn validate_products(&self, product_count: usize, errors: &mut ValidationErrors) {
        if product_count == 0 {
            errors.add(Self::PRODUCTS_FIELD, "must contain at least one product");
        }
    }
}

impl<T: SupplierFormData> Contract<T> for SaveSupplierContract {
    fn validate(&self, form: &T) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        self.validate_products(form.product_count(), &mut errors);

        finish(errors)
    }
}
