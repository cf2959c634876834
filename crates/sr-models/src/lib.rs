//! # sr-models
//!
//! Domain models for Supplier Registration RS.
//!
//! This crate holds the form-side value types (supplier fields, address
//! fields, product line inputs) and the assembled [`SupplierDocument`] with
//! its wire field names.

pub mod address;
pub mod document;
pub mod product;
pub mod supplier;

// Re-exports for convenience
pub use address::AddressFields;
pub use document::{EncodedAttachment, SupplierDocument};
pub use product::{
    computed_total, format_two_decimals, parse_decimal, ProductLine, ProductLineInput,
};
pub use supplier::SupplierFields;
