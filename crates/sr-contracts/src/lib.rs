//! # sr-contracts
//!
//! Contract validation for Supplier Registration RS.
//!
//! Contracts check user input before an operation runs. A failing contract
//! leaves form state untouched.

pub mod base;
pub mod postal_code;
pub mod save;

pub use base::{Contract, ValidationResult};
pub use postal_code::{normalize_postal_code, PostalCodeContract, POSTAL_CODE_DIGITS};
pub use save::{SaveSupplierContract, SupplierFormData};
