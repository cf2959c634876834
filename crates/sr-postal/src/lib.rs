//! # sr-postal
//!
//! Postal code (CEP) lookup and address autofill.
//!
//! The lookup service is an external collaborator reached over HTTP. Invalid
//! input, unknown codes and transport failures are reported as distinct
//! errors and never retried.

pub mod autofill;
pub mod client;
pub mod code;

pub use autofill::AddressAutofill;
pub use client::{
    parse_response, AddressRecord, LookupError, LookupResult, PostalLookup, ViaCepClient,
};
pub use code::PostalCode;
