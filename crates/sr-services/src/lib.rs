//! # sr-services
//!
//! Form services for Supplier Registration RS.
//!
//! - [`ProductList`]: dynamically growing list of product lines
//! - [`SupplierForm`]: the whole form state for one session
//! - [`DocumentAssembler`]: builds the [`SupplierDocument`](sr_models::SupplierDocument),
//!   encoding attachments one at a time in registry order
//! - [`SaveService`]: save contract, assembly, delivery of the JSON file

pub mod assembler;
pub mod form;
pub mod products;
pub mod save;

pub use assembler::DocumentAssembler;
pub use form::{FormInput, MemoryForm, SupplierForm};
pub use products::{LineId, ProductList};
pub use save::{DocumentSink, FileSink, MemorySink, SaveService};
