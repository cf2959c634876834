//! # sr-core
//!
//! Core types and utilities for Supplier Registration RS.
//!
//! This crate provides the building blocks shared by every other crate:
//! - The application error taxonomy and the user-facing messages it maps to
//! - Result type aliases
//! - Configuration types and environment loading

pub mod config;
pub mod error;
pub mod result;

pub use error::*;
pub use result::*;
