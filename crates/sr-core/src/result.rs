//! Result type aliases

use crate::error::SrError;

/// Standard Result type for form controller operations
pub type SrResult<T> = Result<T, SrError>;
