//! Validated postal code

use sr_contracts::{normalize_postal_code, Contract, PostalCodeContract};
use sr_core::{SrError, SrResult};

/// An 8-digit postal code
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostalCode(String);

impl PostalCode {
    /// Parse user input, ignoring every non-digit character
    pub fn parse(raw: &str) -> SrResult<Self> {
        PostalCodeContract::new().validate(raw).map_err(|errors| {
            SrError::input("cep", errors.full_messages().join(", "))
        })?;

        Ok(Self(normalize_postal_code(raw)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PostalCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
