//! Postal code (CEP) format contract

use sr_core::error::ValidationErrors;

use crate::base::{finish, Contract, ValidationResult};

/// A Brazilian postal code has exactly this many digits
pub const POSTAL_CODE_DIGITS: usize = 8;

/// Keep only the ASCII digits of the raw input ("01001-000" -> "01001000")
pub fn normalize_postal_code(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Contract for a raw postal code typed by the user
#[derive(Debug, Default, Clone, Copy)]
pub struct PostalCodeContract;

impl PostalCodeContract {
    pub fn new() -> Self {
        Self
    }
}

impl Contract<str> for PostalCodeContract {
    fn validate(&self, raw: &str) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        let digits = normalize_postal_code(raw);
        if digits.len() != POSTAL_CODE_DIGITS {
            errors.add(
                "cep",
                format!(
                    "must have {} digits (got {})",
                    POSTAL_CODE_DIGITS,
                    digits.len()
                ),
            );
        }

        finish(errors)
    }
}
