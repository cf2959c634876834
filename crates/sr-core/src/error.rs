//! Core error types for Supplier Registration RS
//!
//! Every failure the form controller can surface to the user ends up as an
//! [`SrError`]. Each variant carries a stable machine code and the text shown
//! in the blocking notification.

use std::collections::HashMap;
use thiserror::Error;

/// Core error type for all form controller operations
#[derive(Error, Debug)]
pub enum SrError {
    #[error("Invalid input for {field}: {message}")]
    InputValidation { field: &'static str, message: String },

    #[error("Postal code not found: {code}")]
    LookupNotFound { code: String },

    #[error("Postal lookup failed: {message}")]
    LookupTransport { message: String },

    #[error("Encode failed: {0}")]
    Encode(String),

    #[error("Cannot save a supplier without product lines")]
    EmptyProductList,

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Attachment not found: {id}")]
    AttachmentNotFound { id: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Validation errors collection
#[derive(Error, Debug, Default, Clone)]
#[error("Validation errors: {errors:?}")]
pub struct ValidationErrors {
    /// Field-specific errors: field_name -> Vec<error_messages>
    pub errors: HashMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Check if there are errors for a specific field
    pub fn has_error(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Get errors for a specific field
    pub fn get(&self, field: &str) -> Option<&Vec<String>> {
        self.errors.get(field)
    }

    pub fn full_messages(&self) -> Vec<String> {
        let mut messages = Vec::new();
        for (field, field_messages) in &self.errors {
            for msg in field_messages {
                messages.push(format!("{} {}", field, msg));
            }
        }
        messages
    }
}

/// User-facing notification texts
pub mod messages {
    pub const INVALID_POSTAL_CODE: &str = "CEP inválido.";
    pub const POSTAL_CODE_NOT_FOUND: &str = "CEP não encontrado.";
    pub const POSTAL_LOOKUP_FAILED: &str = "Erro ao buscar CEP.";
    pub const EMPTY_PRODUCT_LIST: &str = "Inclua pelo menos 1 produto antes de salvar.";
    pub const ATTACHMENT_UNAVAILABLE: &str = "Arquivo não disponível.";
    pub const SAVE_FAILED: &str = "Erro ao montar/enviar os dados.";
}

impl SrError {
    pub fn input(field: &'static str, message: impl Into<String>) -> Self {
        SrError::InputValidation {
            field,
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            SrError::InputValidation { .. } => "input_invalid",
            SrError::LookupNotFound { .. } => "lookup_not_found",
            SrError::LookupTransport { .. } => "lookup_transport",
            SrError::Encode(_) => "encode_failed",
            SrError::EmptyProductList => "empty_product_list",
            SrError::Validation(_) => "validation_failed",
            SrError::AttachmentNotFound { .. } => "attachment_not_found",
            SrError::Io(_) => "io_error",
            SrError::Serialization(_) => "serialization_error",
            SrError::Config(_) => "configuration_error",
            SrError::Internal(_) => "internal_error",
        }
    }

    /// Text of the blocking notification shown for this failure
    pub fn user_message(&self) -> &'static str {
        match self {
            SrError::InputValidation { .. } => messages::INVALID_POSTAL_CODE,
            SrError::LookupNotFound { .. } => messages::POSTAL_CODE_NOT_FOUND,
            SrError::LookupTransport { .. } => messages::POSTAL_LOOKUP_FAILED,
            SrError::EmptyProductList => messages::EMPTY_PRODUCT_LIST,
            SrError::AttachmentNotFound { .. } => messages::ATTACHMENT_UNAVAILABLE,
            SrError::Encode(_)
            | SrError::Validation(_)
            | SrError::Io(_)
            | SrError::Serialization(_)
            | SrError::Config(_)
            | SrError::Internal(_) => messages::SAVE_FAILED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_collect_per_field() {
        let mut errors = ValidationErrors::new();
        assert!(errors.is_empty());

        errors.add("produtos", "must not be empty");
        errors.add("produtos", "is invalid");

        assert_eq!(errors.get("produtos").map(Vec::len), Some(2));
        assert!(errors.has_error("produtos"));
        assert!(!errors.has_error("cep"));
        assert_eq!(
            errors.full_messages(),
            vec!["produtos must not be empty", "produtos is invalid"]
        );
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            SrError::input("cep", "must have 8 digits").user_message(),
            "CEP inválido."
        );
        assert_eq!(
            SrError::LookupNotFound { code: "01001000".into() }.user_message(),
            "CEP não encontrado."
        );
        assert_eq!(
            SrError::LookupTransport { message: "timeout".into() }.user_message(),
            "Erro ao buscar CEP."
        );
        assert_eq!(
            SrError::EmptyProductList.user_message(),
            "Inclua pelo menos 1 produto antes de salvar."
        );
        assert_eq!(
            SrError::Encode("unreadable".into()).user_message(),
            "Erro ao montar/enviar os dados."
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(SrError::EmptyProductList.error_code(), "empty_product_list");
        assert_eq!(SrError::Encode("x".into()).error_code(), "encode_failed");
    }
}
