//! Supplier scalar fields
//!
//! Each field is optional: an absent field reads back as an empty string and
//! is never an error.

use serde::{Deserialize, Serialize};

/// Flat supplier fields as entered on the registration form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SupplierFields {
    /// Legal company name
    pub razao_social: Option<String>,
    /// Trade name
    pub nome_fantasia: Option<String>,
    /// Company tax id
    pub cnpj: Option<String>,
    pub inscricao_estadual: Option<String>,
    pub inscricao_municipal: Option<String>,
    /// Contact person
    pub nome_contato: Option<String>,
    #[serde(alias = "telefone")]
    pub telefone_contato: Option<String>,
    #[serde(alias = "email")]
    pub email_contato: Option<String>,
}

/// Trimmed field value, empty when the field is absent
pub fn field_value(field: &Option<String>) -> String {
    field.as_deref().map(str::trim).unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_trims_and_defaults() {
        assert_eq!(field_value(&Some("  ACME Ltda  ".to_string())), "ACME Ltda");
        assert_eq!(field_value(&None), "");
    }

    #[test]
    fn test_deserialize_with_missing_fields() {
        let fields: SupplierFields =
            serde_json::from_str(r#"{"razaoSocial": "ACME", "telefone": "11 5555-0000"}"#)
                .unwrap();

        assert_eq!(fields.razao_social.as_deref(), Some("ACME"));
        assert_eq!(fields.telefone_contato.as_deref(), Some("11 5555-0000"));
        assert!(fields.cnpj.is_none());
    }
}
