//! Address autofill from a postal code

use std::sync::Arc;

use sr_core::SrResult;
use sr_models::AddressFields;
use tracing::{info, instrument};

use crate::client::{AddressRecord, PostalLookup};
use crate::code::PostalCode;

/// Fills the address block once the postal code field is left
pub struct AddressAutofill<L: PostalLookup> {
    lookup: Arc<L>,
}

impl<L: PostalLookup> AddressAutofill<L> {
    pub fn new(lookup: Arc<L>) -> Self {
        Self { lookup }
    }

    /// Look up `raw` and overwrite street, district, city and state code
    ///
    /// On any error `fields` is left exactly as it was.
    #[instrument(skip(self, fields))]
    pub async fn fill(&self, raw: &str, fields: &mut AddressFields) -> SrResult<()> {
        let code = PostalCode::parse(raw)?;
        let record = self.lookup.lookup(&code).await?;

        apply(&record, fields);
        fields.cep = raw.to_string();

        info!(code = %code, city = %fields.city, "Address filled from postal code");
        Ok(())
    }
}

/// Copy the four mapped fields, missing sub-fields becoming empty strings
pub fn apply(record: &AddressRecord, fields: &mut AddressFields) {
    fields.street = record.street().to_string();
    fields.district = record.district().to_string();
    fields.city = record.city().to_string();
    fields.state_code = record.state_code().to_string();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{LookupError, LookupResult};
    use async_trait::async_trait;
    use sr_core::SrError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    enum Reply {
        Found(AddressRecord),
        NotFound,
        Down,
    }

    struct StubLookup {
        reply: Reply,
        calls: AtomicUsize,
    }

    impl StubLookup {
        fn new(reply: Reply) -> Arc<Self> {
            Arc::new(Self {
                reply,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl PostalLookup for StubLookup {
        async fn lookup(&self, code: &PostalCode) -> LookupResult<AddressRecord> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Reply::Found(record) => Ok(record.clone()),
                Reply::NotFound => Err(LookupError::NotFound(code.to_string())),
                Reply::Down => Err(LookupError::Transport("connection refused".into())),
            }
        }
    }

    fn prefilled() -> AddressFields {
        AddressFields {
            cep: "old".to_string(),
            street: "Rua Antiga".to_string(),
            district: "Centro".to_string(),
            city: "Campinas".to_string(),
            state_code: "SP".to_string(),
        }
    }

    #[tokio::test]
    async fn test_found_populates_fields() {
        let lookup = StubLookup::new(Reply::Found(AddressRecord {
            logradouro: Some("Praça da Sé".into()),
            bairro: Some("Sé".into()),
            localidade: Some("São Paulo".into()),
            uf: Some("SP".into()),
            ..Default::default()
        }));
        let autofill = AddressAutofill::new(lookup);
        let mut fields = AddressFields::default();

        autofill.fill("01001-000", &mut fields).await.unwrap();

        assert_eq!(fields.street, "Praça da Sé");
        assert_eq!(fields.district, "Sé");
        assert_eq!(fields.city, "São Paulo");
        assert_eq!(fields.state_code, "SP");
        assert_eq!(fields.cep, "01001-000");
    }

    #[tokio::test]
    async fn test_missing_sub_fields_become_empty() {
        let lookup = StubLookup::new(Reply::Found(AddressRecord {
            localidade: Some("Brasília".into()),
            uf: Some("DF".into()),
            ..Default::default()
        }));
        let autofill = AddressAutofill::new(lookup);
        let mut fields = prefilled();

        autofill.fill("70040010", &mut fields).await.unwrap();

        assert_eq!(fields.street, "");
        assert_eq!(fields.district, "");
        assert_eq!(fields.city, "Brasília");
        assert_eq!(fields.state_code, "DF");
    }

    #[tokio::test]
    async fn test_invalid_code_skips_lookup() {
        let lookup = StubLookup::new(Reply::NotFound);
        let autofill = AddressAutofill::new(lookup.clone());
        let mut fields = prefilled();

        let err = autofill.fill("123", &mut fields).await.unwrap_err();

        assert!(matches!(err, SrError::InputValidation { .. }));
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 0);
        assert_eq!(fields, prefilled());
    }

    #[tokio::test]
    async fn test_not_found_leaves_fields_untouched() {
        let autofill = AddressAutofill::new(StubLookup::new(Reply::NotFound));
        let mut fields = prefilled();

        let err = autofill.fill("99999999", &mut fields).await.unwrap_err();

        assert!(matches!(err, SrError::LookupNotFound { .. }));
        assert_eq!(err.user_message(), "CEP não encontrado.");
        assert_eq!(fields, prefilled());
    }

    #[tokio::test]
    async fn test_transport_error_leaves_fields_untouched() {
        let autofill = AddressAutofill::new(StubLookup::new(Reply::Down));
        let mut fields = prefilled();

        let err = autofill.fill("01001000", &mut fields).await.unwrap_err();

        assert!(matches!(err, SrError::LookupTransport { .. }));
        assert_eq!(err.user_message(), "Erro ao buscar CEP.");
        assert_eq!(fields, prefilled());
    }
}
