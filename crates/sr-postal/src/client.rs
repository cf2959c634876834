//! Postal lookup client

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sr_core::config::PostalConfig;
use sr_core::SrError;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::code::PostalCode;

/// Lookup errors
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Postal code {0} not found")]
    NotFound(String),
    #[error("Transport error: {0}")]
    Transport(String),
}

pub type LookupResult<T> = Result<T, LookupError>;

impl From<LookupError> for SrError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::NotFound(code) => SrError::LookupNotFound { code },
            LookupError::Transport(message) => SrError::LookupTransport { message },
        }
    }
}

/// Address record returned by the lookup service
///
/// Sub-fields may be absent; they read back as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressRecord {
    pub cep: Option<String>,
    /// Street
    pub logradouro: Option<String>,
    /// District
    pub bairro: Option<String>,
    /// City
    pub localidade: Option<String>,
    /// State code
    pub uf: Option<String>,
}

impl AddressRecord {
    pub fn street(&self) -> &str {
        self.logradouro.as_deref().unwrap_or_default()
    }

    pub fn district(&self) -> &str {
        self.bairro.as_deref().unwrap_or_default()
    }

    pub fn city(&self) -> &str {
        self.localidade.as_deref().unwrap_or_default()
    }

    pub fn state_code(&self) -> &str {
        self.uf.as_deref().unwrap_or_default()
    }
}

/// Remote key -> address lookup
#[async_trait]
pub trait PostalLookup: Send + Sync {
    async fn lookup(&self, code: &PostalCode) -> LookupResult<AddressRecord>;
}

/// Interpret a lookup response body
///
/// The service answers unknown codes with `{"erro": true}` (older
/// deployments send the string `"true"`).
pub fn parse_response(code: &PostalCode, body: serde_json::Value) -> LookupResult<AddressRecord> {
    let flagged = match body.get("erro") {
        Some(serde_json::Value::Bool(b)) => *b,
        Some(serde_json::Value::String(s)) => s == "true",
        _ => false,
    };
    if flagged {
        return Err(LookupError::NotFound(code.to_string()));
    }

    if !body.is_object() {
        return Err(LookupError::Transport("unexpected response body".to_string()));
    }

    serde_json::from_value(body)
        .map_err(|e| LookupError::Transport(format!("invalid response body: {}", e)))
}

/// ViaCEP HTTP client
pub struct ViaCepClient {
    base_url: String,
    client: reqwest::Client,
}

impl ViaCepClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> LookupResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LookupError::Transport(format!("client setup failed: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn from_config(config: &PostalConfig) -> LookupResult<Self> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_seconds))
    }

    pub fn url(&self, code: &PostalCode) -> String {
        format!("{}/ws/{}/json/", self.base_url, code)
    }
}

#[async_trait]
impl PostalLookup for ViaCepClient {
    #[instrument(skip(self, code), fields(code = %code))]
    async fn lookup(&self, code: &PostalCode) -> LookupResult<AddressRecord> {
        let url = self.url(code);

        let resp = self.client.get(&url).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "Postal lookup request failed");
            LookupError::Transport(format!("request failed: {}", e))
        })?;

        if !resp.status().is_success() {
            return Err(LookupError::Transport(format!(
                "lookup failed status={} url={}",
                resp.status(),
                url
            )));
        }

        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| LookupError::Transport(format!("read body failed: {}", e)))?;

        let record = parse_response(code, body)?;
        debug!(city = record.city(), state = record.state_code(), "Postal code resolved");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn code() -> PostalCode {
        PostalCode::parse("01001000").unwrap()
    }

    #[test]
    fn test_parse_found_response() {
        let body = json!({
            "cep": "01001-000",
            "logradouro": "Praça da Sé",
            "complemento": "lado ímpar",
            "bairro": "Sé",
            "localidade": "São Paulo",
            "uf": "SP"
        });

        let record = parse_response(&code(), body).unwrap();
        assert_eq!(record.street(), "Praça da Sé");
        assert_eq!(record.district(), "Sé");
        assert_eq!(record.city(), "São Paulo");
        assert_eq!(record.state_code(), "SP");
    }

    #[test]
    fn test_parse_missing_sub_fields() {
        let record = parse_response(&code(), json!({ "localidade": "Brasília" })).unwrap();
        assert_eq!(record.street(), "");
        assert_eq!(record.district(), "");
        assert_eq!(record.city(), "Brasília");
        assert_eq!(record.state_code(), "");
    }

    #[test]
    fn test_parse_not_found_flags() {
        for body in [json!({ "erro": true }), json!({ "erro": "true" })] {
            let result = parse_response(&code(), body);
            assert!(matches!(result, Err(LookupError::NotFound(ref c)) if c == "01001000"));
        }
    }

    #[test]
    fn test_parse_unexpected_body() {
        let result = parse_response(&code(), json!(["not", "an", "object"]));
        assert!(matches!(result, Err(LookupError::Transport(_))));
    }

    #[test]
    fn test_url() {
        let client = ViaCepClient::new("https://viacep.com.br/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.url(&code()), "https://viacep.com.br/ws/01001000/json/");
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        let client = ViaCepClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();

        let result = client.lookup(&code()).await;
        assert!(matches!(result, Err(LookupError::Transport(_))));
    }

    #[test]
    fn test_error_mapping() {
        let not_found: SrError = LookupError::NotFound("01001000".into()).into();
        assert_eq!(not_found.user_message(), "CEP não encontrado.");

        let transport: SrError = LookupError::Transport("boom".into()).into();
        assert_eq!(transport.user_message(), "Erro ao buscar CEP.");
    }
}
