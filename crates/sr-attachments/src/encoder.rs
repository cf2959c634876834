//! Encoder
//!
//! Converts attachment payloads to `data:<mime>;base64,<body>` text.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use sr_core::SrError;
use thiserror::Error;
use tracing::debug;

use crate::model::AttachmentRecord;

/// Encode errors
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("Failed to read attachment {name}: {reason}")]
    Unreadable { name: String, reason: String },
    #[error("Malformed data URL: {0}")]
    MalformedDataUrl(String),
}

impl From<EncodeError> for SrError {
    fn from(err: EncodeError) -> Self {
        SrError::Encode(err.to_string())
    }
}

/// Binary-to-text encoder
///
/// One call encodes one attachment; there is no retry.
#[async_trait]
pub trait Encoder: Send + Sync {
    async fn encode(&self, record: &AttachmentRecord) -> Result<String, EncodeError>;
}

/// Base64 data URL encoder
///
/// The base64 pass runs on the blocking pool.
#[derive(Debug, Default, Clone, Copy)]
pub struct DataUrlEncoder;

impl DataUrlEncoder {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Encoder for DataUrlEncoder {
    async fn encode(&self, record: &AttachmentRecord) -> Result<String, EncodeError> {
        let mime = record.content_type();
        let payload = record.payload.clone();

        let encoded = tokio::task::spawn_blocking(move || to_data_url(&mime, &payload))
            .await
            .map_err(|e| EncodeError::Unreadable {
                name: record.name.clone(),
                reason: e.to_string(),
            })?;

        debug!(
            id = %record.id,
            size = record.size(),
            encoded = encoded.len(),
            "Attachment encoded"
        );
        Ok(encoded)
    }
}

/// Build a data URL for `data`
pub fn to_data_url(mime: &str, data: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(data))
}

/// A decoded data URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedDataUrl {
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Decode a base64 data URL back into its MIME type and bytes
pub fn decode_data_url(text: &str) -> Result<DecodedDataUrl, EncodeError> {
    let rest = text
        .strip_prefix("data:")
        .ok_or_else(|| EncodeError::MalformedDataUrl("missing data: prefix".to_string()))?;

    let (header, body) = rest
        .split_once(',')
        .ok_or_else(|| EncodeError::MalformedDataUrl("missing comma".to_string()))?;

    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| EncodeError::MalformedDataUrl("not base64 encoded".to_string()))?;

    let bytes = STANDARD
        .decode(body)
        .map_err(|e| EncodeError::MalformedDataUrl(format!("invalid base64: {}", e)))?;

    Ok(DecodedDataUrl {
        mime: mime.to_string(),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn record(name: &str, data: &'static [u8]) -> AttachmentRecord {
        AttachmentRecord::new("1".into(), name, Bytes::from_static(data))
    }

    #[tokio::test]
    async fn test_encode_text_file() {
        let encoded = DataUrlEncoder::new()
            .encode(&record("hello.txt", b"Hello, World!"))
            .await
            .unwrap();

        assert_eq!(encoded, "data:text/plain;base64,SGVsbG8sIFdvcmxkIQ==");
    }

    #[tokio::test]
    async fn test_encode_unknown_type() {
        let encoded = DataUrlEncoder::new()
            .encode(&record("blob", &[0xff, 0x00]))
            .await
            .unwrap();

        assert!(encoded.starts_with("data:application/octet-stream;base64,"));
    }

    #[tokio::test]
    async fn test_round_trip_reproduces_bytes() {
        let data: &'static [u8] = &[0, 1, 2, 3, 254, 255, 10, 13, 0x89, b'P', b'N', b'G'];
        let encoded = DataUrlEncoder::new()
            .encode(&record("logo.png", data))
            .await
            .unwrap();

        let decoded = decode_data_url(&encoded).unwrap();
        assert_eq!(decoded.mime, "image/png");
        assert_eq!(decoded.bytes, data);
    }

    #[tokio::test]
    async fn test_empty_payload() {
        let encoded = DataUrlEncoder::new()
            .encode(&record("empty.txt", b""))
            .await
            .unwrap();

        assert_eq!(encoded, "data:text/plain;base64,");
        assert!(decode_data_url(&encoded).unwrap().bytes.is_empty());
    }

    #[test]
    fn test_decode_rejects_malformed() {
        for text in [
            "text/plain;base64,QQ==",
            "data:text/plain;base64",
            "data:text/plain,QQ==",
            "data:text/plain;base64,***",
        ] {
            assert!(
                matches!(decode_data_url(text), Err(EncodeError::MalformedDataUrl(_))),
                "input: {}",
                text
            );
        }
    }

    #[test]
    fn test_encode_error_maps_to_save_failure() {
        let err: SrError = EncodeError::Unreadable {
            name: "a.pdf".to_string(),
            reason: "gone".to_string(),
        }
        .into();
        assert_eq!(err.error_code(), "encode_failed");
        assert_eq!(err.user_message(), "Erro ao montar/enviar os dados.");
    }
}
