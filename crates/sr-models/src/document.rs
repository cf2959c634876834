//! Assembled supplier document
//!
//! Value object produced once per save action. Field names are the wire
//! names expected by the receiving side.

use serde::{Deserialize, Serialize};

use crate::product::ProductLine;

/// An attachment re-encoded as a data URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedAttachment {
    /// 1-based position in append order
    #[serde(rename = "indice")]
    pub index: usize,
    #[serde(rename = "nomeArquivo")]
    pub file_name: String,
    /// `data:<mime>;base64,<body>`
    #[serde(rename = "blobArquivo")]
    pub encoded_payload: String,
}

/// The complete supplier registration document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierDocument {
    pub razao_social: String,
    pub nome_fantasia: String,
    pub cnpj: String,
    pub inscricao_estadual: String,
    pub inscricao_municipal: String,
    pub nome_contato: String,
    pub telefone_contato: String,
    pub email_contato: String,
    pub produtos: Vec<ProductLine>,
    pub anexos: Vec<EncodedAttachment>,
}

impl SupplierDocument {
    /// Append an encoded attachment, numbering it after the ones already present
    pub fn push_attachment(&mut self, file_name: impl Into<String>, encoded_payload: String) {
        let index = self.anexos.len() + 1;
        self.anexos.push(EncodedAttachment {
            index,
            file_name: file_name.into(),
            encoded_payload,
        });
    }

    /// Pretty-printed JSON with two-space indentation
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_attachment_numbers_sequentially() {
        let mut doc = SupplierDocument::default();
        doc.push_attachment("a.pdf", "data:application/pdf;base64,QQ==".to_string());
        doc.push_attachment("b.png", "data:image/png;base64,Qg==".to_string());

        let indices: Vec<usize> = doc.anexos.iter().map(|a| a.index).collect();
        assert_eq!(indices, vec![1, 2]);
        assert_eq!(doc.anexos[1].file_name, "b.png");
    }

    #[test]
    fn test_wire_shape() {
        let mut doc = SupplierDocument {
            razao_social: "ACME Ltda".to_string(),
            telefone_contato: "11 5555-0000".to_string(),
            ..Default::default()
        };
        doc.push_attachment("a.txt", "data:text/plain;base64,QQ==".to_string());

        let json: serde_json::Value = serde_json::from_str(&doc.to_pretty_json().unwrap()).unwrap();

        for key in [
            "razaoSocial",
            "nomeFantasia",
            "cnpj",
            "inscricaoEstadual",
            "inscricaoMunicipal",
            "nomeContato",
            "telefoneContato",
            "emailContato",
            "produtos",
            "anexos",
        ] {
            assert!(json.get(key).is_some(), "missing key {}", key);
        }
        assert_eq!(json["razaoSocial"], "ACME Ltda");
        assert_eq!(json["anexos"][0]["indice"], 1);
        assert_eq!(json["anexos"][0]["nomeArquivo"], "a.txt");
        assert_eq!(json["anexos"][0]["blobArquivo"], "data:text/plain;base64,QQ==");
    }
}
