//! Address fields filled from the postal-code lookup

use serde::{Deserialize, Serialize};

/// Address block of the registration form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddressFields {
    /// Raw postal code as typed
    pub cep: String,
    #[serde(alias = "endereco")]
    pub street: String,
    #[serde(alias = "bairro")]
    pub district: String,
    #[serde(alias = "municipio")]
    pub city: String,
    #[serde(alias = "estado")]
    pub state_code: String,
}
