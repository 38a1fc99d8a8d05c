use serde::{Deserialize, Serialize};
use crate::pii::Masked;

/// Passenger as entered at checkout or collected by the chat assistant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengerInfo {
    pub name: String,
    #[serde(rename = "idNumber")]
    pub id_number: Masked<String>,
}

impl PassengerInfo {
    pub fn new(name: impl Into<String>, id_number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id_number: Masked(id_number.into()),
        }
    }
}
