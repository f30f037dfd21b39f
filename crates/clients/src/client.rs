//! Client entity.

use serde::{Deserialize, Serialize};

use arriendo_core::{ClientId, DomainError, DomainResult, Entity};

use crate::rut::TaxId;

/// Payment term agreed with a client. Wire labels are the legacy ones the
/// backend stores verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentTerm {
    #[serde(rename = "Pago a 15 días")]
    Net15,
    #[serde(rename = "Pago a 30 días")]
    Net30,
    #[serde(rename = "Pago contado")]
    Cash,
}

/// Contact information for a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// A client: the party machinery is rented or sold to.
///
/// The tax id is checksum-validated on construction; nothing with an invalid
/// id reaches persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    id: ClientId,
    legal_name: String,
    tax_id: TaxId,
    contact: ContactInfo,
    payment_term: Option<PaymentTerm>,
}

impl Client {
    pub fn register(
        id: ClientId,
        legal_name: impl Into<String>,
        tax_id: &str,
        contact: ContactInfo,
        payment_term: Option<PaymentTerm>,
    ) -> DomainResult<Self> {
        let legal_name = legal_name.into().trim().to_string();
        if legal_name.is_empty() {
            return Err(DomainError::validation("legal name must not be empty"));
        }

        Ok(Self {
            id,
            legal_name,
            tax_id: TaxId::parse(tax_id)?,
            contact,
            payment_term,
        })
    }

    pub fn legal_name(&self) -> &str {
        &self.legal_name
    }

    pub fn tax_id(&self) -> &TaxId {
        &self.tax_id
    }

    pub fn contact(&self) -> &ContactInfo {
        &self.contact
    }

    pub fn payment_term(&self) -> Option<PaymentTerm> {
        self.payment_term
    }
}

impl Entity for Client {
    type Id = ClientId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_contact() -> ContactInfo {
        ContactInfo {
            address: Some("Av. Las Industrias 1200".to_string()),
            phone: Some("+56 2 2345 6789".to_string()),
            email: None,
        }
    }

    #[test]
    fn registers_with_valid_tax_id() {
        let client = Client::register(
            ClientId::new(),
            "Constructora Andes SpA",
            "12.345.678-5",
            test_contact(),
            Some(PaymentTerm::Net30),
        )
        .unwrap();

        assert_eq!(client.legal_name(), "Constructora Andes SpA");
        assert_eq!(client.tax_id().as_str(), "12345678-5");
        assert_eq!(client.payment_term(), Some(PaymentTerm::Net30));
    }

    #[test]
    fn rejects_invalid_tax_id() {
        let err = Client::register(
            ClientId::new(),
            "Constructora Andes SpA",
            "12.345.678-0",
            ContactInfo::default(),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn rejects_blank_legal_name() {
        let err = Client::register(
            ClientId::new(),
            "   ",
            "12.345.678-5",
            ContactInfo::default(),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn payment_term_uses_legacy_wire_labels() {
        let json = serde_json::to_string(&PaymentTerm::Cash).unwrap();
        assert_eq!(json, "\"Pago contado\"");
        let parsed: PaymentTerm = serde_json::from_str("\"Pago a 15 días\"").unwrap();
        assert_eq!(parsed, PaymentTerm::Net15);
    }
}
