//! Document model: invoices, dispatch guides, credit and debit notes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use arriendo_core::{Amount, DocumentId, DomainError, DomainResult, Entity};

/// Document type, with the short wire codes the backend stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    #[serde(rename = "FACT")]
    Invoice,
    #[serde(rename = "GD")]
    DispatchGuide,
    #[serde(rename = "NC")]
    CreditNote,
    #[serde(rename = "ND")]
    DebitNote,
}

impl DocumentType {
    pub fn wire_code(&self) -> &'static str {
        match self {
            Self::Invoice => "FACT",
            Self::DispatchGuide => "GD",
            Self::CreditNote => "NC",
            Self::DebitNote => "ND",
        }
    }

    /// One-letter prefix used in short display labels (`F0042`, `G0007`).
    pub fn label_prefix(&self) -> char {
        match self {
            Self::Invoice => 'F',
            Self::DispatchGuide => 'G',
            Self::CreditNote | Self::DebitNote => 'N',
        }
    }

    /// The only document type a forward relation of this type may target.
    fn allowed_forward_target(&self) -> Option<DocumentType> {
        match self {
            Self::Invoice => Some(Self::DispatchGuide),
            Self::CreditNote => Some(Self::Invoice),
            Self::DebitNote => Some(Self::CreditNote),
            Self::DispatchGuide => None,
        }
    }
}

/// The shape document relations are loaded as: enough identity to render a
/// cross-reference without fetching the full document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    pub id: DocumentId,
    #[serde(rename = "tipo")]
    pub doc_type: DocumentType,
    #[serde(rename = "numero")]
    pub number: String,
}

impl DocumentRef {
    pub fn new(id: DocumentId, doc_type: DocumentType, number: impl Into<String>) -> Self {
        Self {
            id,
            doc_type,
            number: number.into(),
        }
    }

    /// Short display label, e.g. `F0042` for invoice 0042.
    pub fn label(&self) -> String {
        format!("{}{}", self.doc_type.label_prefix(), self.number)
    }
}

/// A billing document as served by the backend.
///
/// `based_on` is the single forward relation (the document this one derives
/// from); `referenced_by` is the set of inverse relations (documents that
/// point back at this one). The pickup flag only ever applies to dispatch
/// guides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    #[serde(rename = "tipo")]
    pub doc_type: DocumentType,
    #[serde(rename = "numero")]
    pub number: String,
    #[serde(rename = "fecha_emision")]
    pub issue_date: NaiveDate,

    /// Client identity frozen at emission time.
    #[serde(rename = "cliente_razon")]
    pub client_name: String,
    #[serde(rename = "cliente_rut", default)]
    pub client_tax_id: Option<String>,

    /// Amounts are absent on guides that move goods without billing.
    #[serde(rename = "monto_neto", default)]
    pub neto: Option<Amount>,
    #[serde(rename = "monto_iva", default)]
    pub iva: Option<Amount>,
    #[serde(rename = "monto_total", default)]
    pub total: Option<Amount>,

    #[serde(rename = "relacionado_con", default)]
    pub based_on: Option<DocumentRef>,
    #[serde(rename = "relaciones_inversas", default)]
    pub referenced_by: Vec<DocumentRef>,

    /// Dispatch guides only: pickup (retiro) instead of despatch.
    #[serde(rename = "es_retiro", default)]
    pub pickup: bool,

    #[serde(rename = "obra_origen", default)]
    pub origin_site: Option<String>,
    #[serde(rename = "obra_destino", default)]
    pub destination_site: Option<String>,
}

impl Document {
    /// Check the relationship invariants:
    /// an invoice derives from a dispatch guide (or nothing), a credit note
    /// from exactly one invoice, a debit note from exactly one credit note,
    /// and a guide from nothing; only guides carry the pickup flag.
    pub fn validate(&self) -> DomainResult<()> {
        if self.pickup && self.doc_type != DocumentType::DispatchGuide {
            return Err(DomainError::invariant(format!(
                "pickup flag is only valid on dispatch guides, found on {}",
                self.doc_type.wire_code()
            )));
        }

        if let Some(forward) = &self.based_on {
            match self.doc_type.allowed_forward_target() {
                Some(allowed) if forward.doc_type == allowed => {}
                Some(allowed) => {
                    return Err(DomainError::invariant(format!(
                        "{} may only be based on {}, found {}",
                        self.doc_type.wire_code(),
                        allowed.wire_code(),
                        forward.doc_type.wire_code()
                    )));
                }
                None => {
                    return Err(DomainError::invariant(
                        "dispatch guides are not based on other documents",
                    ));
                }
            }
        }

        Ok(())
    }

    /// Short display label, e.g. `G0007`.
    pub fn label(&self) -> String {
        format!("{}{}", self.doc_type.label_prefix(), self.number)
    }

    /// Reference form of this document, for linking from orders and rows.
    pub fn to_ref(&self) -> DocumentRef {
        DocumentRef::new(self.id, self.doc_type, self.number.clone())
    }

    /// Whether this document represents a billable movement.
    ///
    /// Pickup guides are never billable and never invoiced. An invoice over a
    /// guide inherits the guide's despatch (billable) status; a standalone
    /// invoice is a direct prolongation billing event, also billable.
    pub fn is_billable(&self) -> bool {
        match self.doc_type {
            DocumentType::DispatchGuide => !self.pickup,
            _ => true,
        }
    }

    /// Amount shown in listings: the total when present, the net otherwise,
    /// zero for unbilled guides.
    pub fn display_amount(&self) -> Amount {
        self.total.or(self.neto).unwrap_or(0)
    }
}

impl Entity for Document {
    type Id = DocumentId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
