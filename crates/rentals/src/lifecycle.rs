//! Pickup drafting over an active rental.
//!
//! An active rental (a rental order with a despatch guide and no pickup
//! counterpart yet) can be turned into a pickup draft without touching the
//! network; the draft later submits as a new work order. The states are
//!
//! `Active` → `PickupDrafted` → `PickupSubmitted`
//!
//! and the last one is terminal here: from submission on, the order belongs
//! to the billing backend.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use arriendo_core::RentalId;
use arriendo_documents::DocumentType;
use arriendo_orders::{LineDraft, WorkOrderDraft, WorkOrderKind};

use crate::store::{DraftStore, DraftStoreError};

/// Mode tag carried by every pickup draft.
pub const PICKUP_MODE: &str = "RETIRO";

/// Where a rental stands in the pickup workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupState {
    /// Dispatched and running; no pickup draft exists yet.
    Active,
    /// An unsubmitted pickup draft sits in the local slot.
    PickupDrafted,
    /// The draft was taken for submission. Terminal at this layer.
    PickupSubmitted,
}

/// One row of the active-rentals listing, as served by the backend.
///
/// The movement document is the latest despatch guide of the rental (or the
/// latest document of any type when no guide exists); the invoice columns
/// carry the latest invoice separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveRentalRow {
    #[serde(rename = "id")]
    pub rental_id: RentalId,

    #[serde(rename = "documento", default)]
    pub movement_label: Option<String>,
    #[serde(rename = "doc_tipo", default)]
    pub movement_type: Option<DocumentType>,
    #[serde(rename = "doc_numero", default)]
    pub movement_number: Option<String>,
    #[serde(rename = "doc_fecha", default)]
    pub movement_date: Option<NaiveDate>,

    #[serde(rename = "factura", default)]
    pub invoice_label: Option<String>,
    #[serde(rename = "factura_numero", default)]
    pub invoice_number: Option<String>,
    #[serde(rename = "factura_fecha", default)]
    pub invoice_date: Option<NaiveDate>,

    #[serde(rename = "marca")]
    pub brand: String,
    #[serde(rename = "modelo", default)]
    pub model: Option<String>,
    #[serde(rename = "altura", default)]
    pub height_m: Option<f64>,
    #[serde(rename = "serie")]
    pub serial: String,

    #[serde(rename = "desde", default)]
    pub from: Option<NaiveDate>,
    #[serde(rename = "hasta", default)]
    pub to: Option<NaiveDate>,

    #[serde(rename = "cliente")]
    pub client_name: String,
    #[serde(rename = "rut_cliente", default)]
    pub client_tax_id: String,
    #[serde(rename = "obra", default)]
    pub site: String,

    #[serde(rename = "ot_folio", default)]
    pub order_folio: Option<String>,
    #[serde(rename = "orden_compra", default)]
    pub purchase_order: Option<String>,
    #[serde(rename = "vendedor", default)]
    pub salesperson: Option<String>,
}

/// The transient pickup draft synthesized from an active rental row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickupDraft {
    #[serde(rename = "modo")]
    pub mode: String,
    #[serde(rename = "arriendo_id")]
    pub rental_id: RentalId,
    #[serde(rename = "documento", default)]
    pub movement_label: Option<String>,
    #[serde(rename = "doc_numero", default)]
    pub movement_number: Option<String>,
    #[serde(rename = "doc_fecha", default)]
    pub movement_date: Option<NaiveDate>,
    #[serde(rename = "serie")]
    pub serial: String,
    #[serde(rename = "desde", default)]
    pub from: Option<NaiveDate>,
    #[serde(rename = "hasta", default)]
    pub to: Option<NaiveDate>,
    #[serde(rename = "cliente")]
    pub client_name: String,
    #[serde(rename = "rut_cliente", default)]
    pub client_tax_id: String,
    #[serde(rename = "obra", default)]
    pub site: String,
    #[serde(rename = "ot_folio", default)]
    pub order_folio: Option<String>,
    #[serde(rename = "orden_compra", default)]
    pub purchase_order: Option<String>,
}

impl PickupDraft {
    /// Carry over everything the drafting screen needs: the originating
    /// document identifiers, the machine, the rental window, the client,
    /// the site and the order references.
    pub fn from_row(row: &ActiveRentalRow) -> Self {
        Self {
            mode: PICKUP_MODE.to_string(),
            rental_id: row.rental_id,
            movement_label: row.movement_label.clone(),
            movement_number: row.movement_number.clone(),
            movement_date: row.movement_date,
            serial: row.serial.clone(),
            from: row.from,
            to: row.to,
            client_name: row.client_name.clone(),
            client_tax_id: row.client_tax_id.clone(),
            site: row.site.clone(),
            order_folio: row.order_folio.clone(),
            purchase_order: row.purchase_order.clone(),
        }
    }

    /// Seed an order form from this draft. Pickups move machinery back, so
    /// the order is a transfer with a single zero-amount line; the pickup
    /// guide the backend emits for it is never billable.
    pub fn to_order_draft(&self) -> WorkOrderDraft {
        WorkOrderDraft {
            kind: Some(WorkOrderKind::Transfer),
            client: self.client_name.clone(),
            site: if self.site.is_empty() {
                None
            } else {
                Some(self.site.clone())
            },
            purchase_order: self.purchase_order.clone(),
            lines: vec![LineDraft {
                machine_serial: self.serial.clone(),
                from: self.from,
                to: self.to,
                ..LineDraft::default()
            }],
            ..WorkOrderDraft::default()
        }
    }
}

/// Drives a rental through the pickup states over a [`DraftStore`].
#[derive(Debug)]
pub struct PickupWorkflow<S: DraftStore> {
    store: S,
}

impl<S: DraftStore> PickupWorkflow<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Synthesize a pickup draft from an active rental and persist it in the
    /// single slot, overwriting any prior unsubmitted draft.
    ///
    /// No network call happens here. When the store fails the error is
    /// returned and the caller must stay where it is: navigation to the
    /// drafting screen is conditional on successful persistence.
    pub fn draft_pickup(&self, row: &ActiveRentalRow) -> Result<PickupDraft, DraftStoreError> {
        let draft = PickupDraft::from_row(row);
        self.store.save(&draft)?;
        tracing::debug!(rental = %row.rental_id, serial = %row.serial, "pickup draft saved");
        Ok(draft)
    }

    /// The unsubmitted draft, if any.
    pub fn current(&self) -> Result<Option<PickupDraft>, DraftStoreError> {
        self.store.load()
    }

    /// State as observable from the slot.
    pub fn state(&self) -> Result<PickupState, DraftStoreError> {
        Ok(match self.store.load()? {
            Some(_) => PickupState::PickupDrafted,
            None => PickupState::Active,
        })
    }

    /// Remove and return the draft for submission as a new work order.
    ///
    /// After this the slot is empty and the rental is `PickupSubmitted` as
    /// far as this layer is concerned; the billing backend takes over.
    pub fn take_for_submission(&self) -> Result<Option<PickupDraft>, DraftStoreError> {
        let draft = self.store.load()?;
        if draft.is_some() {
            self.store.clear()?;
        }
        Ok(draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryDraftStore;
    use arriendo_orders::WorkOrderKind;

    fn row(serial: &str, client: &str) -> ActiveRentalRow {
        ActiveRentalRow {
            rental_id: RentalId::new(),
            movement_label: Some("G0007".to_string()),
            movement_type: Some(DocumentType::DispatchGuide),
            movement_number: Some("0007".to_string()),
            movement_date: NaiveDate::from_ymd_opt(2024, 6, 3),
            invoice_label: Some("F0042".to_string()),
            invoice_number: Some("0042".to_string()),
            invoice_date: NaiveDate::from_ymd_opt(2024, 6, 10),
            brand: "Genie".to_string(),
            model: Some("GS-3246".to_string()),
            height_m: Some(11.7),
            serial: serial.to_string(),
            from: NaiveDate::from_ymd_opt(2024, 6, 1),
            to: NaiveDate::from_ymd_opt(2024, 8, 31),
            client_name: client.to_string(),
            client_tax_id: "12345678-5".to_string(),
            site: "Obra Costanera Norte".to_string(),
            order_folio: Some("A0012".to_string()),
            purchase_order: Some("OC-5521".to_string()),
            salesperson: Some("P. Rojas".to_string()),
        }
    }

    /// A store that always fails, standing in for an unavailable medium.
    struct BrokenStore;

    impl DraftStore for BrokenStore {
        fn save(&self, _draft: &PickupDraft) -> Result<(), DraftStoreError> {
            Err(DraftStoreError::Unavailable("disk full".to_string()))
        }

        fn load(&self) -> Result<Option<PickupDraft>, DraftStoreError> {
            Err(DraftStoreError::Unavailable("disk full".to_string()))
        }

        fn clear(&self) -> Result<(), DraftStoreError> {
            Err(DraftStoreError::Unavailable("disk full".to_string()))
        }
    }

    #[test]
    fn drafting_moves_the_rental_to_pickup_drafted() {
        let workflow = PickupWorkflow::new(MemoryDraftStore::new());
        assert_eq!(workflow.state().unwrap(), PickupState::Active);

        let draft = workflow.draft_pickup(&row("GS4616A-110234", "Constructora Andes SpA")).unwrap();
        assert_eq!(draft.mode, PICKUP_MODE);
        assert_eq!(workflow.state().unwrap(), PickupState::PickupDrafted);
        assert_eq!(workflow.current().unwrap().unwrap().serial, "GS4616A-110234");
    }

    #[test]
    fn second_draft_wins_the_slot() {
        let workflow = PickupWorkflow::new(MemoryDraftStore::new());
        workflow.draft_pickup(&row("SER-1", "Constructora Andes SpA")).unwrap();
        workflow.draft_pickup(&row("SER-2", "Inmobiliaria Sur Ltda")).unwrap();

        let kept = workflow.current().unwrap().unwrap();
        assert_eq!(kept.serial, "SER-2");
        assert_eq!(kept.client_name, "Inmobiliaria Sur Ltda");
    }

    #[test]
    fn store_failure_surfaces_and_leaves_no_draft() {
        let workflow = PickupWorkflow::new(BrokenStore);
        let err = workflow
            .draft_pickup(&row("SER-1", "Constructora Andes SpA"))
            .unwrap_err();
        assert!(matches!(err, DraftStoreError::Unavailable(_)));
    }

    #[test]
    fn take_for_submission_empties_the_slot() {
        let workflow = PickupWorkflow::new(MemoryDraftStore::new());
        workflow.draft_pickup(&row("SER-1", "Constructora Andes SpA")).unwrap();

        let taken = workflow.take_for_submission().unwrap();
        assert_eq!(taken.unwrap().serial, "SER-1");
        assert_eq!(workflow.state().unwrap(), PickupState::Active);
        assert!(workflow.take_for_submission().unwrap().is_none());
    }

    #[test]
    fn draft_carries_the_row_identity() {
        let source = row("GS4616A-110234", "Constructora Andes SpA");
        let draft = PickupDraft::from_row(&source);

        assert_eq!(draft.rental_id, source.rental_id);
        assert_eq!(draft.movement_number.as_deref(), Some("0007"));
        assert_eq!(draft.client_tax_id, "12345678-5");
        assert_eq!(draft.site, "Obra Costanera Norte");
        assert_eq!(draft.purchase_order.as_deref(), Some("OC-5521"));
    }

    #[test]
    fn order_draft_seeded_from_pickup_is_a_transfer() {
        let draft = PickupDraft::from_row(&row("GS4616A-110234", "Constructora Andes SpA"));
        let order = draft.to_order_draft();

        assert_eq!(order.kind, Some(WorkOrderKind::Transfer));
        assert_eq!(order.client, "Constructora Andes SpA");
        assert_eq!(order.lines.len(), 1);
        assert_eq!(order.lines[0].machine_serial, "GS4616A-110234");
        // Pickups bill nothing.
        assert_eq!(order.summary().total, 0);
    }

    #[test]
    fn row_deserializes_from_the_wire_shape() {
        let json = r#"{
            "id": "018f9f2e-6d2a-7cc0-b827-555555555555",
            "documento": "G0007",
            "doc_tipo": "GD",
            "doc_numero": "0007",
            "doc_fecha": "2024-06-03",
            "factura": "F0042",
            "factura_numero": "0042",
            "factura_fecha": "2024-06-10",
            "marca": "Genie",
            "modelo": "GS-3246",
            "altura": 11.7,
            "serie": "GS4616A-110234",
            "desde": "2024-06-01",
            "hasta": "2024-08-31",
            "cliente": "Constructora Andes SpA",
            "rut_cliente": "12345678-5",
            "obra": "Obra Costanera Norte",
            "ot_folio": "A0012",
            "orden_compra": "OC-5521",
            "vendedor": "P. Rojas"
        }"#;

        let row: ActiveRentalRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.movement_type, Some(DocumentType::DispatchGuide));
        assert_eq!(row.serial, "GS4616A-110234");
        assert_eq!(row.height_m, Some(11.7));
    }
}
