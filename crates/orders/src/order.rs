//! Work order (OT) model and lifecycle.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use arriendo_clients::rut;
use arriendo_core::{Amount, DomainError, DomainResult, Entity, ValueObject, WorkOrderId};
use arriendo_documents::{DocumentRef, DocumentType};

use crate::pricing::{coerce_amount, compute_summary, LineAmounts, OrderSummary};

/// Commercial kind of a work order, with the one-letter wire codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkOrderKind {
    #[serde(rename = "A")]
    Rental,
    #[serde(rename = "V")]
    Sale,
    #[serde(rename = "T")]
    Transfer,
}

/// Billing status of a work order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BillingStatus {
    #[serde(rename = "PEND")]
    Pending,
    #[serde(rename = "PROC")]
    Documented,
}

/// Unit the rental rate is quoted in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BillingPeriod {
    #[default]
    #[serde(rename = "Dia")]
    Day,
    #[serde(rename = "Semana")]
    Week,
    #[serde(rename = "Mes")]
    Month,
}

/// Freight billed alongside a line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FreightKind {
    #[default]
    None,
    DeliverAndPickup,
    TransferOnly,
}

/// Rental window of a line. Either bound may be open, but a closed window
/// never runs backwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalWindow {
    #[serde(rename = "fecha_desde")]
    pub from: Option<NaiveDate>,
    #[serde(rename = "fecha_hasta")]
    pub to: Option<NaiveDate>,
}

impl RentalWindow {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> DomainResult<Self> {
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(DomainError::validation(format!(
                    "rental window runs backwards: {from} > {to}"
                )));
            }
        }
        Ok(Self { from, to })
    }

    pub fn open() -> Self {
        Self::default()
    }
}

impl ValueObject for RentalWindow {}

/// A validated order line: one machine over one window at one rate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub machine_serial: String,
    pub window: RentalWindow,
    pub period: BillingPeriod,
    pub period_count: u32,
    /// Net rate in whole pesos.
    pub rate: Amount,
    /// Net freight in whole pesos.
    pub freight: Amount,
    pub freight_kind: FreightKind,
}

impl LineItem {
    pub fn new(
        machine_serial: impl Into<String>,
        window: RentalWindow,
        period: BillingPeriod,
        period_count: u32,
        rate: Amount,
        freight: Amount,
        freight_kind: FreightKind,
    ) -> DomainResult<Self> {
        let machine_serial = machine_serial.into().trim().to_string();
        if machine_serial.is_empty() {
            return Err(DomainError::validation("line has no machine serial"));
        }
        if rate < 0 {
            return Err(DomainError::validation(format!(
                "line rate must be non-negative, got {rate}"
            )));
        }
        if freight < 0 {
            return Err(DomainError::validation(format!(
                "line freight must be non-negative, got {freight}"
            )));
        }

        Ok(Self {
            machine_serial,
            window,
            period,
            period_count,
            rate,
            freight,
            freight_kind,
        })
    }
}

impl LineAmounts for LineItem {
    fn rate_amount(&self) -> Amount {
        self.rate
    }

    fn freight_amount(&self) -> Amount {
        self.freight
    }
}

/// One line of an order form, amounts still raw text. Totals recompute on
/// every keystroke without tripping over half-typed values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineDraft {
    pub machine_serial: String,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub period: BillingPeriod,
    pub period_count: u32,
    pub rate: String,
    pub freight: String,
    pub freight_kind: FreightKind,
}

impl LineDraft {
    fn to_item(&self) -> DomainResult<LineItem> {
        LineItem::new(
            self.machine_serial.clone(),
            RentalWindow::new(self.from, self.to)?,
            self.period,
            self.period_count,
            coerce_amount(&self.rate),
            coerce_amount(&self.freight),
            self.freight_kind,
        )
    }
}

impl LineAmounts for LineDraft {
    fn rate_amount(&self) -> Amount {
        coerce_amount(&self.rate)
    }

    fn freight_amount(&self) -> Amount {
        coerce_amount(&self.freight)
    }
}

/// An order as captured by the form, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkOrderDraft {
    pub kind: Option<WorkOrderKind>,
    /// Free-text client identification: a legal name or a tax id.
    pub client: String,
    pub site: Option<String>,
    pub address: Option<String>,
    pub contacts: Option<String>,
    pub purchase_order: Option<String>,
    pub salesperson: Option<String>,
    pub notes: Option<String>,
    pub lines: Vec<LineDraft>,
}

impl WorkOrderDraft {
    /// Running totals for display while the form is being filled.
    pub fn summary(&self) -> OrderSummary {
        compute_summary(&self.lines)
    }

    /// Validate the draft into a submittable order.
    ///
    /// All checks run before any network call: a client must be identified,
    /// at least one line must name a machine serial (rows without one are
    /// skipped as unfinished), windows must not run backwards and amounts
    /// must be non-negative. The draft itself is untouched, so a failed
    /// validation preserves the form state.
    pub fn validate(&self, id: WorkOrderId, created_at: DateTime<Utc>) -> DomainResult<WorkOrder> {
        let kind = self
            .kind
            .ok_or_else(|| DomainError::validation("order kind is required"))?;

        let client = self.client.trim();
        if client.is_empty() {
            return Err(DomainError::validation(
                "no identified client; pick one from the client search",
            ));
        }
        // A bare tax id travels in its dotted display form, which is the
        // spelling the backend matches clients on.
        let client = if rut::looks_like_tax_id(client) {
            rut::format(client)
        } else {
            client.to_string()
        };

        let mut lines = Vec::new();
        for draft in &self.lines {
            if draft.machine_serial.trim().is_empty() {
                continue;
            }
            lines.push(draft.to_item()?);
        }
        if lines.is_empty() {
            return Err(DomainError::validation(
                "at least one line with a machine serial is required",
            ));
        }

        let summary = compute_summary(&lines);

        Ok(WorkOrder {
            id,
            kind,
            client,
            site: self.site.clone(),
            address: self.address.clone(),
            contacts: self.contacts.clone(),
            purchase_order: self.purchase_order.clone(),
            salesperson: self.salesperson.clone(),
            notes: self.notes.clone(),
            lines,
            summary,
            created_at,
            billing_status: BillingStatus::Pending,
            invoice: None,
            guide: None,
        })
    }
}

/// A validated work order.
///
/// Orders are created from a form draft and stay modifiable only while no
/// document has been emitted against them; after that the sole remaining
/// transition is the billing status itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkOrder {
    id: WorkOrderId,
    kind: WorkOrderKind,
    client: String,
    site: Option<String>,
    address: Option<String>,
    contacts: Option<String>,
    purchase_order: Option<String>,
    salesperson: Option<String>,
    notes: Option<String>,
    lines: Vec<LineItem>,
    summary: OrderSummary,
    created_at: DateTime<Utc>,
    billing_status: BillingStatus,
    invoice: Option<DocumentRef>,
    guide: Option<DocumentRef>,
}

impl WorkOrder {
    pub fn kind(&self) -> WorkOrderKind {
        self.kind
    }

    pub fn client(&self) -> &str {
        &self.client
    }

    pub fn site(&self) -> Option<&str> {
        self.site.as_deref()
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn contacts(&self) -> Option<&str> {
        self.contacts.as_deref()
    }

    pub fn purchase_order(&self) -> Option<&str> {
        self.purchase_order.as_deref()
    }

    pub fn salesperson(&self) -> Option<&str> {
        self.salesperson.as_deref()
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn summary(&self) -> OrderSummary {
        self.summary
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn billing_status(&self) -> BillingStatus {
        self.billing_status
    }

    pub fn invoice(&self) -> Option<&DocumentRef> {
        self.invoice.as_ref()
    }

    pub fn guide(&self) -> Option<&DocumentRef> {
        self.guide.as_ref()
    }

    pub fn is_modifiable(&self) -> bool {
        self.billing_status == BillingStatus::Pending
    }

    /// Append a line and recompute the totals. Refused once a document has
    /// been emitted against the order.
    pub fn add_line(&mut self, line: LineItem) -> DomainResult<()> {
        if !self.is_modifiable() {
            return Err(DomainError::invariant(
                "cannot modify an order once it is documented",
            ));
        }
        self.lines.push(line);
        self.summary = compute_summary(&self.lines);
        Ok(())
    }

    /// Record a document emitted against this order and move it to
    /// `Documented`.
    ///
    /// Invoices and dispatch guides each have one slot; a guide followed by
    /// the invoice that bills it is the normal sequence. Filling an occupied
    /// slot is a conflict.
    pub fn mark_documented(&mut self, doc: DocumentRef) -> DomainResult<()> {
        let slot = match doc.doc_type {
            DocumentType::Invoice => &mut self.invoice,
            DocumentType::DispatchGuide => &mut self.guide,
            other => {
                return Err(DomainError::validation(format!(
                    "only invoices and dispatch guides are emitted against an order, got {}",
                    other.wire_code()
                )));
            }
        };

        if slot.is_some() {
            return Err(DomainError::conflict(format!(
                "order already carries a {} document",
                doc.doc_type.wire_code()
            )));
        }

        *slot = Some(doc);
        self.billing_status = BillingStatus::Documented;
        Ok(())
    }
}

impl Entity for WorkOrder {
    type Id = WorkOrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Row shape served by the order listing endpoint. Invoice and guide arrive
/// nested as short references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkOrderSummary {
    pub id: WorkOrderId,
    #[serde(rename = "tipo")]
    pub kind: WorkOrderKind,
    #[serde(rename = "cliente_razon")]
    pub client_name: String,
    #[serde(rename = "cliente_rut", default)]
    pub client_tax_id: Option<String>,
    #[serde(rename = "estado")]
    pub billing_status: BillingStatus,
    #[serde(rename = "folio", default)]
    pub folio: Option<String>,
    #[serde(rename = "factura", default)]
    pub invoice: Option<DocumentRef>,
    #[serde(rename = "guia", default)]
    pub guide: Option<DocumentRef>,
    #[serde(rename = "monto_neto")]
    pub neto: Amount,
    #[serde(rename = "monto_iva")]
    pub iva: Amount,
    #[serde(rename = "monto_total")]
    pub total: Amount,
    #[serde(rename = "fecha_creacion")]
    pub created_at: DateTime<Utc>,
}
