//! Wire shapes for the order submission endpoint.
//!
//! Field names are the backend's, in Spanish; the domain types keep their
//! own names and map here at the boundary. Listing responses deserialize
//! straight into the domain row types, which carry their wire renames.

use serde::{Deserialize, Serialize};

use arriendo_core::Amount;
use arriendo_orders::{BillingPeriod, FreightKind, LineItem, RentalWindow, WorkOrder, WorkOrderKind};

/// One order line as posted to `POST /ordenes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireOrderLine {
    pub serie: String,
    #[serde(flatten)]
    pub window: RentalWindow,
    pub periodo: BillingPeriod,
    pub valor_neto: Amount,
    pub flete_neto: Amount,
    pub tipo_flete: FreightKind,
}

impl WireOrderLine {
    pub fn from_item(item: &LineItem) -> Self {
        Self {
            serie: item.machine_serial.clone(),
            window: item.window,
            periodo: item.period,
            valor_neto: item.rate,
            flete_neto: item.freight,
            tipo_flete: item.freight_kind,
        }
    }
}

/// Payload of `POST /ordenes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateWorkOrderRequest {
    pub tipo: WorkOrderKind,
    pub cliente: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observaciones: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direccion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub obra: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contactos: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orden_compra: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendedor: Option<String>,
    pub detalle_lineas: Vec<WireOrderLine>,
    pub monto_neto: Amount,
    pub monto_iva: Amount,
    pub monto_total: Amount,
}

impl CreateWorkOrderRequest {
    /// Map a validated order onto the wire payload. Totals travel alongside
    /// the lines; the backend recomputes them with the same rules.
    pub fn from_order(order: &WorkOrder) -> Self {
        let summary = order.summary();
        Self {
            tipo: order.kind(),
            cliente: order.client().to_string(),
            observaciones: order.notes().map(str::to_string),
            direccion: order.address().map(str::to_string),
            obra: order.site().map(str::to_string),
            contactos: order.contacts().map(str::to_string),
            orden_compra: order.purchase_order().map(str::to_string),
            vendedor: order.salesperson().map(str::to_string),
            detalle_lineas: order.lines().iter().map(WireOrderLine::from_item).collect(),
            monto_neto: summary.neto,
            monto_iva: summary.iva,
            monto_total: summary.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arriendo_core::WorkOrderId;
    use arriendo_orders::{LineDraft, WorkOrderDraft};
    use chrono::{NaiveDate, Utc};

    fn validated_order() -> WorkOrder {
        let draft = WorkOrderDraft {
            kind: Some(WorkOrderKind::Rental),
            client: "Constructora Andes SpA".to_string(),
            site: Some("Obra Costanera Norte".to_string()),
            address: Some("Av. Las Industrias 1200".to_string()),
            purchase_order: Some("OC-5521".to_string()),
            lines: vec![LineDraft {
                machine_serial: "GS4616A-110234".to_string(),
                from: NaiveDate::from_ymd_opt(2024, 6, 1),
                to: NaiveDate::from_ymd_opt(2024, 6, 30),
                period: BillingPeriod::Month,
                period_count: 1,
                rate: "100000".to_string(),
                freight: "20000".to_string(),
                freight_kind: FreightKind::DeliverAndPickup,
            }],
            ..WorkOrderDraft::default()
        };
        draft.validate(WorkOrderId::new(), Utc::now()).unwrap()
    }

    #[test]
    fn request_carries_the_wire_field_names() {
        let request = CreateWorkOrderRequest::from_order(&validated_order());
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["tipo"], "A");
        assert_eq!(json["cliente"], "Constructora Andes SpA");
        assert_eq!(json["obra"], "Obra Costanera Norte");
        assert_eq!(json["orden_compra"], "OC-5521");
        assert_eq!(json["monto_neto"], 120_000);
        assert_eq!(json["monto_iva"], 22_800);
        assert_eq!(json["monto_total"], 142_800);

        let line = &json["detalle_lineas"][0];
        assert_eq!(line["serie"], "GS4616A-110234");
        assert_eq!(line["fecha_desde"], "2024-06-01");
        assert_eq!(line["fecha_hasta"], "2024-06-30");
        assert_eq!(line["periodo"], "Mes");
        assert_eq!(line["valor_neto"], 100_000);
        assert_eq!(line["flete_neto"], 20_000);
        assert_eq!(line["tipo_flete"], "deliver_and_pickup");
    }

    #[test]
    fn absent_optionals_are_omitted() {
        let mut request = CreateWorkOrderRequest::from_order(&validated_order());
        request.observaciones = None;
        request.vendedor = None;
        let json = serde_json::to_value(&request).unwrap();

        assert!(json.get("observaciones").is_none());
        assert!(json.get("vendedor").is_none());
    }

    #[test]
    fn request_round_trips_through_json() {
        let request = CreateWorkOrderRequest::from_order(&validated_order());
        let json = serde_json::to_string(&request).unwrap();
        let back: CreateWorkOrderRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, request);
    }
}
