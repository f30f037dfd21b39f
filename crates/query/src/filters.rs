//! Composable filter criteria.
//!
//! Filters serve two masters with one definition: they render as query
//! parameters for the backend listing endpoints, and they run as in-memory
//! predicates over already-fetched rows. An empty filter matches everything;
//! ordering and paging stay with the backend.

use chrono::NaiveDate;

use arriendo_clients::rut;
use arriendo_documents::{Document, DocumentType};
use arriendo_orders::{BillingStatus, WorkOrderSummary};

/// Criteria for document searches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentFilter {
    /// Exact document type.
    pub doc_type: Option<DocumentType>,
    /// Substring of the document number.
    pub number: Option<String>,
    /// Substring of the client legal name or tax id.
    pub client: Option<String>,
    /// Inclusive issue-date range; either bound may be open.
    pub issued_from: Option<NaiveDate>,
    pub issued_to: Option<NaiveDate>,
}

impl DocumentFilter {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, doc: &Document) -> bool {
        if let Some(doc_type) = self.doc_type {
            if doc.doc_type != doc_type {
                return false;
            }
        }

        if let Some(number) = &self.number {
            if !contains_ci(&doc.number, number) {
                return false;
            }
        }

        if let Some(client) = &self.client {
            if !client_matches(client, &doc.client_name, doc.client_tax_id.as_deref()) {
                return false;
            }
        }

        if let Some(from) = self.issued_from {
            if doc.issue_date < from {
                return false;
            }
        }
        if let Some(to) = self.issued_to {
            if doc.issue_date > to {
                return false;
            }
        }

        true
    }

    /// Keep only the matching documents, preserving backend order.
    pub fn apply<'a>(&self, docs: &'a [Document]) -> Vec<&'a Document> {
        docs.iter().filter(|d| self.matches(d)).collect()
    }

    /// Query parameters for the document listing endpoint.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(doc_type) = self.doc_type {
            params.push(("tipo", doc_type.wire_code().to_string()));
        }
        if let Some(number) = &self.number {
            params.push(("numero", number.clone()));
        }
        if let Some(client) = &self.client {
            params.push(("cliente", client.clone()));
        }
        if let Some(from) = self.issued_from {
            params.push(("desde", from.to_string()));
        }
        if let Some(to) = self.issued_to {
            params.push(("hasta", to.to_string()));
        }
        params
    }
}

/// Criteria for work-order listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkOrderFilter {
    /// Restrict to orders whose billing status is still pending.
    pub pending_only: bool,
}

impl WorkOrderFilter {
    pub fn matches(&self, order: &WorkOrderSummary) -> bool {
        !self.pending_only || order.billing_status == BillingStatus::Pending
    }

    pub fn apply<'a>(&self, orders: &'a [WorkOrderSummary]) -> Vec<&'a WorkOrderSummary> {
        orders.iter().filter(|o| self.matches(o)).collect()
    }

    /// Query parameters for the order listing endpoint.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        if self.pending_only {
            vec![("solo_pendientes", "1".to_string())]
        } else {
            Vec::new()
        }
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// A client query hits on the legal name or on the tax id. Tax ids compare
/// in cleaned form so `12.345.678-5` and `123456785` find each other.
fn client_matches(query: &str, name: &str, tax_id: Option<&str>) -> bool {
    if contains_ci(name, query) {
        return true;
    }

    match tax_id {
        Some(tax_id) => {
            contains_ci(tax_id, query)
                || (rut::looks_like_tax_id(query)
                    && rut::clean(tax_id).contains(&rut::clean(query)))
        }
        None => false,
    }
}
