//! Cross-reference labels shown alongside a document.

use crate::document::{Document, DocumentType};

/// Build the ordered list of association labels for a document.
///
/// The rules are additive and evaluated in a fixed order:
/// 1. an invoice based on a dispatch guide names that guide;
/// 2. an invoice with no forward relation is a prolongation billing event;
/// 3. an invoice lists the credit notes issued against it;
/// 4. a credit note lists the debit notes issued against it;
/// 5. a dispatch guide states whether it is a despatch (billable) or a
///    pickup (non-billable).
///
/// No other condition produces a label. An empty result renders as "—"
/// downstream; that fallback belongs to the presentation layer, not here.
pub fn resolve_associations(doc: &Document) -> Vec<String> {
    let mut labels = Vec::new();

    match doc.doc_type {
        DocumentType::Invoice => {
            match &doc.based_on {
                Some(guide) if guide.doc_type == DocumentType::DispatchGuide => {
                    labels.push(format!("linked to guide {}", guide.number));
                }
                None => labels.push("prolongation (no dispatch guide)".to_string()),
                Some(_) => {}
            }

            if let Some(numbers) = inverse_numbers(doc, DocumentType::CreditNote) {
                labels.push(format!("credit notes: {numbers}"));
            }
        }
        DocumentType::CreditNote => {
            if let Some(numbers) = inverse_numbers(doc, DocumentType::DebitNote) {
                labels.push(format!("debit notes: {numbers}"));
            }
        }
        DocumentType::DispatchGuide => {
            labels.push(
                if doc.pickup {
                    "pickup guide (non-billable)"
                } else {
                    "despatch guide (billable)"
                }
                .to_string(),
            );
        }
        DocumentType::DebitNote => {}
    }

    labels
}

/// Comma-joined numbers of the inverse relations of one type, or `None`
/// when there are none.
fn inverse_numbers(doc: &Document, wanted: DocumentType) -> Option<String> {
    let numbers: Vec<&str> = doc
        .referenced_by
        .iter()
        .filter(|r| r.doc_type == wanted)
        .map(|r| r.number.as_str())
        .collect();

    if numbers.is_empty() {
        None
    } else {
        Some(numbers.join(", "))
    }
}
