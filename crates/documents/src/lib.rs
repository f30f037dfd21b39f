//! Billing documents and their cross-references.
//!
//! Documents are emitted by the billing backend and consumed here read-only,
//! with their forward relation (the document each one is based on) and
//! inverse relations (the documents referencing it) already loaded.

pub mod associations;
pub mod document;

pub use associations::resolve_associations;
pub use document::{Document, DocumentRef, DocumentType};
