//! Client entities and the national tax-id (RUT) helpers.

pub mod client;
pub mod rut;

pub use client::{Client, ContactInfo, PaymentTerm};
pub use rut::TaxId;
