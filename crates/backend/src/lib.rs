//! The backend collaborator: DTOs and the HTTP client for the billing
//! service this layer talks to.

pub mod client;
pub mod dto;

pub use client::{BackendClient, TransportError};
pub use dto::{CreateWorkOrderRequest, WireOrderLine};
