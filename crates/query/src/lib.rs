//! Filter criteria for document and work-order searches.

pub mod filters;

pub use filters::{DocumentFilter, WorkOrderFilter};
