//! Active rentals and the pickup (retiro) drafting workflow.

pub mod lifecycle;
pub mod store;

pub use lifecycle::{ActiveRentalRow, PickupDraft, PickupState, PickupWorkflow, PICKUP_MODE};
pub use store::{DraftStore, DraftStoreError, MemoryDraftStore};
