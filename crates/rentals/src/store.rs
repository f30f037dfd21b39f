//! Single-slot storage for the unsubmitted pickup draft.

use std::sync::Mutex;

use thiserror::Error;

use crate::lifecycle::PickupDraft;

/// The draft store failed; callers must not proceed to the drafting screen.
#[derive(Debug, Error)]
pub enum DraftStoreError {
    #[error("draft store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence for the one pickup draft a session may hold.
///
/// The contract is a single slot with last-writer-wins semantics: `save`
/// overwrites whatever the slot held, with no reservation and no queueing,
/// so at most one unsubmitted draft exists at any time. Implementations
/// decide the medium; the in-memory store below is both the session default
/// and the test double.
pub trait DraftStore {
    /// Overwrite the slot with `draft`.
    fn save(&self, draft: &PickupDraft) -> Result<(), DraftStoreError>;

    /// Read the slot without consuming it.
    fn load(&self) -> Result<Option<PickupDraft>, DraftStoreError>;

    /// Empty the slot.
    fn clear(&self) -> Result<(), DraftStoreError>;
}

/// In-memory draft slot, alive for the session.
#[derive(Debug, Default)]
pub struct MemoryDraftStore {
    slot: Mutex<Option<PickupDraft>>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn locked(&self) -> Result<std::sync::MutexGuard<'_, Option<PickupDraft>>, DraftStoreError> {
        self.slot
            .lock()
            .map_err(|_| DraftStoreError::Unavailable("draft slot poisoned".to_string()))
    }
}

impl DraftStore for MemoryDraftStore {
    fn save(&self, draft: &PickupDraft) -> Result<(), DraftStoreError> {
        *self.locked()? = Some(draft.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<PickupDraft>, DraftStoreError> {
        Ok(self.locked()?.clone())
    }

    fn clear(&self) -> Result<(), DraftStoreError> {
        *self.locked()? = None;
        Ok(())
    }
}
