use tracing::debug;

use crate::gateway::ApplicantId;
use crate::store::EntityStore;

/// Applicant identifiers chosen for a bulk operation, in the order picked.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SelectionSet {
    ids: Vec<ApplicantId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the identifier was not already selected.
    pub fn insert(&mut self, id: ApplicantId) -> bool {
        if self.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    pub fn remove(&mut self, id: &ApplicantId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|s| s != id);
        self.ids.len() != before
    }

    /// Flip membership. Returns `true` if the identifier is now selected.
    pub fn toggle(&mut self, id: ApplicantId) -> bool {
        if self.remove(&id) {
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    pub fn contains(&self, id: &ApplicantId) -> bool {
        self.ids.iter().any(|s| s == id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn ids(&self) -> &[ApplicantId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Drop entries absent from `store`. Returns how many were dropped.
    pub fn reconcile(&mut self, store: &EntityStore) -> usize {
        let before = self.ids.len();
        self.ids.retain(|id| store.contains(id));
        let dropped = before - self.ids.len();
        if dropped > 0 {
            debug!(dropped, "dropped stale selection entries");
        }
        dropped
    }
}
