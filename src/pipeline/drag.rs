use crate::gateway::ApplicantId;

use super::status::ApplicantStatus;

/// Result of dropping onto a board column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// Nothing was being dragged.
    NoDrag,
    /// The dragged applicant is no longer in the store.
    Stale(ApplicantId),
    /// Dropped onto the column it already sits in.
    SameColumn(ApplicantId),
    /// A status change must be issued.
    Move {
        id: ApplicantId,
        from: ApplicantStatus,
        to: ApplicantStatus,
    },
}

impl DropOutcome {
    pub fn is_noop(&self) -> bool {
        !matches!(self, DropOutcome::Move { .. })
    }
}

/// Drag-and-drop input adapter. Carries at most one applicant identifier.
#[derive(Debug, Default)]
pub struct DragState {
    active: Option<ApplicantId>,
}

impl DragState {
    pub fn begin(&mut self, id: ApplicantId) {
        self.active = Some(id);
    }

    pub fn cancel(&mut self) {
        self.active = None;
    }

    pub fn active(&self) -> Option<&ApplicantId> {
        self.active.as_ref()
    }

    /// End the drag on `column`. `current_status` resolves the dragged
    /// applicant's status in the current store snapshot.
    pub fn drop_on<F>(&mut self, column: ApplicantStatus, current_status: F) -> DropOutcome
    where
        F: FnOnce(&ApplicantId) -> Option<ApplicantStatus>,
    {
        let Some(id) = self.active.take() else {
            return DropOutcome::NoDrag;
        };
        match current_status(&id) {
            None => DropOutcome::Stale(id),
            Some(from) if from == column => DropOutcome::SameColumn(id),
            Some(from) => DropOutcome::Move {
                id,
                from,
                to: column,
            },
        }
    }
}
