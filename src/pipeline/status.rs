use std::fmt;

use serde::{Deserialize, Serialize};

/// Pipeline stage of an applicant.
///
/// Applicants flow: NEW → REVIEWING → SHORTLISTED → AWAITING_REPLY → BOOKED → HIRED,
/// with REJECTED reachable from any non-terminal stage. The remote service is
/// the authority on legality; nothing here blocks a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicantStatus {
    New,
    Reviewing,
    Shortlisted,
    AwaitingReply,
    Booked,
    Hired,
    Rejected,
}

/// Board columns, left to right.
pub const BOARD_COLUMNS: [ApplicantStatus; 7] = [
    ApplicantStatus::New,
    ApplicantStatus::Reviewing,
    ApplicantStatus::Shortlisted,
    ApplicantStatus::AwaitingReply,
    ApplicantStatus::Booked,
    ApplicantStatus::Rejected,
    ApplicantStatus::Hired,
];

impl ApplicantStatus {
    /// Wire key, as sent in `PATCH /applicants/{id}/status`.
    pub fn key(self) -> &'static str {
        match self {
            ApplicantStatus::New => "new",
            ApplicantStatus::Reviewing => "reviewing",
            ApplicantStatus::Shortlisted => "shortlisted",
            ApplicantStatus::AwaitingReply => "awaiting_reply",
            ApplicantStatus::Booked => "booked",
            ApplicantStatus::Hired => "hired",
            ApplicantStatus::Rejected => "rejected",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ApplicantStatus::New => "New",
            ApplicantStatus::Reviewing => "Reviewing",
            ApplicantStatus::Shortlisted => "Shortlisted",
            ApplicantStatus::AwaitingReply => "Awaiting Reply",
            ApplicantStatus::Booked => "Booked",
            ApplicantStatus::Hired => "Hired",
            ApplicantStatus::Rejected => "Rejected",
        }
    }

    /// Terminal by convention only.
    pub fn is_terminal(self) -> bool {
        matches!(self, ApplicantStatus::Hired | ApplicantStatus::Rejected)
    }

    /// The next stage on the happy path, if any.
    pub fn next(self) -> Option<ApplicantStatus> {
        match self {
            ApplicantStatus::New => Some(ApplicantStatus::Reviewing),
            ApplicantStatus::Reviewing => Some(ApplicantStatus::Shortlisted),
            ApplicantStatus::Shortlisted => Some(ApplicantStatus::AwaitingReply),
            ApplicantStatus::AwaitingReply => Some(ApplicantStatus::Booked),
            ApplicantStatus::Booked => Some(ApplicantStatus::Hired),
            ApplicantStatus::Hired | ApplicantStatus::Rejected => None,
        }
    }

    /// Targets offered to the user: every later stage, then REJECTED.
    /// Terminal stages offer nothing.
    pub fn allowed_targets(self) -> Vec<ApplicantStatus> {
        if self.is_terminal() {
            return Vec::new();
        }
        let mut targets = Vec::new();
        let mut cursor = self.next();
        while let Some(stage) = cursor {
            targets.push(stage);
            cursor = stage.next();
        }
        targets.push(ApplicantStatus::Rejected);
        targets
    }

    /// Classify a move from `self` to `target`.
    pub fn transition_to(self, target: ApplicantStatus) -> TransitionKind {
        if self == target {
            TransitionKind::Unchanged
        } else if self.is_terminal() {
            TransitionKind::Reopen
        } else if target == ApplicantStatus::Rejected {
            TransitionKind::Reject
        } else if self.allowed_targets().contains(&target) {
            TransitionKind::Advance
        } else {
            TransitionKind::Regress
        }
    }
}

impl fmt::Display for ApplicantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Shape of a requested status change. Used for logging only; every kind is
/// forwarded to the remote service except `Unchanged`, which callers skip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    Unchanged,
    Advance,
    Regress,
    Reject,
    /// Leaving HIRED or REJECTED.
    Reopen,
}
