mod drag;
mod status;

pub use drag::{DragState, DropOutcome};
pub use status::{ApplicantStatus, BOARD_COLUMNS, TransitionKind};
