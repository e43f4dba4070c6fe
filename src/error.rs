use thiserror::Error;

use crate::dashboard::DashboardError;
use crate::gateway::GatewayError;

/// Top-level error for the command-line front end.
#[derive(Debug, Error)]
pub enum DeskError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Applicant not found: {0}")]
    ApplicantNotFound(String),

    #[error("{0}")]
    Dashboard(#[from] DashboardError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Classifies a failed intent for the exit message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Rejected before any request (empty selection, missing field).
    Validation,
    /// The remote service or the network failed.
    Remote,
    /// Local problem: config or files.
    Local,
}

impl DeskError {
    pub fn kind(&self) -> FailureKind {
        match self {
            DeskError::Dashboard(DashboardError::Gateway(_)) | DeskError::Gateway(_) => {
                FailureKind::Remote
            }
            DeskError::Dashboard(_) | DeskError::ApplicantNotFound(_) => FailureKind::Validation,
            DeskError::Config(_) | DeskError::Io(_) => FailureKind::Local,
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::Validation => write!(f, "Validation"),
            FailureKind::Remote => write!(f, "Remote"),
            FailureKind::Local => write!(f, "Local"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_failures() {
        assert_eq!(
            DeskError::from(DashboardError::EmptySelection).kind(),
            FailureKind::Validation
        );
        let remote = DeskError::from(DashboardError::Gateway(GatewayError::ApiError {
            status: 502,
            message: "bad gateway".into(),
        }));
        assert_eq!(remote.kind(), FailureKind::Remote);
        assert_eq!(DeskError::Config("x".into()).kind(), FailureKind::Local);
    }

    #[test]
    fn dashboard_error_displays_plain_message() {
        let err = DeskError::from(DashboardError::EmptySelection);
        assert_eq!(err.to_string(), "Select at least one applicant");
        assert_eq!(FailureKind::Remote.to_string(), "Remote");
    }
}
