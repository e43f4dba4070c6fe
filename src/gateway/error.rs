//! Error type for calls against the remote recruiting service.

use thiserror::Error;

/// Failures surfaced by a [`Gateway`](super::Gateway) call.
///
/// - [`ApiError`](GatewayError::ApiError) — the service answered with a non-2xx status
/// - [`NetworkError`](GatewayError::NetworkError) — transport or body decoding failed
/// - [`InvalidUrl`](GatewayError::InvalidUrl) — the base URL could not be extended
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Non-success HTTP status together with the response body text.
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// DNS, connection refused, reset or an undecodable body.
    #[error("network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// The configured base URL cannot carry path segments.
    #[error("invalid service URL: {0}")]
    InvalidUrl(String),
}

impl GatewayError {
    /// HTTP status if the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::ApiError { status, .. } => Some(*status),
            GatewayError::NetworkError(e) => e.status().map(|s| s.as_u16()),
            GatewayError::InvalidUrl(_) => None,
        }
    }
}
