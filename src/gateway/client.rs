use std::future::Future;
use std::time::Duration;

use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::GatewayError;
use super::types::{
    Applicant, ApplicantId, BulkActionKind, BulkOutcome, EmailPreview, JobPosting, ReplyDraft,
    ResponseData, ResumeUpload, ScoreSummary, SyncReport, UploadReceipt,
};
use crate::pipeline::ApplicantStatus;

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Typed operations offered by the remote recruiting service.
///
/// The returned futures are `Send` so background tasks can drive them from
/// `tokio::spawn`.
pub trait Gateway: Send + Sync + 'static {
    fn fetch_job(&self) -> impl Future<Output = Result<JobPosting, GatewayError>> + Send;

    /// Full applicant collection, in the service's ranking order.
    fn fetch_applicants(
        &self,
    ) -> impl Future<Output = Result<Vec<Applicant>, GatewayError>> + Send;

    fn score_all(&self) -> impl Future<Output = Result<ScoreSummary, GatewayError>> + Send;

    /// Acknowledgement only; callers reload afterwards.
    fn update_status(
        &self,
        id: &ApplicantId,
        status: ApplicantStatus,
    ) -> impl Future<Output = Result<(), GatewayError>> + Send;

    fn preview_emails(
        &self,
        ids: &[ApplicantId],
    ) -> impl Future<Output = Result<Vec<EmailPreview>, GatewayError>> + Send;

    fn bulk_action(
        &self,
        ids: &[ApplicantId],
        action: BulkActionKind,
    ) -> impl Future<Output = Result<BulkOutcome, GatewayError>> + Send;

    /// Drafts (does not send) an answer to a freeform candidate message.
    fn simulate_reply(
        &self,
        id: &ApplicantId,
        message: &str,
    ) -> impl Future<Output = Result<ReplyDraft, GatewayError>> + Send;

    /// Resolves the simulated reply to a mock-mode invite.
    fn simulate_response(
        &self,
        id: &ApplicantId,
    ) -> impl Future<Output = Result<ResponseData, GatewayError>> + Send;

    /// Pulls a fresh applicant collection from the HR system, resetting scores.
    fn resync(&self) -> impl Future<Output = Result<SyncReport, GatewayError>> + Send;

    fn upload_resume(
        &self,
        upload: &ResumeUpload,
    ) -> impl Future<Output = Result<UploadReceipt, GatewayError>> + Send;
}

#[derive(Serialize)]
struct StatusBody {
    status: ApplicantStatus,
}

#[derive(Serialize)]
struct PreviewBody<'a> {
    applicant_ids: &'a [ApplicantId],
}

#[derive(Deserialize)]
struct PreviewEnvelope {
    previews: Vec<EmailPreview>,
}

#[derive(Serialize)]
struct BulkBody<'a> {
    applicant_ids: &'a [ApplicantId],
    action: BulkActionKind,
}

#[derive(Serialize)]
struct ReplyBody<'a> {
    applicant_id: &'a ApplicantId,
    message: &'a str,
}

/// [`Gateway`] over JSON/HTTP against the service's `/api` routes.
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>) -> Result<Self, GatewayError> {
        Self::with_connect_timeout(base_url, DEFAULT_CONNECT_TIMEOUT)
    }

    /// Only the connection phase is bounded; a slow response leaves the call pending.
    pub fn with_connect_timeout(
        base_url: impl Into<String>,
        connect_timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let client = Client::builder().connect_timeout(connect_timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{path}", self.base_url)
    }

    /// `/api` followed by `segments`, each percent-encoded so an identifier
    /// cannot add path levels, a query or a fragment.
    fn segment_url(&self, segments: &[&str]) -> Result<Url, GatewayError> {
        let mut url = Url::parse(&self.url(""))
            .map_err(|e| GatewayError::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|()| GatewayError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn check(response: Response) -> Result<Response, GatewayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        Err(GatewayError::ApiError {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
        let body = Self::check(response).await?.json::<T>().await?;
        Ok(body)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        debug!(path, "GET");
        let response = self.client.get(self.url(path)).send().await?;
        Self::decode(response).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, GatewayError> {
        debug!(path, "POST");
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Self::decode(response).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        debug!(path, "POST");
        let response = self.client.post(self.url(path)).send().await?;
        Self::decode(response).await
    }
}

impl Gateway for HttpGateway {
    async fn fetch_job(&self) -> Result<JobPosting, GatewayError> {
        self.get("/job").await
    }

    async fn fetch_applicants(&self) -> Result<Vec<Applicant>, GatewayError> {
        self.get("/applicants").await
    }

    async fn score_all(&self) -> Result<ScoreSummary, GatewayError> {
        self.post_empty("/score/all").await
    }

    async fn update_status(
        &self,
        id: &ApplicantId,
        status: ApplicantStatus,
    ) -> Result<(), GatewayError> {
        let url = self.segment_url(&["applicants", id.as_str(), "status"])?;
        debug!(path = url.path(), %status, "PATCH");
        let response = self
            .client
            .patch(url)
            .json(&StatusBody { status })
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn preview_emails(&self, ids: &[ApplicantId]) -> Result<Vec<EmailPreview>, GatewayError> {
        let envelope: PreviewEnvelope = self
            .post("/email/preview", &PreviewBody { applicant_ids: ids })
            .await?;
        Ok(envelope.previews)
    }

    async fn bulk_action(
        &self,
        ids: &[ApplicantId],
        action: BulkActionKind,
    ) -> Result<BulkOutcome, GatewayError> {
        self.post(
            "/bulk",
            &BulkBody {
                applicant_ids: ids,
                action,
            },
        )
        .await
    }

    async fn simulate_reply(
        &self,
        id: &ApplicantId,
        message: &str,
    ) -> Result<ReplyDraft, GatewayError> {
        self.post(
            "/simulate-reply",
            &ReplyBody {
                applicant_id: id,
                message,
            },
        )
        .await
    }

    async fn simulate_response(&self, id: &ApplicantId) -> Result<ResponseData, GatewayError> {
        let url = self.segment_url(&["simulate-response", id.as_str()])?;
        debug!(path = url.path(), "POST");
        let response = self.client.post(url).send().await?;
        Self::decode(response).await
    }

    async fn resync(&self) -> Result<SyncReport, GatewayError> {
        self.post_empty("/paycom/refresh").await
    }

    async fn upload_resume(&self, upload: &ResumeUpload) -> Result<UploadReceipt, GatewayError> {
        self.post("/upload-resume", upload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let gw = HttpGateway::new("http://localhost:8000/").unwrap();
        assert_eq!(gw.base_url(), "http://localhost:8000");
        assert_eq!(gw.url("/job"), "http://localhost:8000/api/job");
    }

    #[test]
    fn applicant_ids_are_encoded_as_one_segment() {
        let gw = HttpGateway::new("http://localhost:8000").unwrap();
        let url = gw
            .segment_url(&["applicants", "PAY/7?x#y", "status"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/api/applicants/PAY%2F7%3Fx%23y/status"
        );
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn base_url_with_prefix_keeps_it() {
        let gw = HttpGateway::new("http://hr.local/desk/").unwrap();
        let url = gw.segment_url(&["simulate-response", "PAY-0003"]).unwrap();
        assert_eq!(url.as_str(), "http://hr.local/desk/api/simulate-response/PAY-0003");
    }

    #[test]
    fn unparseable_base_url_is_reported() {
        let gw = HttpGateway::new("not a url").unwrap();
        let err = gw.segment_url(&["applicants"]).unwrap_err();
        assert!(matches!(err, GatewayError::InvalidUrl(_)));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn bulk_body_shape() {
        let ids = vec![ApplicantId::from("PAY-0001")];
        let body = BulkBody {
            applicant_ids: &ids,
            action: BulkActionKind::Reject,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"applicant_ids":["PAY-0001"],"action":"reject"}"#);
    }

    #[test]
    fn status_body_shape() {
        let json = serde_json::to_string(&StatusBody {
            status: ApplicantStatus::AwaitingReply,
        })
        .unwrap();
        assert_eq!(json, r#"{"status":"awaiting_reply"}"#);
    }
}
