//! In-memory stand-in for the recruiting service.
//!
//! Mirrors the service's observable behaviour closely enough for the
//! dashboard: status updates and bulk actions mutate the applicant list,
//! every call is recorded, and any route can be told to fail.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use chrono::{NaiveDate, TimeZone, Utc};

use pipeline_desk::gateway::types::{BulkItemResult, Resume, ScoredEntry};
use pipeline_desk::gateway::{
    Applicant, ApplicantId, BulkActionKind, BulkOutcome, CalendarEvent, DeliveryMode,
    EmailPreview, Gateway, GatewayError, JobPosting, ReplyDraft, ResponseData, ResumeUpload,
    ScoreData, ScoreSummary, SyncReport, UploadReceipt,
};
use pipeline_desk::pipeline::ApplicantStatus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    FetchJob,
    FetchApplicants,
    ScoreAll,
    UpdateStatus(ApplicantId, ApplicantStatus),
    Preview(Vec<ApplicantId>),
    Bulk(Vec<ApplicantId>, BulkActionKind),
    SimulateReply(ApplicantId),
    SimulateResponse(ApplicantId),
    Resync,
    Upload(String),
}

#[derive(Default)]
struct Inner {
    applicants: Vec<Applicant>,
    calls: Vec<Call>,
    failing: HashSet<&'static str>,
}

pub struct FakeRemote {
    job: JobPosting,
    mode: DeliveryMode,
    inner: Mutex<Inner>,
}

pub fn job() -> JobPosting {
    JobPosting {
        id: "JOB-SLO-2026".into(),
        title: "Ski Lift Operator".into(),
        department: "Mountain Operations".into(),
        location: "Vail, CO".into(),
        employment_type: "Seasonal".into(),
        season: "Winter 2026".into(),
        applicant_count: 3,
        loaded_count: 3,
        description: String::new(),
        requirements: Vec::new(),
        scoring_criteria: Default::default(),
    }
}

pub fn applicant(id: &str, first: &str, status: ApplicantStatus) -> Applicant {
    Applicant {
        id: ApplicantId::from(id),
        first_name: first.into(),
        last_name: "Tester".into(),
        email: format!("{}@example.com", first.to_lowercase()),
        phone: String::new(),
        location: "Frisco, CO".into(),
        distance_miles: 8.0,
        applied_date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
        status,
        resume: Resume::default(),
        score_data: None,
        response_data: None,
        calendar_event: None,
        email_sent_at: None,
    }
}

pub fn scored(mut a: Applicant, score: u32) -> Applicant {
    a.score_data = Some(ScoreData {
        score,
        max_score: 100,
        recommendation: "Consider".into(),
        badge: String::new(),
        breakdown: Default::default(),
        reasons: Vec::new(),
    });
    a
}

/// A1 and A2 shortlisted, A3 new.
pub fn roster() -> Vec<Applicant> {
    vec![
        scored(applicant("A1", "Alice", ApplicantStatus::Shortlisted), 88),
        scored(applicant("A2", "Bruno", ApplicantStatus::Shortlisted), 76),
        applicant("A3", "Carla", ApplicantStatus::New),
    ]
}

pub fn id(raw: &str) -> ApplicantId {
    ApplicantId::from(raw)
}

impl FakeRemote {
    pub fn new(applicants: Vec<Applicant>) -> Self {
        Self {
            job: job(),
            mode: DeliveryMode::Mock,
            inner: Mutex::new(Inner {
                applicants,
                ..Inner::default()
            }),
        }
    }

    pub fn with_mode(mut self, mode: DeliveryMode) -> Self {
        self.mode = mode;
        self
    }

    /// Make a route fail with HTTP 500 until [`FakeRemote::heal`] is called.
    pub fn fail(&self, route: &'static str) {
        self.inner.lock().unwrap().failing.insert(route);
    }

    pub fn heal(&self, route: &'static str) {
        self.inner.lock().unwrap().failing.remove(route);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.inner.lock().unwrap().calls.clear();
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }

    pub fn applicants(&self) -> Vec<Applicant> {
        self.inner.lock().unwrap().applicants.clone()
    }

    pub fn set_applicants(&self, applicants: Vec<Applicant>) {
        self.inner.lock().unwrap().applicants = applicants;
    }

    fn record(&self, route: &'static str, call: Call) -> Result<(), GatewayError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(call);
        if inner.failing.contains(route) {
            return Err(GatewayError::ApiError {
                status: 500,
                message: format!("{route} unavailable"),
            });
        }
        Ok(())
    }

    fn not_found(id: &ApplicantId) -> GatewayError {
        GatewayError::ApiError {
            status: 404,
            message: format!("Applicant {id} not found"),
        }
    }
}

impl Gateway for FakeRemote {
    async fn fetch_job(&self) -> Result<JobPosting, GatewayError> {
        self.record("job", Call::FetchJob)?;
        Ok(self.job.clone())
    }

    async fn fetch_applicants(&self) -> Result<Vec<Applicant>, GatewayError> {
        self.record("applicants", Call::FetchApplicants)?;
        Ok(self.applicants())
    }

    async fn score_all(&self) -> Result<ScoreSummary, GatewayError> {
        self.record("score", Call::ScoreAll)?;
        let mut inner = self.inner.lock().unwrap();
        let mut results = Vec::new();
        let mut auto_promoted = 0;
        for a in inner.applicants.iter_mut() {
            let score = 60 + (a.first_name.len() as u32 * 5) % 40;
            if score >= 75 && a.status == ApplicantStatus::New {
                a.status = ApplicantStatus::Reviewing;
                auto_promoted += 1;
            }
            *a = scored(a.clone(), score);
            results.push(ScoredEntry {
                id: a.id.clone(),
                score,
                recommendation: "Consider".into(),
            });
        }
        Ok(ScoreSummary {
            scored: results.len(),
            auto_promoted,
            threshold: 75,
            results,
        })
    }

    async fn update_status(
        &self,
        id: &ApplicantId,
        status: ApplicantStatus,
    ) -> Result<(), GatewayError> {
        self.record("status", Call::UpdateStatus(id.clone(), status))?;
        let mut inner = self.inner.lock().unwrap();
        let a = inner
            .applicants
            .iter_mut()
            .find(|a| &a.id == id)
            .ok_or_else(|| Self::not_found(id))?;
        a.status = status;
        Ok(())
    }

    async fn preview_emails(&self, ids: &[ApplicantId]) -> Result<Vec<EmailPreview>, GatewayError> {
        self.record("preview", Call::Preview(ids.to_vec()))?;
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .applicants
            .iter()
            .filter(|a| ids.contains(&a.id))
            .map(|a| EmailPreview {
                id: a.id.clone(),
                name: a.display_name(),
                email: a.email.clone(),
                subject: format!("Interview invitation: {}", self.job.title),
                body: format!("Hi {},\n\nWe'd like to meet you.", a.first_name),
                questions: vec!["Can you work weekends?".into()],
                mode: self.mode,
            })
            .collect())
    }

    async fn bulk_action(
        &self,
        ids: &[ApplicantId],
        action: BulkActionKind,
    ) -> Result<BulkOutcome, GatewayError> {
        self.record("bulk", Call::Bulk(ids.to_vec(), action))?;
        let mut inner = self.inner.lock().unwrap();
        let sent_at = Utc.with_ymd_and_hms(2026, 2, 20, 9, 0, 0).unwrap();
        let mut results = Vec::new();
        for a in inner.applicants.iter_mut().filter(|a| ids.contains(&a.id)) {
            let mut result = BulkItemResult {
                id: a.id.clone(),
                name: a.display_name(),
                email: Some(a.email.clone()),
                action: String::new(),
                message: String::new(),
                mode: None,
                calendar_event: None,
            };
            match action {
                BulkActionKind::SendInvite => {
                    a.status = ApplicantStatus::AwaitingReply;
                    a.email_sent_at = Some(sent_at);
                    result.action = "email_sent".into();
                    result.mode = Some(self.mode);
                }
                BulkActionKind::BookInterview => {
                    let event = CalendarEvent {
                        title: format!("Interview: {}", a.display_name()),
                        date: "2026-03-02".into(),
                        time: "10:00 AM".into(),
                        location: "Lift 4 base".into(),
                        duration: "30 min".into(),
                    };
                    a.status = ApplicantStatus::Booked;
                    a.calendar_event = Some(event.clone());
                    result.action = "booked".into();
                    result.calendar_event = Some(event);
                }
                BulkActionKind::Reject => {
                    a.status = ApplicantStatus::Rejected;
                    result.action = "rejected".into();
                }
            }
            results.push(result);
        }
        Ok(BulkOutcome {
            action,
            processed: results.len(),
            results,
        })
    }

    async fn simulate_reply(
        &self,
        id: &ApplicantId,
        message: &str,
    ) -> Result<ReplyDraft, GatewayError> {
        self.record("reply", Call::SimulateReply(id.clone()))?;
        Ok(ReplyDraft {
            applicant: id.to_string(),
            received_message: message.to_string(),
            ai_drafted_reply: "Thanks for reaching out!".into(),
            sent_at: "2026-02-21T10:00:00Z".into(),
        })
    }

    async fn simulate_response(&self, id: &ApplicantId) -> Result<ResponseData, GatewayError> {
        self.record("response", Call::SimulateResponse(id.clone()))?;
        let response = ResponseData {
            text: "Yes, weekends are fine.".into(),
            score: 42,
            max_score: 50,
            recommendation: "Strong".into(),
            breakdown: Default::default(),
            reasons: Vec::new(),
            received_at: Some(Utc.with_ymd_and_hms(2026, 2, 20, 9, 5, 0).unwrap()),
        };
        let mut inner = self.inner.lock().unwrap();
        let a = inner
            .applicants
            .iter_mut()
            .find(|a| &a.id == id)
            .ok_or_else(|| Self::not_found(id))?;
        a.response_data = Some(response.clone());
        Ok(response)
    }

    async fn resync(&self) -> Result<SyncReport, GatewayError> {
        self.record("resync", Call::Resync)?;
        let mut inner = self.inner.lock().unwrap();
        inner.applicants = vec![
            applicant("P1", "Dana", ApplicantStatus::New),
            applicant("P2", "Eli", ApplicantStatus::New),
        ];
        Ok(SyncReport {
            refreshed: true,
            applicant_count: inner.applicants.len(),
        })
    }

    async fn upload_resume(&self, upload: &ResumeUpload) -> Result<UploadReceipt, GatewayError> {
        self.record("upload", Call::Upload(upload.email.clone()))?;
        let mut inner = self.inner.lock().unwrap();
        let next = format!("U{}", inner.applicants.len() + 1);
        let mut a = scored(applicant(&next, &upload.first_name, ApplicantStatus::New), 70);
        a.last_name = upload.last_name.clone();
        a.email = upload.email.clone();
        a.distance_miles = upload.distance_miles.unwrap_or_default();
        inner.applicants.push(a.clone());
        Ok(UploadReceipt {
            score_data: a.score_data.clone(),
            applicant: a,
        })
    }
}
