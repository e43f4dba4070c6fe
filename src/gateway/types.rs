//! Wire types exchanged with the remote recruiting service.
//!
//! The remote collaborator owns these shapes; fields it may omit carry
//! `#[serde(default)]` so a sparse payload still deserialises.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::pipeline::ApplicantStatus;

/// Stable, externally assigned applicant identifier (e.g. `PAY-0001`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicantId(pub String);

impl ApplicantId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApplicantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ApplicantId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ApplicantId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// The open role every applicant belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub department: String,
    pub location: String,
    /// Employment type ("Seasonal", "Full-time", ...). Serialised as `type`.
    #[serde(rename = "type", default)]
    pub employment_type: String,
    pub season: String,
    pub applicant_count: u32,
    #[serde(default)]
    pub loaded_count: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub scoring_criteria: BTreeMap<String, u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub title: String,
    pub company: String,
    pub years: u32,
    #[serde(default)]
    pub ski_related: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    #[serde(default)]
    pub weekends: bool,
    #[serde(default)]
    pub holidays: bool,
    #[serde(default)]
    pub early_am: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resume {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub availability: Availability,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl Resume {
    /// Years of experience flagged as ski-resort related.
    pub fn ski_years(&self) -> u32 {
        self.experience
            .iter()
            .filter(|e| e.ski_related)
            .map(|e| e.years)
            .sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub points: u32,
    pub max: u32,
}

/// Resume evaluation produced by the remote scoring pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreData {
    pub score: u32,
    pub max_score: u32,
    pub recommendation: String,
    #[serde(default)]
    pub badge: String,
    #[serde(default)]
    pub breakdown: BTreeMap<String, ScoreBreakdown>,
    #[serde(default)]
    pub reasons: Vec<String>,
}

/// Evaluation of a simulated candidate reply to an invite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseData {
    #[serde(default)]
    pub text: String,
    pub score: u32,
    pub max_score: u32,
    pub recommendation: String,
    #[serde(default)]
    pub breakdown: BTreeMap<String, ScoreBreakdown>,
    #[serde(default)]
    pub reasons: Vec<String>,
    #[serde(default)]
    pub received_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub title: String,
    pub date: String,
    pub time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub duration: String,
}

/// A candidate tracked through the hiring pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Applicant {
    pub id: ApplicantId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub distance_miles: f64,
    pub applied_date: NaiveDate,
    pub status: ApplicantStatus,
    #[serde(default)]
    pub resume: Resume,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_data: Option<ScoreData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_data: Option<ResponseData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar_event: Option<CalendarEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_sent_at: Option<DateTime<Utc>>,
}

impl Applicant {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Resume score, or `None` before the scoring pass has run.
    pub fn score(&self) -> Option<u32> {
        self.score_data.as_ref().map(|s| s.score)
    }
}

/// Whether an email action targets a simulated test inbox or the candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMode {
    #[default]
    Mock,
    Real,
}

impl fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryMode::Mock => write!(f, "mock"),
            DeliveryMode::Real => write!(f, "real"),
        }
    }
}

/// Rendered invite for one applicant, held for review before sending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailPreview {
    pub id: ApplicantId,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub body: String,
    #[serde(default)]
    pub questions: Vec<String>,
    #[serde(default)]
    pub mode: DeliveryMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkActionKind {
    SendInvite,
    BookInterview,
    Reject,
}

impl fmt::Display for BulkActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BulkActionKind::SendInvite => write!(f, "send_invite"),
            BulkActionKind::BookInterview => write!(f, "book_interview"),
            BulkActionKind::Reject => write!(f, "reject"),
        }
    }
}

/// Per-applicant line of a bulk action result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkItemResult {
    pub id: ApplicantId,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub action: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub mode: Option<DeliveryMode>,
    #[serde(default)]
    pub calendar_event: Option<CalendarEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkOutcome {
    pub action: BulkActionKind,
    pub processed: usize,
    #[serde(default)]
    pub results: Vec<BulkItemResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredEntry {
    pub id: ApplicantId,
    pub score: u32,
    #[serde(default)]
    pub recommendation: String,
}

fn default_threshold() -> u32 {
    75
}

/// Result of a full scoring pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub scored: usize,
    #[serde(default)]
    pub auto_promoted: usize,
    #[serde(default = "default_threshold")]
    pub threshold: u32,
    #[serde(default)]
    pub results: Vec<ScoredEntry>,
}

/// AI-drafted answer to a freeform candidate message. Held for human review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyDraft {
    pub applicant: String,
    pub received_message: String,
    pub ai_drafted_reply: String,
    #[serde(default)]
    pub sent_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncReport {
    #[serde(default)]
    pub refreshed: bool,
    pub applicant_count: usize,
}

/// Manually entered resume submitted for scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeUpload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub location: String,
    pub distance_miles: Option<f64>,
    pub resume_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub applicant: Applicant,
    #[serde(default)]
    pub score_data: Option<ScoreData>,
}
