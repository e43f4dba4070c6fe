pub mod client;
pub mod error;
pub mod types;

pub use client::{Gateway, HttpGateway};
pub use error::GatewayError;
pub use types::{
    Applicant, ApplicantId, BulkActionKind, BulkOutcome, CalendarEvent, DeliveryMode,
    EmailPreview, JobPosting, ReplyDraft, ResponseData, ResumeUpload, ScoreData, ScoreSummary,
    SyncReport, UploadReceipt,
};
