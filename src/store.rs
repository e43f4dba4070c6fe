//! In-memory snapshot of the job posting and its applicants.
//!
//! Exactly two mutation modes exist: [`EntityStore::replace`] swaps the whole
//! snapshot after a reload, and [`EntityStore::patch_applicant`] updates one
//! applicant in place when a simulated response arrives.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;

use crate::gateway::{Applicant, ApplicantId, JobPosting, ResponseData};
use crate::pipeline::ApplicantStatus;

/// Store handle shared between the dashboard and scheduler tasks.
pub type SharedStore = Arc<Mutex<EntityStore>>;

/// Lock a shared store. Every critical section leaves the snapshot
/// consistent, so a poisoned lock is still usable.
pub fn lock(store: &SharedStore) -> MutexGuard<'_, EntityStore> {
    store.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("applicant {0} is not in the current snapshot")]
    UnknownApplicant(ApplicantId),

    #[error("applicant {0} has no invite on record; response refused")]
    ResponseBeforeInvite(ApplicantId),
}

/// Partial update applied by [`EntityStore::patch_applicant`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicantPatch {
    pub response_data: Option<ResponseData>,
}

impl ApplicantPatch {
    pub fn response(data: ResponseData) -> Self {
        Self {
            response_data: Some(data),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct EntityStore {
    job: Option<JobPosting>,
    applicants: Vec<Applicant>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedStore {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Replace the snapshot wholesale. Nothing from the previous snapshot survives.
    pub fn replace(&mut self, job: JobPosting, applicants: Vec<Applicant>) {
        self.job = Some(job);
        self.applicants = applicants;
    }

    /// Update one applicant in place.
    ///
    /// A response is refused unless the applicant already has `email_sent_at`.
    pub fn patch_applicant(
        &mut self,
        id: &ApplicantId,
        patch: ApplicantPatch,
    ) -> Result<(), StoreError> {
        let applicant = self
            .applicants
            .iter_mut()
            .find(|a| &a.id == id)
            .ok_or_else(|| StoreError::UnknownApplicant(id.clone()))?;

        if let Some(response) = patch.response_data {
            if applicant.email_sent_at.is_none() {
                return Err(StoreError::ResponseBeforeInvite(id.clone()));
            }
            applicant.response_data = Some(response);
        }
        Ok(())
    }

    pub fn job(&self) -> Option<&JobPosting> {
        self.job.as_ref()
    }

    pub fn applicants(&self) -> &[Applicant] {
        &self.applicants
    }

    pub fn get(&self, id: &ApplicantId) -> Option<&Applicant> {
        self.applicants.iter().find(|a| &a.id == id)
    }

    pub fn contains(&self, id: &ApplicantId) -> bool {
        self.get(id).is_some()
    }

    pub fn status_of(&self, id: &ApplicantId) -> Option<ApplicantStatus> {
        self.get(id).map(|a| a.status)
    }

    pub fn len(&self) -> usize {
        self.applicants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.applicants.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{NaiveDate, TimeZone, Utc};

    use super::*;
    use crate::gateway::types::Resume;

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

    pub fn applicant(id: &str, status: ApplicantStatus) -> Applicant {
        Applicant {
            id: ApplicantId::from(id),
            first_name: format!("First{id}"),
            last_name: "Tester".into(),
            email: format!("{}@example.com", id.to_lowercase()),
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

    pub fn invited(id: &str) -> Applicant {
        let mut a = applicant(id, ApplicantStatus::AwaitingReply);
        a.email_sent_at = Some(Utc.with_ymd_and_hms(2026, 2, 20, 9, 0, 0).unwrap());
        a
    }

    pub fn response(score: u32) -> ResponseData {
        ResponseData {
            text: "Yes, I can confirm.".into(),
            score,
            max_score: 50,
            recommendation: "Strong".into(),
            breakdown: Default::default(),
            reasons: Vec::new(),
            received_at: None,
        }
    }
}
