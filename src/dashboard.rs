//! The dashboard state container and every intent a view can dispatch.
//!
//! Mutating intents always go to the remote service first and then reload the
//! whole snapshot; nothing is applied optimistically, so a failed call leaves
//! local state (selection, held previews, panel) exactly as it was.

use std::collections::HashMap;
use std::sync::{Arc, MutexGuard};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::board::{BoardFilter, PipelineSummary};
use crate::gateway::{
    Applicant, ApplicantId, BulkActionKind, BulkOutcome, DeliveryMode, EmailPreview, Gateway,
    GatewayError, ReplyDraft, ResumeUpload, ScoreSummary, SyncReport, UploadReceipt,
};
use crate::pipeline::{ApplicantStatus, DragState, DropOutcome};
use crate::scheduler::{PendingResponse, ResponseScheduler, ScheduleConfig};
use crate::selection::SelectionSet;
use crate::store::{self, EntityStore, SharedStore};

/// Distance assumed for an uploaded resume that gives none.
pub const DEFAULT_UPLOAD_DISTANCE_MILES: f64 = 50.0;

#[derive(Debug, Error)]
pub enum DashboardError {
    /// Validation failure: a bulk intent was dispatched with nothing selected.
    #[error("Select at least one applicant")]
    EmptySelection,

    #[error("No email previews are held; request a preview first")]
    NoPreviews,

    #[error("{0} is required")]
    MissingUploadField(&'static str),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Single-step bulk actions. Invites go through the preview flow instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkStatusAction {
    Reject,
    BookInterview,
}

impl BulkStatusAction {
    pub fn kind(self) -> BulkActionKind {
        match self {
            BulkStatusAction::Reject => BulkActionKind::Reject,
            BulkStatusAction::BookInterview => BulkActionKind::BookInterview,
        }
    }

    fn done_label(self) -> &'static str {
        match self {
            BulkStatusAction::Reject => "rejected",
            BulkStatusAction::BookInterview => "interviews booked",
        }
    }
}

/// The applicant detail panel, if open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePanel {
    pub applicant_id: ApplicantId,
    /// Mirror of the applicant's status, refreshed after every reload.
    pub status: ApplicantStatus,
}

/// Result of a confirmed invite send.
#[derive(Debug, Clone, PartialEq)]
pub struct SendReport {
    pub sent: Vec<ApplicantId>,
    pub mode: DeliveryMode,
    pub outcome: BulkOutcome,
    /// Response timers armed for a mock send; empty for a real one.
    pub scheduled: Vec<PendingResponse>,
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Owns all client-side state and serialises intents through `&mut self`.
/// Only scheduler tasks run alongside an intent, and they touch the store
/// exclusively through [`EntityStore::patch_applicant`].
pub struct Dashboard<G: Gateway> {
    gateway: Arc<G>,
    store: SharedStore,
    selection: SelectionSet,
    panel: Option<ActivePanel>,
    previews: Option<Vec<EmailPreview>>,
    drag: DragState,
    notices: Vec<String>,
    scheduler: ResponseScheduler<G>,
}

impl<G: Gateway> Dashboard<G> {
    pub fn new(gateway: G, schedule: ScheduleConfig) -> Self {
        Self::with_gateway(Arc::new(gateway), schedule)
    }

    pub fn with_gateway(gateway: Arc<G>, schedule: ScheduleConfig) -> Self {
        let store = EntityStore::shared();
        let scheduler = ResponseScheduler::new(Arc::clone(&gateway), Arc::clone(&store), schedule);
        Self {
            gateway,
            store,
            selection: SelectionSet::new(),
            panel: None,
            previews: None,
            drag: DragState::default(),
            notices: Vec::new(),
            scheduler,
        }
    }

    // --- Read access -------------------------------------------------------

    /// Locked view of the entity store. Do not hold across an `.await`.
    pub fn store(&self) -> MutexGuard<'_, EntityStore> {
        store::lock(&self.store)
    }

    pub fn snapshot(&self) -> EntityStore {
        self.store().clone()
    }

    pub fn applicant(&self, id: &ApplicantId) -> Option<Applicant> {
        self.store().get(id).cloned()
    }

    pub fn visible(&self, filter: &BoardFilter) -> Vec<Applicant> {
        filter.visible(&self.store()).into_iter().cloned().collect()
    }

    pub fn summary(&self) -> PipelineSummary {
        PipelineSummary::from_store(&self.store())
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn active_panel(&self) -> Option<&ActivePanel> {
        self.panel.as_ref()
    }

    pub fn held_previews(&self) -> Option<&[EmailPreview]> {
        self.previews.as_deref()
    }

    pub fn scheduler(&self) -> &ResponseScheduler<G> {
        &self.scheduler
    }

    /// Drain transient user notices, oldest first.
    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    fn notify(&mut self, message: String) {
        info!(notice = %message);
        self.notices.push(message);
    }

    fn empty_selection(&mut self) -> DashboardError {
        let err = DashboardError::EmptySelection;
        self.notify(err.to_string());
        err
    }

    // --- Entity store ------------------------------------------------------

    /// Fetch job and applicants together and replace the snapshot wholesale,
    /// then reconcile the selection and the open panel by identifier.
    pub async fn reload(&mut self) -> Result<(), DashboardError> {
        let (job, applicants) =
            tokio::try_join!(self.gateway.fetch_job(), self.gateway.fetch_applicants())?;

        let mut store = store::lock(&self.store);
        store.replace(job, applicants);
        self.selection.reconcile(&store);

        if let Some(panel) = self.panel.as_mut() {
            match store.status_of(&panel.applicant_id) {
                Some(status) => panel.status = status,
                None => {
                    debug!(applicant = %panel.applicant_id, "panel applicant gone after reload; closing");
                    self.panel = None;
                }
            }
        }
        debug!(applicants = store.len(), "snapshot replaced");
        Ok(())
    }

    // --- Selection & panel -------------------------------------------------

    /// Flip an applicant's selection. Unknown identifiers are ignored.
    pub fn toggle_select(&mut self, id: &ApplicantId) -> bool {
        if !self.store().contains(id) {
            return false;
        }
        self.selection.toggle(id.clone())
    }

    /// Add an applicant to the selection. Unknown identifiers are ignored.
    pub fn select(&mut self, id: &ApplicantId) -> bool {
        if !self.store().contains(id) {
            return false;
        }
        self.selection.insert(id.clone())
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn open_panel(&mut self, id: &ApplicantId) -> bool {
        let status = self.store().status_of(id);
        match status {
            Some(status) => {
                self.panel = Some(ActivePanel {
                    applicant_id: id.clone(),
                    status,
                });
                true
            }
            None => false,
        }
    }

    pub fn close_panel(&mut self) {
        self.panel = None;
    }

    // --- Pipeline transitions ----------------------------------------------

    /// Ask the service to move an applicant, then reload.
    ///
    /// A pending simulated response for the applicant is cancelled: once its
    /// stage is changed by hand, the reply flow no longer applies.
    pub async fn change_status(
        &mut self,
        id: &ApplicantId,
        target: ApplicantStatus,
    ) -> Result<(), DashboardError> {
        let current = self.store().status_of(id);
        if let Some(current) = current {
            debug!(applicant = %id, from = %current, to = %target, kind = ?current.transition_to(target), "status change");
        }

        self.gateway.update_status(id, target).await?;
        if self.scheduler.cancel(id) {
            info!(applicant = %id, "pending response cancelled by status change");
        }
        // Reload refreshes the panel's status mirror if it shows this applicant.
        self.reload().await
    }

    pub fn begin_drag(&mut self, id: &ApplicantId) {
        self.drag.begin(id.clone());
    }

    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
    }

    /// Drop the dragged applicant onto `column`. No request is issued when
    /// nothing is dragged or the applicant already sits in that column.
    pub async fn drop_on(&mut self, column: ApplicantStatus) -> Result<DropOutcome, DashboardError> {
        let outcome = {
            let store = store::lock(&self.store);
            self.drag.drop_on(column, |id| store.status_of(id))
        };
        if let DropOutcome::Move { id, to, .. } = &outcome {
            self.change_status(id, *to).await?;
        } else {
            debug!(?outcome, "drop ignored");
        }
        Ok(outcome)
    }

    // --- Scoring -----------------------------------------------------------

    pub async fn score_all(&mut self) -> Result<ScoreSummary, DashboardError> {
        let summary = self.gateway.score_all().await?;
        self.reload().await?;
        let message = if summary.auto_promoted > 0 {
            format!(
                "Scored {} candidates — {} auto-promoted to Reviewing (score ≥ {})",
                summary.scored, summary.auto_promoted, summary.threshold
            )
        } else {
            format!("All {} candidates scored", summary.scored)
        };
        self.notify(message);
        Ok(summary)
    }

    // --- Invite preview → confirm → send -----------------------------------

    /// Render invites for the current selection and hold them for review.
    /// Nothing is sent.
    pub async fn preview_and_send(&mut self) -> Result<&[EmailPreview], DashboardError> {
        if self.selection.is_empty() {
            return Err(self.empty_selection());
        }
        let previews = self.gateway.preview_emails(self.selection.ids()).await?;
        Ok(self.previews.insert(previews).as_slice())
    }

    /// Render and hold an invite for one applicant, bypassing the selection.
    pub async fn preview_single(&mut self, id: &ApplicantId) -> Result<&[EmailPreview], DashboardError> {
        let previews = self.gateway.preview_emails(std::slice::from_ref(id)).await?;
        Ok(self.previews.insert(previews).as_slice())
    }

    pub fn discard_previews(&mut self) {
        self.previews = None;
    }

    /// Send the held invites, clear selection and previews, reload, and arm
    /// response timers when the batch went out in mock mode.
    ///
    /// Once the service accepts the batch, local state is settled even if the
    /// following reload fails; that reload error is then returned.
    pub async fn confirm_send(&mut self) -> Result<SendReport, DashboardError> {
        let previews = match self.previews.as_deref() {
            Some(p) if !p.is_empty() => p,
            _ => return Err(DashboardError::NoPreviews),
        };

        let ids: Vec<ApplicantId> = previews.iter().map(|p| p.id.clone()).collect();
        let names: HashMap<ApplicantId, String> = previews
            .iter()
            .map(|p| (p.id.clone(), p.name.clone()))
            .collect();
        let mode = previews[0].mode;
        if previews.iter().any(|p| p.mode != mode) {
            warn!(%mode, "previews disagree on delivery mode; using the first");
        }

        let outcome = self
            .gateway
            .bulk_action(&ids, BulkActionKind::SendInvite)
            .await?;

        // The invites are out: drop what could send them again before the
        // reload, which may fail on its own.
        self.selection.clear();
        self.previews = None;
        let reloaded = self.reload().await;

        let scheduled = match mode {
            DeliveryMode::Mock => self.scheduler.schedule_responses(&ids, &names),
            DeliveryMode::Real => Vec::new(),
        };

        self.notify(format!(
            "{} personalised invite{} sent",
            ids.len(),
            plural(ids.len())
        ));
        reloaded?;
        Ok(SendReport {
            sent: ids,
            mode,
            outcome,
            scheduled,
        })
    }

    // --- Bulk status actions -----------------------------------------------

    pub async fn bulk_action(
        &mut self,
        action: BulkStatusAction,
    ) -> Result<BulkOutcome, DashboardError> {
        if self.selection.is_empty() {
            return Err(self.empty_selection());
        }
        let ids = self.selection.ids().to_vec();

        let outcome = self.gateway.bulk_action(&ids, action.kind()).await?;
        for id in &ids {
            self.scheduler.cancel(id);
        }
        self.selection.clear();
        self.notify(format!("{} {}", outcome.processed, action.done_label()));

        self.reload().await?;
        Ok(outcome)
    }

    // --- Candidate replies -------------------------------------------------

    /// Draft an answer to a freeform message from the open panel's applicant.
    /// Returns `None` without a request when no panel is open or the message
    /// is blank. The draft is for review; it is never sent from here.
    pub async fn draft_reply(&mut self, message: &str) -> Result<Option<ReplyDraft>, DashboardError> {
        let Some(panel) = self.panel.as_ref() else {
            return Ok(None);
        };
        if message.trim().is_empty() {
            return Ok(None);
        }
        let id = panel.applicant_id.clone();
        let draft = self.gateway.simulate_reply(&id, message).await?;
        Ok(Some(draft))
    }

    // --- Remote resync -----------------------------------------------------

    /// Pull a fresh collection from the HR system. Every pending response
    /// timer is cancelled before the new snapshot lands.
    pub async fn resync(&mut self) -> Result<SyncReport, DashboardError> {
        let report = self.gateway.resync().await?;
        self.scheduler.cancel_all();
        self.selection.clear();
        self.previews = None;
        self.panel = None;
        self.notify(format!(
            "Pulled {} applicants from Paycom. All scores reset.",
            report.applicant_count
        ));

        self.reload().await?;
        Ok(report)
    }

    // --- Manual upload -----------------------------------------------------

    pub async fn upload_resume(
        &mut self,
        mut upload: ResumeUpload,
    ) -> Result<UploadReceipt, DashboardError> {
        let required = [
            ("first name", &upload.first_name),
            ("last name", &upload.last_name),
            ("email", &upload.email),
            ("resume text", &upload.resume_text),
        ];
        if let Some((field, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
            let err = DashboardError::MissingUploadField(*field);
            self.notify(err.to_string());
            return Err(err);
        }
        upload.distance_miles = Some(upload.distance_miles.unwrap_or(DEFAULT_UPLOAD_DISTANCE_MILES));

        let receipt = self.gateway.upload_resume(&upload).await?;
        self.reload().await?;
        self.notify("Resume added and scored".to_string());
        Ok(receipt)
    }

    /// Cancel background work. Also happens when the dashboard is dropped.
    pub fn shutdown(&self) {
        self.scheduler.cancel_all();
    }
}
