//! Deferred, cancellable polling for simulated candidate responses.
//!
//! After a mock-mode invite is confirmed, one timer per applicant is armed.
//! When a timer fires it asks the remote service for the simulated reply,
//! patches that applicant in the shared store and records a notification.
//! Timers are keyed by applicant identifier; each carries a ticket so a task
//! that was cancelled (or replaced) while its request was in flight discards
//! its result instead of patching.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::gateway::{ApplicantId, Gateway};
use crate::store::{self, ApplicantPatch, SharedStore};

/// Fire-delay policy for a batch of timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleConfig {
    /// Delay before the first applicant's response.
    pub base_delay: Duration,
    /// Added per position in the batch so notifications do not arrive together.
    pub stagger: Duration,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            base_delay: Duration::from_millis(5000),
            stagger: Duration::from_millis(800),
        }
    }
}

impl ScheduleConfig {
    /// delay = base_delay + index * stagger
    pub fn delay_for_index(&self, index: usize) -> Duration {
        let index = u32::try_from(index).unwrap_or(u32::MAX);
        self.base_delay
            .saturating_add(self.stagger.saturating_mul(index))
    }
}

fn millis(delay: Duration) -> u64 {
    u64::try_from(delay.as_millis()).unwrap_or(u64::MAX)
}

/// A simulated response that has arrived and been applied to the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseNotification {
    pub id: Uuid,
    pub applicant_id: ApplicantId,
    pub name: String,
    pub score: u32,
    pub recommendation: String,
    pub received_at: DateTime<Utc>,
}

/// A timer that has been armed and has not yet resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingResponse {
    pub applicant_id: ApplicantId,
    pub delay: Duration,
}

struct PendingTimer {
    ticket: u64,
    delay: Duration,
    handle: JoinHandle<()>,
}

#[derive(Default)]
struct SchedulerState {
    timers: HashMap<ApplicantId, PendingTimer>,
    notifications: Vec<ResponseNotification>,
}

type SharedState = Arc<Mutex<SchedulerState>>;

fn lock_state(state: &SharedState) -> MutexGuard<'_, SchedulerState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Owns every live response timer. Dropping the scheduler cancels them all.
pub struct ResponseScheduler<G: Gateway> {
    gateway: Arc<G>,
    store: SharedStore,
    config: ScheduleConfig,
    state: SharedState,
    next_ticket: AtomicU64,
}

impl<G: Gateway> ResponseScheduler<G> {
    pub fn new(gateway: Arc<G>, store: SharedStore, config: ScheduleConfig) -> Self {
        Self {
            gateway,
            store,
            config,
            state: Arc::default(),
            next_ticket: AtomicU64::new(1),
        }
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Arm one timer per identifier, staggered by position.
    ///
    /// Arming an identifier that already has a live timer is a caller error:
    /// the old timer is aborted and replaced so at most one exists per applicant.
    pub fn schedule_responses(
        &self,
        ids: &[ApplicantId],
        display_names: &HashMap<ApplicantId, String>,
    ) -> Vec<PendingResponse> {
        let mut state = lock_state(&self.state);
        let mut armed = Vec::with_capacity(ids.len());

        for (index, id) in ids.iter().enumerate() {
            let delay = self.config.delay_for_index(index);
            let ticket = self.next_ticket.fetch_add(1, Ordering::Relaxed);
            let name = display_names
                .get(id)
                .cloned()
                .unwrap_or_else(|| id.to_string());

            let handle = tokio::spawn(fire(
                Arc::clone(&self.gateway),
                Arc::clone(&self.store),
                Arc::clone(&self.state),
                id.clone(),
                name,
                ticket,
                delay,
            ));

            if let Some(previous) = state.timers.insert(
                id.clone(),
                PendingTimer {
                    ticket,
                    delay,
                    handle,
                },
            ) {
                warn!(applicant = %id, "response timer re-armed without cancellation");
                previous.handle.abort();
            }
            debug!(applicant = %id, delay_ms = millis(delay), "response timer armed");
            armed.push(PendingResponse {
                applicant_id: id.clone(),
                delay,
            });
        }
        armed
    }

    /// Cancel one applicant's timer. Returns `true` if one was live.
    pub fn cancel(&self, id: &ApplicantId) -> bool {
        let removed = lock_state(&self.state).timers.remove(id);
        match removed {
            Some(timer) => {
                timer.handle.abort();
                debug!(applicant = %id, "response timer cancelled");
                true
            }
            None => false,
        }
    }

    /// Cancel every live timer without running its body and clear notifications.
    pub fn cancel_all(&self) {
        let mut state = lock_state(&self.state);
        let cancelled = state.timers.len();
        for (_, timer) in state.timers.drain() {
            timer.handle.abort();
        }
        state.notifications.clear();
        if cancelled > 0 {
            info!(cancelled, "cancelled pending response timers");
        }
    }

    /// Live timers, ordered by fire delay.
    pub fn pending(&self) -> Vec<PendingResponse> {
        let state = lock_state(&self.state);
        let mut pending: Vec<_> = state
            .timers
            .iter()
            .map(|(id, timer)| PendingResponse {
                applicant_id: id.clone(),
                delay: timer.delay,
            })
            .collect();
        pending.sort_by(|a, b| {
            a.delay
                .cmp(&b.delay)
                .then_with(|| a.applicant_id.cmp(&b.applicant_id))
        });
        pending
    }

    pub fn live_count(&self) -> usize {
        lock_state(&self.state).timers.len()
    }

    pub fn is_armed(&self, id: &ApplicantId) -> bool {
        lock_state(&self.state).timers.contains_key(id)
    }

    /// Notifications in arrival order.
    pub fn notifications(&self) -> Vec<ResponseNotification> {
        lock_state(&self.state).notifications.clone()
    }

    /// Remove one notification. Returns `true` if it existed.
    pub fn dismiss(&self, notification_id: Uuid) -> bool {
        let mut state = lock_state(&self.state);
        let before = state.notifications.len();
        state.notifications.retain(|n| n.id != notification_id);
        state.notifications.len() != before
    }
}

impl<G: Gateway> Drop for ResponseScheduler<G> {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

async fn fire<G: Gateway>(
    gateway: Arc<G>,
    store: SharedStore,
    state: SharedState,
    id: ApplicantId,
    name: String,
    ticket: u64,
    delay: Duration,
) {
    sleep(delay).await;
    let result = gateway.simulate_response(&id).await;

    let mut state = lock_state(&state);
    // Cancelled or replaced while the request was in flight.
    if state.timers.get(&id).map(|t| t.ticket) != Some(ticket) {
        debug!(applicant = %id, "discarding response for cancelled timer");
        return;
    }
    state.timers.remove(&id);

    let response = match result {
        Ok(response) => response,
        Err(e) => {
            debug!(applicant = %id, error = %e, "simulated response failed; dropped");
            return;
        }
    };

    let notification = ResponseNotification {
        id: Uuid::new_v4(),
        applicant_id: id.clone(),
        name,
        score: response.score,
        recommendation: response.recommendation.clone(),
        received_at: response.received_at.unwrap_or_else(Utc::now),
    };

    match store::lock(&store).patch_applicant(&id, ApplicantPatch::response(response)) {
        Ok(()) => {
            info!(applicant = %id, score = notification.score, "simulated response arrived");
            state.notifications.push(notification);
        }
        Err(e) => warn!(applicant = %id, error = %e, "simulated response not applied"),
    }
}
