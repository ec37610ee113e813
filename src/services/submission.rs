/*
 * Responsibility
 * - 送信/取得アクションの状態遷移 (Idle → Submitting → Success | Failed)
 * - generation ticket で古いレスポンスを捨てる (last-writer-wins を防ぐ)
 */
use std::sync::{Mutex, MutexGuard};

use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SubmissionState {
    Idle,
    Submitting { attempt_id: Uuid },
    Success { attempt_id: Uuid, message: String },
    Failed { attempt_id: Uuid, message: String },
}

/// Handed out by [`SubmissionTracker::begin`]; only the newest ticket may
/// move the tracker out of `Submitting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    attempt_id: Uuid,
}

impl Ticket {
    pub fn attempt_id(&self) -> Uuid {
        self.attempt_id
    }
}

#[derive(Debug)]
struct Inner {
    generation: u64,
    state: SubmissionState,
}

#[derive(Debug)]
pub struct SubmissionTracker {
    name: &'static str,
    inner: Mutex<Inner>,
}

impl SubmissionTracker {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            inner: Mutex::new(Inner {
                generation: 0,
                state: SubmissionState::Idle,
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    // A poisoned lock only means another request panicked mid-update; the
    // state itself is always a complete value.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Enter `Submitting`, superseding any attempt still in flight.
    pub fn begin(&self) -> Ticket {
        let mut inner = self.lock();
        inner.generation += 1;
        let ticket = Ticket {
            generation: inner.generation,
            attempt_id: Uuid::new_v4(),
        };
        inner.state = SubmissionState::Submitting {
            attempt_id: ticket.attempt_id,
        };
        ticket
    }

    pub fn succeed(&self, ticket: Ticket, message: impl Into<String>) -> bool {
        self.finish(
            ticket,
            SubmissionState::Success {
                attempt_id: ticket.attempt_id,
                message: message.into(),
            },
        )
    }

    pub fn fail(&self, ticket: Ticket, message: impl Into<String>) -> bool {
        self.finish(
            ticket,
            SubmissionState::Failed {
                attempt_id: ticket.attempt_id,
                message: message.into(),
            },
        )
    }

    /// Returns `false` (and changes nothing) when a newer attempt has started.
    fn finish(&self, ticket: Ticket, state: SubmissionState) -> bool {
        let mut inner = self.lock();
        if inner.generation != ticket.generation {
            tracing::debug!(
                tracker = self.name,
                attempt = %ticket.attempt_id,
                "discarding stale response"
            );
            return false;
        }
        inner.state = state;
        true
    }

    pub fn current(&self) -> SubmissionState {
        self.lock().state.clone()
    }
}
