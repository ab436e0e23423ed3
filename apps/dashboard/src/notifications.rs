//! Auto-expiring toast notifications.
//!
//! Every toast owns a TTL task that removes it after [`TOAST_TTL`]. Dismissing a toast
//! cancels that task through its [`CancellationToken`], so an explicit dismissal and a
//! later expiry can never both remove the same entry.

use crate::domain::Severity;
use chrono::{DateTime, Local};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub const TOAST_TTL: Duration = Duration::from_millis(5000);

/// Oldest toasts are dropped once this many are on screen.
pub const MAX_VISIBLE_TOASTS: usize = 5;

pub type ToastId = u64;

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub severity: Severity,
    pub created_at: DateTime<Local>,
}

impl Toast {
    pub const fn icon(&self) -> &'static str {
        self.severity.icon()
    }
}

#[derive(Debug)]
struct Entry {
    toast: Toast,
    timer: CancellationToken,
}

#[derive(Debug, Default)]
struct QueueState {
    next_id: ToastId,
    entries: Vec<Entry>,
}

/// Shared handle to the notification container. Clones refer to the same queue.
#[derive(Debug, Clone)]
pub struct ToastQueue {
    state: Arc<Mutex<QueueState>>,
    ttl: Duration,
    capacity: usize,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::with_limits(TOAST_TTL, MAX_VISIBLE_TOASTS)
    }

    pub fn with_limits(ttl: Duration, capacity: usize) -> Self {
        Self {
            state: Arc::new(Mutex::new(QueueState::default())),
            ttl,
            capacity: capacity.max(1),
        }
    }

    /// Appends a toast and schedules its removal. Must be called inside a tokio runtime.
    pub fn push(&self, message: impl Into<String>, severity: Severity) -> ToastId {
        let message = message.into();
        let timer = CancellationToken::new();

        let (id, evicted) = {
            let mut state = self.lock();
            let id = state.next_id;
            state.next_id += 1;

            let overflow = (state.entries.len() + 1).saturating_sub(self.capacity);
            let evicted: Vec<Entry> = state.entries.drain(..overflow).collect();

            state.entries.push(Entry {
                toast: Toast {
                    id,
                    message: message.clone(),
                    severity,
                    created_at: Local::now(),
                },
                timer: timer.clone(),
            });
            (id, evicted)
        };

        for entry in evicted {
            tracing::debug!(toast = entry.toast.id, "toast evicted by queue cap");
            entry.timer.cancel();
        }

        tracing::debug!(toast = id, severity = severity.as_str(), %message, "toast pushed");
        self.schedule_expiry(id, timer);
        id
    }

    /// Removes a toast before its TTL. Returns `false` if it was already gone.
    pub fn dismiss(&self, id: ToastId) -> bool {
        match self.remove(id) {
            Some(entry) => {
                entry.timer.cancel();
                tracing::debug!(toast = id, "toast dismissed");
                true
            }
            None => false,
        }
    }

    pub fn dismiss_newest(&self) -> bool {
        self.newest().is_some_and(|id| self.dismiss(id))
    }

    /// Snapshot in stack (insertion) order.
    pub fn visible(&self) -> Vec<Toast> {
        self.lock()
            .entries
            .iter()
            .map(|entry| entry.toast.clone())
            .collect()
    }

    pub fn newest(&self) -> Option<ToastId> {
        self.lock().entries.last().map(|entry| entry.toast.id)
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn schedule_expiry(&self, id: ToastId, timer: CancellationToken) {
        let queue = self.clone();
        let ttl = self.ttl;
        tokio::spawn(async move {
            tokio::select! {
                () = timer.cancelled() => {}
                () = tokio::time::sleep(ttl) => {
                    if queue.remove(id).is_some() {
                        tracing::debug!(toast = id, "toast expired");
                    }
                }
            }
        });
    }

    fn remove(&self, id: ToastId) -> Option<Entry> {
        let mut state = self.lock();
        let position = state
            .entries
            .iter()
            .position(|entry| entry.toast.id == id)?;
        Some(state.entries.remove(position))
    }

    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
