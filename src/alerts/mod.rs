//! Ephemeral notification and confirmation queue.
//! A constructed service shared by `Arc`, published through a watch channel
//! so any component can show alerts or render the queue without threading
//! the handle through every call site. Display order is insertion order and
//! nothing here is ever persisted.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::debug;
use uuid::Uuid;

pub const DEFAULT_ALERT_DURATION: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Error,
    Warning,
    Info,
    Confirm,
}

#[derive(Debug, Clone)]
pub struct Alert {
    pub id: Uuid,
    pub message: String,
    pub kind: AlertKind,
    /// Zero means sticky (never timer-dismissed). Advisory only for
    /// `Confirm`, which is sticky by construction.
    pub duration: Duration,
}

type ConfirmFn = Box<dyn FnOnce() + Send>;

struct ConfirmHandlers {
    on_confirm: ConfirmFn,
    on_cancel: ConfirmFn,
}

struct Inner {
    queue: Mutex<Vec<Alert>>,
    confirms: Mutex<HashMap<Uuid, ConfirmHandlers>>,
    published: watch::Sender<Vec<Alert>>,
}

impl Inner {
    fn publish(&self) {
        let snapshot = self.queue.lock().clone();
        let _ = self.published.send_replace(snapshot);
    }

    fn remove(&self, id: Uuid) -> bool {
        let removed = {
            let mut queue = self.queue.lock();
            let before = queue.len();
            queue.retain(|a| a.id != id);
            queue.len() != before
        };
        if removed {
            self.publish();
        }
        removed
    }
}

/// Handle to the alert queue. Show functions must run inside a tokio
/// runtime: timed dismissal is a spawned sleep.
#[derive(Clone)]
pub struct AlertService {
    inner: Arc<Inner>,
}

impl Default for AlertService {
    fn default() -> Self {
        Self::new()
    }
}

impl AlertService {
    pub fn new() -> Self {
        let (published, _) = watch::channel(Vec::new());
        Self {
            inner: Arc::new(Inner {
                queue: Mutex::new(Vec::new()),
                confirms: Mutex::new(HashMap::new()),
                published,
            }),
        }
    }

    /// Snapshot of the visible queue in display order.
    pub fn alerts(&self) -> Vec<Alert> {
        self.inner.queue.lock().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Alert>> {
        self.inner.published.subscribe()
    }

    /// Append an alert. Non-confirm alerts with a positive duration schedule
    /// exactly one deferred removal; removal is idempotent, so a manual
    /// dismissal racing the timer is harmless.
    pub fn show_alert(&self, message: impl Into<String>, kind: AlertKind, duration: Duration) -> Uuid {
        let id = Uuid::new_v4();
        let sticky = kind == AlertKind::Confirm || duration.is_zero();
        let alert = Alert { id, message: message.into(), kind, duration };
        self.inner.queue.lock().push(alert);
        self.inner.publish();

        if !sticky {
            // weak handle so a pending timer never keeps the service alive
            let weak = Arc::downgrade(&self.inner);
            tokio::spawn(async move {
                tokio::time::sleep(duration).await;
                if let Some(inner) = weak.upgrade() {
                    inner.remove(id);
                }
            });
        }
        id
    }

    pub fn show_success(&self, message: impl Into<String>) -> Uuid {
        self.show_alert(message, AlertKind::Success, DEFAULT_ALERT_DURATION)
    }

    pub fn show_error(&self, message: impl Into<String>) -> Uuid {
        self.show_alert(message, AlertKind::Error, DEFAULT_ALERT_DURATION)
    }

    pub fn show_warning(&self, message: impl Into<String>) -> Uuid {
        self.show_alert(message, AlertKind::Warning, DEFAULT_ALERT_DURATION)
    }

    pub fn show_info(&self, message: impl Into<String>) -> Uuid {
        self.show_alert(message, AlertKind::Info, DEFAULT_ALERT_DURATION)
    }

    /// Sticky confirmation. The service holds both callbacks and hands the
    /// pair out at most once, so exactly one of `on_confirm`/`on_cancel`
    /// fires exactly once and the alert leaves the queue on either choice.
    pub fn show_confirm(
        &self,
        message: impl Into<String>,
        on_confirm: impl FnOnce() + Send + 'static,
        on_cancel: impl FnOnce() + Send + 'static,
    ) -> Uuid {
        let id = Uuid::new_v4();
        let alert = Alert {
            id,
            message: message.into(),
            kind: AlertKind::Confirm,
            duration: Duration::ZERO,
        };
        self.inner.confirms.lock().insert(
            id,
            ConfirmHandlers { on_confirm: Box::new(on_confirm), on_cancel: Box::new(on_cancel) },
        );
        self.inner.queue.lock().push(alert);
        self.inner.publish();
        id
    }

    /// Resolve a confirmation positively. Returns false when the id is not
    /// a live confirm alert (already resolved, dismissed or never existed).
    pub fn confirm(&self, id: Uuid) -> bool {
        let Some(handlers) = self.inner.confirms.lock().remove(&id) else {
            return false;
        };
        (handlers.on_confirm)();
        self.inner.remove(id);
        true
    }

    /// Resolve a confirmation negatively; same contract as [`confirm`].
    ///
    /// [`confirm`]: AlertService::confirm
    pub fn cancel(&self, id: Uuid) -> bool {
        let Some(handlers) = self.inner.confirms.lock().remove(&id) else {
            return false;
        };
        (handlers.on_cancel)();
        self.inner.remove(id);
        true
    }

    /// Close a non-confirm alert early. Confirm alerts must be resolved
    /// through `confirm`/`cancel` so their exactly-once contract holds.
    pub fn dismiss(&self, id: Uuid) -> bool {
        let is_confirm = self
            .inner
            .queue
            .lock()
            .iter()
            .any(|a| a.id == id && a.kind == AlertKind::Confirm);
        if is_confirm {
            debug!("refusing to dismiss confirm alert {id}");
            return false;
        }
        self.inner.remove(id)
    }
}
