//! Transient, auto-dismissing feedback messages.
//!
//! Multiple notifications may be visible at once and are independently
//! dismissible. Nothing is persisted and nothing is deduplicated.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::debug;
use uuid::Uuid;

const DEFAULT_TOAST_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Danger,
}

/// A single visible notification.
#[derive(Debug, Clone)]
pub struct Toast {
    pub id: Uuid,
    pub message: String,
    pub severity: Severity,
    expires_at: Instant,
}

impl Toast {
    fn is_expired(&self) -> bool {
        Instant::now() > self.expires_at
    }
}

/// Cloneable handle to the notification queue.
#[derive(Debug, Clone)]
pub struct Notifier {
    toasts: Arc<Mutex<Vec<Toast>>>,
    ttl: Duration,
}

impl Notifier {
    pub fn new(ttl: Duration) -> Self {
        Self {
            toasts: Arc::new(Mutex::new(Vec::new())),
            ttl,
        }
    }

    /// Enqueues a message that auto-dismisses after the fixed duration.
    pub fn notify(&self, message: impl Into<String>, severity: Severity) -> Uuid {
        let toast = Toast {
            id: Uuid::new_v4(),
            message: message.into(),
            severity,
            expires_at: Instant::now() + self.ttl,
        };
        let id = toast.id;
        debug!(%id, ?severity, "notification raised");
        self.toasts.lock().unwrap().push(toast);
        id
    }

    /// Currently visible notifications, pruning any that have expired.
    pub fn active(&self) -> Vec<Toast> {
        let mut toasts = self.toasts.lock().unwrap();
        toasts.retain(|t| !t.is_expired());
        toasts.clone()
    }

    /// Dismisses one notification without touching the others.
    pub fn dismiss(&self, id: Uuid) {
        self.toasts.lock().unwrap().retain(|t| t.id != id);
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_TTL)
    }
}
