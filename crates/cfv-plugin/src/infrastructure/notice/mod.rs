//! Transient user notifications.
//!
//! The host shows short-lived messages ("notices") that disappear on their
//! own.  The plugin raises one only when an external program fails to start.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tracing::warn;

/// How long a notice stays visible unless the caller chooses otherwise.
pub const DEFAULT_NOTICE_TIMEOUT: Duration = Duration::from_secs(5);

/// A message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub timeout: Duration,
}

impl Notice {
    /// A notice shown for [`DEFAULT_NOTICE_TIMEOUT`].
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timeout: DEFAULT_NOTICE_TIMEOUT,
        }
    }
}

/// Host facility that displays notices.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &Notice);
}

/// Notifier for the command-line host: prints to stderr and logs.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: &Notice) {
        warn!(timeout_ms = notice.timeout.as_millis() as u64, "notice: {}", notice.message);
        eprintln!("{}", notice.message);
    }
}

/// Notifier that keeps every notice for later inspection.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every notice raised so far, oldest first.
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: &Notice) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice.clone());
    }
}
