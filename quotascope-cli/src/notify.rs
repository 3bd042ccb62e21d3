//! User notifications.
//!
//! Fetch failures surface as toast-style messages, not as a blocked panel.
//! [`ErrorNotifier`] keys emissions on the failure's identity so the same
//! error observed across many re-renders notifies exactly once.

use quotascope_fetch::UsageView;
use tracing::debug;

// ============================================================================
// Notifications
// ============================================================================

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationCategory {
    /// Error-level notification.
    Error,
    /// Informational notification.
    Info,
}

/// A user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Severity of the notification.
    pub category: NotificationCategory,
    /// Message text.
    pub message: String,
}

/// Sink that delivers notifications to the user.
pub trait NotificationSink {
    /// Delivers one notification.
    fn notify(&mut self, notification: Notification);
}

/// Sink printing toast-style messages to stderr.
pub struct StderrSink {
    use_colors: bool,
}

impl StderrSink {
    /// Creates a stderr sink.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }
}

impl NotificationSink for StderrSink {
    fn notify(&mut self, notification: Notification) {
        let prefix = match notification.category {
            NotificationCategory::Error => {
                if self.use_colors {
                    "\x1b[31m✖\x1b[0m"
                } else {
                    "✖"
                }
            }
            NotificationCategory::Info => "•",
        };
        eprintln!("{prefix} {}", notification.message);
    }
}

// ============================================================================
// Error Notifier
// ============================================================================

/// Emits one error notification per distinct fetch failure.
///
/// Keyed on [`quotascope_fetch::FetchFailure::seq`]: observing the same view
/// again (a re-render) is silent; a new failure notifies again even if its
/// message text is identical.
#[derive(Debug, Default)]
pub struct ErrorNotifier {
    last_seq: Option<u64>,
}

impl ErrorNotifier {
    /// Creates a notifier with no observed failures.
    pub fn new() -> Self {
        Self::default()
    }

    /// Observes a view snapshot, notifying if it carries a new failure.
    ///
    /// Returns true if a notification was emitted.
    pub fn observe(&mut self, view: &UsageView, sink: &mut dyn NotificationSink) -> bool {
        let Some(failure) = &view.error else {
            return false;
        };

        if self.last_seq == Some(failure.seq) {
            return false;
        }
        self.last_seq = Some(failure.seq);

        debug!(seq = failure.seq, "Notifying fetch failure");
        let detail = failure.message.as_deref().unwrap_or("unknown");
        sink.notify(Notification {
            category: NotificationCategory::Error,
            message: format!("Failed to get project's usage data: {detail}"),
        });
        true
    }
}

// ============================================================================
// Tests
// ============================================================================
