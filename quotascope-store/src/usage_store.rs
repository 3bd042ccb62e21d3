//! Main usage state store.
//!
//! Manages per-project usage summaries with change notifications for
//! long-running surfaces (watch mode, future GUIs).

use chrono::{DateTime, Utc};
use quotascope_core::UsageSummary;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::{watch, RwLock};
use tracing::debug;

// ============================================================================
// Inner State
// ============================================================================

/// Internal state for the usage store, keyed by project ref.
#[derive(Default)]
struct UsageStoreInner {
    /// Latest summary per project.
    summaries: HashMap<String, UsageSummary>,
    /// Error messages per project.
    errors: HashMap<String, String>,
    /// Projects currently refreshing.
    refreshing: HashSet<String>,
    /// When each summary was fetched.
    fetched_at: HashMap<String, DateTime<Utc>>,
    /// Last refresh across all projects.
    last_refresh: Option<DateTime<Utc>>,
}

// ============================================================================
// Usage Store
// ============================================================================

/// Observable store for per-project usage summaries.
pub struct UsageStore {
    inner: Arc<RwLock<UsageStoreInner>>,
    notify: watch::Sender<u64>,
    version: Arc<RwLock<u64>>,
}

impl Default for UsageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UsageStore {
    /// Creates a new usage store.
    pub fn new() -> Self {
        let (notify, _) = watch::channel(0);
        Self {
            inner: Arc::new(RwLock::new(UsageStoreInner::default())),
            notify,
            version: Arc::new(RwLock::new(0)),
        }
    }

    // ========================================================================
    // Summary Access
    // ========================================================================

    /// Gets the summary for a project.
    pub async fn get_summary(&self, project: &str) -> Option<UsageSummary> {
        self.inner.read().await.summaries.get(project).copied()
    }

    /// Sets the summary for a project, clearing any recorded error.
    pub async fn set_summary(&self, project: &str, summary: UsageSummary) {
        {
            let mut inner = self.inner.write().await;
            inner.summaries.insert(project.to_string(), summary);
            inner.errors.remove(project);
            let now = Utc::now();
            inner.fetched_at.insert(project.to_string(), now);
            inner.last_refresh = Some(now);
        }
        debug!(project, "Summary updated");
        self.notify_change().await;
    }

    /// Gets when a project's summary was fetched.
    pub async fn fetched_at(&self, project: &str) -> Option<DateTime<Utc>> {
        self.inner.read().await.fetched_at.get(project).copied()
    }

    // ========================================================================
    // Errors
    // ========================================================================

    /// Gets the recorded error for a project.
    pub async fn get_error(&self, project: &str) -> Option<String> {
        self.inner.read().await.errors.get(project).cloned()
    }

    /// Records an error for a project. The stale summary, if any, stays.
    pub async fn set_error(&self, project: &str, error: impl Into<String>) {
        {
            let mut inner = self.inner.write().await;
            inner.errors.insert(project.to_string(), error.into());
        }
        self.notify_change().await;
    }

    /// Clears the recorded error for a project.
    pub async fn clear_error(&self, project: &str) {
        let changed = {
            let mut inner = self.inner.write().await;
            inner.errors.remove(project).is_some()
        };
        if changed {
            self.notify_change().await;
        }
    }

    // ========================================================================
    // Refresh Tracking
    // ========================================================================

    /// Returns true if a project is currently refreshing.
    pub async fn is_refreshing(&self, project: &str) -> bool {
        self.inner.read().await.refreshing.contains(project)
    }

    /// Marks a project as refreshing or not.
    pub async fn set_refreshing(&self, project: &str, refreshing: bool) {
        {
            let mut inner = self.inner.write().await;
            if refreshing {
                inner.refreshing.insert(project.to_string());
            } else {
                inner.refreshing.remove(project);
            }
        }
        self.notify_change().await;
    }

    /// Returns the last refresh time across all projects.
    pub async fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.inner.read().await.last_refresh
    }

    // ========================================================================
    // Change Notification
    // ========================================================================

    /// Subscribes to store changes.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.notify.subscribe()
    }

    async fn notify_change(&self) {
        let mut version = self.version.write().await;
        *version += 1;
        let _ = self.notify.send(*version);
    }
}

// ============================================================================
// Tests
// ============================================================================
